use std::path::PathBuf;

use anyhow::Context as _;
use mergris_agent::{Agent, AgentConfig, PlayerAgent};
use mergris_engine::{BagSeed, TileBag};
use mergris_stats::DescriptiveStats;

use crate::{
    episode::{self, EpisodeStats},
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Number of episodes to play
    #[arg(long, default_value_t = 1)]
    episodes: usize,
    /// Weight file to play with; zero weights when omitted
    #[arg(long)]
    load: Option<PathBuf>,
    /// Seed for the environment agent and the tile bag
    #[arg(long)]
    seed: Option<u64>,
    /// Where to write the JSON report (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// JSON report of a play run.
#[derive(Debug, serde::Serialize)]
struct PlayReport {
    episodes: Vec<EpisodeStats>,
    mean_score: f32,
    best_score: f32,
    best_tile: u32,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let player_config = AgentConfig {
        name: "greedy".to_owned(),
        role: "player".to_owned(),
        seed: None,
        alpha: None,
        init: arg.load.is_none(),
        load: arg.load.clone(),
        save: None,
    };
    let environment_config = AgentConfig {
        name: "placer".to_owned(),
        role: "environment".to_owned(),
        seed: arg.seed,
        alpha: None,
        init: false,
        load: None,
        save: None,
    };

    let mut player =
        PlayerAgent::from_config(&player_config).context("failed to build the player agent")?;
    // Evaluation only: a zero update rate freezes the weights.
    player.set_beta(0.0);
    let mut player = Agent::Player(player);
    let mut environment =
        Agent::from_config(&environment_config).context("failed to build the environment agent")?;
    let mut bag = match arg.seed {
        Some(seed) => TileBag::with_seed(BagSeed::from_u64(seed)),
        None => TileBag::new(),
    };

    let episodes: Vec<EpisodeStats> = (0..arg.episodes)
        .map(|_| episode::run_episode(&mut player, &mut environment, &mut bag))
        .collect();

    #[expect(clippy::cast_precision_loss)]
    let scores = DescriptiveStats::new(episodes.iter().map(|s| s.score as f32));
    let best_rank = episodes.iter().map(|s| s.max_rank).max().unwrap_or(0);
    let report = PlayReport {
        mean_score: scores.as_ref().map_or(0.0, |s| s.mean),
        best_score: scores.as_ref().map_or(0.0, |s| s.max),
        best_tile: 1_u32 << best_rank,
        episodes,
    };
    Output::create(arg.output.clone())?.write_json(&report)?;
    Ok(())
}
