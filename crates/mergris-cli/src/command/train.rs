use std::path::PathBuf;

use anyhow::Context as _;
use mergris_agent::{Agent, AgentConfig, PlayerAgent};
use mergris_engine::{BagSeed, TileBag};
use mergris_stats::DescriptiveStats;

use crate::episode::{self, EpisodeStats};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Number of self-play episodes to run
    #[arg(long, default_value_t = 1000)]
    episodes: usize,
    /// Learning-rate configuration forwarded to the player
    #[arg(long)]
    alpha: Option<f32>,
    /// Seed for the environment agent and the tile bag
    #[arg(long)]
    seed: Option<u64>,
    /// Weight file to continue training from
    #[arg(long)]
    load: Option<PathBuf>,
    /// Weight file to write when training is done
    #[arg(long)]
    save: Option<PathBuf>,
    /// Episodes per progress report (0 disables reports)
    #[arg(long, default_value_t = 100)]
    report_interval: usize,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let player_config = AgentConfig {
        name: "learner".to_owned(),
        role: "player".to_owned(),
        seed: None,
        alpha: arg.alpha,
        init: arg.load.is_none(),
        load: arg.load.clone(),
        save: arg.save.clone(),
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

    let player = PlayerAgent::from_config(&player_config)
        .context("failed to build the player agent")?;
    let mut player = Agent::Player(player);
    let mut environment =
        Agent::from_config(&environment_config).context("failed to build the environment agent")?;
    let mut bag = match arg.seed {
        Some(seed) => TileBag::with_seed(BagSeed::from_u64(seed)),
        None => TileBag::new(),
    };

    if let Agent::Player(player) = &player {
        eprintln!(
            "Training {} episodes (alpha {}, beta {})",
            arg.episodes,
            player.alpha(),
            player.beta(),
        );
    }

    let mut batch: Vec<EpisodeStats> = Vec::with_capacity(arg.report_interval);
    for i in 1..=arg.episodes {
        batch.push(episode::run_episode(&mut player, &mut environment, &mut bag));
        let report_due = arg.report_interval > 0 && i % arg.report_interval == 0;
        if report_due || i == arg.episodes {
            report(i, &batch);
            batch.clear();
        }
    }

    if let Agent::Player(player) = &player
        && let Some(path) = player
            .save_weights()
            .context("failed to save the weight file")?
    {
        eprintln!("Weights saved to {}", path.display());
    }
    Ok(())
}

#[expect(clippy::cast_precision_loss)]
fn report(episode: usize, batch: &[EpisodeStats]) {
    let Some(scores) = DescriptiveStats::new(batch.iter().map(|s| s.score as f32)) else {
        return;
    };
    let Some(moves) = DescriptiveStats::new(batch.iter().map(|s| s.moves as f32)) else {
        return;
    };
    let best_rank = batch.iter().map(|s| s.max_rank).max().unwrap_or(0);

    eprintln!("Episode #{episode} (last {} episodes):", scores.count);
    eprintln!(
        "  Score: mean {:.1}, median {:.1}, min {:.0}, max {:.0}, stddev {:.1}",
        scores.mean, scores.median, scores.min, scores.max, scores.std_dev,
    );
    eprintln!("  Moves: mean {:.1}, max {:.0}", moves.mean, moves.max);
    eprintln!("  Best tile: {}", 1_u32 << best_rank);
}
