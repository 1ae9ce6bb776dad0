//! The episode harness driving a player and an environment against one
//! shared board.

use mergris_agent::Agent;
use mergris_engine::{Board, TileBag};

/// Outcome of one finished episode.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct EpisodeStats {
    /// Sum of the player's merge rewards.
    pub score: i32,
    /// Number of slides the player made.
    pub moves: usize,
    /// Highest tile rank on the final board.
    pub max_rank: u8,
}

/// Plays one episode to completion and returns its statistics.
///
/// The environment moves first (the fresh board has no slide history, so it
/// may pick any cell), then the two sides strictly alternate. The episode
/// ends when either side's action fails to apply: an illegal slide can not
/// happen (the player only proposes legal ones), so in practice this is the
/// player going idle on a dead board or the environment finding its spawn
/// edge full.
pub fn run_episode(player: &mut Agent, environment: &mut Agent, bag: &mut TileBag) -> EpisodeStats {
    let mut board = Board::new();
    let mut score = 0;
    let mut moves = 0;

    player.open_episode();
    environment.open_episode();

    let mut environments_turn = true;
    loop {
        let actor = if environments_turn {
            &mut *environment
        } else {
            &mut *player
        };
        let action = actor.take_action(&board, bag);
        let Some(reward) = action.apply(&mut board) else {
            break;
        };
        if !environments_turn {
            score += reward;
            moves += 1;
        }
        environments_turn = !environments_turn;
    }

    player.close_episode();
    environment.close_episode();

    EpisodeStats {
        score,
        moves,
        max_rank: board.max_rank(),
    }
}
