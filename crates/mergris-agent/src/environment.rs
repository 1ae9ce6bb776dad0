//! The tile-placing opponent.
//!
//! After the player slides, new tiles enter from the edge the slide pulled
//! away from: sliding up opens the bottom row, sliding right opens the left
//! column, and so on. The environment shuffles the candidate cells of that
//! edge, drops the next bag tile on the first empty one, and yields
//! [`Action::Idle`] when the whole edge is occupied.

use mergris_engine::{Action, Board, Direction, TileBag};
use rand::{Rng as _, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg32;

use crate::config::AgentConfig;

/// Spawn cells for each slide direction, in board index order.
const BOTTOM_ROW: [usize; 4] = [12, 13, 14, 15];
const LEFT_COLUMN: [usize; 4] = [0, 4, 8, 12];
const TOP_ROW: [usize; 4] = [0, 1, 2, 3];
const RIGHT_COLUMN: [usize; 4] = [3, 7, 11, 15];

/// All sixteen cells, scanned when no slide has happened yet.
const WHOLE_BOARD: [usize; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

/// The random tile placer.
#[derive(Debug)]
pub struct EnvironmentAgent {
    name: String,
    role: String,
    rng: Pcg32,
}

impl EnvironmentAgent {
    /// Builds an environment agent from its configuration.
    ///
    /// The `seed=` key pins the placement order; without it the agent draws
    /// a seed from the thread RNG.
    #[must_use]
    pub fn from_config(config: &AgentConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_seed(rand::rng().random()),
        };
        Self {
            name: config.name.clone(),
            role: config.role.clone(),
            rng,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Places the next bag tile on a random empty spawn cell.
    ///
    /// The candidate edge follows the board's last slide; a board with no
    /// slide history opens all sixteen cells. Returns [`Action::Idle`] when
    /// every candidate is occupied.
    pub fn take_action(&mut self, board: &Board, bag: &mut TileBag) -> Action {
        let mut candidates: Vec<usize> = match board.last_slide() {
            Some(Direction::Up) => BOTTOM_ROW.to_vec(),
            Some(Direction::Right) => LEFT_COLUMN.to_vec(),
            Some(Direction::Down) => TOP_ROW.to_vec(),
            Some(Direction::Left) => RIGHT_COLUMN.to_vec(),
            None => WHOLE_BOARD.to_vec(),
        };
        candidates.shuffle(&mut self.rng);

        let Some(&position) = candidates.iter().find(|&&pos| board.is_empty_cell(pos)) else {
            return Action::Idle;
        };
        Action::place(position, bag.next_tile())
    }
}

#[cfg(test)]
mod tests {
    use mergris_engine::{BAG_TILES, BagSeed, Placement};

    use super::*;

    fn placer() -> EnvironmentAgent {
        let config = AgentConfig::parse("name=placer role=environment seed=7").unwrap();
        EnvironmentAgent::from_config(&config)
    }

    #[test]
    fn test_spawn_edge_follows_last_slide() {
        // Bottom row full except cell 13; after an upward slide the only
        // legal spawn cell is 13 no matter how the shuffle lands.
        let board = Board::from_ranks_after(
            [
                0, 0, 0, 1, //
                0, 0, 0, 0, //
                0, 0, 0, 0, //
                1, 0, 2, 3,
            ],
            Direction::Up,
        );
        let mut env = placer();
        let mut bag = TileBag::with_seed(BagSeed::from_u64(1));

        let action = env.take_action(&board, &mut bag);
        let Action::Place(Placement { position, tile }) = action else {
            panic!("expected a placement, got {action:?}");
        };
        assert_eq!(position, 13);
        assert!(BAG_TILES.contains(&tile));
    }

    #[test]
    fn test_full_spawn_edge_yields_idle() {
        let board = Board::from_ranks_after(
            [
                0, 0, 0, 0, //
                0, 0, 0, 0, //
                0, 0, 0, 0, //
                1, 2, 1, 2,
            ],
            Direction::Up,
        );
        let mut env = placer();
        let mut bag = TileBag::with_seed(BagSeed::from_u64(1));
        assert_eq!(env.take_action(&board, &mut bag), Action::Idle);
    }

    #[test]
    fn test_fresh_board_scans_all_cells() {
        let mut board = Board::new();
        for pos in 0..15 {
            board.place(pos, 1);
        }
        let mut env = placer();
        let mut bag = TileBag::with_seed(BagSeed::from_u64(1));

        let action = env.take_action(&board, &mut bag);
        let Action::Place(Placement { position, .. }) = action else {
            panic!("expected a placement, got {action:?}");
        };
        assert_eq!(position, 15);
    }

    #[test]
    fn test_seed_pins_placement_sequence() {
        let config = AgentConfig::parse("name=placer role=environment seed=42").unwrap();
        let mut a = EnvironmentAgent::from_config(&config);
        let mut b = EnvironmentAgent::from_config(&config);
        let board = Board::new();
        let mut bag_a = TileBag::with_seed(BagSeed::from_u64(9));
        let mut bag_b = TileBag::with_seed(BagSeed::from_u64(9));

        for _ in 0..8 {
            assert_eq!(
                a.take_action(&board, &mut bag_a),
                b.take_action(&board, &mut bag_b)
            );
        }
    }
}
