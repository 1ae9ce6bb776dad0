use crate::board::{Board, Direction, ILLEGAL_SLIDE};

/// A tile insertion: which cell gets which tile rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub position: usize,
    pub tile: u8,
}

/// An agent's chosen move for one turn.
///
/// `Slide` comes from the player agent, `Place` from the environment agent.
/// `Idle` means the agent had no applicable move; the episode harness treats
/// it as a terminal signal. Actions are immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Action {
    Slide(Direction),
    Place(Placement),
    Idle,
}

impl Action {
    /// Convenience constructor for a placement action.
    #[must_use]
    pub fn place(position: usize, tile: u8) -> Self {
        Self::Place(Placement { position, tile })
    }

    /// Applies this action to `board`.
    ///
    /// Returns `Some(reward)` when the action applied (`0` for placements),
    /// or `None` when it could not: an illegal slide, a placement onto an
    /// occupied cell, or `Idle`. The board is unchanged in the `None` case.
    pub fn apply(self, board: &mut Board) -> Option<i32> {
        match self {
            Action::Slide(direction) => {
                let reward = board.slide(direction);
                (reward != ILLEGAL_SLIDE).then_some(reward)
            }
            Action::Place(Placement { position, tile }) => {
                if !board.is_empty_cell(position) {
                    return None;
                }
                board.place(position, tile);
                Some(0)
            }
            Action::Idle => None,
        }
    }
}
