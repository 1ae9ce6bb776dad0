//! The learning player: one-ply greedy selection plus TD(0) training.
//!
//! # Move selection
//!
//! `take_action` evaluates the afterstate of each of the four directions
//! against a private copy of the board, skips illegal slides, and picks the
//! direction maximizing `reward + value(afterstate)`. The scan order is
//! fixed ([`Direction::ALL`]) and ties keep the first candidate, so a given
//! network always plays the same move on the same board.
//!
//! # Training
//!
//! Each chosen `(afterstate, reward)` pair is appended to the episode
//! trajectory. `close_episode` walks the trajectory backward:
//!
//! 1. the terminal afterstate is pulled toward 0 (it is its own successor
//!    with reward 0 — nothing follows it, so its value should vanish),
//! 2. every earlier afterstate is pulled toward the next step's reward plus
//!    the next afterstate's freshly updated value.
//!
//! Every step applies `beta * target` to the 32 weight cells its value read.
//! No weights change anywhere else.

use std::{
    io,
    path::{Path, PathBuf},
};

use arrayvec::ArrayVec;
use mergris_engine::{Action, Board, Direction, ILLEGAL_SLIDE, TileBag};
use mergris_evaluator::NTupleNetwork;

use crate::config::AgentConfig;

/// Default general learning-rate configuration (`alpha=` key).
pub const DEFAULT_ALPHA: f32 = 0.1;

/// Default TD update rate: one 32nd of alpha, so a full episode step moves a
/// board's value by roughly alpha times the TD error across its 32 cells.
pub const DEFAULT_BETA: f32 = DEFAULT_ALPHA / 32.0;

/// One trajectory entry: the afterstate a move produced and its reward.
#[derive(Debug, Clone, Copy)]
struct Step {
    afterstate: Board,
    reward: i32,
}

/// A legal candidate move under evaluation.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    direction: Direction,
    afterstate: Board,
    reward: i32,
    score: f32,
}

/// The self-play learning agent.
#[derive(Debug)]
pub struct PlayerAgent {
    name: String,
    role: String,
    network: NTupleNetwork,
    trajectory: Vec<Step>,
    alpha: f32,
    beta: f32,
    save_path: Option<PathBuf>,
}

impl PlayerAgent {
    /// Builds a player from its configuration.
    ///
    /// Loads weights when `load=` is set; the `init=` marker starts a
    /// zero-initialized network instead. A configuration naming neither is
    /// rejected, as is an unreadable weight file: a player without a weight
    /// source cannot act meaningfully.
    pub fn from_config(config: &AgentConfig) -> io::Result<Self> {
        let network = match &config.load {
            Some(path) => NTupleNetwork::load(path)?,
            None if config.init => NTupleNetwork::new(),
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "player configuration needs either init= or load=",
                ));
            }
        };
        Ok(Self {
            name: config.name.clone(),
            role: config.role.clone(),
            network,
            trajectory: Vec::new(),
            alpha: config.alpha.unwrap_or(DEFAULT_ALPHA),
            beta: DEFAULT_BETA,
            save_path: config.save.clone(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// The configured general learning rate.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// The TD update-rate constant, independent of [`Self::alpha`].
    #[must_use]
    pub fn beta(&self) -> f32 {
        self.beta
    }

    /// Overrides the TD update rate.
    pub fn set_beta(&mut self, beta: f32) {
        self.beta = beta;
    }

    /// Read access to the value function, e.g. for greedy play.
    #[must_use]
    pub fn network(&self) -> &NTupleNetwork {
        &self.network
    }

    /// Starts a fresh episode, discarding any previous trajectory.
    pub fn open_episode(&mut self) {
        self.trajectory.clear();
    }

    /// Trains on the recorded trajectory, backward from the terminal
    /// afterstate. The trajectory contents are consumed; they are undefined
    /// until the next [`Self::open_episode`].
    pub fn close_episode(&mut self) {
        let Some(last) = self.trajectory.last().copied() else {
            return;
        };

        // Terminal step: the last afterstate is its own successor with
        // reward 0, so its value is driven toward 0.
        let terminal_value = self.network.value(&last.afterstate);
        self.network
            .adjust(&last.afterstate, self.beta * (0.0 - terminal_value));

        for i in (0..self.trajectory.len() - 1).rev() {
            let next = self.trajectory[i + 1];
            let current = self.trajectory[i];
            #[expect(clippy::cast_precision_loss)]
            let target = next.reward as f32 + self.network.value(&next.afterstate)
                - self.network.value(&current.afterstate);
            self.network.adjust(&current.afterstate, self.beta * target);
        }
    }

    /// Selects the best direction by one-ply lookahead.
    ///
    /// The live board is never mutated; every direction is tried against an
    /// independent copy. Returns [`Action::Idle`] without touching the
    /// trajectory when no direction is legal. The tile bag is part of the
    /// shared agent interface but the player draws nothing from it.
    pub fn take_action(&mut self, board: &Board, _bag: &mut TileBag) -> Action {
        let mut candidates: ArrayVec<Candidate, 4> = ArrayVec::new();
        for direction in Direction::ALL {
            let mut afterstate = *board;
            let reward = afterstate.slide(direction);
            if reward == ILLEGAL_SLIDE {
                continue;
            }
            #[expect(clippy::cast_precision_loss)]
            let score = reward as f32 + self.network.value(&afterstate);
            candidates.push(Candidate {
                direction,
                afterstate,
                reward,
                score,
            });
        }

        // Strict comparison keeps the first candidate on ties.
        let Some(best) = candidates
            .into_iter()
            .reduce(|best, c| if c.score > best.score { c } else { best })
        else {
            return Action::Idle;
        };

        self.trajectory.push(Step {
            afterstate: best.afterstate,
            reward: best.reward,
        });
        Action::Slide(best.direction)
    }

    /// Persists the weights to the configured `save=` path, if any.
    ///
    /// Returns the path written so callers can report it. An unwritable
    /// path is fatal to the caller, mirroring load.
    pub fn save_weights(&self) -> io::Result<Option<&Path>> {
        match &self.save_path {
            Some(path) => {
                self.network.save(path)?;
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }
}
