//! The two actors of a self-play episode.
//!
//! [`PlayerAgent`] slides tiles and learns a value function by TD(0);
//! [`EnvironmentAgent`] answers each slide by dropping a new tile on the
//! opened edge. [`Agent`] wraps the two behind one dispatch surface so the
//! episode harness can drive either side without caring which it holds.

mod config;
mod environment;
mod player;

use std::io;

use mergris_engine::{Action, Board, TileBag};

pub use self::{config::*, environment::*, player::*};

/// Either side of an episode.
#[derive(Debug)]
pub enum Agent {
    Player(PlayerAgent),
    Environment(EnvironmentAgent),
}

impl Agent {
    /// Builds the agent the configuration's `role=` key names.
    ///
    /// `role=player` yields a learning player, anything else a tile placer.
    pub fn from_config(config: &AgentConfig) -> io::Result<Self> {
        if config.role == "player" {
            Ok(Self::Player(PlayerAgent::from_config(config)?))
        } else {
            Ok(Self::Environment(EnvironmentAgent::from_config(config)))
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Player(agent) => agent.name(),
            Self::Environment(agent) => agent.name(),
        }
    }

    #[must_use]
    pub fn role(&self) -> &str {
        match self {
            Self::Player(agent) => agent.role(),
            Self::Environment(agent) => agent.role(),
        }
    }

    /// Lets the agent choose its move for the current board.
    pub fn take_action(&mut self, board: &Board, bag: &mut TileBag) -> Action {
        match self {
            Self::Player(agent) => agent.take_action(board, bag),
            Self::Environment(agent) => agent.take_action(board, bag),
        }
    }

    /// Signals the start of an episode. Only the player reacts.
    pub fn open_episode(&mut self) {
        if let Self::Player(agent) = self {
            agent.open_episode();
        }
    }

    /// Signals the end of an episode. Only the player reacts (it trains).
    pub fn close_episode(&mut self) {
        if let Self::Player(agent) = self {
            agent.close_episode();
        }
    }
}
