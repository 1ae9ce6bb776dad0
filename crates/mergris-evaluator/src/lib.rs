//! Afterstate value function for the merging puzzle: an n-tuple network.
//!
//! The network is a linear approximator: small fixed-shape sampling
//! patterns, expanded through the board's symmetry group, index dense
//! weight tables, and the board value is the sum of the resulting lookups.
//!
//! - [`symmetry`] - the order-8 dihedral group over 4x4 positions
//! - [`pattern`] - the 4 fixed 6-cell patterns and base-15 feature codes
//! - [`network`] - [`NTupleNetwork`]: value, update, and binary persistence
//!
//! The crate knows nothing about move selection or training schedules; it
//! only answers "what is this board worth" and "shift what you just read by
//! delta". The agent crate owns when to ask.

pub use self::{network::*, pattern::*, symmetry::*};

pub mod network;
pub mod pattern;
pub mod symmetry;
