//! Game engine for a 4x4 sliding-tile merging puzzle.
//!
//! This crate owns the rules of the game and nothing about how to play it
//! well:
//!
//! - [`Board`] - 4x4 grid of tile ranks with the slide/merge move engine
//! - [`Direction`] - the four slide directions in fixed scan order
//! - [`Action`] - one agent turn: slide, tile placement, or idle
//! - [`TileBag`] - the tile supply, a shuffled `{1, 2, 3}` bag
//!
//! Rewards are merge scores: merging two rank-`k` tiles produces one
//! rank-`k+1` tile worth `2^(k+1)`. An impossible slide reports
//! [`ILLEGAL_SLIDE`] instead of a reward; callers treat that as data, not as
//! an error.

pub use self::{action::*, board::*, tile_bag::*};

mod action;
mod board;
mod tile_bag;
