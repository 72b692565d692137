//! Level coordinator for a grid-based chase game.
//!
//! - `game`: board, units, collision rules and the level that serializes moves, schedules ghosts
//!   and reports wins and losses
//! - `session`: actix actor owning a level and talking to players and displays
//! - `config`: gameplay constants

pub mod config;
pub mod error;
pub mod game;
pub mod session;

mod tests;
