//! Game entities module.
//!
//! This module organizes units (players, ghosts, pellets) and the behaviour of autonomous units.

pub mod npc;
pub mod player;
pub mod unit;

pub use npc::*;
pub use player::*;
pub use unit::*;
