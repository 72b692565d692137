// Demo module for the game. Provides the hand-built level that the binary plays on.
pub mod layout;

pub use layout::*;
