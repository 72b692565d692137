/// Game configuration constants.
///
/// This module defines the gameplay parameters such as ghost speed, pellet value,
/// and the dimensions and pacing of the demo level.
pub const GHOST_MOVE_INTERVAL_MS: u64 = 250; // Base delay between two ghost moves.

/// Upper bound of the random delay added to every ghost move interval.
pub const GHOST_INTERVAL_VARIATION_MS: u64 = 50;

/// Points awarded for eating one pellet.
pub const PELLET_VALUE: u32 = 10;

/// Number of rows in the demo board.
pub const DEMO_ROWS: usize = 9;

/// Number of columns in the demo board.
pub const DEMO_COLS: usize = 11;

/// Number of ghosts roaming the demo board.
pub const DEMO_GHOSTS: usize = 2;

/// Delay between two moves of the demo's simulated player input.
pub const DEMO_PLAYER_MOVE_MS: u64 = 150;

/// The demo gives up after this many seconds if the level is neither won nor lost.
pub const DEMO_DURATION_SECS: u64 = 30;
