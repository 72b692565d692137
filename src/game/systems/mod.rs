pub mod collisions;

pub use collisions::*;
