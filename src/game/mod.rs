pub mod types;

pub mod demo;
pub mod entities;
pub mod grid;
pub mod level;
pub mod systems;
