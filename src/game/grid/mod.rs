//! Board module.

pub mod board;

pub use board::*;
