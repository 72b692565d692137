//! Game session layer.
//!
//! Wraps a level in an actix actor so players, input handlers and displays talk to it through
//! messages, and turns the level's win/loss callbacks into session updates.

pub mod messages;
pub mod observer;
pub mod server;

#[cfg(test)]
mod tests;

pub use server::GameSession;
