//! Errors surfaced to callers of the game session.
//!
//! Contract violations inside the level (moving a unit that is not on the board, registering
//! players without start squares) are panics, not variants of this enum.

use thiserror::Error;

use crate::game::types::UnitId;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("player {0} is not part of this game")]
    UnknownPlayer(UnitId),

    #[error("game session unreachable: {0}")]
    Mailbox(#[from] actix::MailboxError),
}
