use actix::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game::types::{Direction, Position, UnitId};

/// Creates a player and places it on the next start square.
#[derive(Message)]
#[rtype(result = "UnitId")]
pub struct JoinPlayer;

/// Starts the level. Answers `false` when the level is already won or lost.
#[derive(Message)]
#[rtype(result = "bool")]
pub struct StartGame;

#[derive(Message)]
#[rtype(result = "()")]
pub struct StopGame;

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Result<(), GameError>")]
pub struct MovePlayer {
    pub player: UnitId,
    pub direction: Direction,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Subscribe(pub Recipient<SessionUpdate>);

#[derive(Message)]
#[rtype(result = "LevelSnapshot")]
pub struct GetSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Sent by the level observer bridge; may arrive many times for the same outcome.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct LevelOutcome(pub Outcome);

#[derive(Message, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[rtype(result = "()")]
pub enum SessionUpdate {
    Started,
    Stopped,
    Finished(Outcome),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: UnitId,
    pub position: Option<Position>,
    pub alive: bool,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub running: bool,
    pub remaining_pellets: usize,
    pub players: Vec<PlayerSnapshot>,
    pub outcome: Option<Outcome>,
}
