//! Autonomous units and the behaviour that drives them.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::game::{GHOST_INTERVAL_VARIATION_MS, GHOST_MOVE_INTERVAL_MS};
use crate::game::grid::Board;
use crate::game::types::{Direction, UnitId};

/// Decides where an autonomous unit goes next and how long it waits between moves.
pub trait NpcBehaviour: Send + Sync {
    /// The next step for `npc`, or `None` to skip this tick.
    fn next_move(&self, board: &Board, npc: UnitId) -> Option<Direction>;

    /// Delay before the next tick. Must be non-zero; may change between calls.
    fn interval(&self) -> Duration;
}

/// A ghost on the board together with its behaviour.
#[derive(Clone)]
pub struct Npc {
    pub unit: UnitId,
    pub behaviour: Arc<dyn NpcBehaviour>,
}

impl Npc {
    pub fn new(unit: UnitId, behaviour: Arc<dyn NpcBehaviour>) -> Self {
        Self { unit, behaviour }
    }
}

/// Picks a random accessible direction every tick.
#[derive(Debug, Clone)]
pub struct RandomWalk {
    pub move_interval: Duration,
    pub variation: Duration,
}

impl RandomWalk {
    pub fn new(move_interval: Duration, variation: Duration) -> Self {
        assert!(!move_interval.is_zero(), "move interval must be positive");
        Self {
            move_interval,
            variation,
        }
    }
}

impl Default for RandomWalk {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(GHOST_MOVE_INTERVAL_MS),
            Duration::from_millis(GHOST_INTERVAL_VARIATION_MS),
        )
    }
}

impl NpcBehaviour for RandomWalk {
    fn next_move(&self, board: &Board, npc: UnitId) -> Option<Direction> {
        let here = board.position_of(npc)?;
        let options: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|dir| board.is_accessible_to(board.neighbor(here, *dir), npc))
            .collect();
        options.choose(&mut rand::rng()).copied()
    }

    fn interval(&self) -> Duration {
        let jitter = self.variation.as_millis() as u64;
        if jitter == 0 {
            return self.move_interval;
        }
        self.move_interval + Duration::from_millis(rand::rng().random_range(0..=jitter))
    }
}
