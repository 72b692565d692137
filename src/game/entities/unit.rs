//! Units: everything that can occupy a board square.

use crate::game::entities::player::PlayerState;
use crate::game::types::{Direction, Position, UnitId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Player(PlayerState),
    Ghost,
    Pellet { value: u32 },
}

#[derive(Debug, Clone)]
pub struct Unit {
    pub id: UnitId,
    pub role: Role,
    pub facing: Direction,
    pub(crate) position: Option<Position>,
}

impl Unit {
    pub fn new(role: Role) -> Self {
        Self {
            id: UnitId::new(),
            role,
            facing: Direction::Left,
            position: None,
        }
    }

    pub fn player() -> Self {
        Self::new(Role::Player(PlayerState::new()))
    }

    pub fn ghost() -> Self {
        Self::new(Role::Ghost)
    }

    pub fn pellet(value: u32) -> Self {
        Self::new(Role::Pellet { value })
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn has_square(&self) -> bool {
        self.position.is_some()
    }

    /// Collectibles are what the level counts down to decide it has been won.
    pub fn is_collectible(&self) -> bool {
        matches!(self.role, Role::Pellet { .. })
    }

    pub fn is_ghost(&self) -> bool {
        matches!(self.role, Role::Ghost)
    }

    pub fn player_state(&self) -> Option<&PlayerState> {
        match &self.role {
            Role::Player(state) => Some(state),
            _ => None,
        }
    }

    pub fn player_state_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.role {
            Role::Player(state) => Some(state),
            _ => None,
        }
    }

    pub fn is_alive_player(&self) -> bool {
        self.player_state().is_some_and(|state| state.alive)
    }
}
