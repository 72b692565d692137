//! Collision rules.
//!
//! Applied by the level whenever a unit moves onto a square that already had occupants.

use log::debug;

use crate::game::entities::Role;
use crate::game::grid::Board;
use crate::game::types::UnitId;

pub trait CollisionResolver: Send + Sync {
    /// `mover` just entered the square that `collidee` was already standing on.
    fn collide(&self, board: &mut Board, mover: UnitId, collidee: UnitId);
}

/// Default rules: ghosts kill players, players eat pellets.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerCollisions;

enum Kind {
    Player,
    Ghost,
    Pellet(u32),
}

fn kind_of(board: &Board, id: UnitId) -> Kind {
    match board.unit(id).map(|unit| &unit.role) {
        Some(Role::Player(_)) => Kind::Player,
        Some(Role::Ghost) => Kind::Ghost,
        Some(Role::Pellet { value }) => Kind::Pellet(*value),
        None => panic!("unit {id} is not part of this board"),
    }
}

impl PlayerCollisions {
    fn player_meets_ghost(board: &mut Board, player: UnitId) {
        if let Some(state) = board.unit_mut(player).and_then(|u| u.player_state_mut()) {
            if state.alive {
                debug!("[Collisions] Player {} caught by a ghost", player);
            }
            state.kill();
        }
    }

    fn player_eats_pellet(board: &mut Board, player: UnitId, pellet: UnitId, value: u32) {
        board.remove(pellet);
        if let Some(state) = board.unit_mut(player).and_then(|u| u.player_state_mut()) {
            state.add_points(value);
        }
    }
}

impl CollisionResolver for PlayerCollisions {
    fn collide(&self, board: &mut Board, mover: UnitId, collidee: UnitId) {
        match (kind_of(board, mover), kind_of(board, collidee)) {
            (Kind::Player, Kind::Ghost) => Self::player_meets_ghost(board, mover),
            (Kind::Ghost, Kind::Player) => Self::player_meets_ghost(board, collidee),
            (Kind::Player, Kind::Pellet(value)) => {
                Self::player_eats_pellet(board, mover, collidee, value)
            }
            _ => {}
        }
    }
}
