//! Demo level layout.
//!
//! A walled rectangle with a grid of pillars inside, pellets on every free square, one player
//! start in the top-left corner and ghosts spread over the other corners.

use std::sync::Arc;

use crate::config::game::{DEMO_COLS, DEMO_GHOSTS, DEMO_ROWS, PELLET_VALUE};
use crate::game::entities::{Npc, RandomWalk, Unit};
use crate::game::grid::Board;
use crate::game::level::Level;
use crate::game::systems::PlayerCollisions;
use crate::game::types::{Cell, Position};

pub fn demo_start_square() -> Position {
    Position::new(1, 1)
}

fn ghost_corners() -> [Position; 3] {
    [
        Position::new(DEMO_COLS - 2, DEMO_ROWS - 2),
        Position::new(DEMO_COLS - 2, 1),
        Position::new(1, DEMO_ROWS - 2),
    ]
}

fn demo_cell(pos: Position) -> Cell {
    let border = pos.x == 0 || pos.y == 0 || pos.x == DEMO_COLS - 1 || pos.y == DEMO_ROWS - 1;
    let pillar = pos.x % 2 == 0 && pos.y % 2 == 0;
    if border || pillar { Cell::Wall } else { Cell::Floor }
}

pub fn build_demo_board() -> Board {
    let rows = (0..DEMO_ROWS)
        .map(|y| (0..DEMO_COLS).map(|x| demo_cell(Position::new(x, y))).collect())
        .collect();
    Board::from_cells(rows)
}

/// Builds the demo level with `DEMO_GHOSTS` random-walking ghosts.
pub fn build_demo_level() -> Level {
    let mut board = build_demo_board();
    let ghost_squares: Vec<Position> = ghost_corners().into_iter().take(DEMO_GHOSTS).collect();

    let npcs = ghost_squares
        .iter()
        .map(|pos| {
            let ghost = board.spawn(Unit::ghost(), *pos);
            Npc::new(ghost, Arc::new(RandomWalk::default()))
        })
        .collect();

    let free: Vec<Position> = board
        .positions()
        .filter(|pos| board.square_at(*pos).cell == Cell::Floor)
        .filter(|pos| *pos != demo_start_square() && !ghost_squares.contains(pos))
        .collect();
    for pos in free {
        board.spawn(Unit::pellet(PELLET_VALUE), pos);
    }

    Level::new(
        board,
        npcs,
        vec![demo_start_square()],
        Arc::new(PlayerCollisions),
    )
}
