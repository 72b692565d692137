//! Board geometry and unit storage.
//!
//! The board is a rectangular grid of squares. Each square has a terrain cell and an ordered list of
//! occupants. The board also owns every unit of the level, placed or not, so that all occupancy
//! changes go through `occupy` and `remove` and the two views (square occupants, unit position)
//! never disagree.

use std::collections::HashMap;

use crate::game::entities::Unit;
use crate::game::types::{Cell, Direction, Position, UnitId};

#[derive(Debug, Clone)]
pub struct Square {
    pub cell: Cell,
    occupants: Vec<UnitId>,
}

impl Square {
    fn new(cell: Cell) -> Self {
        Self {
            cell,
            occupants: Vec::new(),
        }
    }

    /// Occupants in arrival order.
    pub fn occupants(&self) -> &[UnitId] {
        &self.occupants
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    squares: Vec<Vec<Square>>,
    units: HashMap<UnitId, Unit>,
}

impl Board {
    /// An open board of floor squares.
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_cells(vec![vec![Cell::Floor; width]; height])
    }

    /// Builds a board from rows of terrain. All rows must have the same, non-zero length.
    pub fn from_cells(rows: Vec<Vec<Cell>>) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        assert!(width > 0 && height > 0, "board must have at least one square");
        assert!(
            rows.iter().all(|row| row.len() == width),
            "all board rows must have the same width"
        );

        let squares = rows
            .into_iter()
            .map(|row| row.into_iter().map(Square::new).collect())
            .collect();

        Self {
            width,
            height,
            squares,
            units: HashMap::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn square_at(&self, pos: Position) -> &Square {
        assert!(self.contains(pos), "{pos:?} is outside the board");
        &self.squares[pos.y][pos.x]
    }

    pub fn set_cell(&mut self, pos: Position, cell: Cell) {
        assert!(self.contains(pos), "{pos:?} is outside the board");
        self.squares[pos.y][pos.x].cell = cell;
    }

    pub fn occupants_of(&self, pos: Position) -> &[UnitId] {
        self.square_at(pos).occupants()
    }

    /// The square one step away in `direction`. Edges wrap around to the opposite side.
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        let x = (pos.x as isize + dx).rem_euclid(self.width as isize) as usize;
        let y = (pos.y as isize + dy).rem_euclid(self.height as isize) as usize;
        Position { x, y }
    }

    /// Walls block everyone, gates only let ghosts through.
    pub fn is_accessible_to(&self, pos: Position, unit: UnitId) -> bool {
        match self.square_at(pos).cell {
            Cell::Floor => true,
            Cell::Wall => false,
            Cell::Gate => self.expect_unit(unit).is_ghost(),
        }
    }

    /// Adds a unit to the board's unit table without placing it.
    pub fn add_unit(&mut self, unit: Unit) -> UnitId {
        let id = unit.id;
        self.units.insert(id, unit);
        id
    }

    /// Adds a unit and places it on `pos`.
    pub fn spawn(&mut self, unit: Unit, pos: Position) -> UnitId {
        let id = self.add_unit(unit);
        self.occupy(id, pos);
        id
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn position_of(&self, id: UnitId) -> Option<Position> {
        self.expect_unit(id).position
    }

    pub fn set_facing(&mut self, id: UnitId, direction: Direction) {
        self.expect_unit_mut(id).facing = direction;
    }

    /// Moves a unit onto `pos`, leaving its current square first.
    pub fn occupy(&mut self, id: UnitId, pos: Position) {
        assert!(self.contains(pos), "{pos:?} is outside the board");
        self.leave_square(id);
        self.squares[pos.y][pos.x].occupants.push(id);
        self.expect_unit_mut(id).position = Some(pos);
    }

    /// Takes a unit off the board. It stays in the unit table without a position.
    pub fn remove(&mut self, id: UnitId) {
        self.leave_square(id);
        self.expect_unit_mut(id).position = None;
    }

    fn leave_square(&mut self, id: UnitId) {
        if let Some(old) = self.expect_unit(id).position {
            self.squares[old.y][old.x]
                .occupants
                .retain(|occupant| *occupant != id);
        }
    }

    /// Every square in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position { x, y }))
    }

    fn expect_unit(&self, id: UnitId) -> &Unit {
        match self.units.get(&id) {
            Some(unit) => unit,
            None => panic!("unit {id} is not part of this board"),
        }
    }

    fn expect_unit_mut(&mut self, id: UnitId) -> &mut Unit {
        match self.units.get_mut(&id) {
            Some(unit) => unit,
            None => panic!("unit {id} is not part of this board"),
        }
    }
}
