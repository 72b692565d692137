//! Level coordinator.
//!
//! A level owns the shared board, the ghosts and their movement schedules, the registered
//! players and the observers waiting for the level to end. All board mutations go through
//! [`Level::move_unit`], which applies one move at a time: facing, relocation, collisions and
//! the win/loss recheck complete before the next move is admitted.
//!
//! Locks are always taken in the same order: move section, board, player registry, observer
//! list. Start and stop only contend with each other on the ghost table.

pub mod observer;
pub mod scheduler;


use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info, trace};

use crate::game::entities::{Npc, NpcBehaviour, Unit};
use crate::game::grid::Board;
use crate::game::systems::CollisionResolver;
use crate::game::types::{Direction, Position, UnitId};

pub use observer::LevelObserver;
pub use scheduler::ScheduleHandle;
use scheduler::NpcSlot;

/// Board handle shared between the level and whoever else needs to look at it.
pub type SharedBoard = Arc<RwLock<Board>>;

#[derive(Debug, Default)]
struct PlayerRegistry {
    players: Vec<UnitId>,
    next_start: usize,
}

pub struct Level {
    board: SharedBoard,
    /// Held for the whole of a move so moves never interleave.
    move_lock: Mutex<()>,
    /// Ghosts and their schedules; also serves as the start/stop lock.
    npcs: Mutex<HashMap<UnitId, NpcSlot>>,
    running: AtomicBool,
    start_squares: Vec<Position>,
    registry: Mutex<PlayerRegistry>,
    collisions: Arc<dyn CollisionResolver>,
    observers: Mutex<Vec<Arc<dyn LevelObserver>>>,
}

impl Level {
    /// Creates a stopped level. Ghost units must already be placed on the board.
    pub fn new(
        board: Board,
        npcs: Vec<Npc>,
        start_squares: Vec<Position>,
        collisions: Arc<dyn CollisionResolver>,
    ) -> Self {
        let npcs = npcs
            .into_iter()
            .map(|npc| (npc.unit, NpcSlot::new(npc.behaviour)))
            .collect();

        Self {
            board: Arc::new(RwLock::new(board)),
            move_lock: Mutex::new(()),
            npcs: Mutex::new(npcs),
            running: AtomicBool::new(false),
            start_squares,
            registry: Mutex::new(PlayerRegistry::default()),
            collisions,
            observers: Mutex::new(Vec::new()),
        }
    }

    pub fn board(&self) -> &SharedBoard {
        &self.board
    }

    pub fn add_observer(&self, observer: Arc<dyn LevelObserver>) {
        let mut observers = lock(&self.observers);
        if !observers.iter().any(|known| same_observer(known, &observer)) {
            observers.push(observer);
        }
    }

    pub fn remove_observer(&self, observer: &Arc<dyn LevelObserver>) {
        lock(&self.observers).retain(|known| !same_observer(known, observer));
    }

    /// Adds a new, unplaced player unit to the board.
    pub fn create_player(&self) -> UnitId {
        self.write_board().add_unit(Unit::player())
    }

    /// Places a player on the next start square, round-robin. Registering twice does nothing.
    pub fn register_player(&self, player: UnitId) {
        assert!(
            !self.start_squares.is_empty(),
            "level has no start squares to place players on"
        );

        let mut board = self.write_board();
        let mut registry = lock(&self.registry);
        if registry.players.contains(&player) {
            return;
        }

        let square = self.start_squares[registry.next_start];
        board.occupy(player, square);
        registry.players.push(player);
        registry.next_start = (registry.next_start + 1) % self.start_squares.len();
        debug!("[Level] Registered player {} at {:?}", player, square);
    }

    pub fn players(&self) -> Vec<UnitId> {
        lock(&self.registry).players.clone()
    }

    /// Moves a unit one square in `direction` and handles every collision on arrival.
    ///
    /// Does nothing while the level is stopped. The unit turns to face `direction` even when the
    /// destination is blocked.
    ///
    /// # Panics
    ///
    /// If `unit` is not on a square, whether or not the level is running.
    pub fn move_unit(&self, unit: UnitId, direction: Direction) {
        let placed = self.read_board().position_of(unit).is_some();
        assert!(placed, "unit {unit} must occupy a square to move");
        if !self.is_running() {
            trace!("[Level] Dropped move of {}: level not running", unit);
            return;
        }

        let _section = lock(&self.move_lock);
        {
            let mut board = self.write_board();
            let Some(location) = board.position_of(unit) else {
                panic!("unit {unit} must occupy a square to move");
            };
            board.set_facing(unit, direction);

            let destination = board.neighbor(location, direction);
            if board.is_accessible_to(destination, unit) {
                let occupants: Vec<UnitId> = board
                    .occupants_of(destination)
                    .iter()
                    .copied()
                    .filter(|occupant| *occupant != unit)
                    .collect();
                board.occupy(unit, destination);
                for occupant in occupants {
                    self.collisions.collide(&mut board, unit, occupant);
                }
            }
        }
        self.update_observers();
    }

    /// Starts the level: moves are admitted and every ghost gets its own schedule.
    ///
    /// Must be called from within a tokio runtime when the level has ghosts. Observers are told
    /// about a terminal state after the ghosts are scheduled, so a concurrent `stop` may already
    /// have stopped the level by the time they hear of it.
    pub fn start(self: &Arc<Self>) {
        {
            let mut npcs = lock(&self.npcs);
            if self.is_running() {
                return;
            }
            for (id, slot) in npcs.iter_mut() {
                let handle =
                    scheduler::spawn_schedule(Arc::downgrade(self), *id, slot.behaviour.clone());
                slot.schedule = Some(handle);
            }
            self.running.store(true, Ordering::SeqCst);
            info!("[Level] Started with {} ghosts", npcs.len());
        }
        // Outside the start/stop lock so an observer may stop the level right away.
        self.update_observers();
    }

    /// Stops the level: pending ghost ticks are cancelled and further moves are dropped.
    pub fn stop(&self) {
        let mut npcs = lock(&self.npcs);
        if !self.is_running() {
            return;
        }
        for slot in npcs.values_mut() {
            slot.cancel();
        }
        self.running.store(false, Ordering::SeqCst);
        info!("[Level] Stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Number of ghosts whose schedule task is still alive.
    pub fn active_schedules(&self) -> usize {
        lock(&self.npcs)
            .values()
            .filter(|slot| slot.schedule.as_ref().is_some_and(|handle| !handle.is_finished()))
            .count()
    }

    pub fn is_any_player_alive(&self) -> bool {
        let board = self.read_board();
        self.any_player_alive_on(&board)
    }

    pub fn remaining_pellets(&self) -> usize {
        count_pellets(&self.read_board())
    }

    /// One scheduled step of a ghost.
    pub(crate) fn tick_npc(&self, npc: UnitId, behaviour: &dyn NpcBehaviour) {
        let next = behaviour.next_move(&self.read_board(), npc);
        if let Some(direction) = next {
            self.move_unit(npc, direction);
        }
    }

    fn any_player_alive_on(&self, board: &Board) -> bool {
        lock(&self.registry)
            .players
            .iter()
            .any(|id| board.unit(*id).is_some_and(Unit::is_alive_player))
    }

    fn update_observers(&self) {
        let (any_alive, pellets) = {
            let board = self.read_board();
            (self.any_player_alive_on(&board), count_pellets(&board))
        };
        if any_alive && pellets > 0 {
            return;
        }

        let observers = lock(&self.observers).clone();
        if !any_alive {
            debug!("[Level] No player alive, notifying {} observers", observers.len());
            for observer in &observers {
                observer.level_lost();
            }
        }
        if pellets == 0 {
            debug!("[Level] No pellets left, notifying {} observers", observers.len());
            for observer in &observers {
                observer.level_won();
            }
        }
    }

    fn read_board(&self) -> RwLockReadGuard<'_, Board> {
        self.board.read().expect("board lock poisoned")
    }

    fn write_board(&self) -> RwLockWriteGuard<'_, Board> {
        self.board.write().expect("board lock poisoned")
    }
}

impl Drop for Level {
    fn drop(&mut self) {
        let npcs = self.npcs.get_mut().unwrap_or_else(PoisonError::into_inner);
        for slot in npcs.values_mut() {
            slot.cancel();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().expect("level lock poisoned")
}

fn same_observer(a: &Arc<dyn LevelObserver>, b: &Arc<dyn LevelObserver>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

fn count_pellets(board: &Board) -> usize {
    board
        .positions()
        .map(|pos| {
            board
                .occupants_of(pos)
                .iter()
                .filter(|id| board.unit(**id).is_some_and(Unit::is_collectible))
                .count()
        })
        .sum()
}
