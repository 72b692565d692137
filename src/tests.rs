#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::config::game::{DEMO_GHOSTS, PELLET_VALUE};
    use crate::game::demo::{build_demo_board, build_demo_level, demo_start_square};
    use crate::game::entities::Unit;
    use crate::game::level::LevelObserver;
    use crate::game::types::{Cell, Direction};

    #[derive(Default)]
    struct Counter {
        won: AtomicUsize,
        lost: AtomicUsize,
    }

    impl LevelObserver for Counter {
        fn level_won(&self) {
            self.won.fetch_add(1, Ordering::SeqCst);
        }

        fn level_lost(&self) {
            self.lost.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_demo_board_is_walled() {
        let board = build_demo_board();
        for pos in board.positions() {
            let edge = pos.x == 0
                || pos.y == 0
                || pos.x == board.width() - 1
                || pos.y == board.height() - 1;
            if edge {
                assert_eq!(board.square_at(pos).cell, Cell::Wall);
            }
        }
        assert_eq!(board.square_at(demo_start_square()).cell, Cell::Floor);
    }

    #[test]
    fn test_demo_level_contents() {
        let level = build_demo_level();
        let board = level.board().read().unwrap();

        let ghosts = board.units().filter(|unit| unit.is_ghost()).count();
        assert_eq!(ghosts, DEMO_GHOSTS);
        assert!(board.occupants_of(demo_start_square()).is_empty());

        for unit in board.units() {
            let pos = unit.position().unwrap();
            assert_eq!(board.square_at(pos).cell, Cell::Floor);
            assert_eq!(board.occupants_of(pos).len(), 1);
        }
        drop(board);
        assert!(level.remaining_pellets() > 0);
    }

    /// Ghosts roam while the player stands still; the board must stay consistent and no ghost
    /// may ever end up inside a wall.
    #[tokio::test(start_paused = true)]
    async fn test_demo_level_runs_with_ghosts() {
        let level = Arc::new(build_demo_level());
        let player = level.create_player();
        level.register_player(player);
        let counter = Arc::new(Counter::default());
        level.add_observer(counter.clone());
        let pellets_at_start = level.remaining_pellets();

        level.start();
        assert_eq!(level.active_schedules(), DEMO_GHOSTS);

        for step in 0..40 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            level.move_unit(player, Direction::ALL[step % 4]);
        }
        level.stop();
        assert_eq!(level.active_schedules(), 0);

        let board = level.board().read().unwrap();
        for unit in board.units().filter(|unit| unit.is_ghost()) {
            let pos = unit.position().unwrap();
            assert_eq!(board.square_at(pos).cell, Cell::Floor);
            assert!(board.occupants_of(pos).contains(&unit.id));
        }

        let score = board.unit(player).and_then(Unit::player_state).map_or(0, |s| s.score);
        drop(board);
        let eaten = (score / PELLET_VALUE) as usize;
        assert_eq!(level.remaining_pellets() + eaten, pellets_at_start);

        if level.is_any_player_alive() {
            assert_eq!(counter.lost.load(Ordering::SeqCst), 0);
        } else {
            assert!(counter.lost.load(Ordering::SeqCst) >= 1);
        }
    }
}
