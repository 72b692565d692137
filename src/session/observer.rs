//! Bridge from level callbacks to the session's mailbox.

use actix::{Addr, WeakAddr};

use crate::game::level::LevelObserver;
use crate::session::messages::{LevelOutcome, Outcome};
use crate::session::server::GameSession;

/// Forwards win/loss notifications to a `GameSession` as messages.
///
/// Sending never blocks, so the level's move section is not held up by the session. The address
/// is weak because the level is owned by the session itself.
pub struct ActorObserver {
    session: WeakAddr<GameSession>,
}

impl ActorObserver {
    pub fn new(session: &Addr<GameSession>) -> Self {
        Self {
            session: session.downgrade(),
        }
    }

    fn notify(&self, outcome: Outcome) {
        if let Some(session) = self.session.upgrade() {
            session.do_send(LevelOutcome(outcome));
        }
    }
}

impl LevelObserver for ActorObserver {
    fn level_won(&self) {
        self.notify(Outcome::Won);
    }

    fn level_lost(&self) {
        self.notify(Outcome::Lost);
    }
}
