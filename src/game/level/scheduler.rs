//! Per-ghost movement schedules.
//!
//! Every ghost gets its own tokio task so each keeps its own cadence and a slow move by one
//! ghost never delays the timers of the others. The first tick fires after half an interval
//! to spread out ghosts that share the same speed.
//!
//! A tick that panics stops the level before the task unwinds, so a level never reports itself
//! running with a dead schedule.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};

use log::{error, trace};
use tokio::task::JoinHandle;

use crate::game::entities::NpcBehaviour;
use crate::game::level::Level;
use crate::game::types::UnitId;

/// Cancellable handle to a ghost's recurring movement task.
#[derive(Debug)]
pub struct ScheduleHandle(JoinHandle<()>);

impl ScheduleHandle {
    /// Interrupts a pending wait. A move that is already being applied runs to completion since
    /// move admission never awaits.
    pub fn cancel(self) {
        self.0.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

pub(crate) struct NpcSlot {
    pub behaviour: Arc<dyn NpcBehaviour>,
    pub schedule: Option<ScheduleHandle>,
}

impl NpcSlot {
    pub fn new(behaviour: Arc<dyn NpcBehaviour>) -> Self {
        Self {
            behaviour,
            schedule: None,
        }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.schedule.take() {
            handle.cancel();
        }
    }
}

/// Spawns the movement loop of one ghost on the current tokio runtime.
///
/// The task only holds a weak reference so that dropping the level ends it.
pub(crate) fn spawn_schedule(
    level: Weak<Level>,
    npc: UnitId,
    behaviour: Arc<dyn NpcBehaviour>,
) -> ScheduleHandle {
    let first_tick = behaviour.interval() / 2;
    ScheduleHandle(tokio::spawn(async move {
        tokio::time::sleep(first_tick).await;
        loop {
            let interval = match level.upgrade() {
                Some(level) => {
                    let tick = panic::catch_unwind(AssertUnwindSafe(|| {
                        level.tick_npc(npc, behaviour.as_ref())
                    }));
                    if let Err(payload) = tick {
                        error!("[Scheduler] Ghost {} tick panicked, stopping level", npc);
                        level.stop();
                        panic::resume_unwind(payload);
                    }
                    behaviour.interval()
                }
                None => break,
            };
            trace!("[Scheduler] Ghost {} sleeps {:?}", npc, interval);
            tokio::time::sleep(interval).await;
        }
    }))
}
