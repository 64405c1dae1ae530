//! Deterministic scheduler driven by explicit time advancement.

use super::{DISARMED, Scheduler, TickTarget};
use spin::mutex::SpinMutex;

#[derive(Debug, Copy, Clone)]
struct Timeline {
    now: u64,
    deadline: u64,
}

/// Virtual-time scheduler.
///
/// Time only moves when [`advance`](Self::advance) is called, which then
/// delivers every due firing in deadline order. Useful for tests and for
/// hosts that already own a periodic interrupt and want to feed it in.
///
/// The lock is never held while a target runs, so targets may call back into
/// [`Scheduler`] freely.
#[derive(Debug)]
pub struct ManualScheduler {
    timeline: SpinMutex<Timeline>,
}

impl ManualScheduler {
    /// Create a scheduler at time 0 with nothing armed.
    pub const fn new() -> Self {
        Self {
            timeline: SpinMutex::new(Timeline {
                now: 0,
                deadline: DISARMED,
            }),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.timeline.lock().now
    }

    /// Deadline of the pending firing, if any.
    pub fn pending(&self) -> Option<u64> {
        match self.timeline.lock().deadline {
            DISARMED => None,
            deadline => Some(deadline),
        }
    }

    /// Drop the pending firing. No tick is delivered afterwards until rearmed.
    pub fn cancel(&self) {
        self.timeline.lock().deadline = DISARMED;
    }

    /// Advance virtual time by `ms`, firing `target` for every deadline reached.
    ///
    /// Returns the number of firings delivered. The target must rearm with a
    /// strictly later deadline or advancement stops at the current one.
    pub fn advance<T: TickTarget + ?Sized>(&self, ms: u64, target: &T) -> u64 {
        let until = self.now().saturating_add(ms);
        let mut fired = 0;

        loop {
            let deadline = {
                let mut timeline = self.timeline.lock();
                let deadline = timeline.deadline;
                if deadline == DISARMED || deadline > until {
                    break;
                }
                // Jump to the firing time and consume the arm before delivering
                timeline.now = timeline.now.max(deadline);
                timeline.deadline = DISARMED;
                deadline
            };

            target.on_tick(self);
            fired += 1;

            if self.timeline.lock().deadline <= deadline {
                break;
            }
        }

        let mut timeline = self.timeline.lock();
        timeline.now = timeline.now.max(until);
        fired
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn now_ms(&self) -> u64 {
        self.now()
    }

    fn schedule_once(&self, deadline_ms: u64) {
        self.timeline.lock().deadline = deadline_ms;
    }
}
