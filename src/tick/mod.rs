//! Tick Source and the scheduling service it rearms itself through.
//!
//! Scheduling is one-shot: every firing computes `now + TICK_PERIOD_MS` and
//! arms the next one before returning. Which execution context actually
//! delivers the firing is up to the [`Scheduler`] implementation:
//!
//! - [`ManualScheduler`]: virtual time advanced explicitly (tests, or hosts
//!   that call in from their own timer interrupt)
//! - [`TimerThread`]: a dedicated host thread (`std` feature)

use crate::config::ClockConfig;
use crate::counter::CounterStore;
use core::marker::PhantomData;
use core::sync::atomic::{AtomicU8, Ordering};

// Sub-modules
pub mod manual;
#[cfg(feature = "std")]
pub mod thread;

// Re-export key types
pub use manual::ManualScheduler;
#[cfg(feature = "std")]
pub use thread::TimerThread;

/// Deadline value meaning "nothing armed".
pub(crate) const DISARMED: u64 = u64::MAX;

/// One-shot scheduling service.
///
/// Holds at most one pending firing. Arming again replaces the previous
/// deadline. Both methods are called from the tick context and must not block.
pub trait Scheduler {
    /// Current time on the scheduler's monotonic millisecond clock.
    fn now_ms(&self) -> u64;

    /// Arm the single pending firing for `deadline_ms`.
    fn schedule_once(&self, deadline_ms: u64);
}

/// Something a scheduler can arm and fire.
pub trait TickTarget {
    /// Arm the first firing.
    fn arm<S: Scheduler + ?Sized>(&self, scheduler: &S);

    /// Deliver one firing. Implementations rearm through `scheduler`.
    fn on_tick<S: Scheduler + ?Sized>(&self, scheduler: &S);
}

/// Timer callback driving the Counter Store.
///
/// Owns the TickDivisor, which counts down from `C::TICKS_PER_DECIMS` to 1 and
/// reloads on the firing that advances decims-count.
#[derive(Debug)]
pub struct TickSource<C: ClockConfig> {
    divisor: AtomicU8,
    _config: PhantomData<C>,
}

impl<C: ClockConfig> TickSource<C> {
    const NONZERO_DIVISOR: () = assert!(
        C::TICKS_PER_DECIMS > 0,
        "TICKS_PER_DECIMS must be non-zero"
    );

    /// Create a Tick Source with a full divisor.
    ///
    /// A zero divisor is rejected at compile time:
    ///
    /// ```compile_fail
    /// use tmr_clock::{ClockConfig, TickSource};
    ///
    /// struct NoDivisor;
    /// impl ClockConfig for NoDivisor {
    ///     const TICK_PERIOD_MS: u64 = 1;
    ///     const TICKS_PER_DECIMS: u8 = 0;
    ///     const INITIAL_DELAY_MS: u64 = 1;
    /// }
    ///
    /// let _ticks = TickSource::<NoDivisor>::new();
    /// ```
    pub const fn new() -> Self {
        let () = Self::NONZERO_DIVISOR;
        Self {
            divisor: AtomicU8::new(C::TICKS_PER_DECIMS),
            _config: PhantomData,
        }
    }

    /// Arm the first firing `C::INITIAL_DELAY_MS` from now.
    pub fn arm<S: Scheduler + ?Sized>(&self, scheduler: &S) {
        scheduler.schedule_once(scheduler.now_ms().saturating_add(C::INITIAL_DELAY_MS));
    }

    /// One firing: bump ms-count, step the divisor, rearm.
    ///
    /// Never blocks beyond the bounded spin on the ms-count lock.
    pub fn on_tick<S: Scheduler + ?Sized>(&self, counters: &CounterStore, scheduler: &S) {
        counters.increment_ms();

        // Never fails: the closure always returns Some
        let previous = self
            .divisor
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |d| {
                Some(if d <= 1 { C::TICKS_PER_DECIMS } else { d - 1 })
            })
            .unwrap_or(C::TICKS_PER_DECIMS);
        if previous <= 1 {
            counters.increment_decims();
        }

        scheduler.schedule_once(scheduler.now_ms().saturating_add(C::TICK_PERIOD_MS));
    }

    /// Ticks left until the next decims-count increment.
    pub fn divisor(&self) -> u8 {
        self.divisor.load(Ordering::Relaxed)
    }
}

impl<C: ClockConfig> Default for TickSource<C> {
    fn default() -> Self {
        Self::new()
    }
}
