//! Clock context: the Counter Store plus the Tick Source that drives it.
//!
//! One `Clock` is one independent time base. It is created explicitly and
//! handed by reference to whoever ticks it and whoever serves requests from
//! it; there is no hidden global instance.

use crate::config::{ClockConfig, DefaultConfig};
use crate::counter::CounterStore;
use crate::tick::{Scheduler, TickSource, TickTarget};

/// Counter state and tick logic for one time base.
#[derive(Debug)]
pub struct Clock<C: ClockConfig = DefaultConfig> {
    counters: CounterStore,
    ticks: TickSource<C>,
}

impl<C: ClockConfig> Clock<C> {
    /// Create a clock with both counters at zero and a full divisor.
    pub const fn new() -> Self {
        Self {
            counters: CounterStore::new(),
            ticks: TickSource::new(),
        }
    }

    /// Counter Store backing this clock.
    pub fn counters(&self) -> &CounterStore {
        &self.counters
    }

    /// Tick Source driving this clock.
    pub fn tick_source(&self) -> &TickSource<C> {
        &self.ticks
    }

    /// Current ms-count.
    pub fn read_ms(&self) -> u64 {
        self.counters.read_ms()
    }

    /// Current decims-count.
    pub fn read_decims(&self) -> u32 {
        self.counters.read_decims()
    }
}

impl<C: ClockConfig> Default for Clock<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ClockConfig> TickTarget for Clock<C> {
    fn arm<S: Scheduler + ?Sized>(&self, scheduler: &S) {
        self.ticks.arm(scheduler);
    }

    fn on_tick<S: Scheduler + ?Sized>(&self, scheduler: &S) {
        self.ticks.on_tick(&self.counters, scheduler);
    }
}
