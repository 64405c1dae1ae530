//! Counter Store: the ms-count and decims-count shared with the tick path.
//!
//! The 64-bit ms-count is guarded by a spin lock so that no reader can see a
//! half-written value on targets without native 64-bit atomics. The 32-bit
//! decims-count is a plain atomic. There is no ordering between the two: a
//! reader may observe one advance without the other.

use core::sync::atomic::{AtomicU32, Ordering};
use spin::mutex::SpinMutex;

/// Millisecond and decims counters plus their synchronization.
///
/// Every operation is total and non-blocking apart from a bounded spin on the
/// ms-count lock, which is only ever held for a single load or store.
#[derive(Debug)]
pub struct CounterStore {
    /// Ticks since last reset
    ms: SpinMutex<u64>,

    /// Completed 10-tick groups since last reset
    decims: AtomicU32,
}

impl CounterStore {
    /// Create a store with both counters at zero.
    pub const fn new() -> Self {
        Self {
            ms: SpinMutex::new(0),
            decims: AtomicU32::new(0),
        }
    }

    /// Current ms-count, read under the same lock the tick path uses.
    pub fn read_ms(&self) -> u64 {
        *self.ms.lock()
    }

    /// Set ms-count to exactly 0.
    pub fn reset_ms(&self) {
        *self.ms.lock() = 0;
    }

    /// Current decims-count.
    pub fn read_decims(&self) -> u32 {
        self.decims.load(Ordering::Acquire)
    }

    /// Set decims-count to exactly 0.
    pub fn reset_decims(&self) {
        self.decims.store(0, Ordering::Release);
    }

    pub(crate) fn increment_ms(&self) {
        let mut ms = self.ms.lock();
        *ms = ms.wrapping_add(1);
    }

    pub(crate) fn increment_decims(&self) {
        self.decims.fetch_add(1, Ordering::AcqRel);
    }
}

impl Default for CounterStore {
    fn default() -> Self {
        Self::new()
    }
}
