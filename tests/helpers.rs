//! Shared test helpers to reduce duplication across integration tests.

#![allow(dead_code)]

use tmr_clock::{
    ClockConfig, ClockError, Command, DefaultConfig, ManualScheduler, Session, TickTarget,
    TimerDevice,
};

// ============================================================================
// Device Creation Helpers
// ============================================================================

/// Create a closed device with default configuration.
pub fn create_test_device() -> TimerDevice {
    TimerDevice::new()
}

/// Deliver exactly `n` firings to `target`, bypassing the scheduler's clock.
pub fn deliver_ticks<T: TickTarget>(target: &T, n: u64) {
    let sched = ManualScheduler::new();
    for _ in 0..n {
        target.on_tick(&sched);
    }
}

/// Arm `target` on a fresh manual scheduler and run it until `n` ticks fired.
pub fn run_for_ticks<T: TickTarget>(target: &T, n: u64) -> ManualScheduler {
    let sched = ManualScheduler::new();
    target.arm(&sched);
    if n > 0 {
        let first = sched.advance(DefaultConfig::INITIAL_DELAY_MS, target);
        assert_eq!(first, 1, "first firing should land after the initial delay");
        let rest = sched.advance((n - 1) * DefaultConfig::TICK_PERIOD_MS, target);
        assert_eq!(rest, n - 1);
    }
    sched
}

// ============================================================================
// Protocol Helpers
// ============================================================================

/// Read ms-count through the 8-byte protocol read.
pub fn read_ms(session: &Session<'_>) -> u64 {
    let mut out = [0u8; 8];
    assert_eq!(session.read(8, &mut out[..]), Ok(8));
    u64::from_ne_bytes(out)
}

/// Read decims-count through the 4-byte protocol read.
pub fn read_decims(session: &Session<'_>) -> u32 {
    let mut out = [0u8; 4];
    assert_eq!(session.read(4, &mut out[..]), Ok(4));
    u32::from_ne_bytes(out)
}

/// Issue a one-byte command write.
pub fn send(session: &Session<'_>, command: Command) -> Result<usize, ClockError> {
    session.write(&[command as u8][..], 1)
}
