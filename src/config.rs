//! Configuration traits and implementations for clock cadence.
//!
//! The `ClockConfig` trait allows compile-time configuration of the tick
//! cadence and the decims divisor without runtime overhead.

/// Clock configuration trait defining the tick cadence.
///
/// All values are const (zero runtime cost). The counters themselves have no
/// configurable width; only timing is tunable.
pub trait ClockConfig {
    /// Milliseconds between two firings of the Tick Source (default: 1)
    const TICK_PERIOD_MS: u64;

    /// Ticks per decims-count increment, the TickDivisor reload value (default: 10)
    ///
    /// Must be non-zero; `TickSource` rejects 0 at compile time.
    const TICKS_PER_DECIMS: u8;

    /// Delay before the very first firing after arming (default: 10)
    const INITIAL_DELAY_MS: u64;
}

/// Default configuration: 1 ms ticks, 10 ms coarse counter.
///
/// - TICK_PERIOD_MS: 1
/// - TICKS_PER_DECIMS: 10
/// - INITIAL_DELAY_MS: 10
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DefaultConfig;

impl ClockConfig for DefaultConfig {
    const TICK_PERIOD_MS: u64 = 1;
    const TICKS_PER_DECIMS: u8 = 10;
    const INITIAL_DELAY_MS: u64 = 10;
}

/// Minimal configuration: same cadence, first firing one period after arming.
///
/// - TICK_PERIOD_MS: 1
/// - TICKS_PER_DECIMS: 10
/// - INITIAL_DELAY_MS: 1
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MinimalConfig;

impl ClockConfig for MinimalConfig {
    const TICK_PERIOD_MS: u64 = 1;
    const TICKS_PER_DECIMS: u8 = 10;
    const INITIAL_DELAY_MS: u64 = 1;
}
