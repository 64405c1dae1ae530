//! # tmr-clock
//!
//! Millisecond software clock: a self-rearming 1 ms tick drives two counters
//! that clients read and reset through a tiny byte protocol.
//!
//! **Key features:**
//! - **Two counters** - 64-bit ms-count and 32-bit decims-count (10 ms units)
//! - **Tick-safe locking** - spin lock for the wide counter, atomics for the narrow one
//! - **Byte protocol** - reads select a counter by length, writes carry a command byte
//! - **Pluggable scheduling** - manual virtual time, or a host thread with `std`
//! - **Explicit context** - no global state, everything hangs off a [`TimerDevice`]
//!
//! ## Optional Features
//!
//! - `std` (default) - [`TimerThread`] scheduler, `Vec<u8>` as a read destination
//! - `monitor` - the `tmr-monitor` binary (TOML config, stderr logging)
//!
//! The library provides a `#[derive(CommandCode)]` macro that's always available.
//!
//! Everything except the `std` extras is `no_std` compatible.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

#[cfg(feature = "std")]
extern crate std;

// Lets the derive macro name `::tmr_clock` from inside this crate too
extern crate self as tmr_clock;

// Re-export derive macro (always available)
pub use tmr_clock_macros::CommandCode;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod error;
pub mod io;

pub mod counter;
pub mod tick;

pub mod clock;
pub mod protocol;

pub mod device;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Configuration
pub use config::{ClockConfig, DefaultConfig, MinimalConfig};

// Error types
pub use error::{ClockError, ErrorKind};

// Trust boundary
pub use io::{UserReader, UserWriter};

// Counter and tick core
pub use clock::Clock;
pub use counter::CounterStore;
pub use tick::{ManualScheduler, Scheduler, TickSource, TickTarget};

#[cfg(feature = "std")]
pub use tick::TimerThread;

// Protocol
pub use protocol::{Command, ProtocolHandler, ReadRequest, ScratchBuffer, result_code};

// Device
pub use device::{Session, TimerDevice};

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
