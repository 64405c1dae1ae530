//! Timer device: owns a clock and hands out one session at a time.
//!
//! The device is the registration-side owner of all state. Schedulers tick it
//! (it is a [`TickTarget`]), clients [`open`](TimerDevice::open) it and talk
//! the request protocol through the returned [`Session`].

use crate::clock::Clock;
use crate::config::{ClockConfig, DefaultConfig};
use crate::error::ClockError;
use crate::io::{UserReader, UserWriter};
use crate::protocol::{DEFAULT_SCRATCH_CAPACITY, ProtocolHandler, ScratchBuffer};
use crate::tick::{Scheduler, TickTarget};
use core::sync::atomic::{AtomicBool, Ordering};
use spin::mutex::SpinMutex;

/// Single-client timer device.
///
/// Generic over:
/// - `C`: ClockConfig implementation
/// - `N`: scratch buffer capacity, which also bounds write payloads
#[derive(Debug)]
pub struct TimerDevice<C: ClockConfig = DefaultConfig, const N: usize = DEFAULT_SCRATCH_CAPACITY>
{
    clock: Clock<C>,

    /// Staging buffer shared by every call of the active session
    scratch: SpinMutex<ScratchBuffer<N>>,

    /// Set while a session is open
    open: AtomicBool,
}

impl<C: ClockConfig, const N: usize> TimerDevice<C, N> {
    /// Create a closed device with a fresh clock.
    pub const fn new() -> Self {
        Self {
            clock: Clock::new(),
            scratch: SpinMutex::new(ScratchBuffer::new()),
            open: AtomicBool::new(false),
        }
    }

    /// The clock this device serves.
    pub fn clock(&self) -> &Clock<C> {
        &self.clock
    }

    /// Whether a session is currently open.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Open the single session.
    ///
    /// Fails with [`ClockError::Busy`] while another session is open.
    pub fn open(&self) -> Result<Session<'_, C, N>, ClockError> {
        if self
            .open
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::warn!("open rejected: session already active");
            return Err(ClockError::Busy);
        }

        log::debug!("session opened");
        Ok(Session { device: self })
    }

    fn release(&self) {
        self.open.store(false, Ordering::Release);
        log::debug!("session closed");
    }
}

impl<C: ClockConfig, const N: usize> Default for TimerDevice<C, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ClockConfig, const N: usize> TickTarget for TimerDevice<C, N> {
    fn arm<S: Scheduler + ?Sized>(&self, scheduler: &S) {
        self.clock.arm(scheduler);
    }

    fn on_tick<S: Scheduler + ?Sized>(&self, scheduler: &S) {
        self.clock.on_tick(scheduler);
    }
}

/// An open session on a [`TimerDevice`].
///
/// Dropping the session closes it. Calls may come from several threads
/// sharing one session; they are serialized on the scratch buffer.
#[derive(Debug)]
pub struct Session<'d, C: ClockConfig = DefaultConfig, const N: usize = DEFAULT_SCRATCH_CAPACITY>
{
    device: &'d TimerDevice<C, N>,
}

impl<'d, C: ClockConfig, const N: usize> Session<'d, C, N> {
    /// Read `len` bytes into `out`. See [`ProtocolHandler::read`].
    pub fn read<W>(&self, len: usize, out: &mut W) -> Result<usize, ClockError>
    where
        W: UserWriter + ?Sized,
    {
        let mut scratch = self.device.scratch.lock();
        ProtocolHandler::new(self.device.clock.counters(), &mut *scratch).read(len, out)
    }

    /// Write `len` bytes from `src`. See [`ProtocolHandler::write`].
    pub fn write<R>(&self, src: &R, len: usize) -> Result<usize, ClockError>
    where
        R: UserReader + ?Sized,
    {
        let mut scratch = self.device.scratch.lock();
        ProtocolHandler::new(self.device.clock.counters(), &mut *scratch).write(src, len)
    }

    /// Current decims-count as a plain query.
    pub fn status(&self) -> u32 {
        self.device.clock.read_decims()
    }

    /// The device this session belongs to.
    pub fn device(&self) -> &'d TimerDevice<C, N> {
        self.device
    }

    /// Close the session explicitly.
    pub fn close(self) {}
}

impl<C: ClockConfig, const N: usize> Drop for Session<'_, C, N> {
    fn drop(&mut self) {
        self.device.release();
    }
}
