//! Host thread that delivers firings in real time.

use super::{DISARMED, Scheduler, TickTarget};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Scheduler state shared between the owner and the tick thread.
#[derive(Debug)]
struct Shared {
    epoch: Instant,
    deadline: AtomicU64,

    /// Deadline being delivered, `DISARMED` outside of delivery
    firing: AtomicU64,

    stop: AtomicBool,
}

impl Shared {
    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX - 1)
    }
}

impl Scheduler for Shared {
    /// During delivery this is the firing's deadline, not the wake-up time,
    /// so a late wake-up never shifts the following deadlines.
    fn now_ms(&self) -> u64 {
        match self.firing.load(Ordering::Acquire) {
            DISARMED => self.elapsed_ms(),
            firing => firing,
        }
    }

    fn schedule_once(&self, deadline_ms: u64) {
        self.deadline.store(deadline_ms, Ordering::Release);
    }
}

/// Background thread firing a [`TickTarget`] at its armed deadlines.
///
/// Time is measured from the moment the thread is spawned. A firing that is
/// delivered late still reports its own deadline as the current time, so
/// the thread catches up on missed periods instead of dropping them. [`stop`](Self::stop)
/// (or dropping the handle) is synchronous: once it returns the thread has
/// been joined and no further firing can happen.
#[derive(Debug)]
pub struct TimerThread {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
}

impl TimerThread {
    /// Arm `target` and start delivering its firings.
    pub fn spawn<T>(target: Arc<T>) -> std::io::Result<Self>
    where
        T: TickTarget + Send + Sync + 'static,
    {
        let shared = Arc::new(Shared {
            epoch: Instant::now(),
            deadline: AtomicU64::new(DISARMED),
            firing: AtomicU64::new(DISARMED),
            stop: AtomicBool::new(false),
        });

        target.arm(&*shared);

        let thread_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name("tmr-tick".into())
            .spawn(move || run(&*target, &thread_shared))?;

        log::info!("tick thread started");

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    /// Milliseconds since the thread was spawned.
    pub fn now_ms(&self) -> u64 {
        self.shared.elapsed_ms()
    }

    /// Whether the thread is still running.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Cancel pending firings and join the thread.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        self.shared.stop.store(true, Ordering::Release);
        handle.thread().unpark();

        if handle.join().is_err() {
            log::error!("tick thread panicked");
        } else {
            log::info!("tick thread stopped");
        }
    }
}

impl Drop for TimerThread {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run<T: TickTarget + ?Sized>(target: &T, shared: &Shared) {
    while !shared.stop.load(Ordering::Acquire) {
        let deadline = shared.deadline.load(Ordering::Acquire);
        if deadline == DISARMED {
            thread::park();
            continue;
        }

        let now = shared.elapsed_ms();
        if now < deadline {
            // Spurious wakeups just loop back here
            thread::park_timeout(Duration::from_millis(deadline - now));
            continue;
        }

        shared.deadline.store(DISARMED, Ordering::Release);
        shared.firing.store(deadline, Ordering::Release);
        target.on_tick(shared);
        shared.firing.store(DISARMED, Ordering::Release);
    }
}
