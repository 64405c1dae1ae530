//! Single-session gate.

#[allow(clippy::duplicate_mod)]
#[path = "helpers.rs"]
mod helpers;

use helpers::{create_test_device, deliver_ticks, read_ms, send};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use tmr_clock::{ClockError, Command, ErrorKind, TimerDevice, result_code};

#[test]
fn test_second_open_is_busy() {
    let device = create_test_device();
    let _session = device.open().unwrap();

    let err = device.open().unwrap_err();
    assert_eq!(err, ClockError::Busy);
    assert_eq!(err.kind(), ErrorKind::Busy);
    assert_eq!(result_code(Err(err)), -16);
}

#[test]
fn test_reopen_after_close() {
    let device = create_test_device();

    for _ in 0..3 {
        let session = device.open().unwrap();
        assert!(device.is_open());
        session.close();
        assert!(!device.is_open());
    }
}

#[test]
fn test_counters_survive_sessions() {
    let device = create_test_device();
    deliver_ticks(&device, 20);

    {
        let session = device.open().unwrap();
        assert_eq!(send(&session, Command::ResetDecims), Ok(1));
    }

    deliver_ticks(&device, 5);
    let session = device.open().unwrap();
    assert_eq!(read_ms(&session), 25);
    assert_eq!(session.status(), 0);
}

#[test]
fn test_session_reports_its_device() {
    let device = create_test_device();
    let session = device.open().unwrap();
    assert!(std::ptr::eq(session.device(), &device));
}

#[test]
fn test_concurrent_open_admits_exactly_one() {
    let device: Arc<TimerDevice> = Arc::new(TimerDevice::new());
    let admitted = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(std::sync::Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let device = Arc::clone(&device);
            let admitted = Arc::clone(&admitted);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                if let Ok(session) = device.open() {
                    admitted.fetch_add(1, Ordering::SeqCst);
                    // Hold the session until every contender has tried
                    barrier.wait();
                    drop(session);
                } else {
                    barrier.wait();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(admitted.load(Ordering::SeqCst), 1);
    assert!(!device.is_open());
}

#[test]
fn test_session_shared_across_threads() {
    let device = create_test_device();
    deliver_ticks(&device, 100);
    let session = device.open().unwrap();

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..100 {
                    assert_eq!(read_ms(&session), 100);
                }
            });
        }
    });
}
