//! Error types for clock sessions and protocol calls.
//!
//! The `ClockError` enum represents every failure a client call can report.
//! `ErrorKind` folds the variants onto the three categories callers act on.

use core::fmt;

/// Conventional POSIX `EFAULT`.
pub const EFAULT: i32 = 14;

/// Conventional POSIX `EBUSY`.
pub const EBUSY: i32 = 16;

/// Conventional POSIX `EINVAL`.
pub const EINVAL: i32 = 22;

/// Coarse error category.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A session is already open
    Busy,

    /// Caller supplied a request the protocol does not define
    InvalidArgument,

    /// Copying across the trust boundary failed
    BoundaryFault,
}

/// Clock error type.
///
/// None of these are transient: retrying the same call fails the same way.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// Second open attempted while a session is active
    Busy,

    /// Read length other than 0, 4 or 8
    UnsupportedReadLength(usize),

    /// Recognized command sent with a payload that is not exactly one byte
    CommandLength {
        /// Command byte found at the start of the payload
        command: u8,
        /// Total payload length
        len: usize,
    },

    /// Write payload larger than the scratch buffer
    PayloadTooLarge {
        /// Requested payload length
        len: usize,
        /// Scratch buffer capacity
        capacity: usize,
    },

    /// Copy in or out of caller memory failed
    BoundaryFault,
}

impl ClockError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClockError::Busy => ErrorKind::Busy,
            ClockError::UnsupportedReadLength(_)
            | ClockError::CommandLength { .. }
            | ClockError::PayloadTooLarge { .. } => ErrorKind::InvalidArgument,
            ClockError::BoundaryFault => ErrorKind::BoundaryFault,
        }
    }

    /// POSIX error number for this error (always positive).
    pub fn errno(&self) -> i32 {
        match self.kind() {
            ErrorKind::Busy => EBUSY,
            ErrorKind::InvalidArgument => EINVAL,
            ErrorKind::BoundaryFault => EFAULT,
        }
    }
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockError::Busy => write!(f, "Device busy"),
            ClockError::UnsupportedReadLength(len) => {
                write!(f, "Unsupported read length {} (expected 0, 4 or 8)", len)
            }
            ClockError::CommandLength { command, len } => {
                write!(f, "Command {} must be 1 byte, got {}", command, len)
            }
            ClockError::PayloadTooLarge { len, capacity } => {
                write!(f, "Payload of {} bytes exceeds buffer of {}", len, capacity)
            }
            ClockError::BoundaryFault => write!(f, "Bad address"),
        }
    }
}

impl core::error::Error for ClockError {}
