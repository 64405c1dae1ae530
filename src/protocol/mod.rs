//! Request protocol: reads select a counter by length, writes carry a command byte.
//!
//! | Call             | Payload         | Result                                  |
//! |------------------|-----------------|-----------------------------------------|
//! | read, 0 bytes    | none            | decims-count as the call's result value |
//! | read, 4 bytes    | decims-count    | 4                                       |
//! | read, 8 bytes    | ms-count        | 8                                       |
//! | read, other      | none            | `UnsupportedReadLength`                 |
//! | write `[0x04]`   | reset decims    | 1                                       |
//! | write `[0x08]`   | reset ms        | 1                                       |
//! | write `[4 or 8, ..]` | none        | `CommandLength`                         |
//! | write, unknown   | ignored         | payload length                          |
//! | write > capacity | none            | `PayloadTooLarge`                       |
//!
//! Counter bytes use native width and host byte order.

use crate::counter::CounterStore;
use crate::error::ClockError;
use crate::io::{UserReader, UserWriter};

// Sub-modules
pub mod command;
pub mod scratch;

// Re-export key types
pub use command::{Command, CommandCode};
pub use scratch::{DEFAULT_SCRATCH_CAPACITY, MAX_READ_LEN, ScratchBuffer};

/// What a read asks for, decided purely by its length.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReadRequest {
    /// Zero-length read: decims-count returned as the call's result value
    Status = 0,

    /// 4-byte decims-count
    Decims = 4,

    /// 8-byte ms-count
    Ms = 8,
}

impl ReadRequest {
    /// Classify a read by its requested length.
    pub fn from_len(len: usize) -> Result<Self, ClockError> {
        match len {
            0 => Ok(ReadRequest::Status),
            4 => Ok(ReadRequest::Decims),
            8 => Ok(ReadRequest::Ms),
            other => Err(ClockError::UnsupportedReadLength(other)),
        }
    }

    /// Number of bytes this request transfers.
    pub const fn len(self) -> usize {
        self as usize
    }

    /// True for the zero-length status query.
    pub const fn is_empty(self) -> bool {
        matches!(self, ReadRequest::Status)
    }
}

/// Fold a call result into a signed result code.
///
/// Successes map to their value, failures to `-errno`. For zero-length reads
/// the value is decims-count itself, which saturates at `isize::MAX` where
/// `isize` is narrower than the count.
pub fn result_code(result: Result<usize, ClockError>) -> isize {
    match result {
        Ok(value) => isize::try_from(value).unwrap_or(isize::MAX),
        Err(err) => -(err.errno() as isize),
    }
}

/// Serves reads and writes against one Counter Store.
///
/// Stateless between calls; the scratch buffer is only staging space.
#[derive(Debug)]
pub struct ProtocolHandler<'a, const N: usize = DEFAULT_SCRATCH_CAPACITY> {
    counters: &'a CounterStore,
    scratch: &'a mut ScratchBuffer<N>,
}

impl<'a, const N: usize> ProtocolHandler<'a, N> {
    /// Create a handler borrowing the counters and a staging buffer.
    pub fn new(counters: &'a CounterStore, scratch: &'a mut ScratchBuffer<N>) -> Self {
        Self { counters, scratch }
    }

    /// Decims-count as a plain query, without the length-0 read overloading.
    pub fn status(&self) -> u32 {
        self.counters.read_decims()
    }

    /// Serve a read of `len` bytes into `out`.
    ///
    /// Returns the number of bytes produced, or for `len == 0` the current
    /// decims-count. Nothing is copied out on failure.
    pub fn read<W>(&mut self, len: usize, out: &mut W) -> Result<usize, ClockError>
    where
        W: UserWriter + ?Sized,
    {
        let bytes = match ReadRequest::from_len(len)? {
            ReadRequest::Status => {
                return Ok(usize::try_from(self.status()).unwrap_or(usize::MAX));
            }
            ReadRequest::Decims => self
                .scratch
                .stage(&self.counters.read_decims().to_ne_bytes())?,
            ReadRequest::Ms => self.scratch.stage(&self.counters.read_ms().to_ne_bytes())?,
        };

        if out.copy_out(bytes).is_err() {
            log::warn!("read: copy to caller failed, count={}", len);
            return Err(ClockError::BoundaryFault);
        }

        Ok(len)
    }

    /// Serve a write of `len` bytes from `src`.
    ///
    /// The whole payload is copied in before it is interpreted, so a copy
    /// fault never leaves a command half applied.
    pub fn write<R>(&mut self, src: &R, len: usize) -> Result<usize, ClockError>
    where
        R: UserReader + ?Sized,
    {
        let capacity = self.scratch.capacity();
        if len > capacity {
            return Err(ClockError::PayloadTooLarge { len, capacity });
        }

        let payload = self.scratch.zeroed(len)?;
        if src.copy_in(payload).is_err() {
            log::warn!("write: copy from caller failed, count={}", len);
            return Err(ClockError::BoundaryFault);
        }

        let Some(&code) = payload.first() else {
            return Ok(0);
        };

        match Command::from_code(code) {
            Some(command) => {
                // The length of a command must be exactly one byte
                if len != 1 {
                    return Err(ClockError::CommandLength { command: code, len });
                }
                self.apply(command);
                Ok(1)
            }
            None => {
                log::debug!("write: ignoring unknown command {:#04x}, count={}", code, len);
                Ok(len)
            }
        }
    }

    fn apply(&self, command: Command) {
        match command {
            Command::ResetDecims => self.counters.reset_decims(),
            Command::ResetMs => self.counters.reset_ms(),
        }
        log::info!("clear timer from user ({})", command.name());
    }
}
