//! Fixed-capacity staging buffer for bytes crossing the trust boundary.

use crate::error::ClockError;

/// Default scratch capacity in bytes.
pub const DEFAULT_SCRATCH_CAPACITY: usize = 128;

/// Largest single read the protocol produces (the ms-count).
pub const MAX_READ_LEN: usize = 8;

/// Staging buffer reused by every call of one session.
///
/// Not shareable between concurrent calls: callers serialize access (the
/// device keeps it behind a lock).
#[derive(Debug, Clone)]
pub struct ScratchBuffer<const N: usize = DEFAULT_SCRATCH_CAPACITY> {
    buf: heapless::Vec<u8, N>,
}

impl<const N: usize> ScratchBuffer<N> {
    const FITS_LARGEST_READ: () = assert!(
        N >= MAX_READ_LEN,
        "scratch buffer must hold the largest read"
    );

    /// Create an empty buffer.
    pub const fn new() -> Self {
        let () = Self::FITS_LARGEST_READ;
        Self {
            buf: heapless::Vec::new(),
        }
    }

    /// Capacity in bytes.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Replace the contents with `src` and return the staged bytes.
    pub fn stage(&mut self, src: &[u8]) -> Result<&[u8], ClockError> {
        self.buf.clear();
        self.buf
            .extend_from_slice(src)
            .map_err(|_| ClockError::PayloadTooLarge {
                len: src.len(),
                capacity: N,
            })?;
        Ok(self.buf.as_slice())
    }

    /// Replace the contents with `len` zero bytes and return them for filling.
    pub fn zeroed(&mut self, len: usize) -> Result<&mut [u8], ClockError> {
        self.buf.clear();
        self.buf
            .resize(len, 0)
            .map_err(|_| ClockError::PayloadTooLarge { len, capacity: N })?;
        Ok(self.buf.as_mut_slice())
    }

}

impl<const N: usize> Default for ScratchBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
