//! Trust-boundary copy abstraction.
//!
//! Caller memory is never touched directly. Bytes leave the clock through
//! [`UserWriter::copy_out`] and enter it through [`UserReader::copy_in`], so a
//! host can back these with whatever access checks its boundary needs
//! (user-space copies, DMA windows, plain slices in tests).

/// Copy error for the provided slice implementations.
///
/// Raised when the caller's region is smaller than the requested transfer,
/// the slice equivalent of inaccessible memory.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Fault;

/// Destination in caller memory for bytes produced by a read.
pub trait UserWriter {
    /// Platform-specific error type
    type Error;

    /// Copy all of `src` out to the caller.
    ///
    /// Either the whole of `src` is delivered or an error is returned.
    fn copy_out(&mut self, src: &[u8]) -> Result<(), Self::Error>;
}

/// Source in caller memory for bytes consumed by a write.
pub trait UserReader {
    /// Platform-specific error type
    type Error;

    /// Fill all of `dst` from the caller.
    ///
    /// Either `dst` is filled completely or an error is returned.
    fn copy_in(&self, dst: &mut [u8]) -> Result<(), Self::Error>;
}

impl UserWriter for [u8] {
    type Error = Fault;

    fn copy_out(&mut self, src: &[u8]) -> Result<(), Self::Error> {
        let dst = self.get_mut(..src.len()).ok_or(Fault)?;
        dst.copy_from_slice(src);
        Ok(())
    }
}

impl UserReader for [u8] {
    type Error = Fault;

    fn copy_in(&self, dst: &mut [u8]) -> Result<(), Self::Error> {
        let src = self.get(..dst.len()).ok_or(Fault)?;
        dst.copy_from_slice(src);
        Ok(())
    }
}

impl<const N: usize> UserWriter for heapless::Vec<u8, N> {
    type Error = Fault;

    fn copy_out(&mut self, src: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(src).map_err(|_| Fault)
    }
}

#[cfg(feature = "std")]
impl UserWriter for std::vec::Vec<u8> {
    type Error = core::convert::Infallible;

    fn copy_out(&mut self, src: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(src);
        Ok(())
    }
}
