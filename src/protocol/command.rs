//! Write-side command codes.

/// Mapping between a command enum and its wire byte.
///
/// Usually derived with `#[derive(CommandCode)]`.
pub trait CommandCode: Sized + Copy {
    /// Decode a command byte. Unknown bytes yield `None`.
    fn from_code(code: u8) -> Option<Self>;

    /// Wire byte for this command.
    fn code(&self) -> u8;

    /// Variant name, for log records.
    fn name(&self) -> &'static str;
}

/// Commands a client can write as the single payload byte.
///
/// The byte values match the read length of the counter they reset.
#[derive(Debug, Copy, Clone, PartialEq, Eq, tmr_clock_macros::CommandCode)]
#[repr(u8)]
pub enum Command {
    /// Set decims-count to 0
    ResetDecims = 4,

    /// Set ms-count to 0
    ResetMs = 8,
}
