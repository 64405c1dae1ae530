//! Test fixtures for tmr-clock testing.
//!
//! Provides:
//! - `MockUser`: caller memory with call counting, for both read and write
//! - `FaultyUser`: caller memory that is never accessible
//! - `FaultAfter`: caller memory that faults after a number of copies

#![allow(dead_code)]

use std::cell::Cell;
use tmr_clock::{UserReader, UserWriter};

// ============================================================================
// MockUser - Test caller memory
// ============================================================================

/// Mock caller memory.
///
/// Source bytes for writes are fixed at construction; bytes copied out by
/// reads are appended to an output capture.
#[derive(Debug, Default)]
pub struct MockUser {
    /// Bytes a write will copy in
    input: Vec<u8>,

    /// Bytes reads have copied out
    output: Vec<u8>,

    /// Number of copy_in calls
    copies_in: Cell<usize>,

    /// Number of copy_out calls
    copies_out: usize,
}

impl MockUser {
    /// Empty memory, suitable as a read destination.
    pub fn new() -> Self {
        Self::default()
    }

    /// Memory pre-loaded with a write payload.
    pub fn with_input(input: &[u8]) -> Self {
        Self {
            input: input.to_vec(),
            ..Self::default()
        }
    }

    /// Captured output.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Clear output capture.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Number of copy_in calls so far.
    pub fn copies_in(&self) -> usize {
        self.copies_in.get()
    }

    /// Number of copy_out calls so far.
    pub fn copies_out(&self) -> usize {
        self.copies_out
    }

    /// Decode captured output as a decims-count.
    pub fn output_u32(&self) -> u32 {
        let bytes: [u8; 4] = self.output[..4].try_into().unwrap();
        u32::from_ne_bytes(bytes)
    }

    /// Decode captured output as an ms-count.
    pub fn output_u64(&self) -> u64 {
        let bytes: [u8; 8] = self.output[..8].try_into().unwrap();
        u64::from_ne_bytes(bytes)
    }
}

impl UserWriter for MockUser {
    type Error = ();

    fn copy_out(&mut self, src: &[u8]) -> Result<(), Self::Error> {
        self.copies_out += 1;
        self.output.extend_from_slice(src);
        Ok(())
    }
}

impl UserReader for MockUser {
    type Error = ();

    fn copy_in(&self, dst: &mut [u8]) -> Result<(), Self::Error> {
        self.copies_in.set(self.copies_in.get() + 1);
        if dst.len() > self.input.len() {
            return Err(());
        }
        dst.copy_from_slice(&self.input[..dst.len()]);
        Ok(())
    }
}

// ============================================================================
// FaultyUser - Inaccessible caller memory
// ============================================================================

/// Caller memory that faults on every copy, in both directions.
#[derive(Debug, Default, Copy, Clone)]
pub struct FaultyUser;

impl UserWriter for FaultyUser {
    type Error = ();

    fn copy_out(&mut self, _src: &[u8]) -> Result<(), Self::Error> {
        Err(())
    }
}

impl UserReader for FaultyUser {
    type Error = ();

    fn copy_in(&self, _dst: &mut [u8]) -> Result<(), Self::Error> {
        Err(())
    }
}

// ============================================================================
// FaultAfter - Memory that goes away
// ============================================================================

/// Caller memory that succeeds `remaining` times, then faults.
#[derive(Debug)]
pub struct FaultAfter {
    remaining: usize,
    output: Vec<u8>,
}

impl FaultAfter {
    /// Allow `copies` successful copies before faulting.
    pub fn new(copies: usize) -> Self {
        Self {
            remaining: copies,
            output: Vec::new(),
        }
    }

    /// Bytes copied out before the fault.
    pub fn output(&self) -> &[u8] {
        &self.output
    }
}

impl UserWriter for FaultAfter {
    type Error = ();

    fn copy_out(&mut self, src: &[u8]) -> Result<(), Self::Error> {
        if self.remaining == 0 {
            return Err(());
        }
        self.remaining -= 1;
        self.output.extend_from_slice(src);
        Ok(())
    }
}
