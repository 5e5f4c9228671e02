//! External timestamp ingestion
//!
//! A host can push "MMSSUU" timestamps over the serial line instead of
//! relying on the internal tick. Bytes arrive in arbitrary chunks, so they
//! are collected here until six digits are in hand. A non-digit byte ends
//! the current stamp: if fewer than six digits were collected the partial
//! stamp is dropped and reported, otherwise it is just a separator.

use heapless::Vec;

use crate::compiler::{DisplayString, FrameCompiler, DISPLAY_DIGITS};
use crate::store::FrameStore;

/// Reasons a timestamp was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimestampError {
    /// A non-digit byte arrived after this many digits
    Truncated { digits: usize, byte: u8 },
}

/// Collects serial bytes into display strings
#[derive(Debug, Default)]
pub struct TimestampAssembler {
    pending: Vec<u8, DISPLAY_DIGITS>,
}

impl TimestampAssembler {
    /// Empty assembler
    pub const fn new() -> Self {
        Self { pending: Vec::new() }
    }

    /// Feed one byte
    ///
    /// Returns `Ok(Some(_))` when a complete timestamp was assembled,
    /// `Ok(None)` if more bytes are needed and `Err` when a partial
    /// timestamp was discarded.
    pub fn feed(&mut self, byte: u8) -> Result<Option<DisplayString>, TimestampError> {
        if !byte.is_ascii_digit() {
            let digits = self.pending.len();
            self.pending.clear();
            if digits == 0 {
                return Ok(None);
            }
            return Err(TimestampError::Truncated { digits, byte });
        }

        // Drained as soon as it fills, so there is always room here
        if self.pending.push(byte).is_err() {
            self.pending.clear();
            return Ok(None);
        }
        if !self.pending.is_full() {
            return Ok(None);
        }

        let stamp = DisplayString::parse(&self.pending);
        self.pending.clear();
        Ok(stamp.ok())
    }

    /// Feed one byte and publish the frame for a completed timestamp
    ///
    /// Returns the new store generation when a frame was published. A
    /// discarded timestamp leaves the published frame untouched.
    pub fn ingest(
        &mut self,
        byte: u8,
        compiler: &FrameCompiler,
        store: &FrameStore,
    ) -> Result<Option<u32>, TimestampError> {
        Ok(self
            .feed(byte)?
            .map(|stamp| store.publish(&compiler.compile(&stamp))))
    }

    /// Digits collected for the timestamp in progress
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Drop any partial timestamp
    pub fn reset(&mut self) {
        self.pending.clear();
    }
}
