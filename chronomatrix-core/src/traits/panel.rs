//! Panel output channel traits
//!
//! The scan-out loop only needs two channels: one that clocks pixel words
//! into the shift registers and one that selects and latches a row-group.
//! Pin toggling, clock edges and output-enable timing are the
//! implementation's business.

use crate::pixel::PixelWord;

/// Shift-register data channel
///
/// Each call is one transaction carrying six pixels. Implementations clock
/// every pixel in with a rising then falling edge.
#[allow(async_fn_in_trait)]
pub trait ShiftRegisterChannel {
    /// Error type for transfers
    type Error;

    /// Shift one word into the panel
    async fn shift(&mut self, word: PixelWord) -> Result<(), Self::Error>;

    /// Wait until every word handed to [`shift`](Self::shift) has been
    /// clocked out, so a following latch sees the complete row-group
    async fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Row-select and latch channel
///
/// Writing a row-group index latches the data shifted so far and lights
/// that row-group.
#[allow(async_fn_in_trait)]
pub trait RowSelectChannel {
    /// Error type for row selection
    type Error;

    /// Select row-group `index` (0-7)
    async fn select(&mut self, index: u8) -> Result<(), Self::Error>;
}
