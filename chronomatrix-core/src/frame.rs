//! Frame buffer
//!
//! The complete pixel plane in scan order: 8 row-groups of 48 words, where
//! each row-group holds 6 digit slots of 8 words.

use crate::glyph::{GlyphRow, ROW_GROUPS, WORDS_PER_GLYPH_ROW};
use crate::layout::{scan_position, PANEL_HEIGHT, PANEL_WIDTH, SLOTS};
use crate::pixel::{Color, PixelWord, PIXELS_PER_WORD};

/// Words streamed per row-group
pub const WORDS_PER_ROW_GROUP: usize = SLOTS * WORDS_PER_GLYPH_ROW;

/// One row-group in shift order
pub type RowGroup = [PixelWord; WORDS_PER_ROW_GROUP];

/// 8 row-groups × 48 words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    rows: [RowGroup; ROW_GROUPS],
}

impl FrameBuffer {
    /// A frame with every LED off
    pub const fn blank() -> Self {
        Self {
            rows: [[PixelWord::BLANK; WORDS_PER_ROW_GROUP]; ROW_GROUPS],
        }
    }

    /// Words of one row-group
    pub fn row_group(&self, index: usize) -> &RowGroup {
        &self.rows[index]
    }

    /// All row-groups in scan order
    pub fn row_groups(&self) -> &[RowGroup; ROW_GROUPS] {
        &self.rows
    }

    /// The 8 words of one digit slot in one row-group
    pub fn slot(&self, row_group: usize, slot: usize) -> &[PixelWord] {
        let start = slot * WORDS_PER_GLYPH_ROW;
        &self.rows[row_group][start..start + WORDS_PER_GLYPH_ROW]
    }

    /// Overwrite the words of one digit slot
    pub(crate) fn set_slot(&mut self, row_group: usize, slot: usize, words: &GlyphRow) {
        let start = slot * WORDS_PER_GLYPH_ROW;
        self.rows[row_group][start..start + WORDS_PER_GLYPH_ROW].copy_from_slice(words);
    }

    /// OR a word onto the existing pixels
    pub(crate) fn overlay(&mut self, row_group: usize, word: usize, bits: PixelWord) {
        self.rows[row_group][word] |= bits;
    }

    /// Colour of the physical pixel at `(x, y)`
    ///
    /// Returns `None` outside the 96×24 panel.
    pub fn pixel_at(&self, x: usize, y: usize) -> Option<Color> {
        let (slot, row_group, pixel) = scan_position(x, y)?;
        let word = self.slot(row_group, slot)[pixel / PIXELS_PER_WORD];
        Some(word.pixel(pixel % PIXELS_PER_WORD))
    }

    /// Render the frame as text, one line per physical row
    ///
    /// Lit pixels show as `#`, dark ones as `.`. Intended for host-side
    /// debugging of glyph data.
    pub fn preview<W: core::fmt::Write>(&self, out: &mut W) -> core::fmt::Result {
        for y in 0..PANEL_HEIGHT {
            for x in 0..PANEL_WIDTH {
                let lit = self.pixel_at(x, y).is_some_and(Color::is_lit);
                out.write_char(if lit { '#' } else { '.' })?;
            }
            out.write_char('\n')?;
        }
        Ok(())
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_frame() {
        let frame = FrameBuffer::blank();
        for rg in frame.row_groups() {
            assert_eq!(rg.len(), 48);
            assert!(rg.iter().all(|w| w.is_blank()));
        }
        assert_eq!(frame.pixel_at(0, 0), Some(Color::Off));
        assert_eq!(frame.pixel_at(96, 0), None);
    }

    #[test]
    fn test_set_slot_and_overlay() {
        let mut frame = FrameBuffer::blank();
        let words = [PixelWord::from_raw(0x100000); WORDS_PER_GLYPH_ROW];
        frame.set_slot(3, 2, &words);
        assert_eq!(frame.slot(3, 2), &words[..]);
        assert!(frame.slot(3, 1).iter().all(|w| w.is_blank()));

        frame.overlay(3, 16, PixelWord::from_raw(0x010000));
        assert_eq!(frame.row_group(3)[16].raw(), 0x110000);
    }

    #[test]
    fn test_pixel_at_follows_wiring() {
        let mut frame = FrameBuffer::blank();
        // Slot 5, row-group 7, shift pixel 0: top band, column 10, left section
        let mut words = [PixelWord::BLANK; WORDS_PER_GLYPH_ROW];
        words[0] = PixelWord::BLANK.with_pixel(0, Color::Blue);
        frame.set_slot(7, 5, &words);

        assert_eq!(frame.pixel_at(10, 0), Some(Color::Blue));
        assert_eq!(frame.pixel_at(11, 0), Some(Color::Off));
    }

    #[test]
    fn test_preview_dimensions() {
        let frame = FrameBuffer::blank();
        let mut text: heapless::String<2400> = heapless::String::new();
        frame.preview(&mut text).unwrap();
        assert_eq!(text.lines().count(), PANEL_HEIGHT);
        assert!(text.lines().all(|l| l.len() == PANEL_WIDTH));
        assert!(!text.contains('#'));
    }
}
