//! Digit glyph table
//!
//! Each digit is 16 pixels wide and 24 pixels tall, one panel section. The
//! section is scanned as 8 row-groups of 48 pixels (three 16-pixel bands),
//! giving 8 words per row-group at 6 pixels per word. See
//! [`crate::layout`] for where each of those 48 pixels sits physically.
//!
//! The table stores lit/unlit masks only; colour is applied when a frame is
//! compiled.

use crate::pixel::PixelWord;

/// Number of digit glyphs
pub const GLYPH_COUNT: usize = 10;

/// Row-groups scanned per pass
pub const ROW_GROUPS: usize = 8;

/// Words per glyph per row-group (48 pixels / 6 pixels per word)
pub const WORDS_PER_GLYPH_ROW: usize = 8;

/// One row-group of a glyph
pub type GlyphRow = [PixelWord; WORDS_PER_GLYPH_ROW];

/// A digit's mask across all 8 row-groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    rows: [GlyphRow; ROW_GROUPS],
}

impl Glyph {
    const fn new(rows: [GlyphRow; ROW_GROUPS]) -> Self {
        Self { rows }
    }

    /// Look up the glyph for a digit value
    ///
    /// Returns `None` for values above 9.
    pub fn for_digit(digit: u8) -> Option<&'static Glyph> {
        GLYPHS.get(digit as usize)
    }

    /// Mask words for one row-group
    pub fn row(&self, row_group: usize) -> &GlyphRow {
        &self.rows[row_group]
    }

    /// All row-groups in scan order
    pub fn rows(&self) -> &[GlyphRow; ROW_GROUPS] {
        &self.rows
    }
}

/// Build a glyph row from raw mask literals
///
/// `PixelWord::mask` rejects any nibble other than 0 or 1 during const
/// evaluation, so a typo in the table fails the build.
const fn row(raw: [u32; WORDS_PER_GLYPH_ROW]) -> GlyphRow {
    let mut words = [PixelWord::BLANK; WORDS_PER_GLYPH_ROW];
    let mut i = 0;
    while i < WORDS_PER_GLYPH_ROW {
        words[i] = PixelWord::mask(raw[i]);
        i += 1;
    }
    words
}

/// Glyphs for '0' to '9'
#[rustfmt::skip]
pub static GLYPHS: [Glyph; GLYPH_COUNT] = [
    // '0'
    Glyph::new([
        row([0x110000, 0x000000, 0x000011, 0x001100, 0x110000, 0x000000, 0x000000, 0x000000]),
        row([0x100000, 0x100001, 0x000001, 0x001100, 0x110000, 0x000000, 0x000000, 0x000000]),
        row([0x100000, 0x110001, 0x000001, 0x001100, 0x110000, 0x000000, 0x000000, 0x000000]),
        row([0x000000, 0x111111, 0x000000, 0x001100, 0x110000, 0x000000, 0x111000, 0x000001]),
        row([0x000000, 0x011110, 0x000000, 0x001100, 0x110000, 0x000000, 0x111100, 0x000011]),
        row([0x000000, 0x000000, 0x000000, 0x001100, 0x110000, 0x000000, 0x001110, 0x000111]),
        row([0x000000, 0x000000, 0x000000, 0x001100, 0x110000, 0x000000, 0x000110, 0x001100]),
        row([0x000000, 0x000000, 0x000000, 0x001100, 0x110000, 0x000000, 0x000011, 0x001100]),
    ]),
    // '1'
    Glyph::new([
        row([0x000000, 0x001100, 0x000000, 0x000000, 0x000011, 0x000000, 0x000000, 0x000000]),
        row([0x000000, 0x001100, 0x000000, 0x000000, 0x000011, 0x000000, 0x000000, 0x000000]),
        row([0x000000, 0x111100, 0x000001, 0x000000, 0x000011, 0x000000, 0x000000, 0x000000]),
        row([0x000000, 0x111100, 0x000001, 0x000000, 0x000011, 0x000000, 0x111110, 0x000111]),
        row([0x000000, 0x011100, 0x000000, 0x000000, 0x000011, 0x000000, 0x111110, 0x000111]),
        row([0x000000, 0x000000, 0x000000, 0x000000, 0x000011, 0x000000, 0x110000, 0x000000]),
        row([0x000000, 0x000000, 0x000000, 0x000000, 0x000011, 0x000000, 0x110000, 0x000000]),
        row([0x000000, 0x000000, 0x000000, 0x000000, 0x000011, 0x000000, 0x110000, 0x000000]),
    ]),
    // '2'
    Glyph::new([
        row([0x110000, 0x000001, 0x000011, 0x000000, 0x001110, 0x000000, 0x000000, 0x000000]),
        row([0x110000, 0x100001, 0x000011, 0x000000, 0x000111, 0x000000, 0x000000, 0x000000]),
        row([0x100000, 0x110011, 0x000011, 0x000000, 0x000011, 0x000000, 0x000000, 0x000000]),
        row([0x000000, 0x111111, 0x000001, 0x100000, 0x000011, 0x000000, 0x111111, 0x001111]),
        row([0x000000, 0x111110, 0x000000, 0x110000, 0x000001, 0x000000, 0x111111, 0x001111]),
        row([0x000000, 0x000000, 0x000000, 0x111000, 0x000000, 0x000000, 0x000011, 0x000111]),
        row([0x000000, 0x000000, 0x000000, 0x111000, 0x000000, 0x000000, 0x000000, 0x000111]),
        row([0x000000, 0x000000, 0x000000, 0x011100, 0x000000, 0x000000, 0x100000, 0x000011]),
    ]),
    // '3'
    Glyph::new([
        row([0x100000, 0x000001, 0x000000, 0x001100, 0x000000, 0x000000, 0x000000, 0x000000]),
        row([0x100000, 0x000001, 0x000000, 0x001100, 0x000000, 0x000000, 0x000000, 0x000000]),
        row([0x100000, 0x100011, 0x000011, 0x011100, 0x000000, 0x000000, 0x000000, 0x000000]),
        row([0x000000, 0x111111, 0x000011, 0x111000, 0x000001, 0x000000, 0x111100, 0x000111]),
        row([0x000000, 0x111110, 0x000000, 0x110000, 0x000111, 0x000000, 0x111110, 0x001111]),
        row([0x000000, 0x000000, 0x000000, 0x100000, 0x000111, 0x000000, 0x001111, 0x001110]),
        row([0x000000, 0x000000, 0x000000, 0x110000, 0x000001, 0x000000, 0x000111, 0x000000]),
        row([0x000000, 0x000000, 0x000000, 0x011000, 0x000000, 0x000000, 0x000011, 0x000000]),
    ]),
    // '4'
    Glyph::new([
        row([0x000000, 0x011011, 0x000000, 0x111100, 0x111111, 0x000000, 0x000000, 0x000000]),
        row([0x000000, 0x001111, 0x000000, 0x110000, 0x110000, 0x000000, 0x000000, 0x000000]),
        row([0x000000, 0x001111, 0x000000, 0x110000, 0x110000, 0x000000, 0x000000, 0x000000]),
        row([0x000000, 0x000111, 0x000000, 0x110000, 0x011000, 0x000000, 0x111111, 0x000001]),
        row([0x000000, 0x000111, 0x000000, 0x110000, 0x011000, 0x000000, 0x111111, 0x000001]),
        row([0x000000, 0x000000, 0x000000, 0x110000, 0x011100, 0x000000, 0x001100, 0x000000]),
        row([0x000000, 0x000000, 0x000000, 0x110000, 0x001100, 0x000000, 0x001100, 0x000000]),
        row([0x000000, 0x000000, 0x000000, 0x110000, 0x000110, 0x000000, 0x111111, 0x001111]),
    ]),
    // '5'
    Glyph::new([
        row([0x000000, 0x100000, 0x000001, 0x001100, 0x000000, 0x000000, 0x000000, 0x000000]),
        row([0x000000, 0x100000, 0x000001, 0x001100, 0x000000, 0x000000, 0x000000, 0x000000]),
        row([0x000000, 0x100000, 0x000001, 0x001100, 0x000000, 0x000000, 0x000000, 0x000000]),
        row([0x100000, 0x111111, 0x000001, 0x011100, 0x000000, 0x000000, 0x111100, 0x000011]),
        row([0x100000, 0x111111, 0x000001, 0x011000, 0x011000, 0x000000, 0x111110, 0x000111]),
        row([0x000000, 0x000000, 0x000000, 0x111000, 0x011100, 0x000000, 0x001111, 0x001110]),
        row([0x000000, 0x000000, 0x000000, 0x110000, 0x011111, 0x000000, 0x000111, 0x001110]),
        row([0x000000, 0x000000, 0x000000, 0x100000, 0x011111, 0x000000, 0x000011, 0x000000]),
    ]),
    // '6'
    Glyph::new([
        row([0x000000, 0x110000, 0x000001, 0x001100, 0x110000, 0x000000, 0x000000, 0x000000]),
        row([0x000000, 0x110000, 0x000000, 0x001100, 0x110000, 0x000000, 0x000000, 0x000000]),
        row([0x000000, 0x111000, 0x000000, 0x001100, 0x110000, 0x000000, 0x000000, 0x000000]),
        row([0x100000, 0x011111, 0x000000, 0x011100, 0x111000, 0x000000, 0x111000, 0x000001]),
        row([0x100000, 0x001111, 0x000000, 0x111000, 0x111100, 0x000000, 0x111100, 0x000111]),
        row([0x000000, 0x000000, 0x000000, 0x110000, 0x111111, 0x000000, 0x001110, 0x000111]),
        row([0x000000, 0x000000, 0x000000, 0x100000, 0x011111, 0x000000, 0x000110, 0x000110]),
        row([0x000000, 0x000000, 0x000000, 0x000000, 0x011000, 0x000000, 0x000011, 0x001100]),
    ]),
    // '7'
    Glyph::new([
        row([0x100000, 0x000001, 0x000000, 0x100000, 0x000001, 0x000000, 0x000000, 0x000000]),
        row([0x110000, 0x000001, 0x000000, 0x100000, 0x000001, 0x000000, 0x000000, 0x000000]),
        row([0x110000, 0x000001, 0x000011, 0x110000, 0x000001, 0x000000, 0x000000, 0x000000]),
        row([0x110000, 0x111111, 0x000011, 0x110000, 0x000000, 0x000000, 0x110000, 0x000000]),
        row([0x110000, 0x111111, 0x000011, 0x110000, 0x000000, 0x000000, 0x110000, 0x000000]),
        row([0x000000, 0x000000, 0x000000, 0x111000, 0x000000, 0x000000, 0x110000, 0x000000]),
        row([0x000000, 0x000000, 0x000000, 0x111000, 0x000000, 0x000000, 0x110000, 0x000000]),
        row([0x000000, 0x000000, 0x000000, 0x011000, 0x000000, 0x000000, 0x111000, 0x000000]),
    ]),
    // '8'
    Glyph::new([
        row([0x100000, 0x100001, 0x000001, 0x001100, 0x110000, 0x000000, 0x000000, 0x000000]),
        row([0x100000, 0x100001, 0x000001, 0x001100, 0x110000, 0x000000, 0x000000, 0x000000]),
        row([0x100000, 0x110011, 0x000001, 0x001100, 0x110000, 0x000000, 0x000000, 0x000000]),
        row([0x000000, 0x111111, 0x000000, 0x011000, 0x011000, 0x000000, 0x111000, 0x000001]),
        row([0x000000, 0x011110, 0x000000, 0x110000, 0x001111, 0x000000, 0x111110, 0x000111]),
        row([0x000000, 0x000000, 0x000000, 0x110000, 0x001111, 0x000000, 0x001111, 0x001111]),
        row([0x000000, 0x000000, 0x000000, 0x111000, 0x011100, 0x000000, 0x000011, 0x001100]),
        row([0x000000, 0x000000, 0x000000, 0x011000, 0x011000, 0x000000, 0x000011, 0x001100]),
    ]),
    // '9'
    Glyph::new([
        row([0x110000, 0x000000, 0x000011, 0x011000, 0x000000, 0x000000, 0x000000, 0x000000]),
        row([0x110000, 0x100001, 0x000011, 0x111000, 0x000111, 0x000000, 0x000000, 0x000000]),
        row([0x100000, 0x110011, 0x000001, 0x111100, 0x001111, 0x000000, 0x000000, 0x000000]),
        row([0x000000, 0x111111, 0x000000, 0x111100, 0x011100, 0x000000, 0x110000, 0x000111]),
        row([0x000000, 0x011110, 0x000000, 0x011100, 0x011000, 0x000000, 0x111000, 0x000111]),
        row([0x000000, 0x000000, 0x000000, 0x001100, 0x110000, 0x000000, 0x011100, 0x000000]),
        row([0x000000, 0x000000, 0x000000, 0x001100, 0x110000, 0x000000, 0x001110, 0x000000]),
        row([0x000000, 0x000000, 0x000000, 0x001100, 0x110000, 0x000000, 0x001110, 0x000000]),
    ]),
];
