//! Frame compiler
//!
//! Turns a six-digit "MMSSUU" string into a [`FrameBuffer`]. Characters
//! are placed right to left: the last character lands in slot 0, the first
//! shifted out and therefore the right-most section on the panel. The colon
//! and decimal point are OR-ed on afterwards at fixed positions.

use crate::frame::FrameBuffer;
use crate::glyph::{GLYPHS, ROW_GROUPS, WORDS_PER_GLYPH_ROW};
use crate::pixel::{Color, PixelWord};

/// Characters in a display string
pub const DISPLAY_DIGITS: usize = 6;

/// Word index of the colon, between minutes and seconds
pub const COLON_WORD: usize = 4 * WORDS_PER_GLYPH_ROW + 2;

/// Row-groups carrying the two colon dots
pub const COLON_ROW_GROUPS: [usize; 4] = [0, 1, 6, 7];

/// Colon pixels within [`COLON_WORD`]
pub const COLON_MASK: PixelWord = PixelWord::mask(0x110000);

/// Word index of the decimal point, between seconds and hundredths
pub const DECIMAL_POINT_WORD: usize = 2 * WORDS_PER_GLYPH_ROW + 5;

/// Row-groups carrying the decimal point
pub const DECIMAL_POINT_ROW_GROUPS: [usize; 2] = [3, 4];

/// Decimal point pixels within [`DECIMAL_POINT_WORD`]
pub const DECIMAL_POINT_MASK: PixelWord = PixelWord::mask(0x001100);

/// Errors from validating a display string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayStringError {
    /// Not exactly six characters
    WrongLength(usize),
    /// Character at this position is not an ASCII digit
    NotDigit(usize),
}

/// Six validated decimal digits, "MMSSUU"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayString {
    digits: [u8; DISPLAY_DIGITS],
}

impl DisplayString {
    /// "000000"
    pub const ZERO: Self = Self {
        digits: [0; DISPLAY_DIGITS],
    };

    /// Validate six ASCII digits
    pub fn parse(bytes: &[u8]) -> Result<Self, DisplayStringError> {
        if bytes.len() != DISPLAY_DIGITS {
            return Err(DisplayStringError::WrongLength(bytes.len()));
        }

        let mut digits = [0u8; DISPLAY_DIGITS];
        for (i, &b) in bytes.iter().enumerate() {
            if !b.is_ascii_digit() {
                return Err(DisplayStringError::NotDigit(i));
            }
            digits[i] = b - b'0';
        }
        Ok(Self { digits })
    }

    /// Build from time fields
    ///
    /// Each field is shown as two digits; values above 99 keep only the
    /// low two digits, so callers decide their own overflow policy first.
    pub fn from_time(minutes: u32, seconds: u32, hundredths: u32) -> Self {
        let mut digits = [0u8; DISPLAY_DIGITS];
        for (i, value) in [minutes, seconds, hundredths].into_iter().enumerate() {
            digits[i * 2] = ((value / 10) % 10) as u8;
            digits[i * 2 + 1] = (value % 10) as u8;
        }
        Self { digits }
    }

    /// Digit values, left to right
    pub fn digits(&self) -> &[u8; DISPLAY_DIGITS] {
        &self.digits
    }

    /// ASCII form, e.g. `b"013045"`
    pub fn to_ascii(&self) -> [u8; DISPLAY_DIGITS] {
        self.digits.map(|d| b'0' + d)
    }
}

impl core::fmt::Display for DisplayString {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let d = &self.digits;
        write!(f, "{}{}:{}{}.{}{}", d[0], d[1], d[2], d[3], d[4], d[5])
    }
}

/// Builds frame buffers from display strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameCompiler {
    digit_color: Color,
    punctuation_color: Color,
}

impl FrameCompiler {
    /// Compiler drawing digits and punctuation in one colour
    pub const fn new(color: Color) -> Self {
        Self {
            digit_color: color,
            punctuation_color: color,
        }
    }

    /// Use a separate colour for the colon and decimal point
    pub const fn with_punctuation_color(mut self, color: Color) -> Self {
        self.punctuation_color = color;
        self
    }

    /// Colour used for digits
    pub fn digit_color(&self) -> Color {
        self.digit_color
    }

    /// Colour used for the colon and decimal point
    pub fn punctuation_color(&self) -> Color {
        self.punctuation_color
    }

    /// Compile a validated display string
    pub fn compile(&self, display: &DisplayString) -> FrameBuffer {
        let mut frame = FrameBuffer::blank();

        for (slot, &digit) in display.digits().iter().rev().enumerate() {
            let glyph = &GLYPHS[digit as usize];
            for row_group in 0..ROW_GROUPS {
                let words = glyph.row(row_group).map(|w| w.paint(self.digit_color));
                frame.set_slot(row_group, slot, &words);
            }
        }

        let colon = COLON_MASK.paint(self.punctuation_color);
        for row_group in COLON_ROW_GROUPS {
            frame.overlay(row_group, COLON_WORD, colon);
        }

        let point = DECIMAL_POINT_MASK.paint(self.punctuation_color);
        for row_group in DECIMAL_POINT_ROW_GROUPS {
            frame.overlay(row_group, DECIMAL_POINT_WORD, point);
        }

        frame
    }

    /// Compile a raw display string
    ///
    /// # Panics
    ///
    /// Panics unless `text` is exactly six ASCII digits. Strings built
    /// inside the firmware are always well formed, so anything else is a
    /// bug in the caller. Untrusted input goes through
    /// [`DisplayString::parse`] instead.
    pub fn compile_str(&self, text: &str) -> FrameBuffer {
        match DisplayString::parse(text.as_bytes()) {
            Ok(display) => self.compile(&display),
            Err(e) => panic!("malformed display string {:?}: {:?}", text, e),
        }
    }
}

impl Default for FrameCompiler {
    fn default() -> Self {
        Self::new(Color::Red)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::WORDS_PER_ROW_GROUP;
    use proptest::prelude::*;

    fn is_overlay_word(row_group: usize, word: usize) -> bool {
        (word == COLON_WORD && COLON_ROW_GROUPS.contains(&row_group))
            || (word == DECIMAL_POINT_WORD && DECIMAL_POINT_ROW_GROUPS.contains(&row_group))
    }

    #[test]
    fn test_parse_display_string() {
        let s = DisplayString::parse(b"013045").unwrap();
        assert_eq!(s.digits(), &[0, 1, 3, 0, 4, 5]);
        assert_eq!(&s.to_ascii(), b"013045");

        assert_eq!(
            DisplayString::parse(b"01304"),
            Err(DisplayStringError::WrongLength(5))
        );
        assert_eq!(
            DisplayString::parse(b"01a045"),
            Err(DisplayStringError::NotDigit(2))
        );
    }

    #[test]
    fn test_from_time() {
        assert_eq!(&DisplayString::from_time(1, 3, 45).to_ascii(), b"010345");
        assert_eq!(&DisplayString::from_time(59, 59, 0).to_ascii(), b"595900");
        assert_eq!(DisplayString::from_time(0, 0, 0), DisplayString::ZERO);
    }

    #[test]
    fn test_display_format() {
        let s = DisplayString::parse(b"013045").unwrap();
        let mut text: heapless::String<16> = heapless::String::new();
        core::fmt::write(&mut text, format_args!("{}", s)).unwrap();
        assert_eq!(text.as_str(), "01:30.45");
    }

    #[test]
    fn test_zero_frame() {
        let frame = FrameCompiler::default().compile_str("000000");
        let zero = &GLYPHS[0];

        for row_group in 0..ROW_GROUPS {
            for slot in 0..DISPLAY_DIGITS {
                for (i, word) in frame.slot(row_group, slot).iter().enumerate() {
                    let index = slot * WORDS_PER_GLYPH_ROW + i;
                    if !is_overlay_word(row_group, index) {
                        assert_eq!(*word, zero.row(row_group)[i]);
                    }
                }
            }
        }

        // '0' row-group 0 word 2 is 0x000011, plus the colon
        assert_eq!(frame.row_group(0)[COLON_WORD].raw(), 0x110011);
        // '0' row-group 3 word 5 is blank, so only the decimal point shows
        assert_eq!(frame.row_group(3)[DECIMAL_POINT_WORD].raw(), 0x001100);
    }

    #[test]
    fn test_rightmost_character_fills_slot_zero() {
        let frame = FrameCompiler::default().compile_str("000001");
        assert_eq!(frame.slot(0, 0), &GLYPHS[1].row(0)[..]);
        assert_eq!(frame.slot(0, 5), &GLYPHS[0].row(0)[..]);
    }

    #[test]
    fn test_punctuation_color() {
        let compiler = FrameCompiler::new(Color::Green).with_punctuation_color(Color::Blue);
        let frame = compiler.compile_str("000000");

        // Colon pixels are 0 and 1 of the word, glyph bits at 4 and 5
        let word = frame.row_group(0)[COLON_WORD];
        assert_eq!(word.pixel(0), Color::Blue);
        assert_eq!(word.pixel(1), Color::Blue);
        assert_eq!(word.pixel(4), Color::Green);
        assert_eq!(word.pixel(5), Color::Green);
    }

    #[test]
    fn test_colon_and_point_on_panel() {
        let frame = FrameCompiler::default().compile_str("000000");

        // Colon sits at the right edge of the second section, rows 8/9 and 14/15
        for y in [8, 9, 14, 15] {
            assert_eq!(frame.pixel_at(30, y), Some(Color::Red));
            assert_eq!(frame.pixel_at(31, y), Some(Color::Red));
        }

        // Decimal point at the bottom right of the fourth section
        for y in [19, 20] {
            assert_eq!(frame.pixel_at(62, y), Some(Color::Red));
            assert_eq!(frame.pixel_at(63, y), Some(Color::Red));
        }
    }

    #[test]
    #[should_panic(expected = "malformed display string")]
    fn test_compile_rejects_letters() {
        FrameCompiler::default().compile_str("12ab56");
    }

    #[test]
    #[should_panic(expected = "malformed display string")]
    fn test_compile_rejects_short_input() {
        FrameCompiler::default().compile_str("1234");
    }

    proptest! {
        #[test]
        fn prop_slots_hold_reversed_glyphs(text in "[0-9]{6}") {
            let frame = FrameCompiler::default().compile_str(&text);
            let bytes = text.as_bytes();

            for row_group in 0..ROW_GROUPS {
                prop_assert_eq!(frame.row_group(row_group).len(), WORDS_PER_ROW_GROUP);
                for slot in 0..DISPLAY_DIGITS {
                    let digit = (bytes[DISPLAY_DIGITS - 1 - slot] - b'0') as usize;
                    let glyph_row = GLYPHS[digit].row(row_group);
                    for (i, word) in frame.slot(row_group, slot).iter().enumerate() {
                        let index = slot * WORDS_PER_GLYPH_ROW + i;
                        if is_overlay_word(row_group, index) {
                            // Overlay adds bits, never removes glyph bits
                            prop_assert_eq!(word.raw() & glyph_row[i].raw(), glyph_row[i].raw());
                        } else {
                            prop_assert_eq!(*word, glyph_row[i]);
                        }
                    }
                }
            }
        }

        #[test]
        fn prop_colon_only_in_its_row_groups(text in "[0-9]{6}") {
            let frame = FrameCompiler::default().compile_str(&text);
            let digit = (text.as_bytes()[1] - b'0') as usize;

            for row_group in 0..ROW_GROUPS {
                let glyph_word = GLYPHS[digit].row(row_group)[COLON_WORD % WORDS_PER_GLYPH_ROW];
                let word = frame.row_group(row_group)[COLON_WORD];
                if COLON_ROW_GROUPS.contains(&row_group) {
                    prop_assert_eq!(word, glyph_word | COLON_MASK);
                } else {
                    prop_assert_eq!(word, glyph_word);
                }
            }
        }

        #[test]
        fn prop_decimal_point_only_in_its_row_groups(text in "[0-9]{6}") {
            let frame = FrameCompiler::default().compile_str(&text);
            let digit = (text.as_bytes()[3] - b'0') as usize;

            for row_group in 0..ROW_GROUPS {
                let glyph_word =
                    GLYPHS[digit].row(row_group)[DECIMAL_POINT_WORD % WORDS_PER_GLYPH_ROW];
                let word = frame.row_group(row_group)[DECIMAL_POINT_WORD];
                if DECIMAL_POINT_ROW_GROUPS.contains(&row_group) {
                    prop_assert_eq!(word, glyph_word | DECIMAL_POINT_MASK);
                } else {
                    prop_assert_eq!(word, glyph_word);
                }
            }
        }

        #[test]
        fn prop_compile_is_idempotent(text in "[0-9]{6}") {
            let compiler = FrameCompiler::default();
            prop_assert_eq!(compiler.compile_str(&text), compiler.compile_str(&text));
        }
    }
}
