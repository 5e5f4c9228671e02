//! Packed pixel words
//!
//! The panel's shift registers take 4 bits per pixel: red, blue, green and
//! one unused line. The PIO shifter pulls 24 bits at a time, so one
//! [`PixelWord`] carries 6 consecutive pixels of the shift order.
//!
//! ```text
//!  bit 23                                   bit 0
//!  ┌──────┬──────┬──────┬──────┬──────┬──────┐
//!  │ px 0 │ px 1 │ px 2 │ px 3 │ px 4 │ px 5 │
//!  └──────┴──────┴──────┴──────┴──────┴──────┘
//!  nibble: bit0 = red, bit1 = blue, bit2 = green, bit3 = unused
//! ```

use core::ops::{BitOr, BitOrAssign};

/// Pixels packed into one word
pub const PIXELS_PER_WORD: usize = 6;

/// Bits per pixel nibble
pub const BITS_PER_PIXEL: u32 = 4;

/// Channel bits that may be set in any nibble
const CHANNEL_MASK: u32 = 0x0077_7777;

/// Mask-word nibble value for a lit pixel
const LIT_MASK: u32 = 0x0011_1111;

/// LED colour of a single pixel
///
/// Colours are bit combinations of the three channels, so the code of a
/// colour can be used directly as a pixel nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    #[default]
    Off,
    Red,
    Blue,
    Magenta,
    Green,
    Yellow,
    Cyan,
    White,
}

impl Color {
    /// Channel bits for red
    pub const RED_BIT: u8 = 0x1;
    /// Channel bits for blue
    pub const BLUE_BIT: u8 = 0x2;
    /// Channel bits for green
    pub const GREEN_BIT: u8 = 0x4;

    /// Nibble code of this colour
    pub const fn code(self) -> u8 {
        match self {
            Color::Off => 0x0,
            Color::Red => 0x1,
            Color::Blue => 0x2,
            Color::Magenta => 0x3,
            Color::Green => 0x4,
            Color::Yellow => 0x5,
            Color::Cyan => 0x6,
            Color::White => 0x7,
        }
    }

    /// Decode a pixel nibble, ignoring the unused bit
    pub const fn from_code(code: u8) -> Self {
        match code & 0x7 {
            0x1 => Color::Red,
            0x2 => Color::Blue,
            0x3 => Color::Magenta,
            0x4 => Color::Green,
            0x5 => Color::Yellow,
            0x6 => Color::Cyan,
            0x7 => Color::White,
            _ => Color::Off,
        }
    }

    /// Parse a colour name as used in `panel.toml`
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name {
            "off" => Color::Off,
            "red" => Color::Red,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            _ => return None,
        };
        Some(color)
    }

    /// Check if any channel is lit
    pub const fn is_lit(self) -> bool {
        self.code() != 0
    }
}

/// Six pixels in shift order, 4 bits each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelWord(u32);

impl PixelWord {
    /// All six pixels off
    pub const BLANK: Self = Self(0);

    /// Build a word from its raw value
    ///
    /// Bits outside the colour channels are dropped.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw & CHANNEL_MASK)
    }

    /// Raw 24-bit value as pushed to the shifter
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Build a lit/unlit mask word from its raw value
    ///
    /// Used by the glyph table, where every nibble is either 0 or 1.
    /// Fails const evaluation if any nibble holds anything else.
    pub const fn mask(raw: u32) -> Self {
        assert!(raw & !LIT_MASK == 0, "glyph mask nibbles must be 0 or 1");
        Self(raw)
    }

    /// Check that every nibble of this word is 0 or 1
    pub const fn is_mask(self) -> bool {
        self.0 & !LIT_MASK == 0
    }

    /// Paint a mask word in the given colour
    ///
    /// Every nibble is 0 or 1 and the colour code fits in 3 bits, so a
    /// single multiply paints all six pixels without carries.
    pub const fn paint(self, color: Color) -> Self {
        let lit = self.0 & LIT_MASK;
        Self(lit * color.code() as u32)
    }

    /// Colour of pixel `index` (0 = most significant nibble)
    pub const fn pixel(self, index: usize) -> Color {
        let shift = (PIXELS_PER_WORD - 1 - index) as u32 * BITS_PER_PIXEL;
        Color::from_code(((self.0 >> shift) & 0xF) as u8)
    }

    /// Return a copy with pixel `index` set to `color`
    pub const fn with_pixel(self, index: usize, color: Color) -> Self {
        let shift = (PIXELS_PER_WORD - 1 - index) as u32 * BITS_PER_PIXEL;
        let cleared = self.0 & !(0xF << shift);
        Self(cleared | ((color.code() as u32) << shift))
    }

    /// Check if all pixels are off
    pub const fn is_blank(self) -> bool {
        self.0 == 0
    }

    /// Number of lit pixels in this word
    pub fn lit_count(self) -> usize {
        (0..PIXELS_PER_WORD)
            .filter(|&i| self.pixel(i).is_lit())
            .count()
    }
}

impl BitOr for PixelWord {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PixelWord {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
