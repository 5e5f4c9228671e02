//! Physical wiring of the S8 panel
//!
//! The panel is six 16×24 sections. Within a section the shift registers
//! are wired in an unusual order: for a given row-group the 48 pixels of a
//! digit slot cover three 16-pixel bands (top, middle, bottom), and inside
//! each band the columns are permuted. This table is a hardware constant,
//! read off the panel, not derived.
//!
//! ```text
//!  top     14 15 16 17  6  7  8  9 10 11  0  1  2  3  4  5
//!  middle  34 35 24 25 26 27 28 29 18 19 20 21 22 23 12 13
//!  bottom  42 43 44 45 46 47 36 37 38 39 40 41 30 31 32 33
//! ```
//!
//! Row-group `r` drives physical row `7 - r` of each band. Slot 0 (the
//! first 8 words shifted out) ends up in the right-most section.

use crate::glyph::ROW_GROUPS;

/// Panel width in pixels
pub const PANEL_WIDTH: usize = 96;

/// Panel height in pixels
pub const PANEL_HEIGHT: usize = 24;

/// Width of one digit section
pub const SECTION_WIDTH: usize = 16;

/// Bands per section (top, middle, bottom)
pub const BANDS: usize = 3;

/// Pixels per slot per row-group
pub const PIXELS_PER_SLOT_ROW: usize = SECTION_WIDTH * BANDS;

/// Digit slots across the panel
pub const SLOTS: usize = PANEL_WIDTH / SECTION_WIDTH;

/// Shift-order pixel index at each band column
#[rustfmt::skip]
pub const SECTION_MAP: [[u8; SECTION_WIDTH]; BANDS] = [
    [14, 15, 16, 17,  6,  7,  8,  9, 10, 11,  0,  1,  2,  3,  4,  5],
    [34, 35, 24, 25, 26, 27, 28, 29, 18, 19, 20, 21, 22, 23, 12, 13],
    [42, 43, 44, 45, 46, 47, 36, 37, 38, 39, 40, 41, 30, 31, 32, 33],
];

/// Band and column of every shift-order pixel index, inverse of [`SECTION_MAP`]
pub const SHIFT_ORDER: [(u8, u8); PIXELS_PER_SLOT_ROW] = invert_section_map();

const fn invert_section_map() -> [(u8, u8); PIXELS_PER_SLOT_ROW] {
    let mut out = [(u8::MAX, u8::MAX); PIXELS_PER_SLOT_ROW];
    let mut band = 0;
    while band < BANDS {
        let mut col = 0;
        while col < SECTION_WIDTH {
            let index = SECTION_MAP[band][col] as usize;
            assert!(out[index].0 == u8::MAX, "pixel index wired twice");
            out[index] = (band as u8, col as u8);
            col += 1;
        }
        band += 1;
    }
    out
}

/// A physical pixel position, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

/// Where a scanned pixel lands on the panel
///
/// - `slot`: digit slot in buffer order (0..6)
/// - `row_group`: row-group index (0..8)
/// - `pixel`: shift-order pixel within the slot (0..48)
pub fn physical_position(slot: usize, row_group: usize, pixel: usize) -> Position {
    let (band, col) = SHIFT_ORDER[pixel];
    Position {
        x: (SLOTS - 1 - slot) * SECTION_WIDTH + col as usize,
        y: band as usize * ROW_GROUPS + (ROW_GROUPS - 1 - row_group),
    }
}

/// Scan coordinates (slot, row-group, pixel) for a physical position
///
/// Returns `None` outside the panel.
pub fn scan_position(x: usize, y: usize) -> Option<(usize, usize, usize)> {
    if x >= PANEL_WIDTH || y >= PANEL_HEIGHT {
        return None;
    }
    let slot = SLOTS - 1 - x / SECTION_WIDTH;
    let band = y / ROW_GROUPS;
    let row_group = ROW_GROUPS - 1 - y % ROW_GROUPS;
    let pixel = SECTION_MAP[band][x % SECTION_WIDTH] as usize;
    Some((slot, row_group, pixel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_map_covers_all_pixels() {
        for (index, &(band, col)) in SHIFT_ORDER.iter().enumerate() {
            assert!((band as usize) < BANDS);
            assert_eq!(SECTION_MAP[band as usize][col as usize] as usize, index);
        }
    }

    #[test]
    fn test_first_pixels_land_top_right() {
        // Pixel 0 of slot 0 in row-group 7 is the top band, column 10 of
        // the right-most section.
        let pos = physical_position(0, 7, 0);
        assert_eq!(pos, Position { x: 80 + 10, y: 0 });

        // Row-group 0 is the lowest row of each band
        let pos = physical_position(0, 0, 47);
        assert_eq!(pos, Position { x: 80 + 5, y: 23 });
    }

    #[test]
    fn test_scan_position_inverts_physical_position() {
        for slot in 0..SLOTS {
            for row_group in 0..ROW_GROUPS {
                for pixel in 0..PIXELS_PER_SLOT_ROW {
                    let pos = physical_position(slot, row_group, pixel);
                    assert!(pos.x < PANEL_WIDTH && pos.y < PANEL_HEIGHT);
                    assert_eq!(scan_position(pos.x, pos.y), Some((slot, row_group, pixel)));
                }
            }
        }
    }

    #[test]
    fn test_scan_position_out_of_bounds() {
        assert_eq!(scan_position(PANEL_WIDTH, 0), None);
        assert_eq!(scan_position(0, PANEL_HEIGHT), None);
    }
}
