//! Shared PIO timing helpers
//!
//! Both panel programs run from the system clock through a 16.8 fixed-point
//! divider. The program clock is configured directly in Hz, so the divider
//! is simply `SYS_CLK / freq`.

use chronomatrix_core::frame::WORDS_PER_ROW_GROUP;
use chronomatrix_core::glyph::ROW_GROUPS;
use chronomatrix_core::pixel::PIXELS_PER_WORD;
use fixed::types::U24F8;

/// System clock frequency (RP2040 default)
pub const SYS_CLK_HZ: u32 = 125_000_000;

/// Instructions the data program spends on one pixel (out, clock high, clock low)
pub const DATA_CYCLES_PER_PIXEL: u32 = 3;

/// Instructions the row program spends on one select, delays included
pub const ROW_CYCLES_PER_SELECT: u32 = 8;

/// Calculate the clock divider for a program clock
///
/// divider = SYS_CLK / freq
///
/// Returns (integer_part, fractional_part) for the 16.8 fixed-point divider.
/// Frequencies above the system clock run undivided.
pub fn calc_clock_divider(freq_hz: u32) -> (u16, u8) {
    if freq_hz == 0 {
        return (0xFFFF, 0xFF); // Maximum divider = slowest
    }

    // To get 8-bit fractional precision, multiply by 256 first
    let divider_x256 = (SYS_CLK_HZ as u64 * 256) / (freq_hz as u64);

    // Split into integer and fractional parts
    let int_part = (divider_x256 / 256) as u32;
    let frac_part = (divider_x256 % 256) as u32;

    if int_part == 0 {
        return (1, 0);
    }

    // Clamp to valid range
    let int_part = int_part.min(0xFFFF) as u16;
    let frac_part = frac_part.min(0xFF) as u8;

    (int_part, frac_part)
}

/// Clock divider for a program clock, ready for the state machine config
pub fn clock_divider(freq_hz: u32) -> U24F8 {
    let (int_div, frac_div) = calc_clock_divider(freq_hz);
    // Integer in upper 24 bits, fractional in lower 8 bits
    U24F8::from_bits(((int_div as u32) << 8) | (frac_div as u32))
}

/// Time to stream and latch one row-group, in nanoseconds
pub fn row_group_time_ns(data_clock_hz: u32, row_clock_hz: u32) -> u64 {
    let data_cycles =
        (WORDS_PER_ROW_GROUP * PIXELS_PER_WORD) as u64 * DATA_CYCLES_PER_PIXEL as u64;
    let data_ns = data_cycles * 1_000_000_000 / data_clock_hz.max(1) as u64;
    let row_ns = ROW_CYCLES_PER_SELECT as u64 * 1_000_000_000 / row_clock_hz.max(1) as u64;
    data_ns + row_ns
}

/// Upper bound on full-panel refreshes per second
///
/// Ignores CPU time spent between transfers, so the real rate is lower.
pub fn max_refresh_hz(data_clock_hz: u32, row_clock_hz: u32) -> u32 {
    let pass_ns = row_group_time_ns(data_clock_hz, row_clock_hz) * ROW_GROUPS as u64;
    (1_000_000_000 / pass_ns.max(1)) as u32
}
