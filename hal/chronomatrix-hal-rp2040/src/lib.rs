//! RP2040 drivers for the Chronomatrix panel
//!
//! Implements the `chronomatrix-core` output channel traits on top of the
//! RP2040's Programmable I/O:
//!
//! - [`PioShifter`]: clocks packed pixel words into the shift registers
//! - [`PioRowSelect`]: drives the row address lines and the OE/ST latch
//! - Clock divider helpers shared by both programs

#![no_std]

pub mod pio;
pub mod row_select;
pub mod shifter;

pub use row_select::PioRowSelect;
pub use shifter::PioShifter;
