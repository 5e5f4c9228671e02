//! Hardware abstraction traits
//!
//! These traits define the interface between the scan-out logic and the
//! chip-specific panel drivers.

pub mod panel;

pub use panel::{RowSelectChannel, ShiftRegisterChannel};
