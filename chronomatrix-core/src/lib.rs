//! Board-agnostic core logic for the Chronomatrix LED timer
//!
//! This crate contains everything between a time value and the words
//! clocked into an S8 RGB panel, with no dependency on a specific chip:
//!
//! - Packed pixel words and the digit glyph table
//! - Physical wiring map of the 96×24 panel
//! - Frame compiler ("MMSSUU" → frame buffer)
//! - Frame store shared between producers and the scan-out loop
//! - Scan-out loop over abstract output channels
//! - Stopwatch and serial timestamp ingestion
//! - Configuration types and `panel.toml` parser
//!
//! ```text
//!  tick / UART ──► Stopwatch / TimestampAssembler
//!                          │
//!                          ▼
//!                    FrameCompiler ──► FrameStore ──► ScanOut ──► panel
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod compiler;
pub mod config;
pub mod frame;
pub mod glyph;
pub mod layout;
pub mod pixel;
pub mod scan;
pub mod stopwatch;
pub mod store;
pub mod timestamp;
pub mod traits;

pub use compiler::{DisplayString, DisplayStringError, FrameCompiler};
pub use frame::{FrameBuffer, RowGroup, WORDS_PER_ROW_GROUP};
pub use glyph::ROW_GROUPS;
pub use pixel::{Color, PixelWord};
pub use scan::{ScanError, ScanOut};
pub use stopwatch::{OverflowPolicy, Stopwatch};
pub use store::FrameStore;
pub use timestamp::{TimestampAssembler, TimestampError};
