//! Configuration
//!
//! Board-agnostic configuration structures and the `panel.toml` parser.

pub mod panel;
pub mod toml;

pub use panel::*;
pub use toml::{parse_config, ParseError};
