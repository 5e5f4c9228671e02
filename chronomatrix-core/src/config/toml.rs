//! Simple TOML parser for panel configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `panel.toml`. It does NOT support the full TOML grammar.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers
//! - Comments (# ...)
//! - Underscores in integers (10_000_000)
//!
//! Unknown keys are rejected so typos do not silently fall back to defaults.

use super::panel::ChronomatrixConfig;
use crate::pixel::Color;
use crate::stopwatch::OverflowPolicy;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown section header on this line
    InvalidSection(usize),
    /// Unknown key on this line
    UnknownKey(usize),
    /// Value on this line has the wrong type or range
    InvalidValue(usize),
    /// Line is neither a header nor a key/value pair
    Syntax(usize),
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Panel,
    Timer,
    Input,
}

/// Parse TOML configuration into ChronomatrixConfig
///
/// Keys that are not present keep their defaults.
pub fn parse_config(input: &str) -> Result<ChronomatrixConfig, ParseError> {
    let mut config = ChronomatrixConfig::default();
    let mut section = Section::Root;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])
                .ok_or(ParseError::InvalidSection(line_no))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::Syntax(line_no))?;
        apply_value(&mut config, section, key, value, line_no)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "panel" => Some(Section::Panel),
        "timer" => Some(Section::Timer),
        "input" => Some(Section::Input),
        _ => None,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn apply_value(
    config: &mut ChronomatrixConfig,
    section: Section,
    key: &str,
    value: &str,
    line_no: usize,
) -> Result<(), ParseError> {
    let invalid = ParseError::InvalidValue(line_no);

    match (section, key) {
        (Section::Panel, "color") => {
            config.panel.color = parse_color(value).ok_or(invalid)?;
        }
        (Section::Panel, "punctuation_color") => {
            config.panel.punctuation_color = parse_color(value).ok_or(invalid)?;
        }
        (Section::Panel, "data_clock_hz") => {
            config.panel.data_clock_hz = parse_int(value).ok_or(invalid)?;
        }
        (Section::Panel, "row_clock_hz") => {
            config.panel.row_clock_hz = parse_int(value).ok_or(invalid)?;
        }
        (Section::Timer, "tick_ms") => {
            let tick_ms: u32 = parse_int(value).ok_or(invalid)?;
            if tick_ms == 0 {
                return Err(invalid);
            }
            config.timer.tick_ms = tick_ms;
        }
        (Section::Timer, "overflow") => {
            config.timer.overflow = OverflowPolicy::from_name(parse_string(value)).ok_or(invalid)?;
        }
        (Section::Input, "enabled") => {
            config.input.enabled = parse_bool(value).ok_or(invalid)?;
        }
        (Section::Input, "baudrate") => {
            config.input.baudrate = parse_int(value).ok_or(invalid)?;
        }
        _ => return Err(ParseError::UnknownKey(line_no)),
    }

    Ok(())
}

fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

fn parse_int(value: &str) -> Option<u32> {
    let mut result: u32 = 0;
    let mut seen_digit = false;
    for c in value.chars() {
        match c {
            '_' if seen_digit => continue,
            '0'..='9' => {
                result = result.checked_mul(10)?.checked_add(c as u32 - '0' as u32)?;
                seen_digit = true;
            }
            _ => return None,
        }
    }
    seen_digit.then_some(result)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_color(value: &str) -> Option<Color> {
    Color::from_name(parse_string(value))
}
