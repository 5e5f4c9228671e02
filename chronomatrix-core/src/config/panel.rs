//! Panel configuration types
//!
//! These types define the timing and appearance of the timer panel. Pin
//! assignments are fixed by the board and live in the firmware.

use crate::compiler::FrameCompiler;
use crate::pixel::Color;
use crate::stopwatch::OverflowPolicy;

/// Appearance and scan timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    /// Digit colour
    pub color: Color,
    /// Colon and decimal point colour
    pub punctuation_color: Color,
    /// Shift-register program clock in Hz
    pub data_clock_hz: u32,
    /// Row-select program clock in Hz
    pub row_clock_hz: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            color: Color::Red,
            punctuation_color: Color::Red,
            data_clock_hz: 10_000_000,
            row_clock_hz: 1_000_000,
        }
    }
}

impl PanelConfig {
    /// Frame compiler using the configured colours
    pub fn compiler(&self) -> FrameCompiler {
        FrameCompiler::new(self.color).with_punctuation_color(self.punctuation_color)
    }
}

/// Internal timer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    /// Tick period in milliseconds
    pub tick_ms: u32,
    /// Behaviour past 59:59
    pub overflow: OverflowPolicy,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_ms: 1000,
            overflow: OverflowPolicy::Clamp,
        }
    }
}

/// Serial timestamp input settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputConfig {
    /// Accept "MMSSUU" timestamps on UART0
    pub enabled: bool,
    /// UART baud rate
    pub baudrate: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            baudrate: 9600,
        }
    }
}

/// Complete firmware configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChronomatrixConfig {
    pub panel: PanelConfig,
    pub timer: TimerConfig,
    pub input: InputConfig,
}
