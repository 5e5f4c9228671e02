//! Elapsed-time counter driven by the 1 Hz tick
//!
//! The display only has two minute digits. What happens once an hour has
//! passed is set by [`OverflowPolicy`]; the counter itself keeps running.

use crate::compiler::{DisplayString, FrameCompiler};
use crate::frame::FrameBuffer;

/// Seconds shown before the minute digits run out (59:59)
pub const MAX_DISPLAY_SECONDS: u32 = 60 * 60 - 1;

/// What to show once the counter passes 59:59
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverflowPolicy {
    /// Hold the display at 59:59
    #[default]
    Clamp,
    /// Start again from 00:00
    Wrap,
}

impl OverflowPolicy {
    /// Parse a policy name as used in `panel.toml`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "clamp" => Some(OverflowPolicy::Clamp),
            "wrap" => Some(OverflowPolicy::Wrap),
            _ => None,
        }
    }

    /// Seconds to display for a counter value
    pub fn display_seconds(self, elapsed: u32) -> u32 {
        match self {
            OverflowPolicy::Clamp => elapsed.min(MAX_DISPLAY_SECONDS),
            OverflowPolicy::Wrap => elapsed % (MAX_DISPLAY_SECONDS + 1),
        }
    }
}

/// Whole-second counter plus the compiler that renders it
#[derive(Debug, Clone)]
pub struct Stopwatch {
    elapsed_s: u32,
    policy: OverflowPolicy,
    compiler: FrameCompiler,
}

impl Stopwatch {
    /// Stopwatch at 00:00
    pub const fn new(compiler: FrameCompiler, policy: OverflowPolicy) -> Self {
        Self {
            elapsed_s: 0,
            policy,
            compiler,
        }
    }

    /// Seconds counted so far
    pub fn elapsed(&self) -> u32 {
        self.elapsed_s
    }

    /// Current overflow policy
    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Compiler used for this stopwatch's frames
    pub fn compiler(&self) -> &FrameCompiler {
        &self.compiler
    }

    /// Display string for the current count, hundredths always "00"
    pub fn display_string(&self) -> DisplayString {
        let shown = self.policy.display_seconds(self.elapsed_s);
        DisplayString::from_time(shown / 60, shown % 60, 0)
    }

    /// Frame for the current count
    pub fn frame(&self) -> FrameBuffer {
        self.compiler.compile(&self.display_string())
    }

    /// Advance by one second and build the new frame
    ///
    /// This is the body of the periodic tick.
    pub fn tick(&mut self) -> FrameBuffer {
        self.elapsed_s = self.elapsed_s.saturating_add(1);
        self.frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::DISPLAY_DIGITS;
    use crate::glyph::{GLYPHS, ROW_GROUPS};

    fn stopwatch(policy: OverflowPolicy) -> Stopwatch {
        Stopwatch::new(FrameCompiler::default(), policy)
    }

    fn at(policy: OverflowPolicy, seconds: u32) -> Stopwatch {
        let mut sw = stopwatch(policy);
        sw.elapsed_s = seconds;
        sw
    }

    #[test]
    fn test_starts_at_zero() {
        let sw = stopwatch(OverflowPolicy::Clamp);
        assert_eq!(sw.elapsed(), 0);
        assert_eq!(sw.display_string(), DisplayString::ZERO);
    }

    #[test]
    fn test_first_tick_shows_one_second() {
        let mut sw = stopwatch(OverflowPolicy::Clamp);
        let frame = sw.tick();
        assert_eq!(&sw.display_string().to_ascii(), b"000100");

        // Seconds units live in slot 2, minutes in slots 4 and 5
        for rg in 0..ROW_GROUPS {
            let words = frame.slot(rg, 2);
            for (i, word) in words.iter().enumerate() {
                if rg == 3 || rg == 4 {
                    // Decimal point shares the last word of this slot
                    if i == 5 {
                        continue;
                    }
                }
                assert_eq!(*word, GLYPHS[1].row(rg)[i]);
            }
            assert_eq!(frame.slot(rg, 5), &GLYPHS[0].row(rg)[..]);
        }
    }

    #[test]
    fn test_minute_rollover() {
        let mut sw = at(OverflowPolicy::Clamp, 59);
        sw.tick();
        assert_eq!(&sw.display_string().to_ascii(), b"010000");

        let mut sw = at(OverflowPolicy::Clamp, 754);
        sw.tick();
        assert_eq!(&sw.display_string().to_ascii(), b"123500");
    }

    #[test]
    fn test_clamp_holds_at_59_59() {
        let mut sw = at(OverflowPolicy::Clamp, MAX_DISPLAY_SECONDS - 1);
        sw.tick();
        assert_eq!(&sw.display_string().to_ascii(), b"595900");
        sw.tick();
        assert_eq!(sw.elapsed(), 3600);
        assert_eq!(&sw.display_string().to_ascii(), b"595900");
    }

    #[test]
    fn test_wrap_restarts_at_zero() {
        let mut sw = at(OverflowPolicy::Wrap, MAX_DISPLAY_SECONDS);
        sw.tick();
        assert_eq!(sw.elapsed(), 3600);
        assert_eq!(sw.display_string(), DisplayString::ZERO);
        sw.tick();
        assert_eq!(&sw.display_string().to_ascii(), b"000100");
    }

    #[test]
    fn test_counter_saturates() {
        let mut sw = at(OverflowPolicy::Wrap, u32::MAX);
        sw.tick();
        assert_eq!(sw.elapsed(), u32::MAX);
        assert_eq!(sw.display_string().digits().len(), DISPLAY_DIGITS);
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(OverflowPolicy::from_name("clamp"), Some(OverflowPolicy::Clamp));
        assert_eq!(OverflowPolicy::from_name("wrap"), Some(OverflowPolicy::Wrap));
        assert_eq!(OverflowPolicy::from_name("stop"), None);
    }
}
