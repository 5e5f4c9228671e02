//! PIO shift-register data channel
//!
//! One state machine clocks pixel nibbles into the panel's shift registers.
//! Each 24-bit word is autopulled from the TX FIFO and sent as six 4-bit
//! pixels, lowest nibble first, with one clock pulse per pixel.

use core::convert::Infallible;

use chronomatrix_core::pixel::{PixelWord, BITS_PER_PIXEL, PIXELS_PER_WORD};
use chronomatrix_core::traits::ShiftRegisterChannel;
use embassy_rp::pio::{
    Common, Config, Direction as PioDirection, FifoJoin, Instance, PioPin, ShiftConfig,
    ShiftDirection, StateMachine,
};
use embassy_rp::Peri;

use crate::pio::clock_divider;

/// Bits autopulled per FIFO word
const WORD_BITS: u8 = (PIXELS_PER_WORD as u32 * BITS_PER_PIXEL) as u8;

/// PIO shift-register driver
///
/// Drives four consecutive data pins and a clock pin. The clock pin is
/// side-set so data is stable before every rising edge.
pub struct PioShifter<'d, PIO: Instance, const SM: usize> {
    /// PIO state machine running the data program
    sm: StateMachine<'d, PIO, SM>,
}

impl<'d, PIO: Instance, const SM: usize> PioShifter<'d, PIO, SM> {
    /// Create and start the data channel
    ///
    /// # Arguments
    /// * `common` - PIO common resources (for loading program)
    /// * `sm` - State machine to use
    /// * `data` - Four consecutive data pins, lowest first
    /// * `clock` - Shift clock pin
    /// * `clock_hz` - Program clock; three cycles per pixel
    #[allow(clippy::too_many_arguments)]
    pub fn new<D0: PioPin, D1: PioPin, D2: PioPin, D3: PioPin, CLK: PioPin>(
        common: &mut Common<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        d0: Peri<'d, D0>,
        d1: Peri<'d, D1>,
        d2: Peri<'d, D2>,
        d3: Peri<'d, D3>,
        clock: Peri<'d, CLK>,
        clock_hz: u32,
    ) -> Self {
        // Clock rises after the nibble is on the pins and falls before the next one
        let prg = pio::pio_asm!(
            ".side_set 1",
            ".wrap_target",
            "out pins, 4 side 0",
            "nop side 1",
            "nop side 0",
            ".wrap"
        );

        let installed = common.load_program(&prg.program);

        let d0 = common.make_pio_pin(d0);
        let d1 = common.make_pio_pin(d1);
        let d2 = common.make_pio_pin(d2);
        let d3 = common.make_pio_pin(d3);
        let clock = common.make_pio_pin(clock);

        let mut cfg = Config::default();
        cfg.use_program(&installed, &[&clock]);
        cfg.set_out_pins(&[&d0, &d1, &d2, &d3]);
        cfg.shift_out = ShiftConfig {
            threshold: WORD_BITS,
            direction: ShiftDirection::Right,
            auto_fill: true,
        };
        cfg.fifo_join = FifoJoin::TxOnly;
        cfg.clock_divider = clock_divider(clock_hz);

        sm.set_config(&cfg);
        sm.set_pin_dirs(PioDirection::Out, &[&d0, &d1, &d2, &d3, &clock]);
        sm.set_enable(true);

        Self { sm }
    }

    /// Whether the FIFO has drained and the program is waiting for data
    ///
    /// Reading the flag clears it, so a stall only counts once.
    fn take_stall(&mut self) -> bool {
        self.sm.tx().stalled()
    }
}

impl<PIO: Instance, const SM: usize> ShiftRegisterChannel for PioShifter<'_, PIO, SM> {
    type Error = Infallible;

    async fn shift(&mut self, word: PixelWord) -> Result<(), Infallible> {
        self.sm.tx().wait_push(word.raw()).await;
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), Infallible> {
        // Drop any stall left over from gaps between pushes, then wait for
        // the program to run dry after the last word
        self.take_stall();
        while !self.take_stall() {
            embassy_futures::yield_now().await;
        }
        Ok(())
    }
}
