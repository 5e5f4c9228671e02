//! PIO row-select and latch channel
//!
//! A second state machine owns the row address lines (HA, HB, HC) and the
//! OE/ST pair. For each row-group index it blanks the panel, sets the
//! address, pulses the strobe to latch the shifted data and re-enables the
//! output. OE is active low.
//!
//! Side-set bits: bit 0 = OE, bit 1 = ST.

use core::convert::Infallible;

use chronomatrix_core::glyph::ROW_GROUPS;
use chronomatrix_core::traits::RowSelectChannel;
use embassy_rp::pio::{
    Common, Config, Direction as PioDirection, FifoJoin, Instance, PioPin, ShiftConfig,
    ShiftDirection, StateMachine,
};
use embassy_rp::Peri;

use crate::pio::clock_divider;

/// PIO row-select driver
pub struct PioRowSelect<'d, PIO: Instance, const SM: usize> {
    /// PIO state machine running the row program
    sm: StateMachine<'d, PIO, SM>,
}

impl<'d, PIO: Instance, const SM: usize> PioRowSelect<'d, PIO, SM> {
    /// Create and start the row-select channel
    ///
    /// # Arguments
    /// * `common` - PIO common resources (for loading program)
    /// * `sm` - State machine to use
    /// * `ha`, `hb`, `hc` - Consecutive row address pins, least significant first
    /// * `oe` - Output enable (active low); `st` must be the next pin
    /// * `clock_hz` - Program clock
    #[allow(clippy::too_many_arguments)]
    pub fn new<HA: PioPin, HB: PioPin, HC: PioPin, OE: PioPin, ST: PioPin>(
        common: &mut Common<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        ha: Peri<'d, HA>,
        hb: Peri<'d, HB>,
        hc: Peri<'d, HC>,
        oe: Peri<'d, OE>,
        st: Peri<'d, ST>,
        clock_hz: u32,
    ) -> Self {
        let prg = pio::pio_asm!(
            ".side_set 2",
            ".wrap_target",
            "pull block side 0",    // lit while waiting for the next row-group
            "nop side 1",           // blank
            "out pins, 3 side 1 [2]",
            "nop side 3",           // strobe
            "nop side 1",
            "nop side 0",
            ".wrap"
        );

        let installed = common.load_program(&prg.program);

        let ha = common.make_pio_pin(ha);
        let hb = common.make_pio_pin(hb);
        let hc = common.make_pio_pin(hc);
        let oe = common.make_pio_pin(oe);
        let st = common.make_pio_pin(st);

        let mut cfg = Config::default();
        cfg.use_program(&installed, &[&oe, &st]);
        cfg.set_out_pins(&[&ha, &hb, &hc]);
        cfg.shift_out = ShiftConfig {
            threshold: 32,
            direction: ShiftDirection::Right,
            auto_fill: false,
        };
        cfg.fifo_join = FifoJoin::TxOnly;
        cfg.clock_divider = clock_divider(clock_hz);

        sm.set_config(&cfg);
        sm.set_pin_dirs(PioDirection::Out, &[&ha, &hb, &hc, &oe, &st]);
        sm.set_enable(true);

        Self { sm }
    }

    /// Whether the program has latched the row-group and is back at the pull
    ///
    /// Reading the flag clears it, so a stall only counts once.
    fn take_stall(&mut self) -> bool {
        self.sm.tx().stalled()
    }
}

impl<PIO: Instance, const SM: usize> RowSelectChannel for PioRowSelect<'_, PIO, SM> {
    type Error = Infallible;

    async fn select(&mut self, index: u8) -> Result<(), Infallible> {
        let index = index % ROW_GROUPS as u8;
        self.sm.tx().wait_push(index as u32).await;

        // Drop any stall from before the push, then wait for the latch
        self.take_stall();
        while !self.take_stall() {
            embassy_futures::yield_now().await;
        }
        Ok(())
    }
}
