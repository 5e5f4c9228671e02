//! Chronomatrix - S8 RGB LED Matrix Timer Firmware
//!
//! Main firmware binary for an RP2040 driving a 96x24 RGB panel. Shows an
//! MM:SS.UU timer, either counted internally or pushed over UART0.
//!
//! Two PIO state machines do the pin work; the CPU streams row-groups from
//! the frame store to them in an endless loop.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{PIO0, UART0};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Duration;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use chronomatrix_core::config::{parse_config, ChronomatrixConfig};
use chronomatrix_core::{DisplayString, FrameBuffer, ScanOut, Stopwatch};
use chronomatrix_hal_rp2040::pio::max_refresh_hz;
use chronomatrix_hal_rp2040::{PioRowSelect, PioShifter};

use crate::channels::FRAME_STORE;

mod channels;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit panel.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../panel.toml");

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Chronomatrix firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Dark panel until the first frame is ready
    FRAME_STORE.publish(&FrameBuffer::blank());

    // Setup PIO0: sm0 shifts pixel data, sm1 selects and latches rows
    // Reference wiring, fixed by the board:
    //   GPIO2-5   data (red, blue, green, spare)
    //   GPIO8     shift clock
    //   GPIO10-12 row address HA, HB, HC
    //   GPIO17/18 OE (active low) / ST
    //   GPIO0/1   UART0 TX/RX for timestamps
    let Pio {
        mut common,
        sm0,
        sm1,
        ..
    } = Pio::new(p.PIO0, Irqs);

    let shifter = PioShifter::new(
        &mut common,
        sm0,
        p.PIN_2,
        p.PIN_3,
        p.PIN_4,
        p.PIN_5,
        p.PIN_8,
        config.panel.data_clock_hz,
    );

    let rows = PioRowSelect::new(
        &mut common,
        sm1,
        p.PIN_10,
        p.PIN_11,
        p.PIN_12,
        p.PIN_17,
        p.PIN_18,
        config.panel.row_clock_hz,
    );

    info!(
        "PIO panel initialized: data {} Hz, rows {} Hz, <= {} refreshes/s",
        config.panel.data_clock_hz,
        config.panel.row_clock_hz,
        max_refresh_hz(config.panel.data_clock_hz, config.panel.row_clock_hz)
    );

    let compiler = config.panel.compiler();

    if config.input.enabled {
        // External timestamps replace the internal timer
        let mut uart_config = UartConfig::default();
        uart_config.baudrate = config.input.baudrate;

        let tx_buf = TX_BUF.init([0u8; 16]);
        let rx_buf = RX_BUF.init([0u8; 64]);

        let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
        let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
        let (_tx, rx) = uart.split();

        info!("UART initialized at {} baud for timestamps", config.input.baudrate);

        FRAME_STORE.publish(&compiler.compile(&DisplayString::ZERO));
        spawner.spawn(tasks::timestamp_rx_task(rx, compiler)).unwrap();
    } else {
        let stopwatch = Stopwatch::new(compiler, config.timer.overflow);
        FRAME_STORE.publish(&stopwatch.frame());

        let period = Duration::from_millis(config.timer.tick_ms as u64);
        spawner.spawn(tasks::tick_task(stopwatch, period)).unwrap();
    }

    info!("All tasks spawned, scanning panel");

    let mut scan = ScanOut::new(shifter, rows);
    let result = scan.run(&FRAME_STORE).await;
    if let Err(e) = result {
        error!("Scan-out stopped after {} passes: {:?}", scan.passes(), e);
    }
    panic!("scan-out failed");
}

/// Parse the embedded panel.toml, falling back to defaults
fn load_config() -> ChronomatrixConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded embedded config");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}, using defaults", e);
            ChronomatrixConfig::default()
        }
    };

    debug!("Config: {:?}", config);
    config
}
