//! Timestamp UART receive task
//!
//! Receives "MMSSUU" timestamps from a host and publishes them.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use chronomatrix_core::{FrameCompiler, TimestampAssembler};

use crate::channels::FRAME_STORE;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

/// Timestamp RX task - assembles timestamps and publishes their frames
#[embassy_executor::task]
pub async fn timestamp_rx_task(mut rx: BufferedUartRx, compiler: FrameCompiler) {
    info!("Timestamp RX task started");

    let mut assembler = TimestampAssembler::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        // Read available bytes
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match assembler.ingest(byte, &compiler, &FRAME_STORE) {
                        Ok(Some(generation)) => {
                            debug!("Timestamp published (frame {})", generation);
                        }
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Timestamp discarded: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                // Bytes may have been lost, so a partial stamp is unreliable
                warn!("UART read error: {:?}", e);
                assembler.reset();
            }
        }
    }
}
