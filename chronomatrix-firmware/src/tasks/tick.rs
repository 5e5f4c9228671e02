//! Tick task for the internal timer
//!
//! Advances the stopwatch once per period and publishes the new frame.

use defmt::*;
use embassy_time::{Duration, Ticker};

use chronomatrix_core::Stopwatch;

use crate::channels::FRAME_STORE;

/// Tick task - advances the display once per period
#[embassy_executor::task]
pub async fn tick_task(mut stopwatch: Stopwatch, period: Duration) {
    info!("Tick task started ({} ms)", period.as_millis());

    let mut ticker = Ticker::every(period);

    loop {
        ticker.next().await;

        let frame = stopwatch.tick();
        let generation = FRAME_STORE.publish(&frame);

        debug!(
            "Tick {}: {=[u8]:a} (frame {})",
            stopwatch.elapsed(),
            &stopwatch.display_string().to_ascii()[..],
            generation
        );
    }
}
