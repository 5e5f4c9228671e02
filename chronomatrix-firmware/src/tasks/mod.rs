//! Embassy async tasks
//!
//! Each task runs independently and publishes frames via the shared store.

pub mod tick;
pub mod timestamp_rx;

pub use tick::tick_task;
pub use timestamp_rx::timestamp_rx_task;
