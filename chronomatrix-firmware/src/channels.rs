//! Inter-task shared state
//!
//! The frame store is the only state shared between tasks. Producers (the
//! tick task or the timestamp RX task) publish whole frames; the scan-out
//! loop in `main` reads one row-group at a time.

use chronomatrix_core::FrameStore;

/// Frame currently shown on the panel
pub static FRAME_STORE: FrameStore = FrameStore::new();
