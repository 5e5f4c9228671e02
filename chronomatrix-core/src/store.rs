//! Published frame shared between producers and the scan-out loop
//!
//! Producers (the tick task, timestamp ingestion) replace the whole frame
//! in one critical section. The scan-out loop copies one row-group at a
//! time, also inside a critical section, so a row-group is never read from
//! a half-written frame. Different row-groups of one pass may come from
//! different frames; at one update per second that is not visible.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::frame::{FrameBuffer, RowGroup};

struct Published {
    frame: FrameBuffer,
    generation: u32,
}

/// Holder for the currently published frame
pub struct FrameStore {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Published>>,
}

impl FrameStore {
    /// Store holding a blank frame, generation 0
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Published {
                frame: FrameBuffer::blank(),
                generation: 0,
            })),
        }
    }

    /// Replace the published frame
    ///
    /// Returns the new generation number.
    pub fn publish(&self, frame: &FrameBuffer) -> u32 {
        self.inner.lock(|cell| {
            let mut published = cell.borrow_mut();
            published.frame.clone_from(frame);
            published.generation = published.generation.wrapping_add(1);
            published.generation
        })
    }

    /// Copy one row-group of the current frame into `out`
    ///
    /// Returns the generation the row-group was taken from.
    ///
    /// # Panics
    /// If `index` is not below [`ROW_GROUPS`](crate::glyph::ROW_GROUPS).
    pub fn read_row_group(&self, index: usize, out: &mut RowGroup) -> u32 {
        self.inner.lock(|cell| {
            let published = cell.borrow();
            out.copy_from_slice(published.frame.row_group(index));
            published.generation
        })
    }

    /// Number of frames published so far
    pub fn generation(&self) -> u32 {
        self.inner.lock(|cell| cell.borrow().generation)
    }

    /// Copy of the whole current frame
    pub fn snapshot(&self) -> FrameBuffer {
        self.inner.lock(|cell| cell.borrow().frame.clone())
    }
}

impl Default for FrameStore {
    fn default() -> Self {
        Self::new()
    }
}
