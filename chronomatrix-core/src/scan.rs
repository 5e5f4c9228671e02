//! Scan-out loop
//!
//! Each pass walks row-groups 0 to 7 in order. For every row-group the 48
//! words are streamed to the shift registers and flushed, then the
//! row-group index is written to the row-select channel, which latches the
//! data and lights the row. The loop never ends on its own.

use core::convert::Infallible;

use crate::frame::{RowGroup, WORDS_PER_ROW_GROUP};
use crate::glyph::ROW_GROUPS;
use crate::pixel::PixelWord;
use crate::store::FrameStore;
use crate::traits::{RowSelectChannel, ShiftRegisterChannel};

/// Errors from the output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanError<S, R> {
    /// Shift-register transfer failed
    Shift(S),
    /// Row selection failed
    RowSelect(R),
}

/// Drives a panel from a [`FrameStore`]
pub struct ScanOut<S, R> {
    shifter: S,
    rows: R,
    /// Row-group currently being streamed
    row: RowGroup,
    /// Completed passes
    passes: u32,
}

impl<S, R> ScanOut<S, R>
where
    S: ShiftRegisterChannel,
    R: RowSelectChannel,
{
    /// Create a scan-out loop over the given channels
    pub fn new(shifter: S, rows: R) -> Self {
        Self {
            shifter,
            rows,
            row: [PixelWord::BLANK; WORDS_PER_ROW_GROUP],
            passes: 0,
        }
    }

    /// Stream one row-group and select it
    ///
    /// The row-group is copied from the store right before streaming, so a
    /// frame published mid-pass shows up from the next row-group on.
    async fn scan_row_group(
        &mut self,
        store: &FrameStore,
        index: usize,
    ) -> Result<(), ScanError<S::Error, R::Error>> {
        store.read_row_group(index, &mut self.row);

        for &word in self.row.iter() {
            self.shifter.shift(word).await.map_err(ScanError::Shift)?;
        }
        self.shifter.flush().await.map_err(ScanError::Shift)?;

        self.rows
            .select(index as u8)
            .await
            .map_err(ScanError::RowSelect)
    }

    /// One full pass over all row-groups
    pub async fn scan_pass(
        &mut self,
        store: &FrameStore,
    ) -> Result<(), ScanError<S::Error, R::Error>> {
        for index in 0..ROW_GROUPS {
            self.scan_row_group(store, index).await?;
        }
        self.passes = self.passes.wrapping_add(1);
        Ok(())
    }

    /// Refresh the panel forever
    ///
    /// Only returns if a channel reports an error.
    pub async fn run(
        &mut self,
        store: &FrameStore,
    ) -> Result<Infallible, ScanError<S::Error, R::Error>> {
        loop {
            self.scan_pass(store).await?;
        }
    }

    /// Number of completed passes (wraps)
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// Release the channels
    pub fn into_inner(self) -> (S, R) {
        (self.shifter, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::FrameCompiler;
    use crate::frame::FrameBuffer;
    use core::cell::RefCell;
    use embassy_futures::block_on;
    use heapless::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Word(u32),
        Flush,
        Row(u8),
    }

    type Log = RefCell<Vec<Event, 2048>>;

    struct MockShifter<'a> {
        log: &'a Log,
        /// Publish this frame after this many words
        publish_at: Option<(usize, &'a FrameStore, &'a FrameBuffer)>,
        shifted: usize,
    }

    impl<'a> MockShifter<'a> {
        fn new(log: &'a Log) -> Self {
            Self {
                log,
                publish_at: None,
                shifted: 0,
            }
        }
    }

    impl ShiftRegisterChannel for MockShifter<'_> {
        type Error = ();

        async fn shift(&mut self, word: PixelWord) -> Result<(), ()> {
            self.log.borrow_mut().push(Event::Word(word.raw())).map_err(|_| ())?;
            self.shifted += 1;
            if let Some((at, store, frame)) = self.publish_at {
                if self.shifted == at {
                    store.publish(frame);
                }
            }
            Ok(())
        }

        async fn flush(&mut self) -> Result<(), ()> {
            self.log.borrow_mut().push(Event::Flush).map_err(|_| ())
        }
    }

    struct MockRows<'a> {
        log: &'a Log,
        /// Fail after this many selects
        fail_after: Option<usize>,
        selects: usize,
    }

    impl<'a> MockRows<'a> {
        fn new(log: &'a Log) -> Self {
            Self {
                log,
                fail_after: None,
                selects: 0,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct RowFault;

    impl RowSelectChannel for MockRows<'_> {
        type Error = RowFault;

        async fn select(&mut self, index: u8) -> Result<(), RowFault> {
            if self.fail_after == Some(self.selects) {
                return Err(RowFault);
            }
            self.selects += 1;
            self.log.borrow_mut().push(Event::Row(index)).map_err(|_| RowFault)?;
            Ok(())
        }
    }

    fn rows_in(log: &Log) -> Vec<u8, 64> {
        log.borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Row(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_pass_streams_48_words_flush_then_row() {
        let store = FrameStore::new();
        let frame = FrameCompiler::default().compile_str("000000");
        store.publish(&frame);

        let log = Log::default();
        let mut scan = ScanOut::new(MockShifter::new(&log), MockRows::new(&log));
        block_on(scan.scan_pass(&store)).unwrap();
        assert_eq!(scan.passes(), 1);

        let events = log.borrow();
        assert_eq!(events.len(), ROW_GROUPS * (WORDS_PER_ROW_GROUP + 2));

        for (rg, chunk) in events.chunks(WORDS_PER_ROW_GROUP + 2).enumerate() {
            for (i, event) in chunk[..WORDS_PER_ROW_GROUP].iter().enumerate() {
                assert_eq!(*event, Event::Word(frame.row_group(rg)[i].raw()));
            }
            assert_eq!(chunk[WORDS_PER_ROW_GROUP], Event::Flush);
            assert_eq!(chunk[WORDS_PER_ROW_GROUP + 1], Event::Row(rg as u8));
        }
    }

    #[test]
    fn test_row_groups_ascend_every_pass() {
        let store = FrameStore::new();
        let log = Log::default();
        let mut scan = ScanOut::new(MockShifter::new(&log), MockRows::new(&log));

        for _ in 0..3 {
            block_on(scan.scan_pass(&store)).unwrap();
        }

        let rows = rows_in(&log);
        assert_eq!(rows.len(), 3 * ROW_GROUPS);
        for (i, &row) in rows.iter().enumerate() {
            assert_eq!(row as usize, i % ROW_GROUPS);
        }
    }

    #[test]
    fn test_frame_is_stable_between_publishes() {
        let store = FrameStore::new();
        store.publish(&FrameCompiler::default().compile_str("000000"));

        let log = Log::default();
        let mut scan = ScanOut::new(MockShifter::new(&log), MockRows::new(&log));
        block_on(scan.scan_pass(&store)).unwrap();
        block_on(scan.scan_pass(&store)).unwrap();

        let events = log.borrow();
        let half = events.len() / 2;
        assert_eq!(&events[..half], &events[half..]);
    }

    #[test]
    fn test_publish_mid_pass_applies_from_next_row_group() {
        let compiler = FrameCompiler::default();
        let old = compiler.compile_str("000000");
        let new = compiler.compile_str("888888");

        let store = FrameStore::new();
        store.publish(&old);

        let log = Log::default();
        let mut shifter = MockShifter::new(&log);
        // Partway through row-group 2
        shifter.publish_at = Some((2 * WORDS_PER_ROW_GROUP + 4, &store, &new));

        let mut scan = ScanOut::new(shifter, MockRows::new(&log));
        block_on(scan.scan_pass(&store)).unwrap();

        let events = log.borrow();
        for (rg, chunk) in events.chunks(WORDS_PER_ROW_GROUP + 2).enumerate() {
            let expected = if rg <= 2 { &old } else { &new };
            for (i, event) in chunk[..WORDS_PER_ROW_GROUP].iter().enumerate() {
                assert_eq!(*event, Event::Word(expected.row_group(rg)[i].raw()));
            }
        }
    }

    #[test]
    fn test_run_stops_on_channel_error() {
        let store = FrameStore::new();
        let log = Log::default();
        let mut rows = MockRows::new(&log);
        rows.fail_after = Some(2 * ROW_GROUPS + 3);

        let mut scan = ScanOut::new(MockShifter::new(&log), rows);
        let result = block_on(scan.run(&store));

        assert_eq!(result, Err(ScanError::RowSelect(RowFault)));
        assert_eq!(scan.passes(), 2);
        assert_eq!(rows_in(&log).len(), 2 * ROW_GROUPS + 3);
    }
}
