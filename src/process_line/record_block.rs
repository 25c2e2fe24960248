use crate::depth::PositionRecord;

/// Depth records generated from one block of input lines.  idx is the consecutive block
/// index assigned by the reader, used to put blocks back into input order.
pub(crate) struct RecordBlock {
    idx: usize,
    records: Vec<PositionRecord>,
    skipped: usize,
}

impl RecordBlock {
    pub(crate) fn new(idx: usize, capacity: usize) -> Self {
        Self {
            idx,
            records: Vec::with_capacity(capacity),
            skipped: 0,
        }
    }

    #[inline]
    pub(crate) fn idx(&self) -> usize {
        self.idx
    }

    #[inline]
    pub(crate) fn push(&mut self, rec: PositionRecord) {
        self.records.push(rec)
    }

    #[inline]
    pub(crate) fn incr_skipped(&mut self) {
        self.skipped += 1
    }

    #[inline]
    pub(crate) fn skipped(&self) -> usize {
        self.skipped
    }

    #[inline]
    pub(crate) fn into_records(self) -> Vec<PositionRecord> {
        self.records
    }
}
