use crate::read::line_block::LineBlock;

pub(crate) struct ProcessBlock {
    pub(super) idx: usize,
    pub(super) lblock: LineBlock,
}

impl ProcessBlock {
    pub(crate) fn new(lblock: LineBlock, idx: usize) -> Self {
        Self { idx, lblock }
    }
}
