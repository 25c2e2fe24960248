use super::pileup_file::PileupFile;

/// Storage for consecutive lines read from the input file.
///
/// lines is always fully populated with (line number, buffer) pairs, and ix is the number of
/// filled entries.  Blocks are sent to the process threads and then returned to the main
/// thread so that the buffers can be reused.
const LINE_BLOCK_SIZE: usize = 256;

pub(crate) struct LineBlock {
    ix: usize,
    lines: Vec<(usize, Vec<u8>)>,
}

impl Default for LineBlock {
    fn default() -> Self {
        let lines = (0..LINE_BLOCK_SIZE).map(|_| (0, Vec::new())).collect();
        Self { ix: 0, lines }
    }
}

impl LineBlock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn clear(&mut self) {
        self.ix = 0
    }

    /// Fill block with lines from rdr.  Returns true if EOF was reached
    pub(crate) fn fill(&mut self, rdr: &mut PileupFile) -> anyhow::Result<bool> {
        self.clear();
        while let Some((ln, buf)) = self.lines.get_mut(self.ix) {
            match rdr.read_record(buf)? {
                Some(l) => {
                    *ln = l;
                    self.ix += 1
                }
                None => return Ok(true),
            }
        }
        Ok(false)
    }

    /// Iterator over (line number, line) for the filled part of the block
    pub(crate) fn lines(&self) -> impl Iterator<Item = (usize, &[u8])> {
        self.lines[..self.ix].iter().map(|(l, s)| (*l, s.as_slice()))
    }

    pub(crate) fn len(&self) -> usize {
        self.ix
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.ix == 0
    }

    #[cfg(test)]
    pub(crate) fn push_test_line(&mut self, ln: usize, s: &str) {
        let (l, buf) = &mut self.lines[self.ix];
        *l = ln;
        buf.clear();
        buf.extend_from_slice(s.as_bytes());
        self.ix += 1
    }
}
