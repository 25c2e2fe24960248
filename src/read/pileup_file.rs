use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::Context;
use flate2::bufread::MultiGzDecoder;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Line oriented reader for a (possibly gzip or bgzip compressed) pileup file.
///
/// Keeps track of the current line number in the file and of the number of data lines
/// (records) returned so far.  Blank lines are skipped and not counted as records.
pub struct PileupFile {
    path: PathBuf,
    line: usize,
    records: usize,
    rdr: Box<dyn BufRead>,
}

impl PileupFile {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Error opening pileup file {}", path.display()))?;
        let mut rdr = BufReader::new(file);

        // Peek at the start of the file to check for compression
        let gz = rdr
            .fill_buf()
            .with_context(|| format!("Error reading from {}", path.display()))?
            .starts_with(&GZIP_MAGIC);

        let rdr: Box<dyn BufRead> = if gz {
            debug!("Input file {} is gzip compressed", path.display());
            Box::new(BufReader::new(MultiGzDecoder::new(rdr)))
        } else {
            Box::new(rdr)
        };

        Ok(Self {
            path: path.to_owned(),
            line: 0,
            records: 0,
            rdr,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of data lines read so far
    pub fn records(&self) -> usize {
        self.records
    }

    /// Read the next non-blank line into buf, with the line terminator removed.  Returns the
    /// line number, or None at EOF.  Lines are kept as raw bytes; no encoding is assumed
    pub fn read_record(&mut self, buf: &mut Vec<u8>) -> anyhow::Result<Option<usize>> {
        loop {
            buf.clear();
            let n = self.rdr.read_until(b'\n', buf).with_context(|| {
                format!(
                    "Error reading from {} at line {}",
                    self.path.display(),
                    self.line + 1
                )
            })?;
            if n == 0 {
                return Ok(None);
            }
            self.line += 1;
            while matches!(buf.last(), Some(b'\n' | b'\r')) {
                buf.pop();
            }
            if !buf.is_empty() {
                self.records += 1;
                return Ok(Some(self.line));
            }
        }
    }
}
