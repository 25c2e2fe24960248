pub mod align;
mod pileup_line;
pub mod process_block;
pub mod record_block;

use std::path::Path;

use anyhow::Context;
use crossbeam_channel::{Receiver, Sender};

use super::{config::Config, depth::PositionRecord, read::line_block::LineBlock};

use align::scan_alignment;
use pileup_line::parse_pileup_line;
use process_block::ProcessBlock;
use record_block::RecordBlock;

/// Convert a single pileup line into a depth record.  The reference base is resolved before the
/// alignment string is looked at.
pub(crate) fn process_line(cfg: &Config, line: &[u8]) -> anyhow::Result<PositionRecord> {
    let pl = parse_pileup_line(line)?;
    let (fwd, rev) = scan_alignment(pl.ref_base, pl.align, cfg.align_opts());
    Ok(PositionRecord::new(pl.position, pl.ref_base, fwd, rev))
}

/// Process all lines in a block.  Malformed lines are either skipped with a warning or, in
/// strict mode, cause an error to be returned.
fn process_line_block(cfg: &Config, idx: usize, lblock: &LineBlock) -> anyhow::Result<RecordBlock> {
    let mut rb = RecordBlock::new(idx, lblock.len());
    let path = cfg.input_file();
    for (ln, line) in lblock.lines() {
        match process_line(cfg, line) {
            Ok(rec) => rb.push(rec),
            Err(e) if cfg.strict() => {
                return Err(e).with_context(|| location(path, ln));
            }
            Err(e) => {
                warn!("{} {} - line skipped", location(path, ln), e);
                rb.incr_skipped()
            }
        }
    }
    Ok(rb)
}

fn location(path: &Path, ln: usize) -> String {
    format!("{}:{}", path.display(), ln)
}

pub(super) fn process_line_thread(
    cfg: &Config,
    ix: usize,
    out_send: Sender<RecordBlock>,
    block_recv: Receiver<ProcessBlock>,
    block_send: Sender<LineBlock>,
) -> anyhow::Result<()> {
    debug!("process line thread {} starting up", ix);

    for proc_blk in block_recv.iter() {
        let ProcessBlock { idx, lblock } = proc_blk;
        trace!("line thread {} received block {}", ix, idx);

        let record_block = process_line_block(cfg, idx, &lblock)?;

        // Send record block to collector thread
        out_send.send(record_block)?;
        // Send line block back to main thread for reuse
        block_send.send(lblock)?
    }
    debug!("process line thread {} shutting down", ix);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{base::Base, config::tests::test_config, depth::DepthGroup};

    #[test]
    fn line_to_record() {
        let cfg = test_config(&["in.pileup"]);
        let rec = process_line(&cfg, b"chr1\t100\tA\t8\t..,,AaCc\tIIIIIIII").unwrap();
        assert_eq!(rec.position(), 100);
        assert_eq!(rec.ref_base(), Base::A);
        assert_eq!(*rec.counts(DepthGroup::Forward).counts(), [3, 1, 0, 0, 0]);
        assert_eq!(*rec.counts(DepthGroup::Reverse).counts(), [3, 1, 0, 0, 0]);
        assert_eq!(*rec.counts(DepthGroup::All).counts(), [6, 2, 0, 0, 0]);
    }

    #[test]
    fn depth_hint_is_ignored() {
        let cfg = test_config(&["in.pileup"]);
        let rec = process_line(&cfg, b"chr1\t5\tg\t999\t.,\t##").unwrap();
        assert_eq!(rec.counts(DepthGroup::All).total(), 2);
        assert_eq!(rec.ref_depth(DepthGroup::All), 2);
    }

    #[test]
    fn options_reach_the_scanner() {
        let cfg = test_config(&["-D", "-I", "in.pileup"]);
        let rec = process_line(&cfg, b"chr1\t5\tA\t3\t.-2ct+1g,").unwrap();
        assert_eq!(*rec.counts(DepthGroup::All).counts(), [2, 0, 0, 0, 0]);
    }

    #[test]
    fn malformed_lines_skipped() {
        let cfg = test_config(&["in.pileup"]);
        let mut blk = LineBlock::new();
        blk.push_test_line(1, "chr1\t1\tA\t1\t.");
        blk.push_test_line(2, "chr1\t2\tX\t1\t.");
        blk.push_test_line(3, "chr1\t3");
        blk.push_test_line(4, "chr1\t4\tC\t1\t,");
        let rb = process_line_block(&cfg, 0, &blk).unwrap();
        assert_eq!(rb.skipped(), 2);
        let pos: Vec<_> = rb.into_records().iter().map(|r| r.position()).collect();
        assert_eq!(pos, [1, 4]);
    }

    #[test]
    fn malformed_line_fails_in_strict_mode() {
        let cfg = test_config(&["--strict", "in.pileup"]);
        let mut blk = LineBlock::new();
        blk.push_test_line(1, "chr1\t1\tA\t1\t.");
        blk.push_test_line(2, "chr1\tpos\tA\t1\t.");
        let e = process_line_block(&cfg, 0, &blk).err().expect("Should fail");
        assert_eq!(e.to_string(), "in.pileup:2");
    }
}
