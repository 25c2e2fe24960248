use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufWriter, Write},
};

use anyhow::Context;
use crossbeam_channel::Receiver;
use flate2::{write::GzEncoder, Compression};

use super::{
    base::Base,
    config::Config,
    depth::{DepthGroup, PositionRecord},
    process_line::record_block::RecordBlock,
};

/// Depth records in input order, with the number of input lines that were skipped
#[derive(Debug, Default)]
pub struct DepthChart {
    records: Vec<PositionRecord>,
    skipped: usize,
}

impl DepthChart {
    pub fn records(&self) -> &[PositionRecord] {
        &self.records
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn add_block(&mut self, blk: RecordBlock) {
        self.skipped += blk.skipped();
        self.records.extend(blk.into_records())
    }
}

/// Receive record blocks from the process threads and assemble them in block order.  Blocks
/// arriving early are held until all preceding blocks have been received.
pub(super) fn collect_thread(r: Receiver<RecordBlock>) -> anyhow::Result<DepthChart> {
    debug!("Collect thread starting up");
    let mut chart = DepthChart::default();
    let mut pending: HashMap<usize, RecordBlock> = HashMap::new();
    let mut next_idx = 0;

    for blk in r.iter() {
        trace!("Collect thread received block {}", blk.idx());
        pending.insert(blk.idx(), blk);
        while let Some(b) = pending.remove(&next_idx) {
            chart.add_block(b);
            next_idx += 1;
        }
    }

    debug!("Collect thread shutting down");
    if pending.is_empty() {
        Ok(chart)
    } else {
        Err(anyhow!(
            "Record block {} missing ({} later blocks received)",
            next_idx,
            pending.len()
        ))
    }
}

pub fn header() -> String {
    let mut s = String::from("count\tchr\tloc\tsubref\trefb");
    for g in DepthGroup::ALL {
        for b in Base::ALL {
            s.push_str(&format!("\t{b}_{g}"))
        }
        s.push_str(&format!("\tTot_{g}\tmatch_{g}\tMajVot_{g}"))
    }
    s
}

/// Write the depth chart (header and one row per record) to w
pub fn write_depth_chart<W: Write>(
    w: &mut W,
    label: &str,
    records: &[PositionRecord],
) -> io::Result<()> {
    writeln!(w, "{}", header())?;
    for (i, rec) in records.iter().enumerate() {
        write!(
            w,
            "{}\t{}\t{}\t{}\t{}",
            i + 1,
            label,
            rec.position(),
            label,
            rec.ref_base()
        )?;
        for g in DepthGroup::ALL {
            let ct = rec.counts(g);
            for c in ct.counts() {
                write!(w, "\t{c}")?
            }
            write!(
                w,
                "\t{}\t{}\t{}",
                ct.total(),
                rec.ref_depth(g),
                ct.majority()
            )?
        }
        writeln!(w)?
    }
    Ok(())
}

/// Write depth chart to the output file (or stdout), compressing if requested
pub fn output_depth_chart(cfg: &Config, chart: &DepthChart) -> anyhow::Result<()> {
    let out_name = cfg
        .output_file()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdout>".to_owned());
    info!(
        "Writing {} records to {}",
        chart.records().len(),
        out_name
    );

    let wrt: Box<dyn Write> = match cfg.output_file() {
        Some(p) => Box::new(
            File::create(p).with_context(|| format!("Error creating output file {}", out_name))?,
        ),
        None => Box::new(io::stdout()),
    };
    let wrt = BufWriter::new(wrt);

    let res = if cfg.compress() {
        let mut z = GzEncoder::new(wrt, Compression::default());
        write_depth_chart(&mut z, cfg.label(), chart.records())
            .and_then(|_| z.finish())
            .and_then(|mut w| w.flush())
    } else {
        let mut w = wrt;
        write_depth_chart(&mut w, cfg.label(), chart.records()).and_then(|_| w.flush())
    };
    res.with_context(|| format!("Error writing to {}", out_name))
}
