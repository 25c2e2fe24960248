use std::thread::{self, ScopedJoinHandle};

use anyhow::Context;
use crossbeam_channel::{bounded, unbounded, Receiver, TryRecvError};

use super::{
    config::Config,
    output::{self, DepthChart},
    process_line::{process_block::ProcessBlock, process_line_thread},
};

pub mod line_block;
pub mod pileup_file;

use line_block::LineBlock;
use pileup_file::PileupFile;

/// The main event.  Read the pileup file and convert each line into a depth record, returning
/// the records in input order.
///
/// Threading model
///
/// We have the main thread, a collect thread and a number of process threads set by
/// cfg.threads().
///
/// The main thread reads lines from the input and stores them in blocks of LINE_BLOCK_SIZE,
/// which are sent to the process threads to be parsed into depth records.  Completed record
/// blocks are sent to the collect thread which puts them back into input order.  Finished
/// line blocks are sent back to the main thread so that they can be reused.
pub fn read_input(cfg: &Config) -> anyhow::Result<DepthChart> {
    debug!("Processing input");
    let mut rdr = PileupFile::open(cfg.input_file())?;
    info!("Reading pileup from {}", rdr.path().display());

    let n_proc = cfg.threads();

    // Create list of blocks to hold lines
    // We create enough so that each process thread can have 1 block being
    // worked on and one in reserve
    let nb = (n_proc + 1) << 1;
    let mut line_blocks: Vec<_> = (0..nb).map(|_| LineBlock::new()).collect();

    // Create channels

    // Channels for communication between the main thread and the process threads
    // These are for sending blocks to the process threads
    let (block_send, block_recv) = unbounded();
    // and these are for sending used blocks back to the main thread
    let (used_send, used_recv) = unbounded();
    // These channels are for sending record blocks from the process threads to the collect thread
    let (out_send, out_recv) = bounded(n_proc * 8);

    let mut res = false;
    let mut chart = None;

    thread::scope(|s| {
        // Spawn collect thread
        let collect = s.spawn(|| output::collect_thread(out_recv));

        // Spawn process threads
        let process: Vec<_> = (0..n_proc)
            .map(|ix| {
                let sc = out_send.clone();
                let rc = block_recv.clone();
                let uc = used_send.clone();

                s.spawn(move || process_line_thread(cfg, ix, sc, rc, uc))
            })
            .collect();

        // We do this so that when the process threads exit the channels will be disconnected,
        // so the collect thread will exit and the main thread will not wait forever for used blocks
        drop(out_send);
        drop(used_send);

        // Consecutive index for ProcessBlock structs
        let mut output_idx = 0;

        // Main read loop.  Returns true if an error occurs
        res = loop {
            // Check if any of the process threads are finished.  If they have at this stage this
            // must be because they hit an error condition, so we abort at this point
            if process.iter().any(|jh| jh.is_finished()) {
                break true;
            }

            // Get an empty LineBlock to fill.  If None is returned than an error occurred, so we abort
            let Some(mut blk) = get_line_block(&mut line_blocks, &used_recv) else {
                break true;
            };

            // Fill LineBlock with lines from input
            let eof = match blk.fill(&mut rdr) {
                Ok(x) => x,
                Err(e) => {
                    error!("Error reading input: {:#}", e);
                    break true;
                }
            };

            if blk.is_empty() {
                assert!(eof, "Empty block");
                break false;
            }

            trace!("Sending block {} to process threads", output_idx);
            let pb = ProcessBlock::new(blk, output_idx);
            output_idx += 1;
            if let Err(e) = block_send.send(pb) {
                error!("Error sending line block to process threads: {}", e);
                break true;
            }

            // If end of file reached we terminate normally
            if eof {
                break false;
            }
        };

        // Drop block_send to signal to process threads that input is finished
        drop(block_send);

        // Wait until process threads have finished and recover any errors
        let (err, c) = join_process_and_collect_threads(process, collect);
        res = err || res;
        chart = c;
    });

    match chart {
        Some(chart) if !res => {
            info!(
                "Finished processing input: {} data lines read, {} records, {} lines skipped",
                rdr.records(),
                chart.records().len(),
                chart.skipped()
            );
            if chart.skipped() > 0 {
                warn!(
                    "{} malformed lines skipped from {}",
                    chart.skipped(),
                    rdr.path().display()
                )
            }
            Ok(chart)
        }
        _ => Err(anyhow!("Error - reading of input file unsuccessful")),
    }
}

/// Next free line buffer for the reader, or None (after logging) if the line threads have
/// gone away.
fn get_line_block(line_blocks: &mut Vec<LineBlock>, r: &Receiver<LineBlock>) -> Option<LineBlock> {
    match _get_block(line_blocks, r) {
        Ok(b) => Some(b),
        Err(e) => {
            error!("Could not get a free line block: {}", e);
            None
        }
    }
}

/// Take a free LineBlock, first collecting any blocks the line threads have finished with.  Waits
/// for a returned block when none are free; fails once no line thread is left to return one.
fn _get_block(line_blocks: &mut Vec<LineBlock>, r: &Receiver<LineBlock>) -> anyhow::Result<LineBlock> {
    // Collect whatever has already been handed back
    try_recover_used_blocks(line_blocks, r)?;

    loop {
        // A free block is ready
        if let Some(b) = line_blocks.pop() {
            return Ok(b);
        }

        // All blocks in flight, wait for one to come back
        recover_used_block(line_blocks, r)?;
    }
}

/// Move every LineBlock already waiting on the return channel into the free list without
/// waiting.  A disconnected channel means all line threads have exited, which is an error here.
fn try_recover_used_blocks(
    line_blocks: &mut Vec<LineBlock>,
    r: &Receiver<LineBlock>,
) -> anyhow::Result<()> {
    loop {
        match r.try_recv() {
            Ok(b) => line_blocks.push(b),
            Err(TryRecvError::Empty) => break,
            Err(_) => return Err(anyhow!("Error - no line threads left to return line blocks")),
        }
    }
    Ok(())
}

/// Wait for one LineBlock to be handed back by a line thread and add it to the free list
fn recover_used_block(line_blocks: &mut Vec<LineBlock>, r: &Receiver<LineBlock>) -> anyhow::Result<()> {
    let b = r.recv().with_context(|| "Error waiting for a line block to be returned")?;
    line_blocks.push(b);
    Ok(())
}

/// Join a line or collect thread.  Errors and panics are logged under the name given by f and
/// turned into None
fn join_thread<T, F>(h: ScopedJoinHandle<anyhow::Result<T>>, f: F) -> Option<T>
where
    F: FnOnce() -> String,
{
    match h.join() {
        Ok(Ok(x)) => Some(x),
        Ok(Err(e)) => {
            error!("{} returned an error: {:#}", f(), e);
            None
        }
        Err(_) => {
            error!("{} panicked", f());
            None
        }
    }
}

/// Wait for the line threads and then for the collect thread.  The flag is set if any line
/// thread failed; the chart is None if collection failed
fn join_process_and_collect_threads(
    v: Vec<ScopedJoinHandle<anyhow::Result<()>>>,
    collect: ScopedJoinHandle<anyhow::Result<DepthChart>>,
) -> (bool, Option<DepthChart>) {
    let mut res = false;

    // The collect thread only finishes once every line thread has dropped its sender
    for (ix, jh) in v.into_iter().enumerate() {
        res = join_thread(jh, || format!("process thread {}", ix)).is_none() || res
    }
    let chart = join_thread(collect, || "Collect thread".to_owned());
    (res, chart)
}
