use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use clap::ArgMatches;

use super::{cli::cli_model, process_line::align::AlignOpts, utils::init_log};

#[derive(Debug)]
pub struct Config {
    // Input pileup file (possibly compressed)
    input_file: PathBuf,
    // Output file - if none, output to stdout
    output_file: Option<PathBuf>,
    compress: bool,
    // Placeholder used for the chr and subref output columns
    label: String,
    // Abort on malformed lines rather than skipping them
    strict: bool,
    align_opts: AlignOpts,
    // General options:
    threads: usize,
}

impl Config {
    pub fn input_file(&self) -> &Path {
        &self.input_file
    }
    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }
    pub fn compress(&self) -> bool {
        self.compress
    }
    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn strict(&self) -> bool {
        self.strict
    }
    pub fn align_opts(&self) -> &AlignOpts {
        &self.align_opts
    }
    pub fn threads(&self) -> usize {
        self.threads
    }
}

pub fn handle_cli() -> anyhow::Result<Config> {
    // Get matches from command line
    let m = cli_model().get_matches();

    // Setup logging
    init_log(&m)?;

    debug!("Processing command line options");

    config_from_matches(&m)
}

fn config_from_matches(m: &ArgMatches) -> anyhow::Result<Config> {
    let input_file = m
        .get_one::<PathBuf>("input")
        .ok_or_else(|| anyhow!("Missing input file"))?
        .to_owned();

    let output_file = m.get_one::<PathBuf>("output").map(|p| p.to_owned());

    // Threads option should be non-zero.  If not set, set to number of available CPUs
    let threads = m
        .get_one::<NonZeroUsize>("threads")
        .map(|i| usize::from(*i))
        .unwrap_or_else(num_cpus::get);

    let label = match m
        .get_one::<String>("label")
        .ok_or_else(|| anyhow!("Missing default label"))?
    {
        s if s.is_empty() || s.contains(char::is_whitespace) => Err(anyhow!(
            "label option '{}' must be non-empty and contain no white space",
            s
        )),
        s => Ok(s.to_owned()),
    }?;

    let align_opts = AlignOpts::new(m.get_flag("skip_deletions"), m.get_flag("indel_length"));

    Ok(Config {
        input_file,
        output_file,
        compress: m.get_flag("compress"),
        label,
        strict: m.get_flag("strict"),
        align_opts,
        threads,
    })
}
