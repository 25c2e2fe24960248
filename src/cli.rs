use std::{num::NonZeroUsize, path::PathBuf};

use clap::{command, value_parser, Arg, ArgAction, Command};

use super::utils::LogLevel;

pub fn cli_model() -> Command {
    command!()
        .arg(
            Arg::new("timestamp")
                .short('X')
                .long("timestamp")
                .value_parser(value_parser!(stderrlog::Timestamp))
                .value_name("GRANULARITY")
                .default_value("none")
                .help("Prepend log entries with a timestamp"),
        )
        .arg(
            Arg::new("loglevel")
                .short('l')
                .long("loglevel")
                .value_name("LOGLEVEL")
                .value_parser(value_parser!(LogLevel))
                .ignore_case(true)
                .default_value("info")
                .help("Set log level"),
        )
        .arg(
            Arg::new("quiet")
                .action(ArgAction::SetTrue)
                .long("quiet")
                .conflicts_with("loglevel")
                .help("Silence all output"),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .value_parser(value_parser!(NonZeroUsize))
                .value_name("INT")
                .help("Set number of threads [default: available cores]"),
        )
        .arg(
            Arg::new("strict")
                .action(ArgAction::SetTrue)
                .short('s')
                .long("strict")
                .help("Abort on malformed input lines instead of skipping them"),
        )
        .arg(
            Arg::new("skip_deletions")
                .action(ArgAction::SetTrue)
                .short('D')
                .long("skip-deletions")
                .help("Treat '-' in alignment strings as an indel marker (like '+')"),
        )
        .arg(
            Arg::new("indel_length")
                .action(ArgAction::SetTrue)
                .short('I')
                .long("indel-length")
                .help("Use the declared indel length when skipping indel markers"),
        )
        .arg(
            Arg::new("label")
                .short('L')
                .long("label")
                .value_parser(value_parser!(String))
                .value_name("NAME")
                .default_value("chr1")
                .help("Label for the chr and subref output columns"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(value_parser!(PathBuf))
                .value_name("OUTPUT_FILE")
                .help("Output file [default: stdout]"),
        )
        .arg(
            Arg::new("compress")
                .action(ArgAction::SetTrue)
                .short('z')
                .long("compress")
                .help("Compress output (gzip)"),
        )
        .arg(
            Arg::new("input")
                .value_parser(value_parser!(PathBuf))
                .value_name("INPUT_FILE")
                .required(true)
                .help("Input pileup file (can be gzip compressed)"),
        )
}
