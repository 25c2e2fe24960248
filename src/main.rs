#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod base;
mod cli;
mod config;
mod depth;
mod output;
mod process_line;
mod read;
mod utils;

fn main() -> anyhow::Result<()> {
    // Set up configuration from CLI
    let cfg = config::handle_cli()?;
    debug!("{:?}", cfg);

    // Parse input.  Nothing is written until the whole input has been read successfully
    let chart = read::read_input(&cfg)?;

    // Write depth chart
    output::output_depth_chart(&cfg, &chart)
}
