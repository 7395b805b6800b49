//! # cropprep command-line entry point
//!
//! ```bash
//! cropprep run --input rice.csv --output rice_clean.csv
//! cropprep validate --input rice_clean.csv
//! cropprep prepare --input rice_clean.csv --out-dir model_data --seed 42
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // Allow println! in main binary

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cropprep::logging::init(&cli.log_level, cli.log_dir.as_deref())?;

    let config = cli::load_config(cli.config.as_ref())?;
    cli::run_command(cli.command, config)
}
