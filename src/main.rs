//! # strainview
//!
//! A command-line tool for inspecting strain gauge test data.
//!
//! ## Usage
//!
//! ```bash
//! # Channels, load column and sensor groups of a file
//! strainview info Wing_1001_static.dat
//!
//! # Data files of a test campaign by file ID
//! strainview scan ./runs
//!
//! # Shear channels of every rosette, trimmed to the loading phase, as CSV
//! strainview project Wing_1001_static.dat --calc shear --channel 1001S:MON1 --trim
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
