use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};

use strainview::config::SessionConfig;
use strainview::session::Session;

mod config;
mod derive;
mod info;
mod project;
mod scan;
mod search;

pub use config::Config;

/// strainview - Strain gauge test data inspection
#[derive(Parser)]
#[command(name = "strainview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Substring identifying the load column (overrides the config file)
    #[arg(long, value_name = "PATTERN", global = true)]
    load_pattern: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format of the `project` command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Table view as CSV
    #[default]
    Csv,
    /// Full projection (chart and table) as JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Display channels and sensor groups of a .dat file
    Info {
        /// Input .dat file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List the .dat files of a directory by file ID
    Scan {
        /// Directory to scan
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Search the channels of a .dat file
    Search {
        /// Input .dat file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Case-insensitive search term
        #[arg(value_name = "TERM")]
        term: String,

        /// Calculations to run before searching (shear, average)
        #[arg(long = "calc", value_name = "ID")]
        calculations: Vec<String>,
    },

    /// Compute derived channels and list what was added
    Derive {
        /// Input .dat file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Calculations to run (shear, average)
        #[arg(long = "calc", value_name = "ID", required = true)]
        calculations: Vec<String>,
    },

    /// Print the chart and table content for a set of channels
    Project {
        /// Input .dat file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Channels to plot, in order
        #[arg(long = "channel", value_name = "NAME", required = true)]
        channels: Vec<String>,

        /// Calculations to run before plotting (shear, average)
        #[arg(long = "calc", value_name = "ID")]
        calculations: Vec<String>,

        /// Show only the loading phase, up to the load peak
        #[arg(long)]
        trim: bool,

        /// Prediction overlay file
        #[arg(long, value_name = "FILE")]
        overlay: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, default_value = "csv", value_enum)]
        format: Format,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    /// Defaults, then the config file, then explicit flags
    fn session_config(&self) -> Result<SessionConfig> {
        let mut session_config = SessionConfig::default();
        if let Some(path) = &self.config {
            Config::from_file(path)?.apply(&mut session_config);
            info!("Using config file {}", path.display());
        }
        if let Some(pattern) = &self.load_pattern {
            session_config.catalog.load_column_pattern = pattern.clone();
        }
        Ok(session_config)
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Load a file into a fresh session and run the requested calculations
fn open_session(config: SessionConfig, file: &Path, calculations: &[String]) -> Result<Session> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let mut session = Session::new(config);
    session
        .load_file(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    for id in calculations {
        session
            .compute_derived(id)
            .with_context(|| format!("Calculation '{}' failed", id))?;
    }
    Ok(session)
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let session_config = cli.session_config()?;
    match cli.command {
        Commands::Info { file } => info::run(session_config, file),
        Commands::Scan { dir } => scan::run(dir),
        Commands::Search {
            file,
            term,
            calculations,
        } => search::run(session_config, file, term, calculations),
        Commands::Derive { file, calculations } => derive::run(session_config, file, calculations),
        Commands::Project {
            file,
            channels,
            calculations,
            trim,
            overlay,
            format,
        } => project::run(
            session_config,
            file,
            channels,
            calculations,
            trim,
            overlay,
            format,
        ),
    }
}
