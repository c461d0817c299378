use anyhow::{Context, Result};
use std::path::PathBuf;

use strainview::config::SessionConfig;

use super::open_session;

/// Run calculations and print the channels they added
pub fn run(config: SessionConfig, file: PathBuf, calculations: Vec<String>) -> Result<()> {
    let mut session = open_session(config, &file, &[])?;

    for id in &calculations {
        let outcome = session
            .compute_derived(id)
            .with_context(|| format!("Calculation '{}' failed", id))?;
        for name in &outcome.skipped_existing {
            println!("{}\t{}\texisting", id, name);
        }
        for name in &outcome.names {
            println!("{}\t{}\tadded", id, name);
        }
    }
    Ok(())
}
