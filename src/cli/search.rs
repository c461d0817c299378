use anyhow::Result;
use std::path::PathBuf;

use strainview::config::SessionConfig;

use super::open_session;

/// Search the channels of a .dat file, optionally after deriving
pub fn run(
    config: SessionConfig,
    file: PathBuf,
    term: String,
    calculations: Vec<String>,
) -> Result<()> {
    let session = open_session(config, &file, &calculations)?;
    for name in session.search_channels(&term) {
        println!("{}", name);
    }
    Ok(())
}
