use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use strainview::sources::SourceIndex;

/// List the .dat files of a directory by file ID
pub fn run(dir: PathBuf) -> Result<()> {
    let index = SourceIndex::scan_dir(&dir)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;
    info!("Found {} data files in {}", index.len(), dir.display());

    for (id, path) in index.iter() {
        println!("{}\t{}", id, path.display());
    }
    Ok(())
}
