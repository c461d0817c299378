use anyhow::{Context, Result};
use log::{info, warn};
use std::io::{self, Write};
use std::path::PathBuf;

use strainview::config::SessionConfig;
use strainview::projection::TableView;

use super::{open_session, Format};

/// Print the chart and table content for a set of channels
pub fn run(
    config: SessionConfig,
    file: PathBuf,
    channels: Vec<String>,
    calculations: Vec<String>,
    trim: bool,
    overlay: Option<PathBuf>,
    format: Format,
) -> Result<()> {
    let mut session = open_session(config, &file, &calculations)?;

    for name in &channels {
        if !session.add_channel(name) {
            warn!("Channel '{}' not plotted (not a strain or derived channel, or repeated)", name);
        }
    }
    if trim {
        session.set_trimmed(true).context("Failed to trim view")?;
    }
    if let Some(path) = overlay {
        session
            .load_prediction_file(&path)
            .with_context(|| format!("Failed to load prediction overlay {}", path.display()))?;
    }

    let projection = session.project();
    info!(
        "Projected {} channels over {} rows",
        projection.chart.series.len(),
        projection.table.row_count()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        Format::Csv => write_csv(&projection.table, &mut out)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &projection)
                .context("Failed to serialize projection")?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Write a table view as CSV with a header row
fn write_csv<W: Write>(table: &TableView, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&table.columns)?;
    for row in &table.rows {
        csv_writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    csv_writer.flush().context("Failed to write CSV")?;
    Ok(())
}
