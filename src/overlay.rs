//! Prediction overlay: model-predicted strain against load, drawn next to
//! the measured channels but kept out of the dataset.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::config::OverlayConfig;
use crate::dataset::IngestionError;

/// Predicted `(load, strain)` points
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionOverlay {
    /// Load values
    pub load: Vec<f64>,

    /// Predicted strain at each load value
    pub predicted_strain: Vec<f64>,
}

impl PredictionOverlay {
    /// Number of points
    pub fn len(&self) -> usize {
        self.load.len()
    }

    /// Whether the overlay has no points
    pub fn is_empty(&self) -> bool {
        self.load.is_empty()
    }

    /// Parse an overlay file
    pub fn from_file<P: AsRef<Path>>(path: P, config: &OverlayConfig) -> Result<Self, IngestionError> {
        let path = path.as_ref();
        debug!("Reading prediction overlay {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), config)
    }

    /// Parse whitespace-separated text with a header line.
    ///
    /// The header must name the configured load and strain columns; other
    /// columns are ignored. Blank lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R, config: &OverlayConfig) -> Result<Self, IngestionError> {
        let mut lines = reader.lines().enumerate();

        let header = loop {
            match lines.next() {
                Some((_, line)) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break line;
                    }
                }
                None => return Err(IngestionError::MissingColumn(config.load_column.clone())),
            }
        };
        let headers: Vec<&str> = header.split_whitespace().collect();
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| *h == name)
                .ok_or_else(|| IngestionError::MissingColumn(name.to_string()))
        };
        let load_idx = position(&config.load_column)?;
        let strain_idx = position(&config.strain_column)?;

        let mut overlay = Self::default();
        for (idx, line) in lines {
            let line = line?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            let parse = |col: usize, name: &str| -> Result<f64, IngestionError> {
                let raw = fields.get(col).copied().unwrap_or_default();
                raw.parse().map_err(|_| IngestionError::InvalidValue {
                    line: idx + 1,
                    column: name.to_string(),
                    value: raw.to_string(),
                })
            };
            overlay.load.push(parse(load_idx, &config.load_column)?);
            overlay
                .predicted_strain
                .push(parse(strain_idx, &config.strain_column)?);
        }

        debug!("Parsed {} overlay points", overlay.len());
        Ok(overlay)
    }
}
