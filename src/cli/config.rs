//! TOML configuration file support.
//!
//! Instead of passing flags on every run, users can keep site specific
//! column conventions in a config file:
//!
//! ```toml
//! # strainview.toml
//! [catalog]
//! load_column_pattern = "Load_Ratio"
//! strain_units = ["μstrain", "µstrain"]
//!
//! [overlay]
//! load_column = "Load"
//! strain_column = "Predicted_Strain"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use strainview::config::SessionConfig;

/// Root configuration structure for strainview.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Channel classification settings.
    #[serde(default)]
    pub catalog: CatalogSection,

    /// Prediction overlay settings.
    #[serde(default)]
    pub overlay: OverlaySection,
}

/// `[catalog]` table.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogSection {
    /// Substring identifying the load column.
    pub load_column_pattern: Option<String>,

    /// Units marking a physical strain channel.
    pub strain_units: Option<Vec<String>>,
}

/// `[overlay]` table.
#[derive(Debug, Default, Deserialize)]
pub struct OverlaySection {
    /// Column holding load values.
    pub load_column: Option<String>,

    /// Column holding predicted strain values.
    pub strain_column: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Overwrite the values set in this file, keep the rest.
    pub fn apply(self, config: &mut SessionConfig) {
        if let Some(pattern) = self.catalog.load_column_pattern {
            config.catalog.load_column_pattern = pattern;
        }
        if let Some(units) = self.catalog.strain_units {
            config.catalog.strain_units = units;
        }
        if let Some(column) = self.overlay.load_column {
            config.overlay.load_column = column;
        }
        if let Some(column) = self.overlay.strain_column {
            config.overlay.strain_column = column;
        }
    }
}
