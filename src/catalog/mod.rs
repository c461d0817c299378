//! # Channel Catalog
//!
//! Classifies the columns of an ingested [`Dataset`] by name and declared
//! unit: exactly one load column (the x axis and trimming reference), any
//! number of physical strain channels, and everything else.
//!
//! Only strain channels are eligible for sensor grouping.

mod search;

#[cfg(test)]
mod tests;

use serde::Serialize;

use crate::config::CatalogConfig;
use crate::dataset::{Dataset, IngestionError};

pub use search::search_channels;

/// Role of a column in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// The load column
    Load,
    /// Physical strain channel
    Strain,
    /// Any other numeric column (time stamps, temperatures, ...)
    Other,
}

/// Catalog entry for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelDescriptor {
    /// Column name
    pub name: String,

    /// Declared unit
    pub unit: Option<String>,

    /// Classification
    pub kind: ChannelKind,
}

/// Column classification of one dataset, in column order
#[derive(Debug, Clone, Serialize)]
pub struct ChannelCatalog {
    channels: Vec<ChannelDescriptor>,
    load_column: String,
}

impl ChannelCatalog {
    /// Classify the columns of a dataset.
    ///
    /// Fails with [`IngestionError::MissingLoadColumn`] if no column name
    /// contains the configured load pattern.
    pub fn from_dataset(dataset: &Dataset, config: &CatalogConfig) -> Result<Self, IngestionError> {
        let load_column = dataset
            .column_names()
            .find(|name| name.contains(config.load_column_pattern.as_str()))
            .ok_or_else(|| IngestionError::MissingLoadColumn(config.load_column_pattern.clone()))?
            .to_string();

        let channels = dataset
            .columns()
            .iter()
            .map(|column| {
                let kind = if column.name == load_column {
                    ChannelKind::Load
                } else if column
                    .unit
                    .as_deref()
                    .is_some_and(|unit| config.is_strain_unit(unit))
                {
                    ChannelKind::Strain
                } else {
                    ChannelKind::Other
                };
                ChannelDescriptor {
                    name: column.name.clone(),
                    unit: column.unit.clone(),
                    kind,
                }
            })
            .collect();

        Ok(Self {
            channels,
            load_column,
        })
    }

    /// Name of the load column
    pub fn load_column(&self) -> &str {
        &self.load_column
    }

    /// Every classified column
    pub fn channels(&self) -> &[ChannelDescriptor] {
        &self.channels
    }

    /// Physical strain channel names in column order
    pub fn physical_channels(&self) -> Vec<String> {
        self.channels
            .iter()
            .filter(|c| c.kind == ChannelKind::Strain)
            .map(|c| c.name.clone())
            .collect()
    }
}
