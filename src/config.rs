//! Session configuration.
//!
//! Every field has a default matching the instrumentation files the tool
//! was built for, so [`SessionConfig::default()`] works out of the box. All
//! types deserialize from partial TOML tables.

use serde::{Deserialize, Serialize};

/// Configuration for a [`Session`](crate::session::Session)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Channel classification settings
    pub catalog: CatalogConfig,

    /// Prediction overlay source settings
    pub overlay: OverlayConfig,
}

/// How channels of an ingested dataset are classified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Substring identifying the load column; the first matching column wins
    pub load_column_pattern: String,

    /// Units marking a column as a physical strain channel
    pub strain_units: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            load_column_pattern: "Load_Ratio".to_string(),
            // Greek small mu and the micro sign both show up in exported files
            strain_units: vec!["\u{3bc}strain".to_string(), "\u{b5}strain".to_string()],
        }
    }
}

impl CatalogConfig {
    /// Whether a unit string denotes micro-strain
    pub fn is_strain_unit(&self, unit: &str) -> bool {
        self.strain_units.iter().any(|u| u == unit)
    }
}

/// Column names expected in a prediction overlay source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Column holding load values
    pub load_column: String,

    /// Column holding predicted strain values
    pub strain_column: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            load_column: "Load".to_string(),
            strain_column: "Predicted_Strain".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strain_units() {
        let config = CatalogConfig::default();
        assert!(config.is_strain_unit("μstrain"));
        assert!(config.is_strain_unit("µstrain"));
        assert!(!config.is_strain_unit("%"));
    }

    #[test]
    fn test_partial_toml() {
        let config: SessionConfig = toml::from_str(
            r#"
            [catalog]
            load_column_pattern = "Force"
        "#,
        )
        .unwrap();
        assert_eq!(config.catalog.load_column_pattern, "Force");
        assert_eq!(config.catalog.strain_units, CatalogConfig::default().strain_units);
        assert_eq!(config.overlay, OverlayConfig::default());
    }
}
