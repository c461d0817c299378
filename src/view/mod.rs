//! # View State Controller
//!
//! Decides which rows of the dataset are on display. Untrimmed, that is the
//! whole dataset. Trimmed, it is the loading phase only: every row up to and
//! including the first row where the load column peaks.
//!
//! The active view is recomputed from the dataset on every call and never
//! stored, so it cannot drift from the data it describes.

use serde::Serialize;

use crate::dataset::{Dataset, DatasetView};
use crate::session::CoreError;

/// Index of the first maximum of the load column.
///
/// NaN and infinite values are ignored. Returns `None` when no finite
/// value exists.
pub fn load_peak_index(load: &[f64]) -> Option<usize> {
    let mut peak: Option<(usize, f64)> = None;
    for (i, &v) in load.iter().enumerate() {
        if !v.is_finite() {
            continue;
        }
        match peak {
            // Strictly greater keeps the earliest row on ties
            Some((_, best)) if v <= best => {}
            _ => peak = Some((i, v)),
        }
    }
    peak.map(|(i, _)| i)
}

/// Trim flag of the loaded dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    trimmed: bool,
}

impl ViewState {
    /// Whether the view is cut at the load peak
    pub fn is_trimmed(&self) -> bool {
        self.trimmed
    }

    /// Switch trimming on or off.
    ///
    /// Turning it on fails with [`CoreError::NoLoadPeak`], leaving the flag
    /// unchanged, if the load column has no finite value.
    pub fn set_trimmed(
        &mut self,
        trimmed: bool,
        dataset: &Dataset,
        load_column: &str,
    ) -> Result<(), CoreError> {
        if trimmed {
            let load = dataset.values(load_column).unwrap_or(&[]);
            if load_peak_index(load).is_none() {
                return Err(CoreError::NoLoadPeak(load_column.to_string()));
            }
        }
        self.trimmed = trimmed;
        Ok(())
    }

    /// Back to the full dataset
    pub fn reset(&mut self) {
        self.trimmed = false;
    }

    /// The rows currently on display
    pub fn active_view<'a>(&self, dataset: &'a Dataset, load_column: &'a str) -> DatasetView<'a> {
        let end = if self.trimmed {
            dataset
                .values(load_column)
                .and_then(load_peak_index)
                .map(|peak| peak + 1)
                .unwrap_or(dataset.row_count())
        } else {
            dataset.row_count()
        };
        DatasetView::new(dataset, load_column, end)
    }
}
