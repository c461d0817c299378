//! # Session
//!
//! The session owns the one loaded [`Dataset`] together with everything
//! derived from it, and is the only way to change any of it. It is a two-state
//! machine:
//!
//! ```text
//!            load ok                      add / remove / trim / derive / clear
//! Empty ───────────────▶ Loaded ◀──────────────────────────────────────────┐
//!   ▲                      │  └──────────────────────────────────────────────┘
//!   └──────────────────────┘
//!        load failed
//! ```
//!
//! Loading a dataset (successfully or not) discards the previous dataset,
//! its sensor groups, plotted channels, trim flag and prediction overlay.
//! [`Session::clear`] resets everything downstream of the dataset but keeps
//! the dataset and its derived channels.
//!
//! Renderers call [`Session::project`] after every operation and draw what
//! it returns; nothing is cached between calls.
//!
//! ## Example
//!
//! ```rust,no_run
//! use strainview::session::Session;
//!
//! let mut session = Session::default();
//! session.load_file("Wing_1001_static.dat")?;
//! let outcome = session.compute_derived("shear")?;
//! for name in &outcome.names {
//!     session.add_channel(name);
//! }
//! session.set_trimmed(true)?;
//! let projection = session.project();
//! println!("{} rows on display", projection.table.row_count());
//! # Ok::<(), strainview::session::CoreError>(())
//! ```

mod error;


use std::path::Path;

use log::{debug, info};

use crate::catalog::{search_channels, ChannelCatalog};
use crate::config::SessionConfig;
use crate::dataset::{Dataset, DatasetView, IngestionError};
use crate::derived::{compute_derived, CalculationRegistry, DerivationOutcome};
use crate::groups::SensorGroups;
use crate::overlay::PredictionOverlay;
use crate::plotted::PlottedChannelSet;
use crate::projection::{project, Projection, TableView};
use crate::view::ViewState;

pub use error::CoreError;

/// Everything that exists while a dataset is loaded
#[derive(Debug)]
struct Loaded {
    dataset: Dataset,
    catalog: ChannelCatalog,
    physical: Vec<String>,
    groups: SensorGroups,
    derived: Vec<String>,
    plotted: PlottedChannelSet,
    view: ViewState,
    overlay: Option<PredictionOverlay>,
}

impl Loaded {
    fn active_view(&self) -> DatasetView<'_> {
        self.view.active_view(&self.dataset, self.catalog.load_column())
    }
}

/// Interactive inspection session over one dataset at a time
#[derive(Debug, Default)]
pub struct Session {
    config: SessionConfig,
    registry: CalculationRegistry,
    state: Option<Loaded>,
}

impl Session {
    /// Create an empty session
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            registry: CalculationRegistry::builtin(),
            state: None,
        }
    }

    /// Replace the calculation registry
    pub fn with_registry(mut self, registry: CalculationRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Available calculations
    pub fn registry(&self) -> &CalculationRegistry {
        &self.registry
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Make `dataset` the loaded dataset.
    ///
    /// All state tied to a previous dataset is dropped first, so on failure
    /// the session is empty.
    pub fn load_dataset(&mut self, dataset: Dataset) -> Result<(), IngestionError> {
        self.state = None;

        let catalog = ChannelCatalog::from_dataset(&dataset, &self.config.catalog)?;
        let physical = catalog.physical_channels();
        let groups = SensorGroups::detect(&physical);

        info!(
            "Loaded dataset: {} rows, {} physical channels, {} sensor groups (load column '{}')",
            dataset.row_count(),
            physical.len(),
            groups.len(),
            catalog.load_column()
        );

        self.state = Some(Loaded {
            dataset,
            catalog,
            physical,
            groups,
            derived: Vec::new(),
            plotted: PlottedChannelSet::default(),
            view: ViewState::default(),
            overlay: None,
        });
        Ok(())
    }

    /// Parse a `.dat` file and load it
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), IngestionError> {
        self.state = None;
        let dataset = Dataset::from_dat_file(path)?;
        self.load_dataset(dataset)
    }

    /// Whether a dataset is loaded
    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    /// The loaded dataset
    pub fn dataset(&self) -> Option<&Dataset> {
        self.state.as_ref().map(|s| &s.dataset)
    }

    /// Channel classification of the loaded dataset
    pub fn catalog(&self) -> Option<&ChannelCatalog> {
        self.state.as_ref().map(|s| &s.catalog)
    }

    /// Sensor groups detected in the loaded dataset
    pub fn sensor_groups(&self) -> Option<&SensorGroups> {
        self.state.as_ref().map(|s| &s.groups)
    }

    // ------------------------------------------------------------------
    // Channel lists
    // ------------------------------------------------------------------

    /// Physical strain channels in column order; empty when nothing is loaded
    pub fn list_physical_channels(&self) -> &[String] {
        self.state.as_ref().map(|s| s.physical.as_slice()).unwrap_or(&[])
    }

    /// Channels derived so far, in creation order
    pub fn list_derived_channels(&self) -> &[String] {
        self.state.as_ref().map(|s| s.derived.as_slice()).unwrap_or(&[])
    }

    /// Channels offered for plotting: physical channels, then derived ones
    pub fn list_channels(&self) -> Vec<String> {
        self.list_physical_channels()
            .iter()
            .chain(self.list_derived_channels())
            .cloned()
            .collect()
    }

    /// Selectable channels matching a search term, best matches first
    pub fn search_channels(&self, term: &str) -> Vec<String> {
        search_channels(&self.list_channels(), term)
    }

    // ------------------------------------------------------------------
    // Derived channels
    // ------------------------------------------------------------------

    /// Run a registered calculation and append its outputs to the dataset.
    ///
    /// Outputs that already exist are skipped, so running the same
    /// calculation twice adds nothing the second time.
    pub fn compute_derived(&mut self, calculation_id: &str) -> Result<DerivationOutcome, CoreError> {
        let state = self.state.as_mut().ok_or(CoreError::NoData)?;
        let spec = self
            .registry
            .get(calculation_id)
            .ok_or_else(|| CoreError::UnknownCalculation(calculation_id.to_string()))?;

        let outcome = compute_derived(&mut state.dataset, &state.groups, spec)?;
        state.derived.extend(outcome.names.iter().cloned());
        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Plotted channels
    // ------------------------------------------------------------------

    /// Plot a channel.
    ///
    /// Only physical strain channels and derived channels can be plotted.
    /// Returns `false` without changing anything if nothing is loaded, the
    /// name is not such a channel, or the channel is already plotted.
    pub fn add_channel(&mut self, name: &str) -> bool {
        let Some(state) = self.state.as_mut() else {
            debug!("add_channel('{}') ignored: no dataset", name);
            return false;
        };
        let selectable = state.physical.iter().chain(&state.derived).any(|n| n == name);
        if !selectable {
            debug!("add_channel('{}') ignored: not a strain or derived channel", name);
            return false;
        }
        let added = state.plotted.insert(name);
        if added {
            info!("Plotting '{}' ({} channels)", name, state.plotted.len());
        } else {
            debug!("add_channel('{}') ignored: already plotted", name);
        }
        added
    }

    /// Stop plotting a channel. Returns `false` if it was not plotted.
    pub fn remove_channel(&mut self, name: &str) -> bool {
        let removed = self
            .state
            .as_mut()
            .is_some_and(|state| state.plotted.remove(name));
        if removed {
            info!("Removed '{}' from plot", name);
        } else {
            debug!("remove_channel('{}') ignored: not plotted", name);
        }
        removed
    }

    /// Plotted channels in plotting order
    pub fn plotted_channels(&self) -> &[String] {
        self.state.as_ref().map(|s| s.plotted.names()).unwrap_or(&[])
    }

    /// Reset everything downstream of the dataset: plotted channels,
    /// prediction overlay and trim flag
    pub fn clear(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.plotted.clear();
            state.overlay = None;
            state.view.reset();
            info!("Plot cleared");
        }
    }

    // ------------------------------------------------------------------
    // View state
    // ------------------------------------------------------------------

    /// Show only the loading phase (`true`) or the whole dataset (`false`).
    ///
    /// Trimming needs at least one plotted channel and a finite load peak;
    /// on failure the view is unchanged.
    pub fn set_trimmed(&mut self, trimmed: bool) -> Result<(), CoreError> {
        let state = self.state.as_mut().ok_or(CoreError::NoData)?;
        if trimmed && state.plotted.is_empty() {
            return Err(CoreError::NoPlottedChannels);
        }
        state
            .view
            .set_trimmed(trimmed, &state.dataset, state.catalog.load_column())?;
        info!(
            "View {}: {} of {} rows",
            if trimmed { "trimmed to load peak" } else { "reset" },
            state.active_view().row_count(),
            state.dataset.row_count()
        );
        Ok(())
    }

    /// Whether the view is trimmed
    pub fn is_trimmed(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.view.is_trimmed())
    }

    /// The rows currently on display
    pub fn active_view(&self) -> Result<DatasetView<'_>, CoreError> {
        self.state
            .as_ref()
            .map(Loaded::active_view)
            .ok_or(CoreError::NoData)
    }

    // ------------------------------------------------------------------
    // Prediction overlay
    // ------------------------------------------------------------------

    /// Show a prediction overlay next to the plotted channels, replacing any previous one
    pub fn set_prediction_overlay(&mut self, overlay: PredictionOverlay) -> Result<(), CoreError> {
        let state = self.state.as_mut().ok_or(CoreError::NoData)?;
        if state.plotted.is_empty() {
            return Err(CoreError::NoPlottedChannels);
        }
        info!("Prediction overlay set ({} points)", overlay.len());
        state.overlay = Some(overlay);
        Ok(())
    }

    /// Parse a prediction file and show it as the overlay
    pub fn load_prediction_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CoreError> {
        // Check preconditions before touching the file
        let state = self.state.as_ref().ok_or(CoreError::NoData)?;
        if state.plotted.is_empty() {
            return Err(CoreError::NoPlottedChannels);
        }
        let overlay = PredictionOverlay::from_file(path, &self.config.overlay)?;
        self.set_prediction_overlay(overlay)
    }

    /// Remove the prediction overlay
    pub fn clear_prediction_overlay(&mut self) {
        if let Some(state) = self.state.as_mut() {
            if state.overlay.take().is_some() {
                info!("Prediction overlay removed");
            }
        }
    }

    /// The prediction overlay, if one is shown
    pub fn prediction_overlay(&self) -> Option<&PredictionOverlay> {
        self.state.as_ref().and_then(|s| s.overlay.as_ref())
    }

    // ------------------------------------------------------------------
    // Projection
    // ------------------------------------------------------------------

    /// Chart series and table for the current state; empty when nothing is loaded
    pub fn project(&self) -> Projection {
        match &self.state {
            Some(state) => project(&state.active_view(), &state.plotted, state.overlay.as_ref()),
            None => Projection::default(),
        }
    }

    /// Full-length `[load, channel]` table for inspecting one channel, independent of plot state
    pub fn preview_channel(&self, name: &str) -> Result<TableView, CoreError> {
        let state = self.state.as_ref().ok_or(CoreError::NoData)?;
        let load_column = state.catalog.load_column();
        let values = state
            .dataset
            .values(name)
            .ok_or_else(|| CoreError::ChannelNotFound(name.to_string()))?;
        let load = state.dataset.values(load_column).unwrap_or(&[]);
        Ok(TableView::from_columns(&[(load_column, load), (name, values)]))
    }
}
