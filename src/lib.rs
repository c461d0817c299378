//! # strainview - Strain Gauge Test Data Inspection
//!
//! `strainview` loads the tab-separated `.dat` exports of structural load
//! tests, finds the strain gauge rosettes and gauge pairs in them, derives
//! shear and average channels, and projects whatever the user picked into a
//! chart and a table that always agree with each other.
//!
//! ## Key Features
//!
//! - **Sensor group detection**: channel names like `1001A:MON1` are split into
//!   a numeric prefix, a single-letter role and a monitor suffix. Prefixes with
//!   roles `A`, `B`, `C` form shear rosettes; roles `D`, `E` form average pairs.
//!
//! - **Derived channels**: registered calculations (`shear`: `S = 2B - A - C`,
//!   `average`: `Avg = (D + E) / 2`) append one new channel per group. Running
//!   a calculation twice adds nothing the second time.
//!
//! - **Load-phase trimming**: the view can be cut at the first peak of the
//!   load column to show only the loading phase of a test.
//!
//! - **Consistent projection**: the chart series and the table are rebuilt
//!   from the same rows and the same channel list on every call.
//!
//! - **Prediction overlay**: model-predicted strain against load can be drawn
//!   next to the measured channels without touching the dataset.
//!
//! ## Quick Start
//!
//! ```rust
//! use strainview::prelude::*;
//!
//! let dataset = Dataset::new(vec![
//!     Column::new("Load_Ratio:MON1", Some("%"), vec![0.0, 50.0, 100.0, 50.0, 0.0]),
//!     Column::new("1001A:MON1", Some("μstrain"), vec![1.0, 2.0, 3.0, 2.0, 1.0]),
//!     Column::new("1001B:MON1", Some("μstrain"), vec![2.0, 4.0, 6.0, 4.0, 2.0]),
//!     Column::new("1001C:MON1", Some("μstrain"), vec![1.0, 2.0, 3.0, 2.0, 1.0]),
//! ])?;
//!
//! let mut session = Session::default();
//! session.load_dataset(dataset)?;
//! session.compute_derived(SHEAR)?;
//! session.add_channel("1001S:MON1");
//! session.set_trimmed(true)?;
//!
//! let projection = session.project();
//! assert_eq!(projection.table.columns, vec!["Load_Ratio:MON1", "1001S:MON1"]);
//! assert_eq!(projection.table.row_count(), 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`dataset`]: Columnar dataset, `.dat` ingestion and row windows
//! - [`catalog`]: Load/strain/other classification and channel search
//! - [`groups`]: Channel name parsing and sensor group detection
//! - [`derived`]: Calculation registry and the derived channel engine
//! - [`view`]: Load peak detection and the trim flag
//! - [`plotted`]: Ordered set of plotted channels
//! - [`overlay`]: Prediction overlay parsing
//! - [`projection`]: Chart series and table construction
//! - [`session`]: The state machine tying everything together
//! - [`sources`]: Discovery of `.dat` files by file ID
//! - [`config`]: Session configuration

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod derived;
pub mod groups;
pub mod overlay;
pub mod plotted;
pub mod projection;
pub mod session;
pub mod sources;
pub mod view;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::catalog::{search_channels, ChannelCatalog, ChannelDescriptor, ChannelKind};
    pub use crate::config::{CatalogConfig, OverlayConfig, SessionConfig};
    pub use crate::dataset::{Column, Dataset, DatasetError, DatasetView, IngestionError};
    pub use crate::derived::{
        compute_derived, CalculationRegistry, DerivationOutcome, DerivationWarning,
        DerivedChannelSpec, AVERAGE, SHEAR,
    };
    pub use crate::groups::{parse_channel_name, GroupTable, SensorGroup, SensorGroups};
    pub use crate::overlay::PredictionOverlay;
    pub use crate::plotted::PlottedChannelSet;
    pub use crate::projection::{project, ChartSeries, Projection, Series, TableView};
    pub use crate::session::{CoreError, Session};
    pub use crate::sources::{source_id, SourceIndex};
    pub use crate::view::{load_peak_index, ViewState};
}
