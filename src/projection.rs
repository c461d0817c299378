//! # Display Projector
//!
//! Turns the current session state into exactly what the chart and the
//! table must render. A [`Projection`] is rebuilt from scratch on every call,
//! never patched, so the chart and the table always show the same rows and
//! the same channels:
//!
//! ```text
//! table.columns == [load column] + chart channel names
//! ```

use serde::Serialize;

use crate::dataset::DatasetView;
use crate::overlay::PredictionOverlay;
use crate::plotted::PlottedChannelSet;

/// Legend label of the prediction overlay series
pub const OVERLAY_SERIES_NAME: &str = "Predicted Strain";

/// One line on the chart
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    /// Legend label
    pub name: String,
    /// X values (load)
    pub x: Vec<f64>,
    /// Y values
    pub y: Vec<f64>,
}

/// Everything the chart draws
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    /// One series per plotted channel, in plotting order
    pub series: Vec<Series>,
    /// Prediction overlay, if one is loaded
    pub overlay: Option<Series>,
}

impl ChartSeries {
    /// Names of the channel series, excluding the overlay
    pub fn channel_names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Row-major table of the visible rows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableView {
    /// Column headers
    pub columns: Vec<String>,
    /// One entry per row, one value per column
    pub rows: Vec<Vec<f64>>,
}

impl TableView {
    /// Build a table from named column slices of equal length
    pub(crate) fn from_columns(columns: &[(&str, &[f64])]) -> Self {
        let row_count = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
        let rows = (0..row_count)
            .map(|row| columns.iter().map(|(_, values)| values[row]).collect())
            .collect();
        Self {
            columns: columns.iter().map(|(name, _)| name.to_string()).collect(),
            rows,
        }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Chart and table content for one render
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Projection {
    /// Chart content
    pub chart: ChartSeries,
    /// Table content
    pub table: TableView,
}

/// Project the active view onto the plotted channels.
///
/// Plotted names missing from the view are left out of both the chart and
/// the table.
pub fn project(
    view: &DatasetView<'_>,
    plotted: &PlottedChannelSet,
    overlay: Option<&PredictionOverlay>,
) -> Projection {
    let load = view.load_values();

    let mut table_columns: Vec<(&str, &[f64])> = vec![(view.load_column(), load)];
    let mut series = Vec::with_capacity(plotted.len());
    for name in plotted.names() {
        let Some(values) = view.values(name) else {
            continue;
        };
        table_columns.push((name.as_str(), values));
        series.push(Series {
            name: name.clone(),
            x: load.to_vec(),
            y: values.to_vec(),
        });
    }

    let overlay = overlay.map(|o| Series {
        name: OVERLAY_SERIES_NAME.to_string(),
        x: o.load.clone(),
        y: o.predicted_strain.clone(),
    });

    Projection {
        chart: ChartSeries { series, overlay },
        table: TableView::from_columns(&table_columns),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Column, Dataset};

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Column::new("Load_Ratio:MON1", Some("%"), vec![0.0, 50.0, 100.0, 50.0]),
            Column::new("10A:MON1", Some("μstrain"), vec![1.0, 2.0, 3.0, 4.0]),
            Column::new("10B:MON1", Some("μstrain"), vec![5.0, 6.0, 7.0, 8.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_projection_follows_plot_order() {
        let data = dataset();
        let view = DatasetView::new(&data, "Load_Ratio:MON1", 3);
        let mut plotted = PlottedChannelSet::default();
        plotted.insert("10B:MON1");
        plotted.insert("10A:MON1");

        let projection = project(&view, &plotted, None);

        assert_eq!(projection.chart.channel_names(), vec!["10B:MON1", "10A:MON1"]);
        assert_eq!(projection.chart.series[0].x, vec![0.0, 50.0, 100.0]);
        assert_eq!(projection.chart.series[0].y, vec![5.0, 6.0, 7.0]);
        assert!(projection.chart.overlay.is_none());

        assert_eq!(
            projection.table.columns,
            vec!["Load_Ratio:MON1", "10B:MON1", "10A:MON1"]
        );
        assert_eq!(projection.table.row_count(), 3);
        assert_eq!(projection.table.rows[2], vec![100.0, 7.0, 3.0]);
    }

    #[test]
    fn test_projection_with_overlay_and_nothing_plotted() {
        let data = dataset();
        let view = DatasetView::new(&data, "Load_Ratio:MON1", 4);
        let overlay = PredictionOverlay {
            load: vec![0.0, 100.0],
            predicted_strain: vec![0.0, 9.0],
        };

        let projection = project(&view, &PlottedChannelSet::default(), Some(&overlay));

        assert!(projection.chart.series.is_empty());
        let series = projection.chart.overlay.unwrap();
        assert_eq!(series.name, OVERLAY_SERIES_NAME);
        assert_eq!(series.y, vec![0.0, 9.0]);
        assert_eq!(projection.table.columns, vec!["Load_Ratio:MON1"]);
        assert_eq!(projection.table.row_count(), 4);
    }
}
