//! # Dataset Module
//!
//! A [`Dataset`] is the single authoritative table of one loaded test run:
//! an ordered list of equally long numeric columns, one row per time step.
//!
//! Columns are only ever appended (by the derived channel engine) or replaced
//! wholesale (by loading a new dataset). Nothing outside this module can cut
//! the table down to a row window: the only way to see fewer rows is a
//! [`DatasetView`], which the view state controller hands out.
//!
//! ## Source format
//!
//! ```text
//! Time	Load_Ratio:MON1	1001A:MON1	1001B:MON1
//! s	%	μstrain	μstrain
//! 0.0	0	1.2	0.8
//! 0.5	50	4.1	2.9
//! ```
//!
//! See [`Dataset::from_dat_reader`] for the parsing rules.

mod dat;
mod error;


use std::collections::HashMap;

pub use error::{DatasetError, IngestionError};

/// One named channel of measurements
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Channel name, unique within a dataset
    pub name: String,

    /// Declared physical unit, if the source provided one
    pub unit: Option<String>,

    /// One value per row
    pub values: Vec<f64>,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, unit: Option<&str>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            unit: unit.map(str::to_string),
            values,
        }
    }
}

/// Ordered table of numeric channels sharing one row axis
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    row_count: usize,
}

impl Dataset {
    /// Build a dataset from columns, validating name uniqueness and row alignment.
    ///
    /// The row count is taken from the first column; an empty column list
    /// yields an empty dataset.
    pub fn new(columns: Vec<Column>) -> Result<Self, DatasetError> {
        let row_count = columns.first().map(|c| c.values.len()).unwrap_or(0);
        let mut dataset = Self {
            columns: Vec::with_capacity(columns.len()),
            index: HashMap::with_capacity(columns.len()),
            row_count,
        };
        for column in columns {
            dataset.append_column(column)?;
        }
        Ok(dataset)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// All columns in insertion order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Whether a column with this exact name exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    /// Values of a column by name
    pub fn values(&self, name: &str) -> Option<&[f64]> {
        self.column(name).map(|c| c.values.as_slice())
    }

    /// Append a column at the end of the table.
    ///
    /// Fails without modifying the dataset if the name is taken or the
    /// column length differs from the row count.
    pub fn append_column(&mut self, column: Column) -> Result<(), DatasetError> {
        if self.contains(&column.name) {
            return Err(DatasetError::DuplicateColumn(column.name));
        }
        if column.values.len() != self.row_count {
            return Err(DatasetError::LengthMismatch {
                name: column.name,
                expected: self.row_count,
                found: column.values.len(),
            });
        }
        self.index.insert(column.name.clone(), self.columns.len());
        self.columns.push(column);
        Ok(())
    }
}

/// Read-only window over the leading rows of a [`Dataset`]
///
/// Obtained from [`ViewState::active_view`](crate::view::ViewState::active_view);
/// it borrows the dataset and never copies it.
#[derive(Debug, Clone, Copy)]
pub struct DatasetView<'a> {
    dataset: &'a Dataset,
    load_column: &'a str,
    end: usize,
}

impl<'a> DatasetView<'a> {
    pub(crate) fn new(dataset: &'a Dataset, load_column: &'a str, end: usize) -> Self {
        Self {
            dataset,
            load_column,
            end: end.min(dataset.row_count()),
        }
    }

    /// Number of rows visible through this view
    pub fn row_count(&self) -> usize {
        self.end
    }

    /// Whether the view hides trailing rows of the dataset
    pub fn is_trimmed(&self) -> bool {
        self.end < self.dataset.row_count()
    }

    /// Name of the load column (the x axis)
    pub fn load_column(&self) -> &'a str {
        self.load_column
    }

    /// Visible values of the load column
    pub fn load_values(&self) -> &'a [f64] {
        self.values(self.load_column).unwrap_or(&[])
    }

    /// Visible values of a column
    pub fn values(&self, name: &str) -> Option<&'a [f64]> {
        self.dataset.values(name).map(|v| &v[..self.end])
    }

    /// The underlying dataset
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }
}
