use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};

use super::{Column, Dataset, IngestionError};

/// Per-column accumulator while streaming rows
struct ColumnBuilder {
    name: String,
    unit: String,
    values: Vec<f64>,
    /// Cells that did not parse and were stored as `0.0`
    coerced: usize,
    /// First such cell, with its line number
    first_coerced: Option<(u64, String)>,
}

impl Dataset {
    /// Parse a `.dat` file into a dataset
    pub fn from_dat_file<P: AsRef<Path>>(path: P) -> Result<Self, IngestionError> {
        let path = path.as_ref();
        debug!("Reading data file {}", path.display());
        let file = File::open(path)?;
        Self::from_dat_reader(BufReader::new(file))
    }

    /// Parse `.dat` content from a reader.
    ///
    /// - Fields are separated by runs of whitespace (tabs or spaces).
    /// - Line 1 holds channel names, line 2 their units, every further
    ///   non-blank line one row of values with exactly one field per channel.
    /// - Cells that do not parse as a number are stored as `0.0` and logged.
    ///   A column none of whose cells parse is skipped with a warning.
    pub fn from_dat_reader<R: Read>(reader: R) -> Result<Self, IngestionError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut lines = csv_reader.records().filter_map(|record| match record {
            Ok(record) => {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                let fields: Vec<String> = record
                    .iter()
                    .flat_map(str::split_whitespace)
                    .map(str::to_string)
                    .collect();
                // Lines made only of separators carry no fields at all
                (!fields.is_empty()).then_some(Ok((line, fields)))
            }
            Err(e) => Some(Err(IngestionError::from(e))),
        });

        let (_, names) = lines
            .next()
            .ok_or(IngestionError::MissingHeader("channel names"))??;
        let (unit_line, units) = lines
            .next()
            .ok_or(IngestionError::MissingHeader("units"))??;
        if units.len() != names.len() {
            return Err(IngestionError::RaggedRow {
                line: unit_line,
                expected: names.len(),
                found: units.len(),
            });
        }

        let mut builders: Vec<ColumnBuilder> = names
            .into_iter()
            .zip(units)
            .map(|(name, unit)| ColumnBuilder {
                name,
                unit,
                values: Vec::new(),
                coerced: 0,
                first_coerced: None,
            })
            .collect();

        for line in lines {
            let (line, fields) = line?;
            if fields.len() != builders.len() {
                return Err(IngestionError::RaggedRow {
                    line,
                    expected: builders.len(),
                    found: fields.len(),
                });
            }
            for (builder, field) in builders.iter_mut().zip(fields) {
                match field.parse::<f64>() {
                    Ok(v) => builder.values.push(v),
                    Err(_) => {
                        debug!("Line {}: '{}' in '{}' is not a number", line, field, builder.name);
                        builder.values.push(0.0);
                        builder.coerced += 1;
                        builder.first_coerced.get_or_insert((line, field));
                    }
                }
            }
        }

        let mut columns = Vec::with_capacity(builders.len());
        for builder in builders {
            if let Some((line, value)) = &builder.first_coerced {
                if builder.coerced == builder.values.len() {
                    warn!(
                        "Skipping non-numeric column '{}' (line {}: '{}')",
                        builder.name, line, value
                    );
                    continue;
                }
                warn!(
                    "Column '{}': {} non-numeric cells stored as 0 (first at line {}: '{}')",
                    builder.name, builder.coerced, line, value
                );
            }
            columns.push(Column {
                name: builder.name,
                unit: Some(builder.unit),
                values: builder.values,
            });
        }

        let dataset = Dataset::new(columns)?;
        debug!(
            "Parsed {} columns x {} rows",
            dataset.column_count(),
            dataset.row_count()
        );
        Ok(dataset)
    }
}
