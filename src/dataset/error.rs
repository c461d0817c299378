/// Errors raised when building or extending a [`Dataset`](super::Dataset)
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// A column with this name already exists
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// A column does not have the same number of rows as the dataset
    #[error("Column '{name}' has {found} rows, expected {expected}")]
    LengthMismatch {
        /// Column name
        name: String,
        /// Row count of the dataset
        expected: usize,
        /// Row count of the offending column
        found: usize,
    },
}

/// Errors that can occur while ingesting a data source
#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    /// I/O error reading the source
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Tab-separated parsing error
    #[error("TSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// The channel-name or unit line is missing
    #[error("Missing header line: {0}")]
    MissingHeader(&'static str),

    /// A data line has a different number of fields than the header
    #[error("Line {line} has {found} fields, expected {expected}")]
    RaggedRow {
        /// 1-based line number in the source
        line: u64,
        /// Number of header fields
        expected: usize,
        /// Number of fields on this line
        found: usize,
    },

    /// No column matches the load column naming convention
    #[error("No load column matching '{0}'")]
    MissingLoadColumn(String),

    /// A required column is absent from an auxiliary source
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A value could not be parsed as a number
    #[error("Line {line}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        /// 1-based line number in the source
        line: usize,
        /// Column the value belongs to
        column: String,
        /// Raw text of the value
        value: String,
    },

    /// The parsed table violates a dataset invariant
    #[error("Dataset error: {0}")]
    DatasetError(#[from] DatasetError),
}
