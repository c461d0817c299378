use crate::dataset::{DatasetError, IngestionError};

/// Errors returned by session operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The operation needs a loaded dataset
    #[error("No dataset loaded")]
    NoData,

    /// No calculation is registered under this id, or its role set has no group table
    #[error("Unknown calculation: {0}")]
    UnknownCalculation(String),

    /// The operation needs at least one plotted channel
    #[error("No channels plotted")]
    NoPlottedChannels,

    /// The load column has no finite value to trim at
    #[error("Load column '{0}' has no finite maximum")]
    NoLoadPeak(String),

    /// The named channel is not a column of the dataset
    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    /// Loading a source failed
    #[error("Ingestion error: {0}")]
    IngestionError(#[from] IngestionError),

    /// A dataset invariant was violated
    #[error("Dataset error: {0}")]
    DatasetError(#[from] DatasetError),
}
