//! Top-level error type.

use thiserror::Error;

/// Result type for scanidx operations.
pub type Result<T> = std::result::Result<T, ScanIdxError>;

/// Errors surfaced by the analysis pipeline.
#[derive(Debug, Error)]
pub enum ScanIdxError {
    /// Index computation error
    #[error(transparent)]
    Index(#[from] scanidx_index::IndexError),

    /// Loading error
    #[error(transparent)]
    Data(#[from] scanidx_data::DataError),

    /// Export error
    #[error(transparent)]
    Export(#[from] scanidx_output::ExportError),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Base year absent from the scanner source
    #[error("Base year {requested} not in source (available: {available:?})")]
    UnknownBaseYear {
        /// Requested year
        requested: i32,
        /// Years present in the source
        available: Vec<i32>,
    },

    /// Observation set has no valid period
    #[error("No observations with a valid period")]
    NoObservations,
}
