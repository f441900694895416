//! Error types for index construction.
//!
//! Only contract violations surface here. Unparsable labels, missing cells
//! and undefined arithmetic are handled in-band (dropped rows or `None`).

use crate::period::Period;
use thiserror::Error;

/// Result type for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Errors that can occur while building or joining index series.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndexError {
    /// A series holds more than one record for the same key.
    #[error("Duplicate key in {series} series: ({entity}, {period})")]
    DuplicateKey {
        /// Which input series (`"a"` or `"b"`) held the duplicate
        series: &'static str,
        /// Entity of the duplicated key
        entity: String,
        /// Period of the duplicated key
        period: Period,
    },

    /// A named column does not exist in the table.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// A row does not have one cell per column.
    #[error("Row width mismatch: expected {expected} cells, got {actual}")]
    RowWidth {
        /// Number of columns in the table header
        expected: usize,
        /// Number of cells supplied
        actual: usize,
    },
}
