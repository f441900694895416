//! CSV sources.

use crate::error::{DataError, Result};
use crate::frame::wide_table_from_frame;
use crate::observations::{IngestedObservations, ObservationOptions, observations_from_frame};
use polars::prelude::*;
use scanidx_index::WideTable;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// How to read one wide index source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    /// Column holding entity names
    pub entity_column: String,
    /// Leading rows to skip before the header
    pub skip_rows: usize,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            entity_column: "Kategori".to_string(),
            skip_rows: 0,
        }
    }
}

impl SourceOptions {
    /// Options for a source whose header sits after `skip_rows` rows.
    pub fn new(entity_column: impl Into<String>, skip_rows: usize) -> Self {
        Self {
            entity_column: entity_column.into(),
            skip_rows,
        }
    }
}

/// Read a CSV file with a header row, skipping `skip_rows` leading rows.
///
/// # Errors
///
/// Returns an error if the file is absent, unreadable, or has no rows.
pub fn read_csv(path: &Path, skip_rows: usize) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(DataError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} not found", path.display()),
        )));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_skip_rows(skip_rows)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    if df.height() == 0 {
        return Err(DataError::EmptyTable(path.display().to_string()));
    }
    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "Read CSV");
    Ok(df)
}

/// Load a wide index source.
///
/// The entity column is renamed to `canonical_entity` in the returned table.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the entity column is
/// absent.
pub fn load_wide_table(
    path: &Path,
    options: &SourceOptions,
    canonical_entity: &str,
) -> Result<WideTable> {
    let df = read_csv(path, options.skip_rows)?;
    let table = wide_table_from_frame(&df)?;
    Ok(table.with_renamed_column(&options.entity_column, canonical_entity)?)
}

/// Load and clean a turnover table.
///
/// # Errors
///
/// Returns an error if the file cannot be read or lacks required columns.
pub fn load_observations(
    path: &Path,
    options: &ObservationOptions,
) -> Result<IngestedObservations> {
    let df = read_csv(path, 0)?;
    observations_from_frame(&df, options)
}
