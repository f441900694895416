//! Wide-to-long reshaping.

use crate::error::Result;
use crate::period::{Period, parse_period};
use crate::table::WideTable;
use serde::{Deserialize, Serialize};

/// One non-missing cell of a wide table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongObservation {
    /// Entity named by the row.
    pub entity: String,
    /// Header of the column the cell came from.
    pub label: String,
    /// Parsed period, `None` when the header is not a period label.
    pub period: Option<Period>,
    /// Cell value.
    pub value: f64,
}

impl LongObservation {
    /// Build an observation whose period is already known.
    pub fn new(entity: impl Into<String>, period: Period, value: f64) -> Self {
        Self {
            entity: entity.into(),
            label: period.label(),
            period: Some(period),
            value,
        }
    }
}

/// Flatten a wide table into one observation per non-missing cell.
///
/// Rows whose entity cell is missing are dropped. Columns whose header is
/// not a period label are still emitted with `period: None`; downstream
/// consumers discard those. Output order is unspecified.
///
/// # Errors
///
/// Returns [`crate::IndexError::UnknownColumn`] if `entity_column` is not in
/// the table.
///
/// # Examples
///
/// ```
/// use scanidx_index::{WideTable, reshape};
///
/// let table = WideTable::new(["Kategori", "Jan-22", "Feb-22"])
///     .with_row(vec!["Food".into(), 100.0.into(), 110.0.into()])
///     .unwrap();
///
/// let long = reshape(&table, "Kategori").unwrap();
/// assert_eq!(long.len(), 2);
/// ```
pub fn reshape(table: &WideTable, entity_column: &str) -> Result<Vec<LongObservation>> {
    let entity_idx = table.column_index(entity_column)?;
    let periods: Vec<Option<Period>> = table
        .columns()
        .iter()
        .map(|label| parse_period(label))
        .collect();

    let mut dropped_rows = 0usize;
    let mut observations = Vec::with_capacity(table.len() * table.columns().len());

    for row in table.rows() {
        let Some(entity) = row[entity_idx].as_entity() else {
            dropped_rows += 1;
            continue;
        };

        for (idx, cell) in row.iter().enumerate() {
            if idx == entity_idx {
                continue;
            }
            if let Some(value) = cell.as_value() {
                observations.push(LongObservation {
                    entity: entity.clone(),
                    label: table.columns()[idx].clone(),
                    period: periods[idx],
                    value,
                });
            }
        }
    }

    if dropped_rows > 0 {
        tracing::debug!(dropped_rows, "dropped wide-table rows without an entity");
    }

    Ok(observations)
}
