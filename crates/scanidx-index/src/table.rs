//! Entity-by-period wide tables.
//!
//! A [`WideTable`] is the in-memory shape of an index source as delivered by
//! the ingestion layer: a header row of column names and a grid of loosely
//! typed cells. One column identifies the entity; the remaining columns are
//! period labels.

use crate::error::{IndexError, Result};
use crate::period::parse_period;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// A single wide-table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// Textual content.
    Text(String),
    /// Numeric content.
    Number(f64),
    /// Empty or null cell.
    Missing,
}

impl Cell {
    /// Interpret the cell as an entity name.
    ///
    /// Blank text counts as missing.
    pub fn as_entity(&self) -> Option<String> {
        match self {
            Self::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Self::Number(value) => Some(value.to_string()),
            Self::Missing => None,
        }
    }

    /// Interpret the cell as a numeric value.
    ///
    /// Text is parsed leniently; non-numeric text and non-finite numbers
    /// count as missing.
    pub fn as_value(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Whether the cell carries no usable value.
    ///
    /// Text placeholders such as `"-"` or `"n/a"` count as missing, the same
    /// as [`Self::as_value`] sees them.
    pub fn is_missing(&self) -> bool {
        self.as_value().is_none()
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::Number)
    }
}

/// An entity-by-period table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WideTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl WideTable {
    /// Create an empty table with the given header.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. The row must have exactly one cell per column.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::RowWidth`] when the widths disagree.
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(IndexError::RowWidth {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Builder-style variant of [`Self::push_row`].
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::RowWidth`] when the widths disagree.
    pub fn with_row(mut self, row: Vec<Cell>) -> Result<Self> {
        self.push_row(row)?;
        Ok(self)
    }

    /// Column names in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in source order.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnknownColumn`] if no column has that name.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| IndexError::UnknownColumn(name.to_string()))
    }

    /// Return a copy of the table with one column renamed.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnknownColumn`] if `from` does not exist.
    pub fn with_renamed_column(&self, from: &str, to: &str) -> Result<Self> {
        let idx = self.column_index(from)?;
        let mut renamed = self.clone();
        renamed.columns[idx] = to.to_string();
        Ok(renamed)
    }

    /// Return a copy without every entity that has a missing cell in any
    /// non-entity column.
    ///
    /// An entity spread across several rows is removed from all of them if
    /// any one row is incomplete.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnknownColumn`] if `entity_column` does not exist.
    pub fn without_incomplete_entities(&self, entity_column: &str) -> Result<Self> {
        let entity_idx = self.column_index(entity_column)?;

        let incomplete: HashSet<String> = self
            .rows
            .iter()
            .filter(|row| {
                row.iter()
                    .enumerate()
                    .any(|(i, cell)| i != entity_idx && cell.is_missing())
            })
            .filter_map(|row| row[entity_idx].as_entity())
            .collect();

        if !incomplete.is_empty() {
            tracing::debug!(
                count = incomplete.len(),
                "dropping entities with incomplete period coverage"
            );
        }

        let rows = self
            .rows
            .iter()
            .filter(|row| {
                row[entity_idx]
                    .as_entity()
                    .is_none_or(|entity| !incomplete.contains(&entity))
            })
            .cloned()
            .collect();

        Ok(Self {
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Years named by parseable period columns, in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::UnknownColumn`] if `entity_column` does not exist.
    pub fn period_years(&self, entity_column: &str) -> Result<BTreeSet<i32>> {
        let entity_idx = self.column_index(entity_column)?;
        Ok(self
            .columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != entity_idx)
            .filter_map(|(_, label)| parse_period(label))
            .map(|period| period.year())
            .collect())
    }
}
