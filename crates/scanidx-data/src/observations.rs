//! Turnover table ingestion and cleaning.

use crate::error::{DataError, Result};
use polars::prelude::*;
use scanidx_growth::{Classification, Observation};
use scanidx_index::Period;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Column names of the turnover table.
///
/// Names are matched after [`normalize_column_name`], so `" Tahun"` in the
/// file matches `"tahun"` here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservationSchema {
    /// Year column
    pub year: String,
    /// Month column
    pub month: String,
    /// Category column
    pub category: String,
    /// Subcategory column
    pub subcategory: String,
    /// Classification column
    pub classification: String,
    /// Expenditure column
    pub expenditure: String,
    /// Quantity column
    pub quantity: String,
}

impl Default for ObservationSchema {
    fn default() -> Self {
        Self {
            year: "tahun".to_string(),
            month: "bulan".to_string(),
            category: "kategori".to_string(),
            subcategory: "subkategori".to_string(),
            classification: "klasifikasi".to_string(),
            expenditure: "total_expenditure".to_string(),
            quantity: "total_quantity".to_string(),
        }
    }
}

impl ObservationSchema {
    /// All required column names, normalized.
    pub fn required(&self) -> [String; 7] {
        [
            &self.year,
            &self.month,
            &self.category,
            &self.subcategory,
            &self.classification,
            &self.expenditure,
            &self.quantity,
        ]
        .map(|name| normalize_column_name(name))
    }
}

/// Options for turning a turnover table into observations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservationOptions {
    /// Column names
    pub schema: ObservationSchema,
    /// Subcategories removed during cleaning
    pub excluded_subcategories: Vec<String>,
}

/// Row counts from one ingestion, by drop reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Rows in the source
    pub rows_read: usize,
    /// Rows kept
    pub rows_kept: usize,
    /// Rows without a category or subcategory
    pub missing_labels: usize,
    /// Rows in an excluded subcategory
    pub excluded: usize,
    /// Rows whose year and month do not form a date
    pub invalid_period: usize,
    /// Rows with an unrecognized classification
    pub invalid_classification: usize,
    /// Rows with a negative amount
    pub invalid_amount: usize,
}

impl IngestReport {
    /// Total rows dropped.
    pub const fn dropped(&self) -> usize {
        self.rows_read - self.rows_kept
    }
}

/// Cleaned observations and the drop report.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestedObservations {
    /// Kept observations, in source order
    pub observations: Vec<Observation>,
    /// Counts per drop reason
    pub report: IngestReport,
}

/// Trim and lower-case a column name.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn with_normalized_names(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| normalize_column_name(n.as_str()))
        .collect();
    out.set_column_names(names)?;
    Ok(out)
}

fn check_required(df: &DataFrame, schema: &ObservationSchema) -> Result<()> {
    let present: BTreeSet<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();
    let mut missing: Vec<String> = Vec::new();
    for name in schema.required() {
        if !present.contains(&name) && !missing.contains(&name) {
            missing.push(name);
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataError::MissingColumns(missing))
    }
}

fn typed(df: &DataFrame, name: &str, dtype: &DataType) -> Result<Column> {
    Ok(df.column(&normalize_column_name(name))?.cast(dtype)?)
}

/// Convert a turnover frame into cleaned observations.
///
/// Column names are normalized first, then all schema columns must be
/// present. Rows are dropped when the category or subcategory is null, the
/// subcategory is excluded, year and month do not form a date, the
/// classification is not recognized, or an amount is negative. Null amounts
/// count as zero.
///
/// # Errors
///
/// Returns [`DataError::MissingColumns`] listing every absent column, or a
/// polars error when a column cannot be cast.
pub fn observations_from_frame(
    df: &DataFrame,
    options: &ObservationOptions,
) -> Result<IngestedObservations> {
    let df = with_normalized_names(df)?;
    let schema = &options.schema;
    check_required(&df, schema)?;

    let years = typed(&df, &schema.year, &DataType::Int64)?;
    let months = typed(&df, &schema.month, &DataType::Int64)?;
    let categories = typed(&df, &schema.category, &DataType::String)?;
    let subcategories = typed(&df, &schema.subcategory, &DataType::String)?;
    let classifications = typed(&df, &schema.classification, &DataType::String)?;
    let expenditures = typed(&df, &schema.expenditure, &DataType::Float64)?;
    let quantities = typed(&df, &schema.quantity, &DataType::Float64)?;

    let years = years.i64()?;
    let months = months.i64()?;
    let categories = categories.str()?;
    let subcategories = subcategories.str()?;
    let classifications = classifications.str()?;
    let expenditures = expenditures.f64()?;
    let quantities = quantities.f64()?;

    let excluded: BTreeSet<&str> = options
        .excluded_subcategories
        .iter()
        .map(String::as_str)
        .collect();

    let mut report = IngestReport {
        rows_read: df.height(),
        ..IngestReport::default()
    };
    let mut observations = Vec::with_capacity(df.height());

    for i in 0..df.height() {
        let (Some(category), Some(subcategory)) = (categories.get(i), subcategories.get(i)) else {
            report.missing_labels += 1;
            continue;
        };
        if excluded.contains(subcategory) {
            report.excluded += 1;
            continue;
        }

        let period = match (years.get(i), months.get(i)) {
            (Some(year), Some(month)) => i32::try_from(year)
                .ok()
                .zip(u32::try_from(month).ok())
                .and_then(|(y, m)| Period::from_year_month(y, m))
                .filter(|p| p.first_day().is_some()),
            _ => None,
        };
        let Some(period) = period else {
            report.invalid_period += 1;
            continue;
        };

        let Some(classification) = classifications
            .get(i)
            .and_then(|raw| raw.parse::<Classification>().ok())
        else {
            report.invalid_classification += 1;
            continue;
        };

        let expenditure = expenditures.get(i).unwrap_or(0.0);
        let quantity = quantities.get(i).unwrap_or(0.0);
        if expenditure < 0.0 || quantity < 0.0 {
            report.invalid_amount += 1;
            continue;
        }

        observations.push(Observation {
            year: period.year(),
            month: period.month(),
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            classification,
            expenditure,
            quantity,
        });
    }

    report.rows_kept = observations.len();
    debug!(
        rows = report.rows_read,
        kept = report.rows_kept,
        missing_labels = report.missing_labels,
        excluded = report.excluded,
        invalid_period = report.invalid_period,
        invalid_classification = report.invalid_classification,
        invalid_amount = report.invalid_amount,
        "Cleaned turnover table"
    );

    Ok(IngestedObservations {
        observations,
        report,
    })
}
