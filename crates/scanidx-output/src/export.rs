//! CSV and JSON export of comparison and growth tables.

use scanidx_growth::{GrowthTable, TrendPoint};
use scanidx_index::ComparisonTable;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Writer produced invalid UTF-8.
    #[error("Invalid UTF-8 in output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Guess a format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Serialize flat rows as CSV with a header from the row's field names.
fn rows_to_csv<R: Serialize>(rows: impl IntoIterator<Item = R>) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in rows {
        wtr.serialize(row)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

fn to_json<T: Serialize + ?Sized>(value: &T, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(value)?),
        _ => Ok(serde_json::to_string(value)?),
    }
}

/// One comparison row as written to CSV.
#[derive(Debug, Serialize)]
struct ComparisonRow<'a> {
    entity: &'a str,
    period: String,
    year: i32,
    month: u32,
    index_a: Option<f64>,
    index_b: Option<f64>,
}

impl Exporter for ComparisonTable {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => rows_to_csv(self.records().iter().map(|r| ComparisonRow {
                entity: &r.entity,
                period: r.period.to_string(),
                year: r.year,
                month: r.month,
                index_a: r.index_a,
                index_b: r.index_b,
            })),
            ExportFormat::Json | ExportFormat::PrettyJson => to_json(self, format),
        }
    }
}

/// One growth row as written to CSV.
#[derive(Debug, Serialize)]
struct GrowthRow<'a> {
    entity: &'a str,
    grouping: &'static str,
    growth_type: &'static str,
    anchor: String,
    comparison: String,
    pct_change: Option<f64>,
}

impl Exporter for GrowthTable {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => rows_to_csv(self.values.iter().map(|(entity, value)| GrowthRow {
                entity,
                grouping: self.grouping.name(),
                growth_type: self.growth_type.label(),
                anchor: self.anchor.to_string(),
                comparison: self.comparison.to_string(),
                pct_change: *value,
            })),
            ExportFormat::Json | ExportFormat::PrettyJson => to_json(self, format),
        }
    }
}

/// One trend row as written to CSV.
#[derive(Debug, Serialize)]
struct TrendRow<'a> {
    key: &'a str,
    period: String,
    total: f64,
    normalized: Option<f64>,
}

impl Exporter for Vec<TrendPoint> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => rows_to_csv(self.iter().map(|p| TrendRow {
                key: &p.key,
                period: p.period.to_string(),
                total: p.total,
                normalized: p.normalized,
            })),
            ExportFormat::Json | ExportFormat::PrettyJson => to_json(self, format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use scanidx_growth::{Grouping, GrowthType};
    use scanidx_index::{IndexedRecord, Period, RebasedRecord, join};
    use std::collections::BTreeMap;

    fn period(year: i32, month: u32) -> Period {
        Period::from_year_month(year, month).unwrap()
    }

    fn comparison() -> ComparisonTable {
        let rebased = vec![
            RebasedRecord {
                entity: "Food".to_string(),
                period: period(2023, 1),
                raw_value: 110.0,
                base_value: Some(100.0),
                index: Some(110.0),
            },
            RebasedRecord {
                entity: "Toys".to_string(),
                period: period(2023, 1),
                raw_value: 5.0,
                base_value: Some(0.0),
                index: None,
            },
        ];
        let published = vec![
            IndexedRecord {
                entity: "Food".to_string(),
                period: period(2023, 1),
                index: 108.5,
            },
            IndexedRecord {
                entity: "Toys".to_string(),
                period: period(2023, 1),
                index: 99.0,
            },
        ];
        join(&rebased, &published).unwrap()
    }

    #[test]
    fn test_comparison_csv() {
        let csv = comparison().export_to_string(ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "entity,period,year,month,index_a,index_b");
        assert_eq!(lines[1], "Food,2023-01,2023,1,110.0,108.5");
        assert_eq!(lines[2], "Toys,2023-01,2023,1,,99.0");
    }

    #[test]
    fn test_comparison_json_null() {
        let json = comparison().export_to_string(ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value[1]["index_a"].is_null());
        assert_eq!(value[0]["index_b"], 108.5);
    }

    #[test]
    fn test_growth_csv() {
        let mut values = BTreeMap::new();
        values.insert("Food".to_string(), Some(50.0));
        values.insert("Toys".to_string(), None);
        let table = GrowthTable {
            anchor: period(2024, 1),
            comparison: period(2023, 1),
            grouping: Grouping::Category,
            growth_type: GrowthType::Yoy,
            values,
        };

        let csv = table.export_to_string(ExportFormat::Csv).unwrap();
        assert!(csv.starts_with("entity,grouping,growth_type,anchor,comparison,pct_change\n"));
        assert!(csv.contains("Food,category,YoY,2024-01,2023-01,50.0\n"));
        assert!(csv.contains("Toys,category,YoY,2024-01,2023-01,\n"));

        let json = table.export_to_string(ExportFormat::PrettyJson).unwrap();
        assert!(json.contains("\"Toys\": null"));
    }

    #[test]
    fn test_trend_csv_and_json() {
        let points = vec![
            TrendPoint {
                key: "Food".to_string(),
                period: period(2024, 1),
                total: 100.0,
                normalized: Some(1.0),
            },
            TrendPoint {
                key: "Food".to_string(),
                period: period(2024, 2),
                total: 150.0,
                normalized: Some(1.5),
            },
            TrendPoint {
                key: "Toys".to_string(),
                period: period(2024, 1),
                total: 0.0,
                normalized: None,
            },
        ];

        let csv = points.export_to_string(ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "key,period,total,normalized");
        assert_eq!(lines[2], "Food,2024-02,150.0,1.5");
        assert_eq!(lines[3], "Toys,2024-01,0.0,");

        let json = points.export_to_string(ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(3));
        assert_eq!(value[1]["normalized"], 1.5);
        assert!(value[2]["normalized"].is_null());
    }

    #[rstest]
    #[case("csv", ExportFormat::Csv)]
    #[case("JSON", ExportFormat::Json)]
    #[case("pretty-json", ExportFormat::PrettyJson)]
    fn test_format_from_str(#[case] raw: &str, #[case] expected: ExportFormat) {
        assert_eq!(raw.parse::<ExportFormat>().unwrap(), expected);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out/comparison.csv")),
            Some(ExportFormat::Csv)
        );
        assert_eq!(ExportFormat::from_path(Path::new("out/comparison")), None);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }
}
