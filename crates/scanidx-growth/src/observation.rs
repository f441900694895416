//! Turnover observations.

use chrono::NaiveDate;
use scanidx_index::Period;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a classification, grouping or growth type label is
/// not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized {kind}: {value:?}")]
pub struct ParseLevelError {
    /// What was being parsed
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl ParseLevelError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Outlet classification of an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// SPE outlets
    #[serde(rename = "SPE")]
    Spe,
    /// Non-SPE outlets
    #[serde(rename = "Non-SPE")]
    NonSpe,
}

impl Classification {
    /// Canonical label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Spe => "SPE",
            Self::NonSpe => "Non-SPE",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Classification {
    type Err = ParseLevelError;

    /// Accepts `SPE` and `Non-SPE` in any case, with `-`, `_`, a space or
    /// nothing between `non` and `spe`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match compact.as_str() {
            "spe" => Ok(Self::Spe),
            "nonspe" => Ok(Self::NonSpe),
            _ => Err(ParseLevelError::new("classification", s)),
        }
    }
}

/// Aggregation level used for growth ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// Group by category
    Category,
    /// Group by subcategory
    #[default]
    Subcategory,
}

impl Grouping {
    /// Lower-case name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Subcategory => "subcategory",
        }
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Grouping {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "category" | "kategori" => Ok(Self::Category),
            "subcategory" | "subkategori" => Ok(Self::Subcategory),
            _ => Err(ParseLevelError::new("grouping", s)),
        }
    }
}

/// One row of turnover data.
///
/// Identity is not unique: several rows may share year, month, category,
/// subcategory and classification, and aggregations sum them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar year.
    pub year: i32,
    /// Month of the year, `1..=12`.
    pub month: u32,
    /// Commodity category.
    pub category: String,
    /// Commodity subcategory.
    pub subcategory: String,
    /// Outlet classification.
    pub classification: Classification,
    /// Total expenditure (turnover).
    pub expenditure: f64,
    /// Total quantity sold.
    pub quantity: f64,
}

impl Observation {
    /// Canonical period, `None` for an out-of-range month.
    pub const fn period(&self) -> Option<Period> {
        Period::from_year_month(self.year, self.month)
    }

    /// First day of the observation month.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// `YYYY-MM` label for display grouping.
    pub fn year_month(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// The grouping key at the given level.
    pub fn key(&self, grouping: Grouping) -> &str {
        match grouping {
            Grouping::Category => &self.category,
            Grouping::Subcategory => &self.subcategory,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("SPE", Classification::Spe)]
    #[case(" spe ", Classification::Spe)]
    #[case("Non-SPE", Classification::NonSpe)]
    #[case("NON SPE", Classification::NonSpe)]
    #[case("non_spe", Classification::NonSpe)]
    #[case("nonspe", Classification::NonSpe)]
    fn test_parse_classification(#[case] input: &str, #[case] expected: Classification) {
        assert_eq!(input.parse::<Classification>().unwrap(), expected);
    }

    #[test]
    fn test_parse_classification_rejects_unknown() {
        let err = "Retail".parse::<Classification>().unwrap_err();
        assert_eq!(err.kind, "classification");
    }

    #[test]
    fn test_parse_grouping() {
        assert_eq!("Category".parse::<Grouping>().unwrap(), Grouping::Category);
        assert_eq!("subkategori".parse::<Grouping>().unwrap(), Grouping::Subcategory);
        assert!("brand".parse::<Grouping>().is_err());
    }

    #[test]
    fn test_derived_fields() {
        let o = fixtures::obs(2024, 3, "Food", "Snacks", Classification::Spe, 10.0);
        assert_eq!(o.year_month(), "2024-03");
        assert_eq!(o.date(), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(o.period(), Period::from_year_month(2024, 3));
        assert_eq!(o.key(Grouping::Category), "Food");
        assert_eq!(o.key(Grouping::Subcategory), "Snacks");

        let bad = Observation { month: 13, ..o };
        assert_eq!(bad.period(), None);
        assert_eq!(bad.date(), None);
    }
}
