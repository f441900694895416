//! Analysis configuration.

use crate::error::Result;
use crate::taxonomy::{
    CategorySet, CommodityGroup, EXCLUDED_SUBCATEGORIES, default_commodity_groups,
    default_headline_groups,
};
use scanidx_data::{ObservationOptions, ObservationSchema, SourceOptions};
use scanidx_growth::{Grouping, GrowthType};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by the comparison and growth analyses.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Year whose mean the scanner series is rebased to
    pub base_year: i32,
    /// Default growth aggregation level
    pub grouping: Grouping,
    /// Default growth comparison
    pub growth_type: GrowthType,
    /// Subcategories dropped when loading turnover data
    pub excluded_subcategories: Vec<String>,
    /// Category sets reported as headline totals
    pub headline_groups: Vec<CategorySet>,
    /// Commodity groups and their index subgroups
    pub commodity_groups: Vec<CategorySet>,
    /// Turnover table column names
    pub schema: ObservationSchema,
    /// How to read the scanner index source
    pub scanner_source: SourceOptions,
    /// How to read the published index source
    pub published_source: SourceOptions,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_year: 2022,
            grouping: Grouping::Subcategory,
            growth_type: GrowthType::Yoy,
            excluded_subcategories: EXCLUDED_SUBCATEGORIES.iter().map(|s| s.to_string()).collect(),
            headline_groups: default_headline_groups(),
            commodity_groups: default_commodity_groups(),
            schema: ObservationSchema::default(),
            scanner_source: SourceOptions::new("Periode", 2),
            published_source: SourceOptions::new("Indeks Penjualan Riil", 0),
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Serialize as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Find a configured commodity group by name, ignoring case.
    ///
    /// The turnover spelling of a built-in group finds the group under its
    /// index spelling.
    pub fn commodity_group(&self, name: &str) -> Option<&CategorySet> {
        let name = name.trim();
        let builtin = CommodityGroup::from_name(name).map(|g| g.name());
        self.commodity_groups
            .iter()
            .find(|set| set.name.eq_ignore_ascii_case(name) || builtin == Some(set.name.as_str()))
    }

    /// Options for loading the turnover table.
    pub fn observation_options(&self) -> ObservationOptions {
        ObservationOptions {
            schema: self.schema.clone(),
            excluded_subcategories: self.excluded_subcategories.clone(),
        }
    }
}
