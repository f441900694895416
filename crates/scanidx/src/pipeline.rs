//! End-to-end analyses over loaded sources.
//!
//! Index sources are expected with their entity column renamed to
//! [`ENTITY_COLUMN`], which [`load_sources`] does.

use crate::config::AnalysisConfig;
use crate::error::{Result, ScanIdxError};
use scanidx_data::{IngestedObservations, load_observations, load_wide_table};
use scanidx_growth::{
    Grouping, GrowthTable, GrowthType, HeadlineTotals, Observation, ObservationFilter, TrendPoint,
    headline_totals, normalized_trends,
};
use scanidx_index::{
    ComparisonTable, IndexedPoint, Period, WideTable, join, pass_through, rebase, reshape,
};
use scanidx_output::GrowthSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// Canonical entity column of loaded index sources.
pub const ENTITY_COLUMN: &str = "entity";

/// Key counts from joining two series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinDiagnostics {
    /// Keys present in both series
    pub matched: usize,
    /// Keys only in the scanner series
    pub scanner_only: usize,
    /// Keys only in the published series
    pub published_only: usize,
}

/// Output of [`compare_sources`].
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Base year used for rebasing
    pub base_year: i32,
    /// Joined scanner (`index_a`) and published (`index_b`) indices
    pub table: ComparisonTable,
    /// Key counts
    pub diagnostics: JoinDiagnostics,
}

fn keys<P: IndexedPoint>(points: &[P]) -> BTreeSet<(&str, Period)> {
    points.iter().map(|p| (p.entity(), p.period())).collect()
}

/// Load the scanner and published index sources as configured, with the
/// entity column renamed to [`ENTITY_COLUMN`].
///
/// # Errors
///
/// Returns an error if either file cannot be read or lacks its entity column.
pub fn load_sources(
    scanner: &Path,
    published: &Path,
    config: &AnalysisConfig,
) -> Result<(WideTable, WideTable)> {
    let scanner = load_wide_table(scanner, &config.scanner_source, ENTITY_COLUMN)?;
    let published = load_wide_table(published, &config.published_source, ENTITY_COLUMN)?;
    Ok((scanner, published))
}

/// Rebase the scanner source, clean the published source, and join them.
///
/// The published source loses every entity with a missing cell before
/// reshaping; its values are then rounded to one decimal.
///
/// # Errors
///
/// Returns [`ScanIdxError::UnknownBaseYear`] if no scanner period column
/// falls in the configured base year, or an index error for a missing
/// entity column or duplicate keys.
pub fn compare_sources(
    scanner: &WideTable,
    published: &WideTable,
    config: &AnalysisConfig,
) -> Result<Comparison> {
    let years = scanner.period_years(ENTITY_COLUMN)?;
    if !years.contains(&config.base_year) {
        return Err(ScanIdxError::UnknownBaseYear {
            requested: config.base_year,
            available: years.into_iter().collect(),
        });
    }

    let rebased = rebase(&reshape(scanner, ENTITY_COLUMN)?, config.base_year);
    let published = published.without_incomplete_entities(ENTITY_COLUMN)?;
    let indexed = pass_through(&reshape(&published, ENTITY_COLUMN)?);

    let table = join(&rebased, &indexed)?;

    let scanner_keys = keys(&rebased);
    let published_keys = keys(&indexed);
    let diagnostics = JoinDiagnostics {
        matched: table.len(),
        scanner_only: scanner_keys.difference(&published_keys).count(),
        published_only: published_keys.difference(&scanner_keys).count(),
    };

    if diagnostics.scanner_only > 0 || diagnostics.published_only > 0 {
        warn!(
            scanner_only = diagnostics.scanner_only,
            published_only = diagnostics.published_only,
            "Keys without a counterpart were dropped from the comparison"
        );
    }
    info!(
        base_year = config.base_year,
        matched = diagnostics.matched,
        "Compared sources"
    );

    Ok(Comparison {
        base_year: config.base_year,
        table,
        diagnostics,
    })
}

/// Load and clean the turnover table as configured.
///
/// # Errors
///
/// Returns an error if the file cannot be read or lacks required columns.
pub fn load_turnover(path: &Path, config: &AnalysisConfig) -> Result<IngestedObservations> {
    let ingested = load_observations(path, &config.observation_options())?;
    debug!(
        kept = ingested.report.rows_kept,
        dropped = ingested.report.dropped(),
        "Loaded turnover observations"
    );
    Ok(ingested)
}

/// Output of [`analyze_growth`].
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthAnalysis {
    /// Growth per key at the anchor period
    pub table: GrowthTable,
    /// Totals for each configured headline set
    pub headlines: Vec<HeadlineTotals>,
}

impl GrowthAnalysis {
    /// Ranked summary with headlines attached.
    pub fn summary(&self) -> GrowthSummary {
        GrowthSummary::from_table(&self.table).with_headlines(self.headlines.clone())
    }
}

/// Growth ranking and headline totals at the latest period of the filtered
/// observations.
///
/// # Errors
///
/// Returns [`ScanIdxError::NoObservations`] if nothing survives the filter.
pub fn analyze_growth(
    observations: &[Observation],
    filter: &ObservationFilter,
    grouping: Grouping,
    growth_type: GrowthType,
    config: &AnalysisConfig,
) -> Result<GrowthAnalysis> {
    let filtered = filter.apply(observations);
    let table = GrowthTable::at_latest(&filtered, grouping, growth_type)
        .ok_or(ScanIdxError::NoObservations)?;
    debug!(
        rows = filtered.len(),
        anchor = %table.anchor,
        keys = table.values.len(),
        "Computed growth"
    );

    let headlines = config
        .headline_groups
        .iter()
        .map(|set| headline_totals(&filtered, &set.name, &set.members, table.anchor))
        .collect();

    Ok(GrowthAnalysis { table, headlines })
}

/// Expenditure per group and period of the filtered observations, relative
/// to each group's earliest period.
///
/// # Errors
///
/// Returns [`ScanIdxError::NoObservations`] if nothing survives the filter.
pub fn analyze_trends(
    observations: &[Observation],
    filter: &ObservationFilter,
    grouping: Grouping,
) -> Result<Vec<TrendPoint>> {
    let filtered = filter.apply(observations);
    if filtered.is_empty() {
        return Err(ScanIdxError::NoObservations);
    }
    let points = normalized_trends(&filtered, grouping);
    debug!(rows = filtered.len(), points = points.len(), "Computed trends");
    Ok(points)
}
