//! Growth Analytics
//!
//! Year-over-year and month-over-month percentage change of summed
//! expenditure per grouping key, anchored at a period. Results are
//! recomputed on every call; nothing is cached between filter changes.

use crate::observation::{Grouping, Observation, ParseLevelError};
use scanidx_index::Period;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Which comparison period a growth figure uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthType {
    /// Same month, previous year
    #[default]
    Yoy,
    /// Previous calendar month
    Mom,
}

impl GrowthType {
    /// The period the anchor is compared against.
    pub const fn comparison_period(&self, anchor: Period) -> Period {
        match self {
            Self::Yoy => anchor.year_earlier(),
            Self::Mom => anchor.previous_month(),
        }
    }

    /// Short label (`YoY` / `MoM`).
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Yoy => "YoY",
            Self::Mom => "MoM",
        }
    }
}

impl fmt::Display for GrowthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for GrowthType {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yoy" => Ok(Self::Yoy),
            "mom" => Ok(Self::Mom),
            _ => Err(ParseLevelError::new("growth type", s)),
        }
    }
}

/// Growth of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthMetric {
    /// Grouping key (category or subcategory name).
    pub entity: String,
    /// Level the key belongs to.
    pub grouping_level: Grouping,
    /// Comparison used.
    pub growth_type: GrowthType,
    /// Percentage change, `None` when undefined.
    pub pct_change: Option<f64>,
}

/// The entity with the highest defined growth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestPerformer {
    /// Entity name, `"-"` when nothing qualified.
    pub entity: String,
    /// Its percentage change, `0.0` when nothing qualified.
    pub value: f64,
}

impl BestPerformer {
    /// The `("-", 0)` placeholder returned when no entity has a defined value.
    pub fn none() -> Self {
        Self {
            entity: "-".to_string(),
            value: 0.0,
        }
    }

    /// Whether this is the placeholder.
    pub fn is_none(&self) -> bool {
        self.entity == "-" && self.value == 0.0
    }
}

/// `(current - previous) / previous * 100`, undefined for a zero previous.
pub fn pct_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    let change = (current - previous) / previous * 100.0;
    change.is_finite().then_some(change)
}

/// Latest period present in the observations.
pub fn latest_period(observations: &[Observation]) -> Option<Period> {
    observations.iter().filter_map(Observation::period).max()
}

/// Sum expenditure per grouping key for one period.
fn sum_by_key(
    observations: &[Observation],
    grouping: Grouping,
    period: Period,
) -> BTreeMap<String, f64> {
    let mut sums = BTreeMap::new();
    for obs in observations.iter().filter(|o| o.period() == Some(period)) {
        *sums.entry(obs.key(grouping).to_string()).or_insert(0.0) += obs.expenditure;
    }
    sums
}

/// Percentage change of summed expenditure per grouping key between
/// `anchor_period` and the comparison period of `growth_type`.
///
/// Every key present in either period appears in the result; the value is
/// `None` when the key has no anchor data, no comparison data, or a zero
/// comparison total.
///
/// # Examples
///
/// ```
/// use scanidx_growth::{Classification, Grouping, GrowthType, Observation, growth};
/// use scanidx_index::Period;
///
/// let row = |year, expenditure| Observation {
///     year,
///     month: 3,
///     category: "X".to_string(),
///     subcategory: "X1".to_string(),
///     classification: Classification::Spe,
///     expenditure,
///     quantity: 1.0,
/// };
/// let obs = vec![row(2024, 150.0), row(2023, 100.0)];
/// let anchor = Period::from_year_month(2024, 3).unwrap();
///
/// let metrics = growth(&obs, Grouping::Category, anchor, GrowthType::Yoy);
/// assert_eq!(metrics["X"], Some(50.0));
/// ```
pub fn growth(
    observations: &[Observation],
    grouping: Grouping,
    anchor_period: Period,
    growth_type: GrowthType,
) -> BTreeMap<String, Option<f64>> {
    let current = sum_by_key(observations, grouping, anchor_period);
    let previous = sum_by_key(
        observations,
        grouping,
        growth_type.comparison_period(anchor_period),
    );

    let mut metrics: BTreeMap<String, Option<f64>> =
        previous.keys().map(|key| (key.clone(), None)).collect();
    for (key, current_sum) in current {
        let change = previous
            .get(&key)
            .and_then(|previous_sum| pct_change(current_sum, *previous_sum));
        metrics.insert(key, change);
    }

    let undefined = metrics.values().filter(|v| v.is_none()).count();
    if undefined > 0 {
        tracing::debug!(
            anchor = %anchor_period,
            keys = metrics.len(),
            undefined,
            "growth undefined for keys missing a period or with a zero comparison total"
        );
    }
    metrics
}

/// Entity with the maximum defined percentage change.
///
/// Ties go to the lexically first entity. With no defined values the
/// placeholder [`BestPerformer::none`] is returned.
pub fn best_performer(metrics: &BTreeMap<String, Option<f64>>) -> BestPerformer {
    let mut best: Option<(&str, f64)> = None;
    for (entity, value) in metrics {
        let Some(value) = *value else { continue };
        if best.is_none_or(|(_, top)| value > top) {
            best = Some((entity, value));
        }
    }
    best.map_or_else(BestPerformer::none, |(entity, value)| BestPerformer {
        entity: entity.to_string(),
        value,
    })
}

/// Growth of every key at the latest period of an observation set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthTable {
    /// Anchor period (latest period in the input).
    pub anchor: Period,
    /// Period the anchor was compared against.
    pub comparison: Period,
    /// Aggregation level.
    pub grouping: Grouping,
    /// Comparison type.
    pub growth_type: GrowthType,
    /// Percentage change per key, in key order.
    pub values: BTreeMap<String, Option<f64>>,
}

impl GrowthTable {
    /// Compute growth anchored at the latest period of `observations`.
    ///
    /// Returns `None` when no observation has a valid period.
    pub fn at_latest(
        observations: &[Observation],
        grouping: Grouping,
        growth_type: GrowthType,
    ) -> Option<Self> {
        let anchor = latest_period(observations)?;
        Some(Self {
            anchor,
            comparison: growth_type.comparison_period(anchor),
            grouping,
            growth_type,
            values: growth(observations, grouping, anchor, growth_type),
        })
    }

    /// Best performer of the table.
    pub fn best_performer(&self) -> BestPerformer {
        best_performer(&self.values)
    }

    /// Flatten into one [`GrowthMetric`] per key.
    pub fn metrics(&self) -> Vec<GrowthMetric> {
        self.values
            .iter()
            .map(|(entity, pct_change)| GrowthMetric {
                entity: entity.clone(),
                grouping_level: self.grouping,
                growth_type: self.growth_type,
                pct_change: *pct_change,
            })
            .collect()
    }
}
