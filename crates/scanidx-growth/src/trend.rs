//! Expenditure trends normalized to each group's first period.

use crate::observation::{Grouping, Observation};
use scanidx_index::Period;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summed expenditure of one group in one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Grouping key.
    pub key: String,
    /// Period.
    pub period: Period,
    /// Summed expenditure.
    pub total: f64,
    /// `total` divided by the group's earliest total, `None` when that is zero.
    pub normalized: Option<f64>,
}

/// Sum expenditure per `(key, period)` and normalize each group by its
/// earliest period. Output is ordered by `(key, period)`.
pub fn normalized_trends(observations: &[Observation], grouping: Grouping) -> Vec<TrendPoint> {
    let mut sums: BTreeMap<(&str, Period), f64> = BTreeMap::new();
    for obs in observations {
        if let Some(period) = obs.period() {
            *sums.entry((obs.key(grouping), period)).or_insert(0.0) += obs.expenditure;
        }
    }

    let mut points = Vec::with_capacity(sums.len());
    let mut base: Option<(&str, f64)> = None;
    for ((key, period), total) in sums {
        let base_total = match base {
            Some((current, value)) if current == key => value,
            _ => {
                base = Some((key, total));
                total
            }
        };
        points.push(TrendPoint {
            key: key.to_string(),
            period,
            total,
            normalized: (base_total != 0.0).then(|| total / base_total),
        });
    }
    points
}
