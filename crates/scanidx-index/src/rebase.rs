//! Base-year rebasing.
//!
//! Each entity's base value is the arithmetic mean of its observations in
//! the base year. Every observation of the entity is then expressed as
//! `value / base * 100`, rounded to one decimal. The product `value * 100`
//! is formed before dividing, so exact ties such as `401 * 100 / 400 =
//! 100.25` stay exact and round as ties.
//!
//! Rounding is half away from zero (`f64::round`) everywhere in this crate:
//! `100.25` becomes `100.3`, `-0.25` becomes `-0.3`.

use crate::period::Period;
use crate::reshape::LongObservation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A raw observation together with its entity's base value and index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebasedRecord {
    /// Entity name.
    pub entity: String,
    /// Observation period.
    pub period: Period,
    /// Value before rebasing.
    pub raw_value: f64,
    /// Base-year mean for the entity, `None` when the entity has no
    /// base-year observations.
    pub base_value: Option<f64>,
    /// Rebased index, `None` when the base is missing or zero.
    pub index: Option<f64>,
}

/// A record from a source that is already expressed as an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedRecord {
    /// Entity name.
    pub entity: String,
    /// Observation period.
    pub period: Period,
    /// Published index value, rounded to one decimal.
    pub index: f64,
}

/// Round to one decimal place, ties away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `value * 100 / base` rounded to one decimal, undefined for a zero or
/// missing base.
fn rebased_index(value: f64, base: Option<f64>) -> Option<f64> {
    let base = base.filter(|b| *b != 0.0)?;
    let index = round_to_tenth(value * 100.0 / base);
    index.is_finite().then_some(index)
}

/// Group parseable observations by entity, in entity then period order.
///
/// The period sort is stable so duplicate keys keep their input order.
fn group_by_entity(observations: &[LongObservation]) -> BTreeMap<&str, Vec<(Period, f64)>> {
    let mut groups: BTreeMap<&str, Vec<(Period, f64)>> = BTreeMap::new();
    let mut unparsed = 0usize;

    for obs in observations {
        match obs.period {
            Some(period) => groups
                .entry(obs.entity.as_str())
                .or_default()
                .push((period, obs.value)),
            None => unparsed += 1,
        }
    }

    if unparsed > 0 {
        tracing::debug!(unparsed, "skipping observations with unparsed periods");
    }

    for points in groups.values_mut() {
        points.sort_by_key(|(period, _)| *period);
    }
    groups
}

/// Rebase a long series against `base_year`.
///
/// Observations with unparsed periods are skipped. Output is ordered by
/// `(entity, period)` ascending.
///
/// # Examples
///
/// ```
/// use scanidx_index::{LongObservation, Period, rebase};
///
/// let obs = vec![
///     LongObservation::new("Food", Period::from_year_month(2022, 1).unwrap(), 100.0),
///     LongObservation::new("Food", Period::from_year_month(2023, 1).unwrap(), 110.0),
/// ];
/// let rebased = rebase(&obs, 2022);
/// assert_eq!(rebased[1].index, Some(110.0));
/// ```
pub fn rebase(observations: &[LongObservation], base_year: i32) -> Vec<RebasedRecord> {
    let groups = group_by_entity(observations);
    let mut records = Vec::with_capacity(observations.len());

    for (entity, points) in groups {
        let base_values: Vec<f64> = points
            .iter()
            .filter(|(period, _)| period.year() == base_year)
            .map(|(_, value)| *value)
            .collect();

        let base_value = if base_values.is_empty() {
            tracing::debug!(entity, base_year, "entity has no base-year observations");
            None
        } else {
            Some(base_values.iter().sum::<f64>() / base_values.len() as f64)
        };

        records.extend(points.into_iter().map(|(period, raw_value)| RebasedRecord {
            entity: entity.to_string(),
            period,
            raw_value,
            base_value,
            index: rebased_index(raw_value, base_value),
        }));
    }

    records
}

/// Carry an externally indexed series through unchanged apart from rounding
/// to one decimal.
///
/// Observations with unparsed periods are skipped. Output is ordered by
/// `(entity, period)` ascending.
pub fn pass_through(observations: &[LongObservation]) -> Vec<IndexedRecord> {
    group_by_entity(observations)
        .into_iter()
        .flat_map(|(entity, points)| {
            points.into_iter().map(move |(period, value)| IndexedRecord {
                entity: entity.to_string(),
                period,
                index: round_to_tenth(value),
            })
        })
        .collect()
}
