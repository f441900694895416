//! Series Joiner
//!
//! Inner-joins two indexed series on `(entity, period)`. Keys present in only
//! one input are excluded without comment; reporting them is the caller's
//! concern. Each input must hold at most one record per key, and a duplicate
//! is rejected as [`IndexError::DuplicateKey`] rather than silently joined.

use crate::correlation::pearson;
use crate::error::{IndexError, Result};
use crate::period::Period;
use crate::rebase::{IndexedRecord, RebasedRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Anything that carries an index value keyed by `(entity, period)`.
pub trait IndexedPoint {
    /// Entity name.
    fn entity(&self) -> &str;
    /// Observation period.
    fn period(&self) -> Period;
    /// Index value, `None` when undefined.
    fn index_value(&self) -> Option<f64>;
}

impl IndexedPoint for RebasedRecord {
    fn entity(&self) -> &str {
        &self.entity
    }

    fn period(&self) -> Period {
        self.period
    }

    fn index_value(&self) -> Option<f64> {
        self.index
    }
}

impl IndexedPoint for IndexedRecord {
    fn entity(&self) -> &str {
        &self.entity
    }

    fn period(&self) -> Period {
        self.period
    }

    fn index_value(&self) -> Option<f64> {
        Some(self.index)
    }
}

/// One `(entity, period)` present in both series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    /// Entity name.
    pub entity: String,
    /// Shared period.
    pub period: Period,
    /// Index from the first series.
    pub index_a: Option<f64>,
    /// Index from the second series.
    pub index_b: Option<f64>,
    /// Calendar year of `period`.
    pub year: i32,
    /// Month of `period`.
    pub month: u32,
}

/// The result of joining two series, ordered by `(entity, period)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparisonTable {
    records: Vec<ComparisonRecord>,
}

impl ComparisonTable {
    /// Joined records.
    pub fn records(&self) -> &[ComparisonRecord] {
        &self.records
    }

    /// Consume the table and return its records.
    pub fn into_records(self) -> Vec<ComparisonRecord> {
        self.records
    }

    /// Number of joined records.
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the join matched nothing.
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct entities in ascending order.
    pub fn entities(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.entity.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Records for one entity, in period order.
    pub fn for_entity<'a>(
        &'a self,
        entity: &'a str,
    ) -> impl Iterator<Item = &'a ComparisonRecord> + 'a {
        self.records.iter().filter(move |r| r.entity == entity)
    }

    /// Pearson correlation of the two indices over the entity's shared
    /// periods where both are defined.
    ///
    /// `None` with fewer than two such periods or zero variance on either side.
    pub fn correlation(&self, entity: &str) -> Option<f64> {
        let (xs, ys): (Vec<f64>, Vec<f64>) = self
            .for_entity(entity)
            .filter_map(|r| Some((r.index_a?, r.index_b?)))
            .unzip();
        pearson(&xs, &ys)
    }

    /// Earliest and latest period covered by the comparison.
    pub fn span(&self) -> Option<(Period, Period)> {
        let first = self.records.iter().map(|r| r.period).min()?;
        let last = self.records.iter().map(|r| r.period).max()?;
        Some((first, last))
    }
}

impl IntoIterator for ComparisonTable {
    type Item = ComparisonRecord;
    type IntoIter = std::vec::IntoIter<ComparisonRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ComparisonTable {
    type Item = &'a ComparisonRecord;
    type IntoIter = std::slice::Iter<'a, ComparisonRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Collecting keeps the iteration order, so collect from an ordered table.
impl FromIterator<ComparisonRecord> for ComparisonTable {
    fn from_iter<T: IntoIterator<Item = ComparisonRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Key a series by `(entity, period)`, rejecting duplicates.
fn keyed<'a, P, I>(
    series: &'static str,
    points: I,
) -> Result<BTreeMap<(&'a str, Period), Option<f64>>>
where
    P: IndexedPoint + 'a,
    I: IntoIterator<Item = &'a P>,
{
    let mut map = BTreeMap::new();
    for point in points {
        let key = (point.entity(), point.period());
        if map.insert(key, point.index_value()).is_some() {
            return Err(IndexError::DuplicateKey {
                series,
                entity: key.0.to_string(),
                period: key.1,
            });
        }
    }
    Ok(map)
}

fn join_keyed<'a>(
    a: &BTreeMap<(&'a str, Period), Option<f64>>,
    b: &BTreeMap<(&'a str, Period), Option<f64>>,
) -> ComparisonTable {
    let records = a
        .iter()
        .filter_map(|(&(entity, period), &index_a)| {
            let index_b = *b.get(&(entity, period))?;
            Some(ComparisonRecord {
                entity: entity.to_string(),
                period,
                index_a,
                index_b,
                year: period.year(),
                month: period.month(),
            })
        })
        .collect();
    ComparisonTable { records }
}

/// Inner-join two series on `(entity, period)`.
///
/// # Errors
///
/// Returns [`IndexError::DuplicateKey`] if either series holds a key twice.
pub fn join<A, B>(series_a: &[A], series_b: &[B]) -> Result<ComparisonTable>
where
    A: IndexedPoint,
    B: IndexedPoint,
{
    let a = keyed("a", series_a)?;
    let b = keyed("b", series_b)?;
    Ok(join_keyed(&a, &b))
}

/// Pearson correlation of the two series' indices for one entity, over the
/// periods both series share.
///
/// # Errors
///
/// Returns [`IndexError::DuplicateKey`] if either series holds a key of this
/// entity twice.
pub fn correlation<A, B>(series_a: &[A], series_b: &[B], entity: &str) -> Result<Option<f64>>
where
    A: IndexedPoint,
    B: IndexedPoint,
{
    let a = keyed("a", series_a.iter().filter(|p| p.entity() == entity))?;
    let b = keyed("b", series_b.iter().filter(|p| p.entity() == entity))?;
    Ok(join_keyed(&a, &b).correlation(entity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn period(year: i32, month: u32) -> Period {
        Period::from_year_month(year, month).unwrap()
    }

    fn indexed(entity: &str, p: Period, index: f64) -> IndexedRecord {
        IndexedRecord {
            entity: entity.to_string(),
            period: p,
            index,
        }
    }

    #[test]
    fn test_partial_overlap_yields_shared_key_only() {
        let a = vec![
            indexed("Z", period(2022, 1), 100.0),
            indexed("Z", period(2022, 2), 101.0),
        ];
        let b = vec![
            indexed("Z", period(2022, 2), 98.0),
            indexed("Z", period(2022, 3), 99.0),
        ];

        let table = join(&a, &b).unwrap();
        assert_eq!(table.len(), 1);
        let record = &table.records()[0];
        assert_eq!(record.entity, "Z");
        assert_eq!(record.period, period(2022, 2));
        assert_eq!(record.index_a, Some(101.0));
        assert_eq!(record.index_b, Some(98.0));
        assert_eq!((record.year, record.month), (2022, 2));
    }

    #[test]
    fn test_entities_in_one_source_are_excluded() {
        let a = vec![indexed("Only A", period(2022, 1), 1.0)];
        let b = vec![indexed("Only B", period(2022, 1), 1.0)];
        assert!(join(&a, &b).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_key_fails_loudly() {
        let a = vec![
            indexed("Z", period(2022, 1), 100.0),
            indexed("Z", period(2022, 1), 100.0),
        ];
        let b = vec![indexed("Z", period(2022, 1), 98.0)];

        let err = join(&a, &b).unwrap_err();
        assert_eq!(
            err,
            IndexError::DuplicateKey {
                series: "a",
                entity: "Z".to_string(),
                period: period(2022, 1),
            }
        );
        assert!(matches!(
            join(&b, &a),
            Err(IndexError::DuplicateKey { series: "b", .. })
        ));
    }

    #[test]
    fn test_join_mixes_rebased_and_published() {
        let a = vec![RebasedRecord {
            entity: "Food".to_string(),
            period: period(2022, 1),
            raw_value: 5.0,
            base_value: None,
            index: None,
        }];
        let b = vec![indexed("Food", period(2022, 1), 100.0)];

        let table = join(&a, &b).unwrap();
        assert_eq!(table.records()[0].index_a, None);
        assert_eq!(table.records()[0].index_b, Some(100.0));
    }

    #[test]
    fn test_correlation_and_span() {
        let a = vec![
            indexed("Food", period(2022, 1), 100.0),
            indexed("Food", period(2022, 2), 110.0),
            indexed("Food", period(2022, 3), 120.0),
        ];
        let b = vec![
            indexed("Food", period(2022, 1), 50.0),
            indexed("Food", period(2022, 2), 55.0),
            indexed("Food", period(2022, 3), 60.0),
        ];

        let table = join(&a, &b).unwrap();
        assert_relative_eq!(table.correlation("Food").unwrap(), 1.0, epsilon = 1e-12);
        assert_eq!(table.correlation("Other"), None);
        assert_eq!(table.span(), Some((period(2022, 1), period(2022, 3))));
        assert_eq!(table.entities(), vec!["Food"]);
    }

    #[test]
    fn test_correlation_requires_two_shared_periods() {
        let a = vec![
            indexed("Z", period(2022, 1), 100.0),
            indexed("Z", period(2022, 2), 101.0),
        ];
        let b = vec![
            indexed("Z", period(2022, 2), 98.0),
            indexed("Z", period(2022, 3), 99.0),
        ];
        assert_eq!(correlation(&a, &b, "Z").unwrap(), None);
    }

    #[test]
    fn test_correlation_is_symmetric() {
        let a = vec![
            indexed("Food", period(2022, 1), 100.0),
            indexed("Food", period(2022, 2), 104.0),
            indexed("Food", period(2022, 3), 101.0),
            indexed("Food", period(2022, 4), 109.0),
            indexed("Toys", period(2022, 1), 90.0),
        ];
        let b = vec![
            indexed("Food", period(2022, 2), 99.0),
            indexed("Food", period(2022, 3), 97.5),
            indexed("Food", period(2022, 4), 103.0),
            indexed("Food", period(2022, 5), 110.0),
            indexed("Toys", period(2022, 2), 91.0),
        ];

        let ab = correlation(&a, &b, "Food").unwrap().unwrap();
        let ba = correlation(&b, &a, "Food").unwrap().unwrap();
        assert_relative_eq!(ab, ba, epsilon = 1e-12);
        assert!(ab > 0.9);
        assert_eq!(correlation(&b, &a, "Toys").unwrap(), None);
    }

    #[test]
    fn test_join_keys_exist_in_both_inputs() {
        let a = vec![
            indexed("Food", period(2022, 1), 100.0),
            indexed("Food", period(2022, 2), 101.0),
            indexed("Food", period(2022, 3), 102.0),
            indexed("Toys", period(2022, 1), 90.0),
            indexed("Toys", period(2022, 2), 91.0),
            indexed("Fuel", period(2022, 1), 80.0),
        ];
        let b = vec![
            indexed("Toys", period(2022, 2), 95.0),
            indexed("Food", period(2022, 3), 99.0),
            indexed("Food", period(2022, 1), 98.0),
            indexed("Drinks", period(2022, 1), 70.0),
        ];

        let table = join(&a, &b).unwrap();
        assert!(table.len() <= a.len().min(b.len()));
        assert_eq!(table.len(), 3);

        let keys_a: BTreeSet<_> = a.iter().map(|p| (p.entity.as_str(), p.period)).collect();
        let keys_b: BTreeSet<_> = b.iter().map(|p| (p.entity.as_str(), p.period)).collect();
        for record in table.records() {
            let key = (record.entity.as_str(), record.period);
            assert!(keys_a.contains(&key));
            assert!(keys_b.contains(&key));
        }
        assert_eq!(table.entities(), vec!["Food", "Toys"]);
    }
}
