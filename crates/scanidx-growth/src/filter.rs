//! Observation filters and cascading option lists.
//!
//! A filter never mutates its input. Option helpers narrow what a caller
//! can offer at the next level (categories, then subcategories within them,
//! then classifications within those).

use crate::observation::{Classification, Observation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Restricts an observation set. Every `None` criterion admits everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationFilter {
    /// Inclusive `(from, to)` year range.
    pub years: Option<(i32, i32)>,
    /// Admitted categories.
    pub categories: Option<BTreeSet<String>>,
    /// Admitted subcategories.
    pub subcategories: Option<BTreeSet<String>>,
    /// Admitted classifications.
    pub classifications: Option<BTreeSet<Classification>>,
}

impl ObservationFilter {
    /// A filter that admits everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to an inclusive year range.
    pub const fn with_years(mut self, from: i32, to: i32) -> Self {
        self.years = Some((from, to));
        self
    }

    /// Restrict to the given categories.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict to the given subcategories.
    pub fn with_subcategories<I, S>(mut self, subcategories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subcategories = Some(subcategories.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict to the given classifications.
    pub fn with_classifications<I>(mut self, classifications: I) -> Self
    where
        I: IntoIterator<Item = Classification>,
    {
        self.classifications = Some(classifications.into_iter().collect());
        self
    }

    /// Whether one observation passes every criterion.
    pub fn matches(&self, obs: &Observation) -> bool {
        self.years
            .is_none_or(|(from, to)| (from..=to).contains(&obs.year))
            && self
                .categories
                .as_ref()
                .is_none_or(|set| set.contains(&obs.category))
            && self
                .subcategories
                .as_ref()
                .is_none_or(|set| set.contains(&obs.subcategory))
            && self
                .classifications
                .as_ref()
                .is_none_or(|set| set.contains(&obs.classification))
    }

    /// The admitted observations, as a new vector.
    pub fn apply(&self, observations: &[Observation]) -> Vec<Observation> {
        observations
            .iter()
            .filter(|obs| self.matches(obs))
            .cloned()
            .collect()
    }
}

/// Inclusive range of years present, `None` for an empty set.
pub fn year_range(observations: &[Observation]) -> Option<(i32, i32)> {
    let min = observations.iter().map(|o| o.year).min()?;
    let max = observations.iter().map(|o| o.year).max()?;
    Some((min, max))
}

/// Distinct categories, sorted.
pub fn categories(observations: &[Observation]) -> Vec<String> {
    observations
        .iter()
        .map(|o| o.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct subcategories occurring within the given categories, sorted.
pub fn subcategories_within(
    observations: &[Observation],
    categories: &BTreeSet<String>,
) -> Vec<String> {
    observations
        .iter()
        .filter(|o| categories.contains(&o.category))
        .map(|o| o.subcategory.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct classifications occurring within the given subcategories, sorted.
pub fn classifications_within(
    observations: &[Observation],
    subcategories: &BTreeSet<String>,
) -> Vec<Classification> {
    observations
        .iter()
        .filter(|o| subcategories.contains(&o.subcategory))
        .map(|o| o.classification)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::Classification::{NonSpe, Spe};
    use crate::observation::fixtures::obs;

    fn sample() -> Vec<Observation> {
        vec![
            obs(2022, 1, "Food", "Snacks", Spe, 1.0),
            obs(2023, 1, "Food", "Drinks", NonSpe, 2.0),
            obs(2024, 1, "Toys", "Dolls", Spe, 3.0),
            obs(2024, 2, "Books", "Comics", NonSpe, 4.0),
        ]
    }

    #[test]
    fn test_empty_filter_admits_all() {
        let data = sample();
        assert_eq!(ObservationFilter::new().apply(&data), data);
    }

    #[test]
    fn test_combined_criteria() {
        let filter = ObservationFilter::new()
            .with_years(2023, 2024)
            .with_categories(["Food", "Toys"])
            .with_classifications([Spe]);

        let kept = filter.apply(&sample());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].subcategory, "Dolls");
    }

    #[test]
    fn test_subcategory_filter() {
        let kept = ObservationFilter::new()
            .with_subcategories(["Drinks"])
            .apply(&sample());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].year, 2023);
    }

    #[test]
    fn test_cascading_options() {
        let data = sample();
        assert_eq!(categories(&data), vec!["Books", "Food", "Toys"]);
        assert_eq!(year_range(&data), Some((2022, 2024)));
        assert_eq!(year_range(&[]), None);

        let food: BTreeSet<String> = ["Food".to_string()].into();
        assert_eq!(subcategories_within(&data, &food), vec!["Drinks", "Snacks"]);

        let snacks: BTreeSet<String> = ["Snacks".to_string()].into();
        assert_eq!(classifications_within(&data, &snacks), vec![Spe]);
    }
}
