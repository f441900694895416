//! Headline totals for a named set of categories.

use crate::growth::pct_change;
use crate::observation::{Classification, Observation};
use scanidx_index::Period;
use serde::{Deserialize, Serialize};

/// Anchor-period totals for a set of categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineTotals {
    /// Name of the category set.
    pub name: String,
    /// Period the totals refer to.
    pub anchor: Period,
    /// Total expenditure across all classifications.
    pub total: f64,
    /// Expenditure in SPE outlets.
    pub spe_total: f64,
    /// Expenditure in Non-SPE outlets.
    pub non_spe_total: f64,
    /// SPE share of the total in percent, `None` for a zero total.
    pub spe_share: Option<f64>,
    /// Change against the same month a year earlier.
    pub yoy_change: Option<f64>,
    /// Change against the previous month.
    pub mom_change: Option<f64>,
}

fn total_in(observations: &[Observation], categories: &[String], period: Period) -> (f64, f64) {
    observations
        .iter()
        .filter(|o| o.period() == Some(period) && categories.contains(&o.category))
        .fold((0.0, 0.0), |(spe, non_spe), o| match o.classification {
            Classification::Spe => (spe + o.expenditure, non_spe),
            Classification::NonSpe => (spe, non_spe + o.expenditure),
        })
}

/// Totals of `categories` at `anchor`, with the SPE split and period-over-period
/// change of the combined total.
pub fn headline_totals(
    observations: &[Observation],
    name: &str,
    categories: &[String],
    anchor: Period,
) -> HeadlineTotals {
    let (spe_total, non_spe_total) = total_in(observations, categories, anchor);
    let total = spe_total + non_spe_total;

    let combined = |period| {
        let (spe, non_spe) = total_in(observations, categories, period);
        spe + non_spe
    };

    HeadlineTotals {
        name: name.to_string(),
        anchor,
        total,
        spe_total,
        non_spe_total,
        spe_share: (total != 0.0).then(|| spe_total / total * 100.0),
        yoy_change: pct_change(total, combined(anchor.year_earlier())),
        mom_change: pct_change(total, combined(anchor.previous_month())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::Classification::{NonSpe, Spe};
    use crate::observation::fixtures::obs;
    use approx::assert_relative_eq;

    #[test]
    fn test_headline_totals() {
        let data = vec![
            obs(2024, 3, "Food", "Snacks", Spe, 75.0),
            obs(2024, 3, "Food", "Drinks", NonSpe, 25.0),
            obs(2024, 3, "Toys", "Dolls", Spe, 1000.0),
            obs(2024, 2, "Food", "Snacks", Spe, 80.0),
            obs(2023, 3, "Food", "Snacks", Spe, 50.0),
        ];
        let anchor = Period::from_year_month(2024, 3).unwrap();
        let food = vec!["Food".to_string()];

        let totals = headline_totals(&data, "Food", &food, anchor);
        assert_relative_eq!(totals.total, 100.0);
        assert_relative_eq!(totals.spe_total, 75.0);
        assert_relative_eq!(totals.non_spe_total, 25.0);
        assert_relative_eq!(totals.spe_share.unwrap(), 75.0);
        assert_relative_eq!(totals.yoy_change.unwrap(), 100.0);
        assert_relative_eq!(totals.mom_change.unwrap(), 25.0);
    }

    #[test]
    fn test_headline_without_data() {
        let anchor = Period::from_year_month(2024, 3).unwrap();
        let totals = headline_totals(&[], "Empty", &["Food".to_string()], anchor);
        assert_eq!(totals.total, 0.0);
        assert_eq!(totals.spe_share, None);
        assert_eq!(totals.yoy_change, None);
        assert_eq!(totals.mom_change, None);
    }
}
