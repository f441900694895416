//! Comparison, growth and trend summaries.
//!
//! Summaries render as an ASCII table for the terminal or as Markdown.
//! Undefined values are shown as `-`.

use scanidx_growth::{
    BestPerformer, Grouping, GrowthTable, GrowthType, HeadlineTotals, TrendPoint,
};
use scanidx_index::{ComparisonTable, CorrelationStrength, Period};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Format an optional number with `decimals` places, `-` when undefined.
pub fn format_optional(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.decimals$}"))
}

fn format_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:+.2}%"))
}

/// Correlation of one entity across the joined periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityCorrelation {
    /// Entity name.
    pub entity: String,

    /// Periods where both indices are defined.
    pub points: usize,

    /// Pearson coefficient, `None` when undefined.
    pub correlation: Option<f64>,

    /// Strength bucket of `correlation`.
    pub strength: Option<CorrelationStrength>,
}

/// Summary of a two-source comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    /// Name of the first source.
    pub label_a: String,

    /// Name of the second source.
    pub label_b: String,

    /// Earliest and latest joined period.
    pub span: Option<(Period, Period)>,

    /// Joined rows.
    pub rows: usize,

    /// Per-entity correlation, in entity order.
    pub entities: Vec<EntityCorrelation>,
}

impl ComparisonSummary {
    /// Summarize a comparison table.
    pub fn from_table(
        table: &ComparisonTable,
        label_a: impl Into<String>,
        label_b: impl Into<String>,
    ) -> Self {
        let entities = table
            .entities()
            .into_iter()
            .map(|entity| {
                let points = table
                    .records()
                    .iter()
                    .filter(|r| r.entity == entity && r.index_a.is_some() && r.index_b.is_some())
                    .count();
                let correlation = table.correlation(entity);
                EntityCorrelation {
                    entity: entity.to_string(),
                    points,
                    correlation,
                    strength: correlation.map(CorrelationStrength::classify),
                }
            })
            .collect();

        Self {
            label_a: label_a.into(),
            label_b: label_b.into(),
            span: table.span(),
            rows: table.len(),
            entities,
        }
    }

    fn span_text(&self) -> String {
        self.span
            .map_or_else(|| "-".to_string(), |(start, end)| format!("{start} to {end}"))
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nComparison: {} vs {}\n", self.label_a, self.label_b));
        output.push_str(&format!("Period: {}\n", self.span_text()));
        output.push_str(&format!("Joined rows: {}\n", self.rows));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<36} {:>8} {:>12} {:>12}\n",
            "Entity", "Points", "Correlation", "Strength"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for row in &self.entities {
            output.push_str(&format!(
                "{:<36} {:>8} {:>12} {:>12}\n",
                row.entity,
                row.points,
                format_optional(row.correlation, 3),
                row.strength.map_or("-", |s| s.label()),
            ));
        }

        output.push_str(&"=".repeat(72));
        output.push('\n');
        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "# Comparison: {} vs {}\n\n",
            self.label_a, self.label_b
        ));
        output.push_str(&format!("**Period:** {}\n\n", self.span_text()));
        output.push_str(&format!("**Joined rows:** {}\n\n", self.rows));
        output.push_str("| Entity | Points | Correlation | Strength |\n");
        output.push_str("|--------|--------|-------------|----------|\n");
        for row in &self.entities {
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                row.entity,
                row.points,
                format_optional(row.correlation, 3),
                row.strength.map_or("-", |s| s.label()),
            ));
        }
        output
    }
}

impl fmt::Display for ComparisonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii_table())
    }
}

/// Summary of a growth ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthSummary {
    /// Anchor period.
    pub anchor: Period,

    /// Comparison period.
    pub comparison: Period,

    /// Aggregation level.
    pub grouping: Grouping,

    /// Comparison type.
    pub growth_type: GrowthType,

    /// Keys ranked by growth, highest first, undefined last.
    pub ranked: Vec<(String, Option<f64>)>,

    /// Highest defined growth.
    pub best: BestPerformer,

    /// Headline totals shown above the ranking.
    pub headlines: Vec<HeadlineTotals>,
}

impl GrowthSummary {
    /// Summarize a growth table.
    pub fn from_table(table: &GrowthTable) -> Self {
        let mut ranked: Vec<(String, Option<f64>)> = table
            .values
            .iter()
            .map(|(key, value)| (key.clone(), *value))
            .collect();
        ranked.sort_by(|a, b| match (a.1, b.1) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        Self {
            anchor: table.anchor,
            comparison: table.comparison,
            grouping: table.grouping,
            growth_type: table.growth_type,
            ranked,
            best: table.best_performer(),
            headlines: Vec::new(),
        }
    }

    /// Attach headline totals.
    pub fn with_headlines(mut self, headlines: Vec<HeadlineTotals>) -> Self {
        self.headlines = headlines;
        self
    }

    fn best_text(&self) -> String {
        if self.best.is_none() {
            "-".to_string()
        } else {
            format!("{} ({:+.2}%)", self.best.entity, self.best.value)
        }
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} growth by {}: {} vs {}\n",
            self.growth_type,
            self.grouping,
            self.anchor.label(),
            self.comparison.label()
        ));
        output.push_str(&format!("Best performer: {}\n", self.best_text()));
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if !self.headlines.is_empty() {
            output.push_str(&format!(
                "{:<16} {:>16} {:>10} {:>12} {:>12}\n",
                "Headline", "Total", "SPE %", "YoY", "MoM"
            ));
            output.push_str(&"-".repeat(72));
            output.push('\n');
            for h in &self.headlines {
                output.push_str(&format!(
                    "{:<16} {:>16.2} {:>10} {:>12} {:>12}\n",
                    h.name,
                    h.total,
                    format_optional(h.spe_share, 1),
                    format_pct(h.yoy_change),
                    format_pct(h.mom_change),
                ));
            }
            output.push_str(&"-".repeat(72));
            output.push('\n');
        }

        output.push_str(&format!("{:<56} {:>15}\n", "Entity", "Growth"));
        output.push_str(&"-".repeat(72));
        output.push('\n');
        for (entity, value) in &self.ranked {
            output.push_str(&format!("{:<56} {:>15}\n", entity, format_pct(*value)));
        }

        output.push_str(&"=".repeat(72));
        output.push('\n');
        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "# {} growth by {}\n\n",
            self.growth_type, self.grouping
        ));
        output.push_str(&format!(
            "**Period:** {} vs {}\n\n",
            self.anchor.label(),
            self.comparison.label()
        ));
        output.push_str(&format!("**Best performer:** {}\n\n", self.best_text()));

        if !self.headlines.is_empty() {
            output.push_str("| Headline | Total | SPE % | YoY | MoM |\n");
            output.push_str("|----------|-------|-------|-----|-----|\n");
            for h in &self.headlines {
                output.push_str(&format!(
                    "| {} | {:.2} | {} | {} | {} |\n",
                    h.name,
                    h.total,
                    format_optional(h.spe_share, 1),
                    format_pct(h.yoy_change),
                    format_pct(h.mom_change),
                ));
            }
            output.push('\n');
        }

        output.push_str("| Entity | Growth |\n");
        output.push_str("|--------|--------|\n");
        for (entity, value) in &self.ranked {
            output.push_str(&format!("| {} | {} |\n", entity, format_pct(*value)));
        }
        output
    }
}

impl fmt::Display for GrowthSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii_table())
    }
}

/// Normalized expenditure trends per group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Aggregation level.
    pub grouping: Grouping,

    /// Points ordered by key, then period.
    pub points: Vec<TrendPoint>,
}

impl TrendSummary {
    /// Wrap trend points for display.
    pub const fn new(grouping: Grouping, points: Vec<TrendPoint>) -> Self {
        Self { grouping, points }
    }

    fn span_text(&self) -> String {
        let first = self.points.iter().map(|p| p.period).min();
        let last = self.points.iter().map(|p| p.period).max();
        match first.zip(last) {
            Some((first, last)) => format!("{first} to {last}"),
            None => "-".to_string(),
        }
    }

    /// Format as an ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nNormalized trends by {}\n", self.grouping));
        output.push_str(&format!("Period: {}\n", self.span_text()));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<36} {:>8} {:>14} {:>10}\n",
            "Key", "Period", "Expenditure", "Relative"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for point in &self.points {
            output.push_str(&format!(
                "{:<36} {:>8} {:>14.2} {:>10}\n",
                point.key,
                point.period.to_string(),
                point.total,
                format_optional(point.normalized, 3),
            ));
        }

        output.push_str(&"=".repeat(72));
        output.push('\n');
        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# Normalized trends by {}\n\n", self.grouping));
        output.push_str(&format!("**Period:** {}\n\n", self.span_text()));
        output.push_str("| Key | Period | Expenditure | Relative |\n");
        output.push_str("|-----|--------|-------------|----------|\n");
        for point in &self.points {
            output.push_str(&format!(
                "| {} | {} | {:.2} | {} |\n",
                point.key,
                point.period,
                point.total,
                format_optional(point.normalized, 3),
            ));
        }
        output
    }
}

impl fmt::Display for TrendSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn period(year: i32, month: u32) -> Period {
        Period::from_year_month(year, month).unwrap()
    }

    fn growth_table(values: &[(&str, Option<f64>)]) -> GrowthTable {
        GrowthTable {
            anchor: period(2024, 1),
            comparison: period(2023, 12),
            grouping: Grouping::Subcategory,
            growth_type: GrowthType::Mom,
            values: values
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(None, 2), "-");
        assert_eq!(format_optional(Some(0.8123), 3), "0.812");
    }

    #[test]
    fn test_growth_ranking_order() {
        let summary = GrowthSummary::from_table(&growth_table(&[
            ("Dolls", None),
            ("Drinks", Some(-4.0)),
            ("Snacks", Some(12.5)),
        ]));

        let keys: Vec<&str> = summary.ranked.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["Snacks", "Drinks", "Dolls"]);
        assert_eq!(summary.best.entity, "Snacks");

        let ascii = summary.to_ascii_table();
        assert!(ascii.contains("MoM growth by subcategory: Jan-24 vs Dec-23"));
        assert!(ascii.contains("Best performer: Snacks (+12.50%)"));
        assert!(ascii.contains("-4.00%"));
    }

    #[test]
    fn test_growth_placeholder_rendering() {
        let summary = GrowthSummary::from_table(&growth_table(&[("Dolls", None)]));
        assert!(summary.best.is_none());

        let markdown = summary.to_markdown();
        assert!(markdown.contains("**Best performer:** -"));
        assert!(markdown.contains("| Dolls | - |"));
    }

    #[test]
    fn test_headlines_rendered() {
        let headline = HeadlineTotals {
            name: "Food".to_string(),
            anchor: period(2024, 1),
            total: 200.0,
            spe_total: 150.0,
            non_spe_total: 50.0,
            spe_share: Some(75.0),
            yoy_change: None,
            mom_change: Some(5.0),
        };
        let summary = GrowthSummary::from_table(&growth_table(&[("Snacks", Some(1.0))]))
            .with_headlines(vec![headline]);

        let markdown = summary.to_markdown();
        assert!(markdown.contains("| Food | 200.00 | 75.0 | - | +5.00% |"));
    }

    #[test]
    fn test_trend_summary() {
        let summary = TrendSummary::new(
            Grouping::Category,
            vec![
                TrendPoint {
                    key: "Food".to_string(),
                    period: period(2024, 1),
                    total: 100.0,
                    normalized: Some(1.0),
                },
                TrendPoint {
                    key: "Toys".to_string(),
                    period: period(2024, 2),
                    total: 0.0,
                    normalized: None,
                },
            ],
        );

        let text = summary.to_ascii_table();
        assert!(text.contains("Period: 2024-01 to 2024-02"));
        assert!(text.contains("1.000"));

        let markdown = summary.to_markdown();
        assert!(markdown.contains("| Toys | 2024-02 | 0.00 | - |"));
        let empty = TrendSummary::new(Grouping::Category, Vec::new());
        assert!(empty.to_markdown().contains("**Period:** -"));
    }
}
