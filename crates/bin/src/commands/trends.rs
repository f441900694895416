//! `scanidx trends`

use super::{OutputFormat, TrendsArgs, emit};
use scanidx::output::{Exporter, TrendSummary};
use scanidx::{AnalysisConfig, analyze_trends, load_turnover};

pub(crate) fn run(
    args: &TrendsArgs,
    config: &AnalysisConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let ingested = load_turnover(&args.observations, config)?;
    let grouping = args.grouping.unwrap_or(config.grouping);
    let points = analyze_trends(&ingested.observations, &args.filters.to_filter(), grouping)?;

    let format = OutputFormat::resolve(args.format, args.output.as_deref());
    let content = match format.export_format() {
        Some(export) => points.export_to_string(export)?,
        None => {
            let summary = TrendSummary::new(grouping, points);
            match format {
                OutputFormat::Markdown => summary.to_markdown(),
                _ => summary.to_ascii_table(),
            }
        }
    };

    emit(&content, args.output.as_deref())?;
    Ok(())
}
