//! `scanidx growth`

use super::{GrowthArgs, OutputFormat, emit};
use scanidx::output::Exporter;
use scanidx::{AnalysisConfig, analyze_growth, load_turnover};

pub(crate) fn run(
    args: &GrowthArgs,
    config: &AnalysisConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let ingested = load_turnover(&args.observations, config)?;
    let analysis = analyze_growth(
        &ingested.observations,
        &args.filters.to_filter(),
        args.grouping.unwrap_or(config.grouping),
        args.growth.unwrap_or(config.growth_type),
        config,
    )?;

    let format = OutputFormat::resolve(args.format, args.output.as_deref());
    let content = match format.export_format() {
        Some(export) => analysis.table.export_to_string(export)?,
        None => {
            let summary = analysis.summary();
            match format {
                OutputFormat::Markdown => summary.to_markdown(),
                _ => summary.to_ascii_table(),
            }
        }
    };

    emit(&content, args.output.as_deref())?;
    Ok(())
}
