//! `scanidx compare`

use super::{CompareArgs, OutputFormat, emit};
use scanidx::index::ComparisonTable;
use scanidx::output::{ComparisonSummary, Exporter};
use scanidx::{AnalysisConfig, compare_sources, load_sources};
use tracing::warn;

/// Keep only the rows selected by `--group` and `--entity`.
fn restrict(
    table: ComparisonTable,
    args: &CompareArgs,
    config: &AnalysisConfig,
) -> Result<ComparisonTable, Box<dyn std::error::Error>> {
    let table = match &args.group {
        Some(name) => {
            let group = config
                .commodity_group(name)
                .ok_or_else(|| format!("unknown commodity group: {name}"))?;
            let table: ComparisonTable = table
                .records()
                .iter()
                .filter(|r| group.covers(&r.entity))
                .cloned()
                .collect();
            if table.is_empty() {
                warn!(group = %group.name, "No subgroup of the group is present in both sources");
            }
            table
        }
        None => table,
    };

    Ok(match &args.entity {
        Some(entity) => {
            let table: ComparisonTable = table.for_entity(entity).cloned().collect();
            if table.is_empty() {
                warn!(entity = %entity, "Entity is not present in both sources");
            }
            table
        }
        None => table,
    })
}

pub(crate) fn run(
    args: &CompareArgs,
    config: &AnalysisConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = config.clone();
    if let Some(year) = args.base_year {
        config.base_year = year;
    }

    let (scanner, published) = load_sources(&args.scanner, &args.published, &config)?;
    let comparison = compare_sources(&scanner, &published, &config)?;
    let diagnostics = comparison.diagnostics;

    let table = restrict(comparison.table, args, &config)?;

    let format = OutputFormat::resolve(args.format, args.output.as_deref());
    let content = match format.export_format() {
        Some(export) => table.export_to_string(export)?,
        None => {
            let summary = ComparisonSummary::from_table(&table, "Scanner", "Published");
            let mut text = match format {
                OutputFormat::Markdown => summary.to_markdown(),
                _ => summary.to_ascii_table(),
            };
            text.push_str(&format!(
                "\nBase year: {}. Matched keys: {}, scanner only: {}, published only: {}\n",
                comparison.base_year,
                diagnostics.matched,
                diagnostics.scanner_only,
                diagnostics.published_only
            ));
            text
        }
    };

    emit(&content, args.output.as_deref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanidx::index::{IndexedRecord, Period, join};
    use std::path::PathBuf;

    fn table() -> ComparisonTable {
        let jan = Period::from_year_month(2022, 1).unwrap();
        let records: Vec<IndexedRecord> = ["Minuman", "Tembakau", "Farmasi"]
            .iter()
            .map(|entity| IndexedRecord {
                entity: (*entity).to_string(),
                period: jan,
                index: 100.0,
            })
            .collect();
        join(&records, &records).unwrap()
    }

    fn args(group: Option<&str>, entity: Option<&str>) -> CompareArgs {
        CompareArgs {
            scanner: PathBuf::from("scanner.csv"),
            published: PathBuf::from("published.csv"),
            base_year: None,
            entity: entity.map(str::to_string),
            group: group.map(str::to_string),
            format: None,
            output: None,
        }
    }

    #[test]
    fn test_restrict_to_group() {
        let config = AnalysisConfig::default();
        let restricted =
            restrict(table(), &args(Some("Makanan, minuman dan tembakau"), None), &config)
                .unwrap();
        assert_eq!(restricted.entities(), ["Minuman", "Tembakau"]);

        let single =
            restrict(table(), &args(Some("Barang Lainnya"), Some("Farmasi")), &config).unwrap();
        assert_eq!(single.entities(), ["Farmasi"]);

        assert!(restrict(table(), &args(Some("Alat Musik"), None), &config).is_err());
        assert_eq!(restrict(table(), &args(None, None), &config).unwrap().len(), 3);
    }
}
