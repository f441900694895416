//! Subcommand arguments and shared output handling.

pub(crate) mod compare;
pub(crate) mod groups;
pub(crate) mod growth;
pub(crate) mod trends;

use clap::{Args, ValueEnum};
use scanidx::growth::{Classification, Grouping, GrowthType, ObservationFilter};
use scanidx::output::ExportFormat;
use std::path::{Path, PathBuf};

/// How results are printed or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// ASCII table
    Text,
    /// Markdown
    Markdown,
    /// CSV
    Csv,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Explicit choice, else guessed from the output path, else text.
    pub(crate) fn resolve(explicit: Option<Self>, output: Option<&Path>) -> Self {
        explicit
            .or_else(|| {
                output
                    .and_then(ExportFormat::from_path)
                    .map(|format| match format {
                        ExportFormat::Csv => Self::Csv,
                        ExportFormat::Json | ExportFormat::PrettyJson => Self::Json,
                    })
            })
            .unwrap_or(Self::Text)
    }

    /// Matching export format for table output.
    pub(crate) const fn export_format(self) -> Option<ExportFormat> {
        match self {
            Self::Csv => Some(ExportFormat::Csv),
            Self::Json => Some(ExportFormat::PrettyJson),
            Self::Text | Self::Markdown => None,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct CompareArgs {
    /// Scanner index CSV (wide, one column per period)
    #[arg(long)]
    pub(crate) scanner: PathBuf,

    /// Published index CSV (wide, one column per period)
    #[arg(long)]
    pub(crate) published: PathBuf,

    /// Override the configured base year
    #[arg(long)]
    pub(crate) base_year: Option<i32>,

    /// Restrict output to one entity
    #[arg(long)]
    pub(crate) entity: Option<String>,

    /// Restrict output to a commodity group and its subgroups
    #[arg(long)]
    pub(crate) group: Option<String>,

    /// Output format
    #[arg(long, value_enum)]
    pub(crate) format: Option<OutputFormat>,

    /// Write to a file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

/// Observation filter criteria shared by the turnover subcommands.
#[derive(Debug, Args)]
pub(crate) struct FilterArgs {
    /// Inclusive year range, `2023-2024` or a single year
    #[arg(long, value_parser = parse_year_range)]
    pub(crate) years: Option<(i32, i32)>,

    /// Admit only these categories (repeatable)
    #[arg(long)]
    pub(crate) category: Vec<String>,

    /// Admit only these subcategories (repeatable)
    #[arg(long)]
    pub(crate) subcategory: Vec<String>,

    /// Admit only these classifications (repeatable)
    #[arg(long)]
    pub(crate) classification: Vec<Classification>,
}

impl FilterArgs {
    /// Build the observation filter; an empty list admits everything.
    pub(crate) fn to_filter(&self) -> ObservationFilter {
        let mut filter = ObservationFilter::new();
        if let Some((from, to)) = self.years {
            filter = filter.with_years(from, to);
        }
        if !self.category.is_empty() {
            filter = filter.with_categories(self.category.iter().cloned());
        }
        if !self.subcategory.is_empty() {
            filter = filter.with_subcategories(self.subcategory.iter().cloned());
        }
        if !self.classification.is_empty() {
            filter = filter.with_classifications(self.classification.iter().copied());
        }
        filter
    }
}

#[derive(Debug, Args)]
pub(crate) struct GrowthArgs {
    /// Turnover CSV
    #[arg(long)]
    pub(crate) observations: PathBuf,

    /// Aggregation level (category or subcategory)
    #[arg(long)]
    pub(crate) grouping: Option<Grouping>,

    /// Comparison (yoy or mom)
    #[arg(long)]
    pub(crate) growth: Option<GrowthType>,

    #[command(flatten)]
    pub(crate) filters: FilterArgs,

    /// Output format
    #[arg(long, value_enum)]
    pub(crate) format: Option<OutputFormat>,

    /// Write to a file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub(crate) struct TrendsArgs {
    /// Turnover CSV
    #[arg(long)]
    pub(crate) observations: PathBuf,

    /// Aggregation level (category or subcategory)
    #[arg(long)]
    pub(crate) grouping: Option<Grouping>,

    #[command(flatten)]
    pub(crate) filters: FilterArgs,

    /// Output format
    #[arg(long, value_enum)]
    pub(crate) format: Option<OutputFormat>,

    /// Write to a file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub(crate) struct GroupsArgs {
    /// Print as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

/// Parse `2023-2024` or `2023` into an inclusive range.
pub(crate) fn parse_year_range(s: &str) -> Result<(i32, i32), String> {
    let parse = |part: &str| {
        part.trim()
            .parse::<i32>()
            .map_err(|_| format!("invalid year: {part:?}"))
    };
    let (from, to) = match s.split_once('-') {
        Some((from, to)) => (parse(from)?, parse(to)?),
        None => {
            let year = parse(s)?;
            (year, year)
        }
    };
    if from > to {
        return Err(format!("year range {from}-{to} is reversed"));
    }
    Ok((from, to))
}

/// Print `content` or write it to `output`.
pub(crate) fn emit(content: &str, output: Option<&Path>) -> std::io::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            tracing::info!(path = %path.display(), "Wrote output");
        }
        None => print!("{content}"),
    }
    Ok(())
}
