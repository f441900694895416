#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/scanidx/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod summary;

pub use export::{ExportError, ExportFormat, Exporter};
pub use summary::{
    ComparisonSummary, EntityCorrelation, GrowthSummary, TrendSummary, format_optional,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
