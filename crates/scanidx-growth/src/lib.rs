#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/scanidx/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod filter;
pub mod growth;
pub mod headline;
pub mod observation;
pub mod trend;

pub use filter::ObservationFilter;
pub use growth::{
    BestPerformer, GrowthMetric, GrowthTable, GrowthType, best_performer, growth, latest_period,
    pct_change,
};
pub use headline::{HeadlineTotals, headline_totals};
pub use observation::{Classification, Grouping, Observation, ParseLevelError};
pub use trend::{TrendPoint, normalized_trends};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
