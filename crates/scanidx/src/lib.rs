#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/scanidx/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod taxonomy;

// Re-export main types from sub-crates
pub use scanidx_data as data;
pub use scanidx_growth as growth;
pub use scanidx_index as index;
pub use scanidx_output as output;

pub use config::AnalysisConfig;
pub use error::{Result, ScanIdxError};
pub use pipeline::{
    Comparison, ENTITY_COLUMN, GrowthAnalysis, JoinDiagnostics, analyze_growth, analyze_trends,
    compare_sources, load_sources, load_turnover,
};
pub use taxonomy::{CategorySet, CommodityGroup};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
