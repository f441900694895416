#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/scanidx/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod frame;
pub mod observations;
pub mod source;

pub use error::{DataError, Result};
pub use frame::wide_table_from_frame;
pub use observations::{
    IngestReport, IngestedObservations, ObservationOptions, ObservationSchema,
    normalize_column_name, observations_from_frame,
};
pub use source::{SourceOptions, load_observations, load_wide_table, read_csv};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
