#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/scanidx/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod correlation;
pub mod error;
pub mod join;
pub mod period;
pub mod rebase;
pub mod reshape;
pub mod table;

pub use correlation::{CorrelationStrength, pearson};
pub use error::{IndexError, Result};
pub use join::{ComparisonRecord, ComparisonTable, IndexedPoint, correlation, join};
pub use period::{Period, parse_period};
pub use rebase::{IndexedRecord, RebasedRecord, pass_through, rebase, round_to_tenth};
pub use reshape::{LongObservation, reshape};
pub use table::{Cell, WideTable};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
