//! `surveykit_scan` v1:
//! Source-directory discovery and filename country classification.
//!
//! Module layout:
//! - `scan`   : directory scan orchestration
//! - `spec`   : options/models/errors
//! - `report` : run-time report model
//! - `util`   : pattern helpers

pub mod report;
pub mod scan;
pub mod spec;
mod util;

pub use report::{ReportScan, ReportScanBuilder};
pub use scan::{SpecScanOutcome, scan_tree};
pub use spec::{
    C_COUNTRY_UNKNOWN, C_PATTERN_COUNTRY_DEFAULT, EnumScanPatternMode, ScanTreeError,
    SpecScanOptions, SpecSourceFile,
};
