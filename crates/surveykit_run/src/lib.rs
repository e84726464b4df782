//! `surveykit_run` v1:
//! End-to-end consolidation pipeline over scan/extract/io kernels.
//!
//! Module layout:
//! - `conf`        : run-level constants and default presets
//! - `config`      : column-alias mapping file loading
//! - `spec`        : options and top-level error types
//! - `report`      : consolidated run report model
//! - `consolidate` : pipeline orchestration

pub mod conf;
pub mod config;
pub mod consolidate;
pub mod report;
pub mod spec;

pub use conf::{C_SHEET_NAME_MASTER, derive_default_target_sheets};
pub use config::{ConfigError, load_column_aliases};
pub use consolidate::consolidate_tree;
pub use report::{
    EnumSheetSkipReason, ReportConsolidate, ReportConsolidateBuilder, SpecFileSkip, SpecSheetSkip,
};
pub use spec::{ConsolidateError, SpecConsolidateOptions};
