//! Consolidation options and top-level error types.

use std::fmt;
use std::path::PathBuf;

use surveykit_extract::spec::SpecExtractOptions;
use surveykit_scan::spec::{ScanTreeError, SpecScanOptions};

use crate::conf::{C_SHEET_NAME_MASTER, derive_default_target_sheets};
use crate::config::ConfigError;

/// Input options for `consolidate_tree`.
#[derive(Debug, Clone)]
pub struct SpecConsolidateOptions {
    /// Sheet names to extract from each workbook, when present.
    pub l_sheets_target: Vec<String>,
    /// Output sheet name for the consolidated table.
    pub sheet_name_out: String,
    /// Directory discovery and classification options.
    pub scan: SpecScanOptions,
    /// Fixed-layout extraction options.
    pub extract: SpecExtractOptions,
    /// Optional column-alias mapping file (CSV: source,canonical).
    pub path_file_column_map: Option<PathBuf>,
}

impl Default for SpecConsolidateOptions {
    fn default() -> Self {
        Self {
            l_sheets_target: derive_default_target_sheets(),
            sheet_name_out: C_SHEET_NAME_MASTER.to_string(),
            scan: SpecScanOptions::default(),
            extract: SpecExtractOptions::default(),
            path_file_column_map: None,
        }
    }
}

/// "Top-level call failed" errors (setup and final write stages).
///
/// Per-unit failures never surface here; they land in the run report.
#[derive(Debug)]
pub enum ConsolidateError {
    /// Directory discovery setup failed.
    Scan(ScanTreeError),
    /// Run configuration (alias mapping file) failed to load.
    Config(ConfigError),
    /// Consolidated output could not be written.
    Write(String),
}

impl fmt::Display for ConsolidateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Write(msg) => write!(f, "Failed to write consolidated output: {msg}"),
        }
    }
}

impl std::error::Error for ConsolidateError {}

impl From<ScanTreeError> for ConsolidateError {
    fn from(err: ScanTreeError) -> Self {
        Self::Scan(err)
    }
}

impl From<ConfigError> for ConsolidateError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}
