//! Scan specification models and top-level error types.

use std::fmt;
use std::path::PathBuf;

/// Country label used when the filename pattern does not match.
pub const C_COUNTRY_UNKNOWN: &str = "Unknown";

/// Default single-capture country pattern for survey-export filenames.
pub const C_PATTERN_COUNTRY_DEFAULT: &str = r"P030045_89up_European_Poll_(.*?)_wtd_Tables";

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Pattern matching mode for include/exclude lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumScanPatternMode {
    /// Shell-like wildcards (`*`, `?`, character classes).
    Glob,
    /// Regular expression pattern.
    Regex,
    /// Exact substring match.
    Literal,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for `scan_tree`.
#[derive(Debug, Clone)]
pub struct SpecScanOptions {
    /// Include patterns applied to file basename.
    pub patterns_include_files: Option<Vec<String>>,
    /// Exclude patterns applied to file basename.
    pub patterns_exclude_files: Option<Vec<String>>,
    /// Pattern interpretation mode.
    pub rule_pattern: EnumScanPatternMode,
    /// Single-capture country classification pattern.
    pub pattern_country: String,
}

impl Default for SpecScanOptions {
    fn default() -> Self {
        Self {
            patterns_include_files: Some(vec!["*.xlsx".to_string()]),
            patterns_exclude_files: Some(vec!["~$*".to_string()]),
            rule_pattern: EnumScanPatternMode::Glob,
            pattern_country: C_PATTERN_COUNTRY_DEFAULT.to_string(),
        }
    }
}

/// One discovered source file with its derived country label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSourceFile {
    /// Full path of the workbook file.
    pub path_file: PathBuf,
    /// File basename used for classification.
    pub name_file: String,
    /// Derived country label (possibly [`C_COUNTRY_UNKNOWN`]).
    pub country: String,
}

/// "Top-level call failed" errors (input validation / setup stage).
#[derive(Debug)]
pub enum ScanTreeError {
    /// Source path is not a directory.
    SourceNotDirectory(PathBuf),
    /// Invalid include/exclude pattern.
    InvalidPattern(String),
    /// Country pattern failed to compile or lacks a capture group.
    InvalidCountryPattern(String),
    /// Source directory enumeration failed outright.
    ReadDirFailed {
        /// Directory that could not be enumerated.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
}

impl fmt::Display for ScanTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceNotDirectory(path) => {
                write!(f, "Source is not a directory: {}", path.display())
            }
            Self::InvalidPattern(msg) => write!(f, "{msg}"),
            Self::InvalidCountryPattern(msg) => write!(f, "{msg}"),
            Self::ReadDirFailed { path, message } => {
                write!(f, "Failed to read directory {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for ScanTreeError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
