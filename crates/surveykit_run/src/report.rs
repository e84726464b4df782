//! Consolidated run report model and mutable builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use surveykit_extract::report::{EnumExtractSkipReason, ReportExtract};

/// Reason one sheet-granularity unit was skipped during the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumSheetSkipReason {
    /// Extraction-layer skip (structural or row-granularity).
    Extract(EnumExtractSkipReason),
    /// The sheet could not be materialized from the workbook.
    ReadFailed(String),
}

impl fmt::Display for EnumSheetSkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extract(reason) => write!(f, "{reason}"),
            Self::ReadFailed(msg) => write!(f, "{msg}"),
        }
    }
}

/// One file-granularity skip with path + error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFileSkip {
    /// Skipped workbook path.
    pub path: PathBuf,
    /// User-facing error text.
    pub exception: String,
}

/// One sheet-granularity skip with file/sheet/row context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetSkip {
    /// Workbook the sheet belonged to.
    pub path: PathBuf,
    /// Sheet name.
    pub sheet_name: String,
    /// Row index for row-granularity skips.
    pub n_row_idx: Option<usize>,
    /// Why the unit was skipped.
    pub reason: EnumSheetSkipReason,
}

/// Aggregate counters and diagnostics for one `consolidate_tree` run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportConsolidate {
    /// Total scanned directory file entries.
    pub cnt_files_scanned: u64,
    /// Files that passed the include/exclude filters.
    pub cnt_files_matched: u64,
    /// Files opened and processed.
    pub cnt_files_processed: u64,
    /// Files skipped on open/parse failure.
    pub cnt_files_skipped: u64,
    /// Sheets scanned for records.
    pub cnt_sheets_processed: u64,
    /// Sheets skipped (structural or unreadable).
    pub cnt_sheets_skipped: u64,
    /// Consolidated records written to the master table.
    pub cnt_records: u64,
    /// Per-file failures.
    pub l_file_skips: Vec<SpecFileSkip>,
    /// Per-sheet/per-row skips.
    pub l_sheet_skips: Vec<SpecSheetSkip>,
    /// Non-fatal warnings collected during the run.
    pub warnings: Vec<String>,
}

impl ReportConsolidate {
    /// Number of file-granularity failures.
    pub fn file_skip_count(&self) -> usize {
        self.l_file_skips.len()
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_files_scanned".to_string(), self.cnt_files_scanned);
        dict_counts.insert("cnt_files_matched".to_string(), self.cnt_files_matched);
        dict_counts.insert("cnt_files_processed".to_string(), self.cnt_files_processed);
        dict_counts.insert("cnt_files_skipped".to_string(), self.cnt_files_skipped);
        dict_counts.insert("cnt_sheets_processed".to_string(), self.cnt_sheets_processed);
        dict_counts.insert("cnt_sheets_skipped".to_string(), self.cnt_sheets_skipped);
        dict_counts.insert("cnt_records".to_string(), self.cnt_records);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} files={}/{} skipped={} sheets={} sheet_skips={} records={} warnings={}",
            dict_counts["cnt_files_processed"],
            dict_counts["cnt_files_matched"],
            dict_counts["cnt_files_skipped"],
            dict_counts["cnt_sheets_processed"],
            dict_counts["cnt_sheets_skipped"],
            dict_counts["cnt_records"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportConsolidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[CONSOLIDATE]"))
    }
}

/// Mutable accumulator for run statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportConsolidateBuilder {
    /// See [`ReportConsolidate::cnt_files_scanned`].
    pub cnt_files_scanned: u64,
    /// See [`ReportConsolidate::cnt_files_matched`].
    pub cnt_files_matched: u64,
    /// See [`ReportConsolidate::cnt_files_processed`].
    pub cnt_files_processed: u64,
    /// See [`ReportConsolidate::cnt_files_skipped`].
    pub cnt_files_skipped: u64,
    /// See [`ReportConsolidate::cnt_sheets_processed`].
    pub cnt_sheets_processed: u64,
    /// See [`ReportConsolidate::cnt_sheets_skipped`].
    pub cnt_sheets_skipped: u64,
    /// See [`ReportConsolidate::cnt_records`].
    pub cnt_records: u64,
    /// See [`ReportConsolidate::l_file_skips`].
    pub l_file_skips: Vec<SpecFileSkip>,
    /// See [`ReportConsolidate::l_sheet_skips`].
    pub l_sheet_skips: Vec<SpecSheetSkip>,
    /// See [`ReportConsolidate::warnings`].
    pub warnings: Vec<String>,
}

impl ReportConsolidateBuilder {
    /// Record one processed (opened) file.
    pub fn add_file_processed(&mut self) {
        self.cnt_files_processed += 1;
    }

    /// Record one file-granularity failure.
    pub fn add_file_skip(&mut self, path: PathBuf, exception: String) {
        self.cnt_files_skipped += 1;
        self.l_file_skips.push(SpecFileSkip { path, exception });
    }

    /// Record one sheet that could not be materialized.
    pub fn add_sheet_read_failure(&mut self, path: PathBuf, sheet_name: &str, message: String) {
        self.cnt_sheets_skipped += 1;
        self.l_sheet_skips.push(SpecSheetSkip {
            path,
            sheet_name: sheet_name.to_string(),
            n_row_idx: None,
            reason: EnumSheetSkipReason::ReadFailed(message),
        });
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Fold one per-file extraction report into the run, adding file context.
    pub fn merge_extract(&mut self, path: &Path, report_extract: ReportExtract) {
        self.cnt_sheets_processed += report_extract.cnt_sheets_extracted;
        self.cnt_sheets_skipped += report_extract.cnt_sheets_skipped;
        for skip in report_extract.l_skips {
            self.l_sheet_skips.push(SpecSheetSkip {
                path: path.to_path_buf(),
                sheet_name: skip.sheet_name,
                n_row_idx: skip.n_row_idx,
                reason: EnumSheetSkipReason::Extract(skip.reason),
            });
        }
        for warning in report_extract.warnings {
            self.warnings.push(format!("{}: {warning}", path.display()));
        }
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportConsolidate {
        ReportConsolidate {
            cnt_files_scanned: self.cnt_files_scanned,
            cnt_files_matched: self.cnt_files_matched,
            cnt_files_processed: self.cnt_files_processed,
            cnt_files_skipped: self.cnt_files_skipped,
            cnt_sheets_processed: self.cnt_sheets_processed,
            cnt_sheets_skipped: self.cnt_sheets_skipped,
            cnt_records: self.cnt_records,
            l_file_skips: self.l_file_skips,
            l_sheet_skips: self.l_sheet_skips,
            warnings: self.warnings,
        }
    }
}
