//! Scan report model and mutable builder.

use std::fmt;

/// Aggregate counters and diagnostics for one `scan_tree` run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportScan {
    /// Total scanned file entries.
    pub cnt_scanned: u64,
    /// Entries that passed include/exclude filters.
    pub cnt_matched: u64,
    /// Entries excluded by filters.
    pub cnt_excluded: u64,
    /// Matched entries classified to a concrete country.
    pub cnt_classified: u64,
    /// Non-fatal warnings collected during traversal.
    pub warnings: Vec<String>,
}

impl ReportScan {
    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} scanned={} matched={} excluded={} classified={} warnings={}",
            self.cnt_scanned,
            self.cnt_matched,
            self.cnt_excluded,
            self.cnt_classified,
            self.warnings.len()
        )
    }
}

impl fmt::Display for ReportScan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[SCAN]"))
    }
}

/// Mutable accumulator for scan statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportScanBuilder {
    /// See [`ReportScan::cnt_scanned`].
    pub cnt_scanned: u64,
    /// See [`ReportScan::cnt_matched`].
    pub cnt_matched: u64,
    /// See [`ReportScan::cnt_excluded`].
    pub cnt_excluded: u64,
    /// See [`ReportScan::cnt_classified`].
    pub cnt_classified: u64,
    /// See [`ReportScan::warnings`].
    pub warnings: Vec<String>,
}

impl ReportScanBuilder {
    /// Increment scanned count by one.
    pub fn add_scanned(&mut self) {
        self.cnt_scanned += 1;
    }

    /// Increment matched count by one.
    pub fn add_matched(&mut self) {
        self.cnt_matched += 1;
    }

    /// Increment excluded count by one.
    pub fn add_excluded(&mut self) {
        self.cnt_excluded += 1;
    }

    /// Increment classified count by one.
    pub fn add_classified(&mut self) {
        self.cnt_classified += 1;
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportScan {
        ReportScan {
            cnt_scanned: self.cnt_scanned,
            cnt_matched: self.cnt_matched,
            cnt_excluded: self.cnt_excluded,
            cnt_classified: self.cnt_classified,
            warnings: self.warnings,
        }
    }
}
