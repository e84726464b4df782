//! Directory scan and per-file country classification.

use std::fs;
use std::path::Path;

use crate::report::{ReportScan, ReportScanBuilder};
use crate::spec::{C_COUNTRY_UNKNOWN, ScanTreeError, SpecScanOptions, SpecSourceFile};
use crate::util::{SpecScanPatterns, classify_country, compile_country_pattern};

/// Discovered files plus traversal report.
#[derive(Debug, Clone)]
pub struct SpecScanOutcome {
    /// Matched source files in ascending filename order.
    pub l_files: Vec<SpecSourceFile>,
    /// Traversal counters and warnings.
    pub report: ReportScan,
}

/// Scan one directory (non-recursive) for source workbook files.
///
/// Each regular file entry is matched against the include/exclude patterns
/// and, when matched, classified to a country label via the single-capture
/// pattern. Entries the filesystem refuses to describe are recorded as
/// warnings and skipped; only input validation fails the call.
///
/// The result order is ascending by basename, making downstream output
/// deterministic regardless of directory enumeration order.
pub fn scan_tree<P>(
    dir_source: P,
    spec_scan_options: &SpecScanOptions,
) -> Result<SpecScanOutcome, ScanTreeError>
where
    P: AsRef<Path>,
{
    let path_dir_src = dir_source.as_ref();
    if !path_dir_src.is_dir() {
        return Err(ScanTreeError::SourceNotDirectory(path_dir_src.to_path_buf()));
    }

    let spec_scan_pats = SpecScanPatterns::from_raw(
        spec_scan_options.patterns_include_files.as_deref(),
        spec_scan_options.patterns_exclude_files.as_deref(),
        spec_scan_options.rule_pattern,
    )?;
    let regex_country = compile_country_pattern(&spec_scan_options.pattern_country)?;

    let mut builder_scan_report = ReportScanBuilder::default();
    let mut l_names: Vec<(String, std::path::PathBuf)> = Vec::new();

    let iter_entries = fs::read_dir(path_dir_src).map_err(|e| ScanTreeError::ReadDirFailed {
        path: path_dir_src.to_path_buf(),
        message: e.to_string(),
    })?;

    for _entry_res in iter_entries {
        let entry = match _entry_res {
            Ok(v) => v,
            Err(e) => {
                builder_scan_report.add_warning(format!(
                    "Failed to read directory entry under {} ({e})",
                    path_dir_src.display()
                ));
                continue;
            }
        };

        let cfg_file_type = match entry.file_type() {
            Ok(v) => v,
            Err(e) => {
                builder_scan_report.add_warning(format!(
                    "Failed to inspect {} ({e})",
                    entry.path().display()
                ));
                continue;
            }
        };
        if !cfg_file_type.is_file() {
            continue;
        }

        let c_name = entry.file_name().to_string_lossy().to_string();
        l_names.push((c_name, entry.path()));
    }

    l_names.sort_by(|a, b| a.0.cmp(&b.0));

    let mut l_files = Vec::new();
    for (c_name, path_file) in l_names {
        builder_scan_report.add_scanned();
        if spec_scan_pats.should_exclude(&c_name) {
            builder_scan_report.add_excluded();
            continue;
        }
        builder_scan_report.add_matched();

        let c_country = classify_country(&c_name, &regex_country);
        if c_country != C_COUNTRY_UNKNOWN {
            builder_scan_report.add_classified();
        }
        l_files.push(SpecSourceFile {
            path_file,
            name_file: c_name,
            country: c_country,
        });
    }

    Ok(SpecScanOutcome {
        l_files,
        report: builder_scan_report.build(),
    })
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::scan_tree;
    use crate::spec::{EnumScanPatternMode, ScanTreeError, SpecScanOptions};

    struct TestDir {
        path: PathBuf,
    }

    impl TestDir {
        fn new() -> Self {
            let n = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos();
            let path = std::env::temp_dir().join(format!("surveykit_scan_test_{n}"));
            std::fs::create_dir_all(&path).expect("create test dir");
            Self { path }
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for TestDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }

    fn write_text(path: &Path, txt: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, txt).expect("write text");
    }

    #[test]
    fn test_scan_tree_classifies_and_sorts() {
        let tmp = TestDir::new();
        write_text(
            &tmp.path().join("P030045_89up_European_Poll_Italy_wtd_Tables.xlsx"),
            "x",
        );
        write_text(
            &tmp.path().join("P030045_89up_European_Poll_France_wtd_Tables.xlsx"),
            "x",
        );
        write_text(&tmp.path().join("notes.xlsx"), "x");

        let outcome = scan_tree(tmp.path(), &SpecScanOptions::default()).expect("scan tree");

        let l_countries: Vec<&str> = outcome
            .l_files
            .iter()
            .map(|f| f.country.as_str())
            .collect();
        assert_eq!(l_countries, vec!["France", "Italy", "Unknown"]);
        assert_eq!(outcome.report.cnt_scanned, 3);
        assert_eq!(outcome.report.cnt_matched, 3);
        assert_eq!(outcome.report.cnt_classified, 2);
    }

    #[test]
    fn test_scan_tree_excludes_temp_and_foreign_files() {
        let tmp = TestDir::new();
        write_text(&tmp.path().join("survey.xlsx"), "x");
        write_text(&tmp.path().join("~$survey.xlsx"), "x");
        write_text(&tmp.path().join("survey.csv"), "x");

        let outcome = scan_tree(tmp.path(), &SpecScanOptions::default()).expect("scan tree");

        assert_eq!(outcome.l_files.len(), 1);
        assert_eq!(outcome.l_files[0].name_file, "survey.xlsx");
        assert_eq!(outcome.report.cnt_excluded, 2);
    }

    #[test]
    fn test_scan_tree_ignores_subdirectories() {
        let tmp = TestDir::new();
        write_text(&tmp.path().join("sub/nested.xlsx"), "x");
        write_text(&tmp.path().join("top.xlsx"), "x");

        let outcome = scan_tree(tmp.path(), &SpecScanOptions::default()).expect("scan tree");

        assert_eq!(outcome.l_files.len(), 1);
        assert_eq!(outcome.l_files[0].name_file, "top.xlsx");
    }

    #[test]
    fn test_scan_tree_missing_directory_rejected() {
        let tmp = TestDir::new();
        let err = scan_tree(tmp.path().join("absent"), &SpecScanOptions::default())
            .expect_err("must fail");
        assert!(matches!(err, ScanTreeError::SourceNotDirectory(_)));
    }

    #[test]
    fn test_scan_tree_invalid_glob_rejected() {
        let tmp = TestDir::new();
        let spec_scan_options = SpecScanOptions {
            patterns_include_files: Some(vec!["[".to_string()]),
            ..SpecScanOptions::default()
        };

        let err = scan_tree(tmp.path(), &spec_scan_options).expect_err("invalid glob must fail");
        assert!(matches!(err, ScanTreeError::InvalidPattern(_)));
    }

    #[test]
    fn test_scan_tree_regex_include_mode() {
        let tmp = TestDir::new();
        write_text(&tmp.path().join("report_01.xlsx"), "x");
        write_text(&tmp.path().join("summary.xlsx"), "x");

        let spec_scan_options = SpecScanOptions {
            patterns_include_files: Some(vec![r"^report_\d+\.xlsx$".to_string()]),
            patterns_exclude_files: None,
            rule_pattern: EnumScanPatternMode::Regex,
            ..SpecScanOptions::default()
        };
        let outcome = scan_tree(tmp.path(), &spec_scan_options).expect("scan tree");

        assert_eq!(outcome.l_files.len(), 1);
        assert_eq!(outcome.l_files[0].name_file, "report_01.xlsx");
    }
}
