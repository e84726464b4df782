//! Master-table workbook writer on rust_xlsxwriter.

use std::collections::BTreeSet;
use std::path::PathBuf;

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

use surveykit_extract::spec::EnumCellValue;

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    derive_default_body_format, derive_default_header_format,
};
use crate::spec::{SpecAutofitPolicy, SpecCellFormat, SpecWriteValuePolicy, SpecXlsxSheetReport};
use crate::util::{cast_col_num, cast_row_num, estimate_text_width, sanitize_sheet_name};

/// Stateful workbook writer.
///
/// The workbook is buffered in memory until [`Self::close`] is called;
/// each sheet write appends a [`SpecXlsxSheetReport`].
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    fmt_header: SpecCellFormat,
    fmt_body: SpecCellFormat,
    value_policy: SpecWriteValuePolicy,
    policy_autofit: SpecAutofitPolicy,
    set_sheet_names_existing: BTreeSet<String>,
    l_reports: Vec<SpecXlsxSheetReport>,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create a writer bound to an output path with default presets.
    pub fn new(path_file_out: PathBuf) -> Self {
        Self::with_presets(
            path_file_out,
            derive_default_header_format(),
            derive_default_body_format(),
            SpecWriteValuePolicy::default(),
            SpecAutofitPolicy::default(),
        )
    }

    /// Create a writer with explicit format and policy presets.
    pub fn with_presets(
        path_file_out: PathBuf,
        fmt_header: SpecCellFormat,
        fmt_body: SpecCellFormat,
        value_policy: SpecWriteValuePolicy,
        policy_autofit: SpecAutofitPolicy,
    ) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            fmt_header,
            fmt_body,
            value_policy,
            policy_autofit,
            set_sheet_names_existing: BTreeSet::new(),
            l_reports: Vec::new(),
            if_closed: false,
        }
    }

    /// Return output file path as string.
    pub fn file_out(&self) -> String {
        self.path_file_out.to_string_lossy().to_string()
    }

    /// Return immutable snapshot of per-sheet write reports.
    pub fn report(&self) -> Vec<SpecXlsxSheetReport> {
        self.l_reports.clone()
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), String> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook
            .save(&self.path_file_out)
            .map_err(derive_xlsx_error_text)?;
        self.if_closed = true;
        Ok(())
    }

    /// Write one sheet: a header row of column labels, then body rows.
    ///
    /// Body rows shorter than the header are padded with missing values;
    /// missing values are rendered per the writer value policy. Column
    /// widths are autofit from header and body text widths.
    pub fn write_sheet(
        &mut self,
        sheet_name: &str,
        l_column_labels: &[String],
        l_rows: &[Vec<EnumCellValue>],
    ) -> Result<(), String> {
        if self.if_closed {
            return Err("Cannot write after close().".to_string());
        }

        let n_cols = l_column_labels.len();
        if n_cols == 0 {
            return Err("Sheet needs at least one column label.".to_string());
        }
        if n_cols > N_NCOLS_EXCEL_MAX {
            return Err(format!(
                "Too many columns for one worksheet: {n_cols} > {N_NCOLS_EXCEL_MAX}."
            ));
        }
        if l_rows.len() + 1 > N_NROWS_EXCEL_MAX {
            return Err(format!(
                "Too many rows for one worksheet: {} > {}.",
                l_rows.len() + 1,
                N_NROWS_EXCEL_MAX - 1
            ));
        }
        if let Some(l_row_wide) = l_rows.iter().find(|l_row| l_row.len() > n_cols) {
            return Err(format!(
                "Row wider than header: {} > {n_cols}.",
                l_row_wide.len()
            ));
        }

        let sheet_name_unique =
            self.derive_unique_sheet_name(&sanitize_sheet_name(sheet_name, '_'));
        let fmt_header = derive_rust_xlsx_format(&self.fmt_header);
        let fmt_body = derive_rust_xlsx_format(&self.fmt_body);

        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&sheet_name_unique)
            .map_err(derive_xlsx_error_text)?;

        let mut l_width_by_col = vec![0usize; n_cols];

        for (n_idx_col, c_label) in l_column_labels.iter().enumerate() {
            l_width_by_col[n_idx_col] = estimate_text_width(c_label);
            worksheet
                .write_string_with_format(0, cast_col_num(n_idx_col)?, c_label, &fmt_header)
                .map_err(derive_xlsx_error_text)?;
        }

        for (n_idx_row, l_row) in l_rows.iter().enumerate() {
            for n_idx_col in 0..n_cols {
                let value = l_row.get(n_idx_col).unwrap_or(&EnumCellValue::None);
                let n_width = write_cell_with_format(
                    worksheet,
                    n_idx_row + 1,
                    n_idx_col,
                    value,
                    &fmt_body,
                    &self.value_policy,
                )?;
                l_width_by_col[n_idx_col] = usize::max(l_width_by_col[n_idx_col], n_width);
            }
        }

        let n_min = usize::max(1, self.policy_autofit.width_cell_min);
        let n_max = usize::min(
            255,
            usize::max(n_min, self.policy_autofit.width_cell_max),
        );
        let n_pad = self.policy_autofit.width_cell_padding;
        for (n_idx_col, n_width_recorded) in l_width_by_col.iter().enumerate() {
            let n_width_final = usize::min(n_max, usize::max(n_min, n_width_recorded + n_pad));
            worksheet
                .set_column_width(cast_col_num(n_idx_col)?, n_width_final as f64)
                .map_err(derive_xlsx_error_text)?;
        }

        self.l_reports.push(SpecXlsxSheetReport {
            sheet_name: sheet_name_unique,
            cnt_rows_written: l_rows.len() as u64 + 1,
            cnt_cols_written: n_cols as u64,
        });
        Ok(())
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        if !self.set_sheet_names_existing.contains(name) {
            self.set_sheet_names_existing.insert(name.to_string());
            return name.to_string();
        }

        let base_name: String = name
            .chars()
            .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
            .collect();

        let mut n_idx = 2usize;
        loop {
            let candidate: String = format!("{base_name}__{n_idx}")
                .chars()
                .take(N_LEN_EXCEL_SHEET_NAME_MAX)
                .collect();
            if !self.set_sheet_names_existing.contains(&candidate) {
                self.set_sheet_names_existing.insert(candidate.clone());
                return candidate;
            }
            n_idx += 1;
        }
    }
}

/// Write one body cell; returns its estimated display width.
fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
    value_policy: &SpecWriteValuePolicy,
) -> Result<usize, String> {
    match value {
        EnumCellValue::None => {
            worksheet
                .write_string_with_format(
                    cast_row_num(row_idx)?,
                    cast_col_num(col_idx)?,
                    &value_policy.missing_value_str,
                    format,
                )
                .map_err(derive_xlsx_error_text)?;
            Ok(estimate_text_width(&value_policy.missing_value_str))
        }
        EnumCellValue::Text(val) => {
            worksheet
                .write_string_with_format(
                    cast_row_num(row_idx)?,
                    cast_col_num(col_idx)?,
                    val,
                    format,
                )
                .map_err(derive_xlsx_error_text)?;
            Ok(estimate_text_width(val))
        }
        EnumCellValue::Number(val) => {
            worksheet
                .write_number_with_format(
                    cast_row_num(row_idx)?,
                    cast_col_num(col_idx)?,
                    *val,
                    format,
                )
                .map_err(derive_xlsx_error_text)?;
            Ok(val.to_string().len())
        }
    }
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }
    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        0 => FormatBorder::None,
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    match align.trim().to_ascii_lowercase().as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        _ => None,
    }
}

fn derive_xlsx_error_text(err: XlsxError) -> String {
    format!("xlsx write error: {err}")
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    struct TestDir {
        path: PathBuf,
    }

    impl TestDir {
        fn new() -> Self {
            let n = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos();
            let path = std::env::temp_dir().join(format!("surveykit_writer_test_{n}"));
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

    fn derive_column_labels() -> Vec<String> {
        ["Country", "Metric/Question", "Total Resp"]
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_write_sheet_and_close_produces_file() {
        let tmp = TestDir::new();
        let path_file = tmp.path().join("master.xlsx");
        let mut writer = XlsxWriter::new(path_file.clone());

        let l_rows = vec![
            vec![
                EnumCellValue::Text("France".to_string()),
                EnumCellValue::Text("Q1".to_string()),
                EnumCellValue::Number(1000.0),
            ],
            vec![
                EnumCellValue::Text("Italy".to_string()),
                EnumCellValue::Text("Q1".to_string()),
                EnumCellValue::None,
            ],
        ];
        writer
            .write_sheet("Master", &derive_column_labels(), &l_rows)
            .expect("write sheet");
        writer.close().expect("close");
        writer.close().expect("close is idempotent");

        assert!(path_file.exists());
        let l_reports = writer.report();
        assert_eq!(l_reports.len(), 1);
        assert_eq!(l_reports[0].sheet_name, "Master");
        assert_eq!(l_reports[0].cnt_rows_written, 3);
        assert_eq!(l_reports[0].cnt_cols_written, 3);
    }

    #[test]
    fn test_write_after_close_is_rejected() {
        let tmp = TestDir::new();
        let mut writer = XlsxWriter::new(tmp.path().join("master.xlsx"));
        writer.close().expect("close");

        let err = writer
            .write_sheet("Master", &derive_column_labels(), &[])
            .expect_err("must fail");
        assert!(err.contains("after close"));
    }

    #[test]
    fn test_duplicate_sheet_names_are_made_unique() {
        let tmp = TestDir::new();
        let mut writer = XlsxWriter::new(tmp.path().join("master.xlsx"));

        writer
            .write_sheet("Master", &derive_column_labels(), &[])
            .expect("write first");
        writer
            .write_sheet("Master", &derive_column_labels(), &[])
            .expect("write second");
        writer.close().expect("close");

        let l_names: Vec<String> = writer
            .report()
            .into_iter()
            .map(|r| r.sheet_name)
            .collect();
        assert_eq!(l_names, vec!["Master".to_string(), "Master__2".to_string()]);
    }

    #[test]
    fn test_row_wider_than_header_is_rejected() {
        let tmp = TestDir::new();
        let mut writer = XlsxWriter::new(tmp.path().join("master.xlsx"));

        let l_rows = vec![vec![EnumCellValue::None; 4]];
        let err = writer
            .write_sheet("Master", &derive_column_labels(), &l_rows)
            .expect_err("must fail");
        assert!(err.contains("wider than header"));
    }

    #[test]
    fn test_missing_values_render_policy_text() {
        let tmp = TestDir::new();
        let path_file = tmp.path().join("master.xlsx");
        let mut writer = XlsxWriter::new(path_file.clone());
        let l_rows = vec![vec![
            EnumCellValue::Text("France".to_string()),
            EnumCellValue::None,
            EnumCellValue::None,
        ]];
        writer
            .write_sheet("Master", &derive_column_labels(), &l_rows)
            .expect("write sheet");
        writer.close().expect("close");

        let mut reader =
            crate::reader::SpecWorkbookReader::open(&path_file).expect("reopen output");
        let grid = reader.read_sheet_grid("Master").expect("read grid");
        assert_eq!(grid.text_at(1, 1), Some("N/A".to_string()));
        assert_eq!(grid.text_at(1, 2), Some("N/A".to_string()));
        assert_eq!(grid.text_at(0, 0), Some("Country".to_string()));
    }
}
