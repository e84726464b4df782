//! Fixed-offset table extraction with per-unit skip reporting.

use crate::conf::{C_LABEL_BANNER_1_UNKNOWN, C_LABEL_BANNER_2_UNKNOWN};
use crate::normalize::derive_age_column_map;
use crate::report::{EnumExtractSkipReason, ReportExtractBuilder};
use crate::spec::{
    EnumCellValue, SpecAgeColumnMap, SpecExtractOptions, SpecExtractedRecord, SpecSheetGrid,
};

/// Extract all records from one target sheet grid.
///
/// Applies the fixed layout contract:
/// 1. Structural gate: fewer than `n_nrows_sheet_min` rows rejects the
///    sheet with a recorded skip; nothing beyond the grid is ever read.
/// 2. Banner labels are read from the two fixed cells, with positional
///    placeholders substituted for empty/absent cells.
/// 3. The two banner rows are emitted as records themselves; an absent
///    banner row is a row-granularity skip, not a sheet failure.
/// 4. Rows from `n_row_idx_questions_first` onward are emitted only when
///    the validity rule holds (textual label plus at least one non-empty
///    response cell); invalid rows are expected noise and stay silent.
///
/// Failures never escape this function; they land in `builder`.
pub fn extract_table(
    grid: &SpecSheetGrid,
    sheet_name: &str,
    country: &str,
    options: &SpecExtractOptions,
    builder: &mut ReportExtractBuilder,
) -> Vec<SpecExtractedRecord> {
    let n_rows = grid.n_rows();
    if n_rows < options.n_nrows_sheet_min {
        builder.add_sheet_skip(
            sheet_name,
            EnumExtractSkipReason::NotEnoughRows {
                n_rows,
                n_rows_min: options.n_nrows_sheet_min,
            },
        );
        return vec![];
    }

    let map_age = derive_age_column_map(grid, options);
    let banner_labels = derive_banner_labels(grid, sheet_name, options, builder);

    let mut l_records = Vec::new();

    for (n_row_idx, c_label_banner) in [
        (options.n_row_idx_banner_1, banner_labels.0.clone()),
        (options.n_row_idx_banner_2, banner_labels.1.clone()),
    ] {
        if n_row_idx >= n_rows {
            builder.add_row_skip(
                sheet_name,
                n_row_idx,
                EnumExtractSkipReason::BannerRowAbsent { n_row_idx },
            );
            continue;
        }
        l_records.push(SpecExtractedRecord {
            country: country.to_string(),
            sheet_name: sheet_name.to_string(),
            label: c_label_banner,
            banner_labels: banner_labels.clone(),
            responses: collect_responses(grid, n_row_idx, options, &map_age),
        });
        builder.add_record_banner();
    }

    for n_row_idx in options.n_row_idx_questions_first..n_rows {
        let Some(c_label) = grid.text_at(n_row_idx, options.n_col_idx_label) else {
            continue;
        };
        if !is_any_response_present(grid, n_row_idx, options) {
            continue;
        }
        l_records.push(SpecExtractedRecord {
            country: country.to_string(),
            sheet_name: sheet_name.to_string(),
            label: c_label,
            banner_labels: banner_labels.clone(),
            responses: collect_responses(grid, n_row_idx, options, &map_age),
        });
        builder.add_record_question();
    }

    builder.add_sheet_extracted();
    l_records
}

/// Read the banner label pair, substituting placeholders when degraded.
fn derive_banner_labels(
    grid: &SpecSheetGrid,
    sheet_name: &str,
    options: &SpecExtractOptions,
    builder: &mut ReportExtractBuilder,
) -> (String, String) {
    let mut derive_one = |n_row_idx: usize, c_placeholder: &str| -> String {
        match grid.text_at(n_row_idx, options.n_col_idx_label) {
            Some(c_text) => c_text,
            None => {
                builder.add_warning(format!(
                    "Banner label missing in {sheet_name:?} at row {n_row_idx}; \
                     substituted {c_placeholder:?}."
                ));
                c_placeholder.to_string()
            }
        }
    };

    (
        derive_one(options.n_row_idx_banner_1, C_LABEL_BANNER_1_UNKNOWN),
        derive_one(options.n_row_idx_banner_2, C_LABEL_BANNER_2_UNKNOWN),
    )
}

/// Validity-rule response test: any non-empty cell in the response range.
fn is_any_response_present(
    grid: &SpecSheetGrid,
    n_row_idx: usize,
    options: &SpecExtractOptions,
) -> bool {
    (options.n_col_idx_responses_first..=options.n_col_idx_responses_last)
        .any(|n_idx_col| !grid.value_at(n_row_idx, n_idx_col).is_empty())
}

/// Collect one row's ordered responses: fixed demographics, then brackets.
fn collect_responses(
    grid: &SpecSheetGrid,
    n_row_idx: usize,
    options: &SpecExtractOptions,
    map_age: &SpecAgeColumnMap,
) -> Vec<(String, EnumCellValue)> {
    let mut l_responses = Vec::with_capacity(
        options.l_demographic_positions.len() + options.l_age_brackets.len(),
    );

    for (c_label, n_idx_col) in &options.l_demographic_positions {
        l_responses.push((c_label.clone(), grid.value_at(n_row_idx, *n_idx_col)));
    }
    for c_bracket in &options.l_age_brackets {
        let value = match map_age.position(c_bracket) {
            Some(n_idx_col) => grid.value_at(n_row_idx, n_idx_col),
            None => EnumCellValue::None,
        };
        l_responses.push((c_bracket.clone(), value));
    }

    l_responses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SpecExtractSkip;

    const N_COLS_TEST: usize = 16;

    fn derive_blank_grid_rows(n_rows: usize) -> Vec<Vec<EnumCellValue>> {
        vec![vec![EnumCellValue::None; N_COLS_TEST]; n_rows]
    }

    fn set_text(l_rows: &mut [Vec<EnumCellValue>], n_row: usize, n_col: usize, c_text: &str) {
        l_rows[n_row][n_col] = EnumCellValue::Text(c_text.to_string());
    }

    fn set_number(l_rows: &mut [Vec<EnumCellValue>], n_row: usize, n_col: usize, value: f64) {
        l_rows[n_row][n_col] = EnumCellValue::Number(value);
    }

    /// Well-formed 12-row fixture: header texts, banner labels/values, one
    /// valid question row and one all-empty question row.
    fn derive_well_formed_rows() -> Vec<Vec<EnumCellValue>> {
        let mut l_rows = derive_blank_grid_rows(12);
        set_text(&mut l_rows, 6, 2, "Total Resp");
        set_text(&mut l_rows, 6, 3, "Male");
        set_text(&mut l_rows, 6, 4, "Female");
        set_text(&mut l_rows, 6, 5, "18-24");
        set_text(&mut l_rows, 6, 6, "25-34");

        set_text(&mut l_rows, 8, 1, "Age");
        set_number(&mut l_rows, 8, 2, 1000.0);
        set_text(&mut l_rows, 9, 1, "Income");
        set_number(&mut l_rows, 9, 2, 980.0);

        set_text(&mut l_rows, 10, 1, "Q1");
        set_number(&mut l_rows, 10, 2, 1.0);
        set_number(&mut l_rows, 10, 5, 3.0);
        // Row 11: label without any response value.
        set_text(&mut l_rows, 11, 1, "Q2");
        l_rows
    }

    #[test]
    fn test_short_sheet_yields_structural_skip_and_no_records() {
        let grid = SpecSheetGrid::from_rows(derive_blank_grid_rows(5));
        let mut builder = ReportExtractBuilder::default();

        let l_records = extract_table(
            &grid,
            "Table 196",
            "France",
            &SpecExtractOptions::default(),
            &mut builder,
        );

        assert!(l_records.is_empty());
        let report = builder.build();
        assert_eq!(report.cnt_sheets_skipped, 1);
        assert_eq!(
            report.l_skips,
            vec![SpecExtractSkip {
                sheet_name: "Table 196".to_string(),
                n_row_idx: None,
                reason: EnumExtractSkipReason::NotEnoughRows {
                    n_rows: 5,
                    n_rows_min: 7,
                },
            }]
        );
    }

    #[test]
    fn test_well_formed_sheet_emits_banner_and_question_records() {
        let grid = SpecSheetGrid::from_rows(derive_well_formed_rows());
        let mut builder = ReportExtractBuilder::default();

        let l_records = extract_table(
            &grid,
            "Table 196",
            "France",
            &SpecExtractOptions::default(),
            &mut builder,
        );

        assert_eq!(l_records.len(), 3);
        assert_eq!(l_records[0].label, "Age");
        assert_eq!(l_records[1].label, "Income");
        assert_eq!(l_records[2].label, "Q1");
        assert_eq!(
            l_records[2].banner_labels,
            ("Age".to_string(), "Income".to_string())
        );
        assert_eq!(l_records[2].country, "France");

        // Q1 responses: Total Resp from column 2, "18-24" resolved to column 5.
        let dict_responses: std::collections::BTreeMap<_, _> =
            l_records[2].responses.iter().cloned().collect();
        assert_eq!(
            dict_responses["Total Resp"],
            EnumCellValue::Number(1.0)
        );
        assert_eq!(dict_responses["18-24"], EnumCellValue::Number(3.0));
        assert_eq!(dict_responses["25-34"], EnumCellValue::None);
        assert_eq!(dict_responses["NET: 35+"], EnumCellValue::None);

        let report = builder.build();
        assert_eq!(report.cnt_records_banner, 2);
        assert_eq!(report.cnt_records_question, 1);
        assert_eq!(report.cnt_sheets_extracted, 1);
        assert!(report.l_skips.is_empty());
    }

    #[test]
    fn test_rows_failing_validity_rule_are_silently_rejected() {
        let mut l_rows = derive_well_formed_rows();
        // Numeric label cell: not text, rejected even with response values.
        set_number(&mut l_rows, 11, 1, 42.0);
        set_number(&mut l_rows, 11, 2, 9.0);
        let grid = SpecSheetGrid::from_rows(l_rows);
        let mut builder = ReportExtractBuilder::default();

        let l_records = extract_table(
            &grid,
            "Table 196",
            "France",
            &SpecExtractOptions::default(),
            &mut builder,
        );

        assert_eq!(l_records.len(), 3);
        assert!(builder.build().l_skips.is_empty());
    }

    #[test]
    fn test_missing_banner_cells_fall_back_to_placeholders() {
        let mut l_rows = derive_well_formed_rows();
        l_rows[8][1] = EnumCellValue::None;
        l_rows[9][1] = EnumCellValue::None;
        let grid = SpecSheetGrid::from_rows(l_rows);
        let mut builder = ReportExtractBuilder::default();

        let l_records = extract_table(
            &grid,
            "Table 197",
            "Italy",
            &SpecExtractOptions::default(),
            &mut builder,
        );

        assert_eq!(l_records[0].label, "Unknown_1");
        assert_eq!(l_records[1].label, "Unknown_2");
        assert_eq!(
            l_records[2].banner_labels,
            ("Unknown_1".to_string(), "Unknown_2".to_string())
        );
        assert_eq!(builder.build().warnings.len(), 2);
    }

    #[test]
    fn test_seven_row_sheet_passes_gate_but_skips_absent_banner_rows() {
        let mut l_rows = derive_blank_grid_rows(7);
        set_text(&mut l_rows, 6, 2, "18-24");
        let grid = SpecSheetGrid::from_rows(l_rows);
        let mut builder = ReportExtractBuilder::default();

        let l_records = extract_table(
            &grid,
            "Table 196",
            "Spain",
            &SpecExtractOptions::default(),
            &mut builder,
        );

        assert!(l_records.is_empty());
        let report = builder.build();
        assert_eq!(report.cnt_sheets_skipped, 0);
        assert_eq!(report.l_skips.len(), 2);
        assert!(report.l_skips.iter().all(|skip| matches!(
            skip.reason,
            EnumExtractSkipReason::BannerRowAbsent { .. }
        )));
    }

    #[test]
    fn test_re_extraction_is_idempotent() {
        let grid = SpecSheetGrid::from_rows(derive_well_formed_rows());
        let options = SpecExtractOptions::default();

        let mut builder_first = ReportExtractBuilder::default();
        let l_first = extract_table(&grid, "Table 196", "France", &options, &mut builder_first);
        let mut builder_second = ReportExtractBuilder::default();
        let l_second = extract_table(&grid, "Table 196", "France", &options, &mut builder_second);

        assert_eq!(l_first, l_second);
        assert_eq!(builder_first.build(), builder_second.build());
    }
}
