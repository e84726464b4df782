//! Shared extraction models and options.

use std::collections::BTreeMap;

use crate::conf::{
    N_COL_IDX_LABEL, N_COL_IDX_RESPONSES_FIRST, N_COL_IDX_RESPONSES_LAST, N_COL_OFFSET_AGE,
    N_NROWS_SHEET_MIN, N_ROW_IDX_BANNER_1, N_ROW_IDX_BANNER_2, N_ROW_IDX_HEADER,
    N_ROW_IDX_QUESTIONS_FIRST, derive_default_age_brackets, derive_default_demographic_positions,
};

////////////////////////////////////////////////////////////////////////////////
// #region CellAndGrid

/// Normalized cell value inside a sheet grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumCellValue {
    /// Missing/blank value.
    #[default]
    None,
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(f64),
}

impl EnumCellValue {
    /// Whether the value carries no payload.
    pub fn is_empty(&self) -> bool {
        matches!(self, EnumCellValue::None)
    }

    /// Text payload when the value is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            EnumCellValue::Text(val) => Some(val.as_str()),
            _ => None,
        }
    }
}

/// Row-major in-memory sheet grid with absolute (row, column) addressing.
///
/// Owned exclusively by the extraction step; reads outside the populated
/// area yield [`EnumCellValue::None`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecSheetGrid {
    l_rows: Vec<Vec<EnumCellValue>>,
}

impl SpecSheetGrid {
    /// Build a grid from row-major cell values.
    pub fn from_rows(l_rows: Vec<Vec<EnumCellValue>>) -> Self {
        Self { l_rows }
    }

    /// Number of rows in the populated area.
    pub fn n_rows(&self) -> usize {
        self.l_rows.len()
    }

    /// Cell value at absolute position; `None` when out of range.
    pub fn value_at(&self, n_idx_row: usize, n_idx_col: usize) -> EnumCellValue {
        self.l_rows
            .get(n_idx_row)
            .and_then(|row| row.get(n_idx_col))
            .cloned()
            .unwrap_or(EnumCellValue::None)
    }

    /// Non-empty text at absolute position, when present.
    pub fn text_at(&self, n_idx_row: usize, n_idx_col: usize) -> Option<String> {
        match self.value_at(n_idx_row, n_idx_col) {
            EnumCellValue::Text(val) if !val.trim().is_empty() => Some(val),
            _ => None,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ExtractionOptions

/// Fixed-layout extraction options.
///
/// Defaults mirror the survey-export layout the toolkit was built for; all
/// offsets stay overridable so the layout contract lives in one place.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecExtractOptions {
    /// Header row index holding age-bracket texts.
    pub n_row_idx_header: usize,
    /// Row index of the first banner label cell.
    pub n_row_idx_banner_1: usize,
    /// Row index of the second banner label cell.
    pub n_row_idx_banner_2: usize,
    /// Row index where the question scan starts.
    pub n_row_idx_questions_first: usize,
    /// Minimum row count required before any extraction.
    pub n_nrows_sheet_min: usize,
    /// Column index of the label cell.
    pub n_col_idx_label: usize,
    /// First response column index (inclusive).
    pub n_col_idx_responses_first: usize,
    /// Last response column index (inclusive).
    pub n_col_idx_responses_last: usize,
    /// Offset applied to header-row hit positions.
    pub n_col_offset_age: usize,
    /// Closed canonical age-bracket vocabulary, in output order.
    pub l_age_brackets: Vec<String>,
    /// Fixed demographic response positions (label, sheet column).
    pub l_demographic_positions: Vec<(String, usize)>,
    /// Header-text aliases translated before bracket lookup.
    pub dict_header_aliases: BTreeMap<String, String>,
}

impl Default for SpecExtractOptions {
    fn default() -> Self {
        Self {
            n_row_idx_header: N_ROW_IDX_HEADER,
            n_row_idx_banner_1: N_ROW_IDX_BANNER_1,
            n_row_idx_banner_2: N_ROW_IDX_BANNER_2,
            n_row_idx_questions_first: N_ROW_IDX_QUESTIONS_FIRST,
            n_nrows_sheet_min: N_NROWS_SHEET_MIN,
            n_col_idx_label: N_COL_IDX_LABEL,
            n_col_idx_responses_first: N_COL_IDX_RESPONSES_FIRST,
            n_col_idx_responses_last: N_COL_IDX_RESPONSES_LAST,
            n_col_offset_age: N_COL_OFFSET_AGE,
            l_age_brackets: derive_default_age_brackets(),
            l_demographic_positions: derive_default_demographic_positions(),
            dict_header_aliases: BTreeMap::new(),
        }
    }
}

impl SpecExtractOptions {
    /// Output order of response dimension labels (demographics, then brackets).
    pub fn derive_response_labels(&self) -> Vec<String> {
        let mut l_labels: Vec<String> = self
            .l_demographic_positions
            .iter()
            .map(|(c_label, _)| c_label.clone())
            .collect();
        l_labels.extend(self.l_age_brackets.iter().cloned());
        l_labels
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region AgeColumnMap

/// Canonical bracket label to resolved sheet-column position.
///
/// Built once per sheet and read-only thereafter; `None` means the bracket
/// was not present in that sheet's header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecAgeColumnMap {
    dict_position_by_bracket: BTreeMap<String, Option<usize>>,
}

impl SpecAgeColumnMap {
    /// Build the map from (bracket, optional position) pairs.
    pub fn from_pairs(l_pairs: Vec<(String, Option<usize>)>) -> Self {
        Self {
            dict_position_by_bracket: l_pairs.into_iter().collect(),
        }
    }

    /// Resolved column position for one canonical bracket.
    pub fn position(&self, c_bracket: &str) -> Option<usize> {
        self.dict_position_by_bracket
            .get(c_bracket)
            .copied()
            .flatten()
    }

    /// Number of brackets resolved to a concrete position.
    pub fn n_resolved(&self) -> usize {
        self.dict_position_by_bracket
            .values()
            .filter(|pos| pos.is_some())
            .count()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RecordsAndMasterTable

/// One extracted row combined with its sheet context.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecExtractedRecord {
    /// Source country tag (possibly "Unknown").
    pub country: String,
    /// Source sheet name.
    pub sheet_name: String,
    /// Metric/question label of the row.
    pub label: String,
    /// Banner label pair read from the fixed header cells.
    pub banner_labels: (String, String),
    /// Ordered (dimension label, value) response pairs.
    pub responses: Vec<(String, EnumCellValue)>,
}

/// Consolidated record sequence spanning all processed sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecMasterTable {
    /// Records in source order (file, then sheet, then row).
    pub l_records: Vec<SpecExtractedRecord>,
}

impl SpecMasterTable {
    /// Number of consolidated records.
    pub fn n_records(&self) -> usize {
        self.l_records.len()
    }

    /// Output column labels: fixed lead columns, then response dimensions.
    pub fn derive_column_labels(options: &SpecExtractOptions) -> Vec<String> {
        let mut l_labels = vec![
            "Country".to_string(),
            "Sheet".to_string(),
            "Metric/Question".to_string(),
        ];
        l_labels.extend(options.derive_response_labels());
        l_labels
    }

    /// Materialize records as row-major output cells.
    pub fn derive_rows(&self) -> Vec<Vec<EnumCellValue>> {
        self.l_records
            .iter()
            .map(|record| {
                let mut l_row = vec![
                    EnumCellValue::Text(record.country.clone()),
                    EnumCellValue::Text(record.sheet_name.clone()),
                    EnumCellValue::Text(record.label.clone()),
                ];
                l_row.extend(record.responses.iter().map(|(_, value)| value.clone()));
                l_row
            })
            .collect()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
