//! Shared workbook-write specification models.

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification covering the properties the writer emits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Horizontal alignment.
    pub align: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Number format code.
    pub num_format: Option<String>,
}

impl SpecCellFormat {
    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            border: other.border.or(self.border),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WritePolicies

/// Value conversion policy for missing cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecWriteValuePolicy {
    /// Replacement text written for a missing value.
    pub missing_value_str: String,
}

impl Default for SpecWriteValuePolicy {
    fn default() -> Self {
        Self {
            missing_value_str: "N/A".to_string(),
        }
    }
}

/// Column autofit policy (header- and body-width based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecAutofitPolicy {
    /// Minimum final width.
    pub width_cell_min: usize,
    /// Maximum final width.
    pub width_cell_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
}

impl Default for SpecAutofitPolicy {
    fn default() -> Self {
        Self {
            width_cell_min: 8,
            width_cell_max: 60,
            width_cell_padding: 2,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-sheet write report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxSheetReport {
    /// Actual unique sheet name in the workbook.
    pub sheet_name: String,
    /// Rows written including the header row.
    pub cnt_rows_written: u64,
    /// Columns written.
    pub cnt_cols_written: u64,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
