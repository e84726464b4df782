//! Workbook opening and sheet-grid materialization on calamine.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};

use surveykit_extract::spec::{EnumCellValue, SpecSheetGrid};

/// One open workbook, materializing one target sheet grid at a time.
///
/// Failures are returned as values so the caller can contain them at
/// file/sheet granularity without aborting the enclosing run.
pub struct SpecWorkbookReader {
    workbook: Xlsx<BufReader<File>>,
}

impl SpecWorkbookReader {
    /// Open a workbook file.
    pub fn open<P>(path_file: P) -> Result<Self, String>
    where
        P: AsRef<Path>,
    {
        let workbook = open_workbook(path_file.as_ref())
            .map_err(|e| format!("Failed to open workbook: {e}"))?;
        Ok(Self { workbook })
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// Materialize one sheet into an absolute-addressed grid.
    ///
    /// The grid spans rows/columns from the origin through the last used
    /// cell, so fixed-offset extraction addresses cells exactly as laid
    /// out in the workbook even when the used area starts late.
    pub fn read_sheet_grid(&mut self, sheet_name: &str) -> Result<SpecSheetGrid, String> {
        let range = self
            .workbook
            .worksheet_range(sheet_name)
            .map_err(|e| format!("Failed to read sheet {sheet_name:?}: {e}"))?;

        let Some((n_row_end, n_col_end)) = range.end() else {
            return Ok(SpecSheetGrid::default());
        };
        let n_rows = n_row_end as usize + 1;
        let n_cols = n_col_end as usize + 1;

        let mut l_rows = Vec::with_capacity(n_rows);
        for n_idx_row in 0..n_rows {
            let mut l_cells = Vec::with_capacity(n_cols);
            for n_idx_col in 0..n_cols {
                let value = range
                    .get_value((n_idx_row as u32, n_idx_col as u32))
                    .map_or(EnumCellValue::None, derive_cell_value_from_data);
                l_cells.push(value);
            }
            l_rows.push(l_cells);
        }

        Ok(SpecSheetGrid::from_rows(l_rows))
    }
}

/// Normalize one calamine cell into the extraction cell model.
fn derive_cell_value_from_data(data: &Data) -> EnumCellValue {
    match data {
        Data::Empty => EnumCellValue::None,
        Data::String(val) => {
            if val.is_empty() {
                EnumCellValue::None
            } else {
                EnumCellValue::Text(val.clone())
            }
        }
        Data::Float(val) => EnumCellValue::Number(*val),
        Data::Int(val) => EnumCellValue::Number(*val as f64),
        Data::Bool(val) => EnumCellValue::Text(if *val { "True" } else { "False" }.to_string()),
        Data::DateTime(val) => EnumCellValue::Number(val.as_f64()),
        Data::DateTimeIso(val) => EnumCellValue::Text(val.clone()),
        Data::DurationIso(val) => EnumCellValue::Text(val.clone()),
        Data::Error(_) => EnumCellValue::None,
    }
}
