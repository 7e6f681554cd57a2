//! Case-sheet writer: create a new file or overwrite data rows of an existing one.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::{info, warn};

use crate::conf::{C_SHEET_NAME_DEFAULT, N_ROW_DATA_START, TUP_CASE_HEADER};
use crate::reader::read_workbook_grid;
use crate::spec::{
    EnumCellValue, EnumSheetWriteMode, SheetError, SpecCellFormat, SpecSheetFormatPlan,
    SpecSheetGrid, SpecWorkbookGrid, SpecXlsxReport,
};
use crate::util::{
    cast_col_num, cast_row_num, derive_rust_xlsx_format, write_cell, write_cell_with_format,
};

/// Writer bound to one output workbook path.
///
/// Concurrent writers on the same path are not coordinated.
pub struct CaseSheetWriter {
    path_file_out: PathBuf,
}

impl CaseSheetWriter {
    /// Create writer bound to output path.
    pub fn new(path_file_out: impl Into<PathBuf>) -> Self {
        Self {
            path_file_out: path_file_out.into(),
        }
    }

    /// Write `rows` as data rows starting at sheet row 2.
    ///
    /// Missing file: a new sheet with the header row is created. Existing
    /// file: the active sheet is loaded and rows `2..` are overwritten in
    /// place; older rows below the last written one are left as they are.
    /// Either way the workbook is saved once, after all rows are placed.
    pub fn write_rows<S: AsRef<str>>(
        &self,
        rows: &[Vec<S>],
    ) -> Result<SpecXlsxReport, SheetError> {
        let mut report = SpecXlsxReport {
            path: self.path_file_out.clone(),
            n_rows_written: rows.len(),
            ..Default::default()
        };

        let grid = if self.path_file_out.exists() {
            report.mode = EnumSheetWriteMode::Overwritten;
            let mut grid = read_workbook_grid(&self.path_file_out)?;
            let sheet = grid
                .active_mut()
                .ok_or_else(|| SheetError::NoWorksheet(self.path_file_out.clone()))?;
            let n_rows_before = sheet.n_rows_used();

            for (n_idx_row, row) in rows.iter().enumerate() {
                for (n_idx_col, value) in row.iter().enumerate() {
                    sheet.set(
                        N_ROW_DATA_START + n_idx_row,
                        n_idx_col,
                        EnumCellValue::from(value.as_ref()),
                    );
                }
            }

            report.n_rows_stale = n_rows_before.saturating_sub(N_ROW_DATA_START + rows.len());
            if report.n_rows_stale > 0 {
                report.warn(format!(
                    "{} stale data row(s) left below row {}",
                    report.n_rows_stale,
                    N_ROW_DATA_START + rows.len()
                ));
            }
            grid
        } else {
            let mut sheet = SpecSheetGrid::new(C_SHEET_NAME_DEFAULT);
            sheet.append_row(&TUP_CASE_HEADER);
            for row in rows {
                sheet.append_row(row);
            }
            SpecWorkbookGrid {
                sheets: vec![sheet],
            }
        };

        save_workbook_grid(&self.path_file_out, &grid, None)?;

        for c_msg in &report.warnings {
            warn!(path = %self.path_file_out.display(), "{c_msg}");
        }
        info!(
            path = %self.path_file_out.display(),
            mode = ?report.mode,
            n_rows = report.n_rows_written,
            "case rows written"
        );
        Ok(report)
    }
}

/// Persist `grid` to `path`, applying `plan` to the active sheet when given.
///
/// Non-active sheets are written with values only.
pub fn save_workbook_grid(
    path: &Path,
    grid: &SpecWorkbookGrid,
    plan: Option<&SpecSheetFormatPlan>,
) -> Result<(), SheetError> {
    let mut workbook = Workbook::new();

    for (n_idx_sheet, sheet) in grid.sheets.iter().enumerate() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        match plan {
            Some(plan) if n_idx_sheet == 0 => write_sheet_formatted(worksheet, sheet, plan)?,
            _ => write_sheet_values(worksheet, sheet)?,
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn write_sheet_values(
    worksheet: &mut Worksheet,
    sheet: &SpecSheetGrid,
) -> Result<(), SheetError> {
    for (n_idx_row, cells) in sheet.rows.iter().enumerate() {
        for (n_idx_col, value) in cells.iter().enumerate() {
            write_cell(worksheet, n_idx_row, n_idx_col, value)?;
        }
    }
    Ok(())
}

fn write_sheet_formatted(
    worksheet: &mut Worksheet,
    sheet: &SpecSheetGrid,
    plan: &SpecSheetFormatPlan,
) -> Result<(), SheetError> {
    for (n_idx_row, n_height) in &plan.heights_by_row {
        worksheet.set_row_height(cast_row_num(*n_idx_row)?, *n_height)?;
    }
    for (n_idx_col, n_width) in plan.widths_by_col.iter().enumerate() {
        worksheet.set_column_width(cast_col_num(n_idx_col)?, *n_width)?;
    }

    let mut dict_format_cache: HashMap<&SpecCellFormat, Format> = HashMap::new();
    for (n_idx_row, l_fmts) in plan.fmts_by_cell.iter().enumerate() {
        for (n_idx_col, fmt_spec) in l_fmts.iter().enumerate() {
            let format = dict_format_cache
                .entry(fmt_spec)
                .or_insert_with(|| derive_rust_xlsx_format(fmt_spec));
            write_cell_with_format(
                worksheet,
                n_idx_row,
                n_idx_col,
                sheet.get(n_idx_row, n_idx_col),
                format,
            )?;
        }
    }

    // Cells outside the planned rectangle keep their values unformatted.
    for (n_idx_row, cells) in sheet.rows.iter().enumerate() {
        let n_cols_planned = plan.fmts_by_cell.get(n_idx_row).map_or(0, Vec::len);
        for (n_idx_col, value) in cells.iter().enumerate().skip(n_cols_planned) {
            write_cell(worksheet, n_idx_row, n_idx_col, value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rows_of(n_rows: usize, tag: &str) -> Vec<Vec<String>> {
        (0..n_rows)
            .map(|n| (0..15).map(|c| format!("{tag}{n}-{c}")).collect())
            .collect()
    }

    #[test]
    fn test_create_writes_header_then_rows() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("cases.xlsx");

        let report = CaseSheetWriter::new(&path)
            .write_rows(&rows_of(2, "r"))
            .expect("write");
        assert_eq!(report.mode, EnumSheetWriteMode::Created);
        assert_eq!(report.n_rows_written, 2);

        let grid = read_workbook_grid(&path).expect("read back");
        let sheet = grid.active().expect("sheet");
        assert_eq!(sheet.name, C_SHEET_NAME_DEFAULT);
        assert_eq!(sheet.n_rows_used(), 3);
        assert_eq!(sheet.get(0, 0).as_str(), Some("案例导入路径"));
        assert!(sheet.get(0, 5).is_empty());
        assert_eq!(sheet.row_text(2), rows_of(2, "r")[1]);
    }

    #[test]
    fn test_overwrite_keeps_stale_trailing_rows() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("cases.xlsx");
        let writer = CaseSheetWriter::new(&path);

        writer.write_rows(&rows_of(3, "a")).expect("first run");
        let report = writer.write_rows(&rows_of(2, "b")).expect("second run");
        assert_eq!(report.mode, EnumSheetWriteMode::Overwritten);
        assert_eq!(report.n_rows_stale, 1);
        assert_eq!(report.warnings.len(), 1);

        let grid = read_workbook_grid(&path).expect("read back");
        let sheet = grid.active().expect("sheet");
        assert_eq!(sheet.n_rows_used(), 4);
        assert_eq!(sheet.get(0, 1).as_str(), Some("子系统"));
        assert_eq!(sheet.row_text(1), rows_of(2, "b")[0]);
        assert_eq!(sheet.row_text(2), rows_of(2, "b")[1]);
        assert_eq!(sheet.row_text(3), rows_of(3, "a")[2]);
    }

    #[test]
    fn test_overwrite_blanks_cells_for_empty_fields() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("cases.xlsx");
        let writer = CaseSheetWriter::new(&path);

        writer.write_rows(&[vec!["x", "y", "z"]]).expect("first run");
        writer.write_rows(&[vec!["x", "", "z"]]).expect("second run");

        let grid = read_workbook_grid(&path).expect("read back");
        let sheet = grid.active().expect("sheet");
        assert!(sheet.get(1, 1).is_empty());
        assert_eq!(sheet.get(1, 2).as_str(), Some("z"));
    }

    #[test]
    fn test_save_keeps_secondary_sheets() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("multi.xlsx");

        let mut sheet_main = SpecSheetGrid::new("Cases");
        sheet_main.append_row(&["h"]);
        let mut sheet_notes = SpecSheetGrid::new("Notes");
        sheet_notes.set(0, 0, EnumCellValue::Number(3.0));
        sheet_notes.set(1, 1, EnumCellValue::Boolean(true));
        let grid = SpecWorkbookGrid {
            sheets: vec![sheet_main, sheet_notes],
        };
        save_workbook_grid(&path, &grid, None).expect("save");

        CaseSheetWriter::new(&path)
            .write_rows(&[vec!["v"]])
            .expect("overwrite");

        let grid_back = read_workbook_grid(&path).expect("read back");
        assert_eq!(grid_back.sheets.len(), 2);
        assert_eq!(grid_back.sheets[0].name, "Cases");
        assert_eq!(grid_back.sheets[0].get(1, 0).as_str(), Some("v"));
        assert_eq!(grid_back.sheets[1].name, "Notes");
        assert_eq!(grid_back.sheets[1].get(0, 0), &EnumCellValue::Number(3.0));
        assert_eq!(grid_back.sheets[1].get(1, 1), &EnumCellValue::Boolean(true));
    }
}
