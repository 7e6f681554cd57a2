//! Shared sheet models: cell formats, value grids, layout, reports and errors.

use std::collections::BTreeMap;
use std::path::PathBuf;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification; `None` leaves the property at Excel default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Text wrap.
    pub text_wrap: Option<bool>,

    /// Border style for all sides.
    pub border: Option<i64>,
    /// Border color for all sides (`#RRGGBB`).
    pub border_color: Option<String>,
    /// Solid background fill color (`#RRGGBB`).
    pub bg_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            text_wrap: other.text_wrap.or(self.text_wrap),
            border: other.border.or(self.border),
            border_color: other
                .border_color
                .clone()
                .or_else(|| self.border_color.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ValueGrid

/// Normalized cell value held in a sheet grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumCellValue {
    /// Missing/blank value.
    #[default]
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Boolean(bool),
}

impl EnumCellValue {
    /// Whether the cell holds nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, EnumCellValue::None)
    }

    /// Text content, if the cell holds text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EnumCellValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for EnumCellValue {
    /// Empty text maps to a blank cell.
    fn from(value: &str) -> Self {
        if value.is_empty() {
            EnumCellValue::None
        } else {
            EnumCellValue::String(value.to_string())
        }
    }
}

/// Values of one worksheet, addressed by zero-based `(row, col)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecSheetGrid {
    /// Worksheet name.
    pub name: String,
    /// Row-major cells; rows may be ragged.
    pub rows: Vec<Vec<EnumCellValue>>,
}

impl SpecSheetGrid {
    /// Empty sheet named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Cell at `(row, col)`; out-of-range cells read as blank.
    pub fn get(&self, row: usize, col: usize) -> &EnumCellValue {
        static BLANK: EnumCellValue = EnumCellValue::None;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&BLANK)
    }

    /// Overwrite `(row, col)`, growing the grid as needed.
    pub fn set(&mut self, row: usize, col: usize, value: EnumCellValue) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize_with(col + 1, Default::default);
        }
        cells[col] = value;
    }

    /// Write `values` into the row after the last used one.
    pub fn append_row<S: AsRef<str>>(&mut self, values: &[S]) {
        let n_row = self.n_rows_used();
        for (n_col, value) in values.iter().enumerate() {
            self.set(n_row, n_col, EnumCellValue::from(value.as_ref()));
        }
    }

    /// Number of rows up to and including the last one with a value.
    pub fn n_rows_used(&self) -> usize {
        self.rows
            .iter()
            .rposition(|cells| cells.iter().any(|cell| !cell.is_empty()))
            .map_or(0, |n_idx| n_idx + 1)
    }

    /// Number of columns up to and including the last one with a value.
    pub fn n_cols_used(&self) -> usize {
        self.rows
            .iter()
            .filter_map(|cells| cells.iter().rposition(|cell| !cell.is_empty()))
            .max()
            .map_or(0, |n_idx| n_idx + 1)
    }

    /// Text view of row `row` across the used columns.
    pub fn row_text(&self, row: usize) -> Vec<String> {
        (0..self.n_cols_used())
            .map(|col| match self.get(row, col) {
                EnumCellValue::None => String::new(),
                EnumCellValue::String(s) => s.clone(),
                EnumCellValue::Number(n) => n.to_string(),
                EnumCellValue::Boolean(b) => b.to_string(),
            })
            .collect()
    }
}

/// Values of every worksheet of a workbook, in tab order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecWorkbookGrid {
    /// Worksheets; the first one is the active sheet.
    pub sheets: Vec<SpecSheetGrid>,
}

impl SpecWorkbookGrid {
    /// The active (first) sheet.
    pub fn active(&self) -> Option<&SpecSheetGrid> {
        self.sheets.first()
    }

    /// Mutable active (first) sheet.
    pub fn active_mut(&mut self) -> Option<&mut SpecSheetGrid> {
        self.sheets.first_mut()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region LayoutSpecification

/// Fixed presentation of a test-case sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecCaseSheetLayout {
    /// Height of the header row.
    pub height_header: f64,
    /// Column letters for natural-language fields.
    pub cols_wide: Vec<String>,
    /// Width of the wide columns.
    pub width_wide: f64,
    /// Column letter of the subsystem field.
    pub col_medium: String,
    /// Width of the medium column.
    pub width_medium: f64,
    /// Width of every other used column.
    pub width_default: f64,
    /// First 1-based column whose body cells are centred.
    pub col_center_from: usize,
    /// Header cell format.
    pub fmt_header: SpecCellFormat,
    /// Body cell format left of `col_center_from`.
    pub fmt_body: SpecCellFormat,
    /// Body cell format from `col_center_from` on.
    pub fmt_body_center: SpecCellFormat,
    /// Patch applied to odd-numbered body rows.
    pub fmt_stripe: SpecCellFormat,
}

/// Concrete per-cell formatting for one sheet, derived from a layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecSheetFormatPlan {
    /// Explicit row heights by zero-based row.
    pub heights_by_row: BTreeMap<usize, f64>,
    /// Width of every used column, zero-based.
    pub widths_by_col: Vec<f64>,
    /// Format of every cell in the used rectangle, row-major.
    pub fmts_by_cell: Vec<Vec<SpecCellFormat>>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// How the writer treated the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumSheetWriteMode {
    /// New file with a header row.
    #[default]
    Created,
    /// Existing file whose data rows were overwritten from row 2.
    Overwritten,
}

/// Per-write call report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Output path.
    pub path: PathBuf,
    /// Create or overwrite.
    pub mode: EnumSheetWriteMode,
    /// Number of data rows written.
    pub n_rows_written: usize,
    /// Previously present data rows left untouched below the written ones.
    pub n_rows_stale: usize,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failures raised while reading, writing or formatting a sheet.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    /// rust_xlsxwriter rejected an operation or the save failed.
    #[error("xlsx write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
    /// calamine could not read the existing workbook.
    #[error("xlsx read error: {0}")]
    Read(#[from] calamine::XlsxError),
    /// Existing workbook contains no worksheet.
    #[error("workbook has no worksheet: {}", .0.display())]
    NoWorksheet(PathBuf),
    /// Row/column index beyond Excel limits.
    #[error("{0}")]
    IndexOverflow(String),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_patch_values() {
        let base = SpecCellFormat {
            border: Some(1),
            align: Some("left".to_string()),
            ..Default::default()
        };
        let merged = base.with_(SpecCellFormat {
            align: Some("center".to_string()),
            bg_color: Some("#CCFFCC".to_string()),
            ..Default::default()
        });
        assert_eq!(merged.border, Some(1));
        assert_eq!(merged.align.as_deref(), Some("center"));
        assert_eq!(merged.bg_color.as_deref(), Some("#CCFFCC"));
    }

    #[test]
    fn test_grid_extent_ignores_trailing_blanks() {
        let mut grid = SpecSheetGrid::new("Sheet");
        grid.append_row(&["a", "b", ""]);
        grid.set(3, 1, EnumCellValue::None);
        assert_eq!(grid.n_rows_used(), 1);
        assert_eq!(grid.n_cols_used(), 2);

        grid.append_row(&["", "", "", "x"]);
        assert_eq!(grid.n_rows_used(), 2);
        assert_eq!(grid.n_cols_used(), 4);
        assert_eq!(grid.row_text(1), vec!["", "", "", "x"]);
    }

    #[test]
    fn test_set_overwrites_and_grows() {
        let mut grid = SpecSheetGrid::new("Sheet");
        grid.set(2, 3, EnumCellValue::from("v"));
        assert_eq!(grid.get(2, 3).as_str(), Some("v"));
        assert!(grid.get(0, 0).is_empty());
        assert!(grid.get(10, 10).is_empty());

        grid.set(2, 3, EnumCellValue::from(""));
        assert_eq!(grid.n_rows_used(), 0);
    }
}
