//! Load an existing workbook into value grids via calamine.

use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::spec::{EnumCellValue, SheetError, SpecSheetGrid, SpecWorkbookGrid};

/// Read cell values of every worksheet of `path`, in tab order.
///
/// Styles are not carried over; the beautifier recomputes them.
pub fn read_workbook_grid(path: &Path) -> Result<SpecWorkbookGrid, SheetError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let mut l_sheets = Vec::new();
    for c_sheet_name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&c_sheet_name)?;
        l_sheets.push(derive_sheet_grid(&c_sheet_name, &range));
    }

    if l_sheets.is_empty() {
        return Err(SheetError::NoWorksheet(path.to_path_buf()));
    }

    debug!(
        path = %path.display(),
        n_sheets = l_sheets.len(),
        "workbook loaded"
    );
    Ok(SpecWorkbookGrid { sheets: l_sheets })
}

fn derive_sheet_grid(name: &str, range: &Range<Data>) -> SpecSheetGrid {
    let mut grid = SpecSheetGrid::new(name);
    let Some((n_row_start, n_col_start)) = range.start() else {
        return grid;
    };

    for (n_row_rel, n_col_rel, value) in range.used_cells() {
        grid.set(
            n_row_start as usize + n_row_rel,
            n_col_start as usize + n_col_rel,
            derive_cell_value(value),
        );
    }
    grid
}

fn derive_cell_value(value: &Data) -> EnumCellValue {
    match value {
        Data::Empty => EnumCellValue::None,
        Data::String(s) => EnumCellValue::from(s.as_str()),
        Data::Float(f) => EnumCellValue::Number(*f),
        Data::Int(i) => EnumCellValue::Number(*i as f64),
        Data::Bool(b) => EnumCellValue::Boolean(*b),
        other => EnumCellValue::from(other.to_string().as_str()),
    }
}
