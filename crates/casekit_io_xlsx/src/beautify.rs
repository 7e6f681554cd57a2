//! Cosmetic pass over a written case sheet.
//!
//! The plan is recomputed from the sheet's current extent on every call,
//! so re-running on an unchanged file yields the same formatting.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::info;

use crate::conf::N_ROW_DATA_START;
use crate::reader::read_workbook_grid;
use crate::spec::{SheetError, SpecCaseSheetLayout, SpecSheetFormatPlan, SpecSheetGrid};
use crate::util::derive_column_width;
use crate::writer::save_workbook_grid;

/// Derive heights, widths and per-cell formats for `sheet` under `layout`.
///
/// Every cell of the used rectangle gets a format, blank ones included.
/// Odd sheet rows from row 3 on get the stripe fill.
pub fn plan_case_sheet_format(
    sheet: &SpecSheetGrid,
    layout: &SpecCaseSheetLayout,
) -> SpecSheetFormatPlan {
    let n_rows = sheet.n_rows_used();
    let n_cols = sheet.n_cols_used();

    let mut dict_heights = BTreeMap::new();
    dict_heights.insert(0, layout.height_header);

    let l_widths = (0..n_cols)
        .map(|n_idx_col| derive_column_width(n_idx_col, layout))
        .collect();

    let fmt_body_stripe = layout.fmt_body.merge(&layout.fmt_stripe);
    let fmt_body_center_stripe = layout.fmt_body_center.merge(&layout.fmt_stripe);

    let mut l_fmts_by_cell = Vec::with_capacity(n_rows);
    for n_idx_row in 0..n_rows {
        let if_is_header = n_idx_row < N_ROW_DATA_START;
        let if_is_stripe = !if_is_header && (n_idx_row + 1) % 2 == 1;

        let l_fmts_row = (0..n_cols)
            .map(|n_idx_col| {
                let if_is_center = n_idx_col + 1 >= layout.col_center_from;
                match (if_is_header, if_is_center, if_is_stripe) {
                    (true, _, _) => layout.fmt_header.clone(),
                    (false, true, true) => fmt_body_center_stripe.clone(),
                    (false, true, false) => layout.fmt_body_center.clone(),
                    (false, false, true) => fmt_body_stripe.clone(),
                    (false, false, false) => layout.fmt_body.clone(),
                }
            })
            .collect();
        l_fmts_by_cell.push(l_fmts_row);
    }

    SpecSheetFormatPlan {
        heights_by_row: dict_heights,
        widths_by_col: l_widths,
        fmts_by_cell: l_fmts_by_cell,
    }
}

/// Re-open `path`, format its active sheet and save once.
pub fn beautify_case_sheet(
    path: &Path,
    layout: &SpecCaseSheetLayout,
) -> Result<SpecSheetFormatPlan, SheetError> {
    let grid = read_workbook_grid(path)?;
    let sheet = grid
        .active()
        .ok_or_else(|| SheetError::NoWorksheet(path.to_path_buf()))?;

    let plan = plan_case_sheet_format(sheet, layout);
    save_workbook_grid(path, &grid, Some(&plan))?;

    info!(
        path = %path.display(),
        n_rows = plan.fmts_by_cell.len(),
        n_cols = plan.widths_by_col.len(),
        "case sheet formatted"
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::conf::C_COLOR_STRIPE;
    use crate::writer::CaseSheetWriter;

    fn sample_rows(n_rows: usize) -> Vec<Vec<String>> {
        (0..n_rows)
            .map(|n| (0..15).map(|c| format!("v{n}-{c}")).collect())
            .collect()
    }

    fn read_entry(path: &Path, name: &str) -> String {
        let file = std::fs::File::open(path).expect("open xlsx");
        let mut archive = zip::ZipArchive::new(file).expect("zip");
        let mut c_body = String::new();
        archive
            .by_name(name)
            .expect("entry")
            .read_to_string(&mut c_body)
            .expect("read entry");
        c_body
    }

    #[test]
    fn test_plan_header_body_and_stripes() {
        let mut sheet = SpecSheetGrid::new("Sheet");
        sheet.append_row(&["h1", "h2"]);
        for row in sample_rows(3) {
            sheet.append_row(&row);
        }
        let layout = SpecCaseSheetLayout::default();

        let plan = plan_case_sheet_format(&sheet, &layout);
        assert_eq!(plan.fmts_by_cell.len(), 4);
        assert_eq!(plan.widths_by_col.len(), 15);
        assert_eq!(plan.heights_by_row.get(&0), Some(&40.0));

        assert_eq!(plan.fmts_by_cell[0][14], layout.fmt_header);
        assert_eq!(plan.fmts_by_cell[1][0], layout.fmt_body);
        assert_eq!(plan.fmts_by_cell[1][6], layout.fmt_body_center);
        assert_eq!(plan.fmts_by_cell[1][5].align, None);

        let fmt_striped = &plan.fmts_by_cell[2][0];
        assert_eq!(fmt_striped.bg_color.as_deref(), Some(C_COLOR_STRIPE));
        assert_eq!(fmt_striped.border, Some(1));
        assert_eq!(plan.fmts_by_cell[2][7].align.as_deref(), Some("center"));
        assert_eq!(plan.fmts_by_cell[3][0].bg_color, None);
    }

    #[test]
    fn test_plan_of_empty_sheet_is_empty() {
        let plan = plan_case_sheet_format(
            &SpecSheetGrid::new("Sheet"),
            &SpecCaseSheetLayout::default(),
        );
        assert!(plan.fmts_by_cell.is_empty());
        assert!(plan.widths_by_col.is_empty());
    }

    #[test]
    fn test_beautify_twice_is_idempotent() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("cases.xlsx");
        CaseSheetWriter::new(&path)
            .write_rows(&sample_rows(4))
            .expect("write");
        let layout = SpecCaseSheetLayout::default();

        let plan_first = beautify_case_sheet(&path, &layout).expect("first pass");
        let c_sheet_first = read_entry(&path, "xl/worksheets/sheet1.xml");
        let c_styles_first = read_entry(&path, "xl/styles.xml");
        let grid_first = read_workbook_grid(&path).expect("read first");

        let plan_second = beautify_case_sheet(&path, &layout).expect("second pass");
        assert_eq!(plan_first, plan_second);
        assert_eq!(c_sheet_first, read_entry(&path, "xl/worksheets/sheet1.xml"));
        assert_eq!(c_styles_first, read_entry(&path, "xl/styles.xml"));
        assert_eq!(grid_first, read_workbook_grid(&path).expect("read second"));
    }

    #[test]
    fn test_beautify_keeps_values() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("cases.xlsx");
        let l_rows = sample_rows(2);
        CaseSheetWriter::new(&path).write_rows(&l_rows).expect("write");

        beautify_case_sheet(&path, &SpecCaseSheetLayout::default()).expect("beautify");

        let grid = read_workbook_grid(&path).expect("read back");
        let sheet = grid.active().expect("sheet");
        assert_eq!(sheet.n_rows_used(), 3);
        assert_eq!(sheet.row_text(1), l_rows[0]);
        assert_eq!(sheet.row_text(2), l_rows[1]);
    }
}
