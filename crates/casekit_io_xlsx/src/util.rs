//! Stateless helpers shared by the writer and the beautifier.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Worksheet};

use crate::conf::{N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX};
use crate::spec::{EnumCellValue, SheetError, SpecCaseSheetLayout, SpecCellFormat};

////////////////////////////////////////////////////////////////////////////////
// #region ColumnAddressing

/// Excel column letters for a zero-based column index (`0 -> A`, `26 -> AA`).
pub fn derive_column_letter(col_idx: usize) -> String {
    let mut v_chars = Vec::new();
    let mut n_rem = col_idx + 1;
    while n_rem > 0 {
        let n_digit = (n_rem - 1) % 26;
        v_chars.push(char::from(b'A' + n_digit as u8));
        n_rem = (n_rem - 1) / 26;
    }
    v_chars.iter().rev().collect()
}

/// Width of a zero-based column under `layout`, decided by column letter.
pub fn derive_column_width(col_idx: usize, layout: &SpecCaseSheetLayout) -> f64 {
    let c_letter = derive_column_letter(col_idx);
    if layout.cols_wide.iter().any(|c| *c == c_letter) {
        layout.width_wide
    } else if layout.col_medium == c_letter {
        layout.width_medium
    } else {
        layout.width_default
    }
}

pub(crate) fn cast_row_num(value: usize) -> Result<u32, SheetError> {
    if value >= N_NROWS_EXCEL_MAX {
        return Err(SheetError::IndexOverflow(format!(
            "row index overflow: {value}"
        )));
    }
    u32::try_from(value)
        .map_err(|_| SheetError::IndexOverflow(format!("row index overflow: {value}")))
}

pub(crate) fn cast_col_num(value: usize) -> Result<u16, SheetError> {
    if value >= N_NCOLS_EXCEL_MAX {
        return Err(SheetError::IndexOverflow(format!(
            "column index overflow: {value}"
        )));
    }
    u16::try_from(value)
        .map_err(|_| SheetError::IndexOverflow(format!("column index overflow: {value}")))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FormatConversion

/// Convert a format spec into a `rust_xlsxwriter` format.
pub fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }

    if let Some(align) = spec.align.as_deref().and_then(derive_format_align) {
        format = format.set_align(align);
    }
    if let Some(align) = spec.valign.as_deref().and_then(derive_format_align) {
        format = format.set_align(align);
    }
    if spec.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }
    if let Some(color) = spec.border_color.as_deref().and_then(derive_color) {
        format = format.set_border_color(color);
    }
    if let Some(color) = spec.bg_color.as_deref().and_then(derive_color) {
        format = format.set_background_color(color);
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

/// Parse `#RRGGBB` / `RRGGBB` into an RGB color.
pub fn derive_color(hex: &str) -> Option<Color> {
    let c_digits = hex.trim().trim_start_matches('#');
    if c_digits.len() != 6 {
        return None;
    }
    u32::from_str_radix(c_digits, 16).ok().map(Color::RGB)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellWrite

pub(crate) fn write_cell(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
) -> Result<(), SheetError> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;
    match value {
        EnumCellValue::None => {}
        EnumCellValue::String(val) => {
            worksheet.write_string(n_row, n_col, val)?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number(n_row, n_col, *val)?;
        }
        EnumCellValue::Boolean(val) => {
            worksheet.write_boolean(n_row, n_col, *val)?;
        }
    }
    Ok(())
}

pub(crate) fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> Result<(), SheetError> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;
    match value {
        EnumCellValue::None => {
            worksheet.write_blank(n_row, n_col, format)?;
        }
        EnumCellValue::String(val) => {
            worksheet.write_string_with_format(n_row, n_col, val, format)?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number_with_format(n_row, n_col, *val, format)?;
        }
        EnumCellValue::Boolean(val) => {
            worksheet.write_boolean_with_format(n_row, n_col, *val, format)?;
        }
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_column_letter() {
        assert_eq!(derive_column_letter(0), "A");
        assert_eq!(derive_column_letter(5), "F");
        assert_eq!(derive_column_letter(25), "Z");
        assert_eq!(derive_column_letter(26), "AA");
        assert_eq!(derive_column_letter(701), "ZZ");
        assert_eq!(derive_column_letter(702), "AAA");
    }

    #[test]
    fn test_derive_column_width_by_membership() {
        let layout = SpecCaseSheetLayout::default();
        let l_widths: Vec<f64> = (0..8).map(|n| derive_column_width(n, &layout)).collect();
        assert_eq!(l_widths, vec![36.0, 20.0, 36.0, 12.0, 36.0, 36.0, 12.0, 12.0]);
    }

    #[test]
    fn test_derive_color() {
        assert_eq!(derive_color("#FF9933"), Some(Color::RGB(0xFF9933)));
        assert_eq!(derive_color("ccffcc"), Some(Color::RGB(0xCCFFCC)));
        assert_eq!(derive_color("#FFF"), None);
    }

    #[test]
    fn test_cast_rejects_beyond_excel_limits() {
        assert!(cast_row_num(N_NROWS_EXCEL_MAX - 1).is_ok());
        assert!(cast_row_num(N_NROWS_EXCEL_MAX).is_err());
        assert!(cast_col_num(N_NCOLS_EXCEL_MAX).is_err());
    }
}
