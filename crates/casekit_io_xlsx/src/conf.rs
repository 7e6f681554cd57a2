//! Sheet constants and default layout preset factories.

use std::collections::BTreeMap;

use crate::spec::{SpecCaseSheetLayout, SpecCellFormat};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;

/// Name of the sheet created for a new case file.
pub const C_SHEET_NAME_DEFAULT: &str = "Sheet";
/// Header row of a new case file; the sixth label is intentionally blank.
pub const TUP_CASE_HEADER: [&str; 6] = [
    "案例导入路径",
    "子系统",
    "测试案例名称",
    "案例描述",
    "步骤描述",
    "",
];
/// Zero-based index of the first data row (sheet row 2).
pub const N_ROW_DATA_START: usize = 1;

/// Header fill.
pub const C_COLOR_HEADER: &str = "#FF9933";
/// Odd body row fill.
pub const C_COLOR_STRIPE: &str = "#CCFFCC";
/// Border color.
pub const C_COLOR_BORDER: &str = "#000000";

/// Build the named formats used by the case-sheet layout.
///
/// Keys: `header`, `body`, `body_center`, `stripe` (a fill-only patch).
pub fn derive_default_case_formats() -> BTreeMap<String, SpecCellFormat> {
    let cfg_base_fmt_spec = SpecCellFormat {
        border: Some(1),
        border_color: Some(C_COLOR_BORDER.to_string()),
        valign: Some("vcenter".to_string()),
        text_wrap: Some(true),
        ..Default::default()
    };

    let mut dict_fmt = BTreeMap::new();
    dict_fmt.insert(
        "header".to_string(),
        cfg_base_fmt_spec.with_(SpecCellFormat {
            font_size: Some(12),
            bold: Some(true),
            align: Some("center".to_string()),
            bg_color: Some(C_COLOR_HEADER.to_string()),
            ..Default::default()
        }),
    );
    dict_fmt.insert("body".to_string(), cfg_base_fmt_spec.clone());
    dict_fmt.insert(
        "body_center".to_string(),
        cfg_base_fmt_spec.with_(SpecCellFormat {
            align: Some("center".to_string()),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        "stripe".to_string(),
        SpecCellFormat {
            bg_color: Some(C_COLOR_STRIPE.to_string()),
            ..Default::default()
        },
    );

    dict_fmt
}

impl Default for SpecCaseSheetLayout {
    fn default() -> Self {
        let mut dict_fmt = derive_default_case_formats();
        let mut take = |key: &str| dict_fmt.remove(key).unwrap_or_default();

        Self {
            height_header: 40.0,
            cols_wide: ["A", "C", "E", "F"].map(String::from).to_vec(),
            width_wide: 36.0,
            col_medium: "B".to_string(),
            width_medium: 20.0,
            width_default: 12.0,
            col_center_from: 7,
            fmt_header: take("header"),
            fmt_body: take("body"),
            fmt_body_center: take("body_center"),
            fmt_stripe: take("stripe"),
        }
    }
}
