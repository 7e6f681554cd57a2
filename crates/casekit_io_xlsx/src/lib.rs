//! `casekit_io_xlsx` v1:
//! Test-case sheet writer and beautifier on top of `rust_xlsxwriter`.
//!
//! - `conf`     : header labels, colors, excel limits, default layout
//! - `spec`     : grid/format/layout/report types and errors
//! - `reader`   : value-only workbook loading via calamine
//! - `writer`   : create or overwrite the case sheet, single save
//! - `beautify` : layout plan and formatted re-save
//! - `util`     : column addressing, format conversion, cell writes
pub mod beautify;
pub mod conf;
pub mod reader;
pub mod spec;
pub mod util;
pub mod writer;

pub use beautify::{beautify_case_sheet, plan_case_sheet_format};
pub use conf::{TUP_CASE_HEADER, derive_default_case_formats};
pub use reader::read_workbook_grid;
pub use spec::{
    EnumCellValue, EnumSheetWriteMode, SheetError, SpecCaseSheetLayout, SpecCellFormat,
    SpecSheetFormatPlan, SpecSheetGrid, SpecWorkbookGrid, SpecXlsxReport,
};
pub use writer::{CaseSheetWriter, save_workbook_grid};
