//! `stickerkit_io_xlsx` v1:
//! Spreadsheet side of per-model workbook generation.
//!
//! Modules:
//! - `conf`   : constants and default layout presets
//! - `spec`   : layout/merge models, reports and errors
//! - `util`   : A1 reference parsing and merge-anchor lookup
//! - `reader` : model-name loader for the master list
//! - `filler` : merge-aware cell filler for materialized workbooks
pub mod conf;
pub mod filler;
pub mod reader;
pub mod spec;
pub mod util;

pub use conf::{
    C_SHEET_NAME_TARGET_DEFAULT, N_COL_MASTER_MODEL, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    N_ROW_FILL_FIRST_DEFAULT, N_ROW_FILL_LAST_DEFAULT, N_ROW_MASTER_FIRST,
    derive_default_fill_columns,
};
pub use filler::{fill_model_workbook, select_target_sheet};
pub use reader::{convert_master_value, read_model_names};
pub use spec::{
    EnumSheetSelection, ReportFill, SpecFillColumn, SpecFillLayout, SpecMergeRegion,
    XlsxFillError, XlsxReadError,
};
pub use util::{
    convert_col_letters_to_idx, derive_merge_map, parse_cell_ref, parse_range_ref,
    render_fill_pattern, resolve_merge_anchor,
};
