//! XLSX constants and the default column preset.

use crate::spec::SpecFillColumn;

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: u32 = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: u32 = 16_384;

/// First master row holding a model name (1-based; row 1 is the header).
pub const N_ROW_MASTER_FIRST: u32 = 2;
/// Master column holding model names (1-based, column A).
pub const N_COL_MASTER_MODEL: u32 = 1;

/// Worksheet filled in each generated workbook.
pub const C_SHEET_NAME_TARGET_DEFAULT: &str = "Mobile-Cases---Covers-Fill this";
/// First filled row (1-based, inclusive).
pub const N_ROW_FILL_FIRST_DEFAULT: u32 = 5;
/// Last filled row (1-based, inclusive).
pub const N_ROW_FILL_LAST_DEFAULT: u32 = 104;

/// Placeholder replaced by the sanitized model token.
pub const C_PLACEHOLDER_TOKEN: &str = "{token}";
/// Placeholder replaced by the 1-based row sequence number.
pub const C_PLACEHOLDER_SEQ: &str = "{seq}";

/// Build the default D/X/AJ/AK column patterns.
pub fn derive_default_fill_columns() -> Vec<SpecFillColumn> {
    vec![
        SpecFillColumn::new(4, "{token} / Sticker Printed Back Cover"),
        SpecFillColumn::new(24, "{token}"),
        SpecFillColumn::new(36, "Sticker {token} EG {seq}"),
        SpecFillColumn::new(37, "Sticker {token} EG {seq}"),
    ]
}
