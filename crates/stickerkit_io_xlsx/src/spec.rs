//! Shared XLSX layout models, reports and errors.

use std::fmt;
use std::path::PathBuf;

use crate::conf::{
    C_SHEET_NAME_TARGET_DEFAULT, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, N_ROW_FILL_FIRST_DEFAULT,
    N_ROW_FILL_LAST_DEFAULT, derive_default_fill_columns,
};

////////////////////////////////////////////////////////////////////////////////
// #region FillLayout

/// One filled column and its text pattern.
///
/// `pattern` may contain `{token}` (sanitized model token) and `{seq}`
/// (1-based position of the row inside the filled range).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFillColumn {
    /// 1-based column index (`4` is column D).
    pub col_idx: u32,
    /// Text pattern rendered per row.
    pub pattern: String,
}

impl SpecFillColumn {
    /// Build a column spec from index + pattern.
    pub fn new(col_idx: u32, pattern: impl Into<String>) -> Self {
        Self {
            col_idx,
            pattern: pattern.into(),
        }
    }
}

/// Rows, columns and target sheet written into every generated workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFillLayout {
    /// Preferred worksheet name (exact match).
    pub sheet_name_target: String,
    /// First filled row (1-based, inclusive).
    pub row_first: u32,
    /// Last filled row (1-based, inclusive).
    pub row_last: u32,
    /// Columns written on each row, in write order.
    pub columns: Vec<SpecFillColumn>,
}

impl Default for SpecFillLayout {
    fn default() -> Self {
        Self {
            sheet_name_target: C_SHEET_NAME_TARGET_DEFAULT.to_string(),
            row_first: N_ROW_FILL_FIRST_DEFAULT,
            row_last: N_ROW_FILL_LAST_DEFAULT,
            columns: derive_default_fill_columns(),
        }
    }
}

impl SpecFillLayout {
    /// Check row/column bounds against Excel limits.
    pub fn validate(&self) -> Result<(), XlsxFillError> {
        if self.row_first == 0 || self.row_first > self.row_last {
            return Err(XlsxFillError::InvalidLayout(format!(
                "Row range must satisfy 1 <= first <= last, got {}..={}.",
                self.row_first, self.row_last
            )));
        }
        if self.row_last > N_NROWS_EXCEL_MAX {
            return Err(XlsxFillError::InvalidLayout(format!(
                "Last row {} exceeds Excel limit {N_NROWS_EXCEL_MAX}.",
                self.row_last
            )));
        }
        if let Some(col) = self
            .columns
            .iter()
            .find(|c| c.col_idx == 0 || c.col_idx > N_NCOLS_EXCEL_MAX)
        {
            return Err(XlsxFillError::InvalidLayout(format!(
                "Column index {} is outside 1..={N_NCOLS_EXCEL_MAX}.",
                col.col_idx
            )));
        }
        Ok(())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region MergeAndSelection

/// Rectangular merged region, 1-based inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecMergeRegion {
    /// Top row.
    pub row_first: u32,
    /// Left column.
    pub col_first: u32,
    /// Bottom row.
    pub row_last: u32,
    /// Right column.
    pub col_last: u32,
}

impl SpecMergeRegion {
    /// Top-left anchor as `(row, col)`.
    pub fn anchor(&self) -> (u32, u32) {
        (self.row_first, self.col_first)
    }

    /// Number of covered cells.
    pub fn area(&self) -> u64 {
        u64::from(self.row_last - self.row_first + 1) * u64::from(self.col_last - self.col_first + 1)
    }
}

/// How the filled worksheet was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumSheetSelection {
    /// Exact name match at this 0-based sheet index.
    Named(usize),
    /// Second worksheet (target name absent, more than one sheet).
    Second,
    /// Workbook active sheet (target name absent, single sheet).
    Active,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Reports

/// Per-workbook fill report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFill {
    /// Name of the worksheet that was filled.
    pub sheet_name: String,
    /// Selection rule that picked the worksheet.
    pub rule_selection: EnumSheetSelection,
    /// Merged regions found in that worksheet.
    pub cnt_merge_regions: usize,
    /// Total cell writes issued (including redirected ones).
    pub cnt_cells_written: u64,
    /// Writes redirected from a merged interior cell to its anchor.
    pub cnt_writes_redirected: u64,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Master-list read errors.
#[derive(Debug)]
pub enum XlsxReadError {
    /// Master file does not exist.
    MasterNotFound(PathBuf),
    /// Workbook could not be opened or parsed.
    OpenFailed {
        /// Workbook path.
        path: PathBuf,
        /// Underlying reader error text.
        message: String,
    },
    /// Workbook has no worksheet to read.
    NoWorksheet(PathBuf),
}

impl fmt::Display for XlsxReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MasterNotFound(path) => {
                write!(f, "Master file '{}' not found.", path.display())
            }
            Self::OpenFailed { path, message } => {
                write!(f, "Failed to read workbook {}: {message}", path.display())
            }
            Self::NoWorksheet(path) => {
                write!(f, "Workbook has no worksheet: {}", path.display())
            }
        }
    }
}

impl std::error::Error for XlsxReadError {}

/// Cell-filler errors (open / layout / save).
#[derive(Debug)]
pub enum XlsxFillError {
    /// Layout bounds are invalid.
    InvalidLayout(String),
    /// Workbook could not be opened or parsed.
    OpenFailed {
        /// Workbook path.
        path: PathBuf,
        /// Underlying reader error text.
        message: String,
    },
    /// Selected worksheet index does not resolve.
    SheetUnavailable {
        /// Workbook path.
        path: PathBuf,
        /// Selection that failed.
        rule_selection: EnumSheetSelection,
    },
    /// Workbook could not be written back.
    SaveFailed {
        /// Workbook path.
        path: PathBuf,
        /// Underlying writer error text.
        message: String,
    },
}

impl fmt::Display for XlsxFillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLayout(msg) => write!(f, "{msg}"),
            Self::OpenFailed { path, message } => {
                write!(f, "Failed to open workbook {}: {message}", path.display())
            }
            Self::SheetUnavailable {
                path,
                rule_selection,
            } => write!(
                f,
                "Worksheet {rule_selection:?} unavailable in {}",
                path.display()
            ),
            Self::SaveFailed { path, message } => {
                write!(f, "Failed to save workbook {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for XlsxFillError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
