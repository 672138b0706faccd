//! Run options, run mode, progress events and fatal errors.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use stickerkit_io_fs::{LedgerError, MaterializeError};
use stickerkit_io_xlsx::{SpecFillLayout, XlsxReadError};

use crate::report::SpecModelOutcome;

/// Default master list path.
pub const C_PATH_MASTER_DEFAULT: &str = "master.xlsx";
/// Default template path.
pub const C_PATH_TEMPLATE_DEFAULT: &str = "template.xlsx";
/// Default output directory.
pub const C_PATH_OUTPUT_DIR_DEFAULT: &str = "output";
/// Default processed-model log path.
pub const C_PATH_PROCESSED_LOG_DEFAULT: &str = "processed_models.txt";

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Which models a run processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumGenerateMode {
    /// Every loaded model; the processed log is neither read nor written.
    Full,
    /// Only models absent from the processed log; successes are appended.
    #[default]
    Incremental,
}

impl FromStr for EnumGenerateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "incremental" => Ok(Self::Incremental),
            other => Err(format!(
                "Unknown mode '{other}', expected 'full' or 'incremental'."
            )),
        }
    }
}

/// Progress notifications emitted while a batch runs.
#[derive(Debug, Clone, Copy)]
pub enum EnumGenerateEvent<'a> {
    /// Models loaded and filtered; emitted once before the model loop.
    Planned {
        /// Models read from the master list.
        cnt_found: u64,
        /// Models that will be processed.
        cnt_pending: u64,
    },
    /// One model finished (created, failed, or planned in dry-run).
    Finished(&'a SpecModelOutcome),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for [`crate::generate_batch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecGenerateOptions {
    /// Master workbook with model names in column A.
    pub path_file_master: PathBuf,
    /// Template workbook copied once per model.
    pub path_file_template: PathBuf,
    /// Directory receiving `<token>.xlsx` outputs.
    pub path_dir_output: PathBuf,
    /// Processed-model log (incremental mode only).
    pub path_file_processed_log: PathBuf,
    /// Sheet, rows and columns written into every output.
    pub fill_layout: SpecFillLayout,
    /// Model selection mode.
    pub rule_mode: EnumGenerateMode,
    /// Resolve outputs without touching the filesystem.
    pub if_dry_run: bool,
}

impl Default for SpecGenerateOptions {
    fn default() -> Self {
        Self {
            path_file_master: PathBuf::from(C_PATH_MASTER_DEFAULT),
            path_file_template: PathBuf::from(C_PATH_TEMPLATE_DEFAULT),
            path_dir_output: PathBuf::from(C_PATH_OUTPUT_DIR_DEFAULT),
            path_file_processed_log: PathBuf::from(C_PATH_PROCESSED_LOG_DEFAULT),
            fill_layout: SpecFillLayout::default(),
            rule_mode: EnumGenerateMode::Incremental,
            if_dry_run: false,
        }
    }
}

/// "Run could not start" errors; no model has been processed when returned.
#[derive(Debug)]
pub enum GenerateError {
    /// Master workbook does not exist.
    MasterNotFound(PathBuf),
    /// Template workbook does not exist.
    TemplateNotFound(PathBuf),
    /// Master workbook exists but could not be read.
    MasterUnreadable(String),
    /// Processed log exists but could not be read.
    ProcessedLogUnreadable(String),
    /// Output directory could not be created.
    OutputDirInitFailed(String),
    /// Fill layout is invalid.
    InvalidLayout(String),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MasterNotFound(path) => {
                write!(f, "Master file '{}' not found.", path.display())
            }
            Self::TemplateNotFound(path) => {
                write!(f, "Template file '{}' not found.", path.display())
            }
            Self::MasterUnreadable(msg) => write!(f, "{msg}"),
            Self::ProcessedLogUnreadable(msg) => write!(f, "{msg}"),
            Self::OutputDirInitFailed(msg) => write!(f, "{msg}"),
            Self::InvalidLayout(msg) => write!(f, "Invalid fill layout: {msg}"),
        }
    }
}

impl std::error::Error for GenerateError {}

impl From<XlsxReadError> for GenerateError {
    fn from(err: XlsxReadError) -> Self {
        Self::MasterUnreadable(err.to_string())
    }
}

impl From<MaterializeError> for GenerateError {
    fn from(err: MaterializeError) -> Self {
        match err {
            MaterializeError::TemplateNotFound(path) => Self::TemplateNotFound(path),
            other => Self::OutputDirInitFailed(other.to_string()),
        }
    }
}

impl From<LedgerError> for GenerateError {
    fn from(err: LedgerError) -> Self {
        Self::ProcessedLogUnreadable(err.to_string())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
