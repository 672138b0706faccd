//! Materialization models and filesystem error types.

use std::fmt;
use std::path::PathBuf;

////////////////////////////////////////////////////////////////////////////////
// #region Structs

/// One template copy committed to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecMaterialized {
    /// Filesystem-safe token derived from the model name.
    pub token: String,
    /// Output workbook path (`<output-dir>/<token>.xlsx`).
    pub path_file_out: PathBuf,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Template copy / output directory errors.
#[derive(Debug)]
pub enum MaterializeError {
    /// Template workbook does not exist.
    TemplateNotFound(PathBuf),
    /// Output directory could not be created.
    OutputDirInitFailed {
        /// Output directory path.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
    /// Template copy into the output path failed.
    CopyFailed {
        /// Destination path of the failed copy.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
}

impl fmt::Display for MaterializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemplateNotFound(path) => {
                write!(f, "Template file '{}' not found.", path.display())
            }
            Self::OutputDirInitFailed { path, message } => write!(
                f,
                "Failed to initialize output directory {}: {message}",
                path.display()
            ),
            Self::CopyFailed { path, message } => {
                write!(f, "Failed to copy template to {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for MaterializeError {}

/// Processed-log read/append errors.
#[derive(Debug)]
pub enum LedgerError {
    /// Existing log could not be read.
    ReadFailed {
        /// Log path.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
    /// Appending one model name failed.
    AppendFailed {
        /// Log path.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed { path, message } => {
                write!(f, "Failed to read processed log {}: {message}", path.display())
            }
            Self::AppendFailed { path, message } => write!(
                f,
                "Failed to append to processed log {}: {message}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LedgerError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
