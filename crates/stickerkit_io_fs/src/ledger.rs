//! Processed-model log: one model name per line, append-only.
//!
//! The log is read once into a set at run start and appended to as models
//! succeed. No locking is applied; concurrent runs may interleave lines.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::spec::LedgerError;

/// Handle to the processed-model log file.
#[derive(Debug, Clone)]
pub struct ProcessedLog {
    path_file_log: PathBuf,
}

impl ProcessedLog {
    /// Bind to `path_file_log`; the file is not touched until read or append.
    pub fn new(path_file_log: impl Into<PathBuf>) -> Self {
        Self {
            path_file_log: path_file_log.into(),
        }
    }

    /// Read previously processed names.
    ///
    /// A missing file yields an empty set. Lines are trimmed and blank lines
    /// ignored; repeated entries collapse.
    pub fn read(&self) -> Result<HashSet<String>, LedgerError> {
        let raw_text = match fs::read_to_string(&self.path_file_log) {
            Ok(v) => v,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(e) => {
                return Err(LedgerError::ReadFailed {
                    path: self.path_file_log.clone(),
                    message: e.to_string(),
                });
            }
        };

        let set_processed = raw_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect::<HashSet<_>>();
        debug!(
            path = %self.path_file_log.display(),
            n_processed = set_processed.len(),
            "processed log loaded"
        );
        Ok(set_processed)
    }

    /// Append one model name plus newline, preserving prior content.
    pub fn append(&self, model_name: &str) -> Result<(), LedgerError> {
        let map_err = |e: io::Error| LedgerError::AppendFailed {
            path: self.path_file_log.clone(),
            message: e.to_string(),
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path_file_log)
            .map_err(map_err)?;
        writeln!(file, "{model_name}").map_err(map_err)
    }
}

/// Keep models absent from `set_processed`, in original order.
///
/// Matching is exact string equality; duplicates within `models` survive.
pub fn filter_unprocessed(models: &[String], set_processed: &HashSet<String>) -> Vec<String> {
    models
        .iter()
        .filter(|m| !set_processed.contains(m.as_str()))
        .cloned()
        .collect()
}
