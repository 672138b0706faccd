//! `stickerkit_io_fs` v1:
//! Filesystem side of per-model workbook generation.
//!
//! Modules:
//! - `materialize` : template copy into the output directory
//! - `ledger`      : processed-model log (read as a set, append per success)
//! - `spec`        : materialized-file model and errors
//! - `util`        : token sanitizing and path derivation

pub mod ledger;
pub mod materialize;
pub mod spec;
mod util;

pub use ledger::{ProcessedLog, filter_unprocessed};
pub use materialize::{ensure_output_dir, materialize_template, validate_template};
pub use spec::{LedgerError, MaterializeError, SpecMaterialized};
pub use util::{C_EXT_OUTPUT, derive_output_path, sanitize_model_token};
