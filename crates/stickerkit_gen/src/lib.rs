//! `stickerkit_gen` v1:
//! Batch generation of per-model workbooks from a master list and a template.
//!
//! Pipeline per run: load models -> (filter processed) -> for each model:
//! copy template -> fill cells -> (append to processed log).
//!
//! - `generate` : batch orchestration
//! - `spec`     : options, run mode, events and errors
//! - `report`   : per-model outcomes and run report
pub mod generate;
pub mod report;
pub mod spec;

pub use generate::{generate_batch, generate_batch_with_observer};
pub use report::{EnumModelStatus, ReportGenerate, ReportGenerateBuilder, SpecModelOutcome};
pub use spec::{EnumGenerateEvent, EnumGenerateMode, GenerateError, SpecGenerateOptions};
pub use stickerkit_io_xlsx::{SpecFillColumn, SpecFillLayout};
