//! Generation report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use stickerkit_io_xlsx::ReportFill;

/// Final state of one attempted model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumModelStatus {
    /// Template copied, cells filled and workbook saved.
    Created,
    /// Some step failed; the output file may be partial.
    Failed {
        /// User-facing error text.
        exception: String,
    },
    /// Dry run: output resolved but nothing written.
    Planned,
}

/// One record per attempted model, in processing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecModelOutcome {
    /// Model name as read from the master list.
    pub model_name: String,
    /// Sanitized token used for the file name and cell text.
    pub token: String,
    /// Output workbook path.
    pub path_file_out: PathBuf,
    /// Outcome.
    pub status: EnumModelStatus,
    /// Fill details when the filler ran to completion.
    pub fill: Option<ReportFill>,
}

impl SpecModelOutcome {
    /// Whether this model failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.status, EnumModelStatus::Failed { .. })
    }
}

/// Aggregate counters and per-model outcomes for one batch run.
#[derive(Debug, Default, Clone)]
pub struct ReportGenerate {
    /// Models read from the master list (duplicates included).
    pub cnt_found: u64,
    /// Models selected for processing.
    pub cnt_pending: u64,
    /// Models whose workbook was created.
    pub cnt_created: u64,
    /// Models filtered out as already processed.
    pub cnt_skipped: u64,
    /// Per-model outcomes.
    pub outcomes: Vec<SpecModelOutcome>,
}

impl ReportGenerate {
    /// Number of failed models.
    pub fn error_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    /// Failed outcomes, in processing order.
    pub fn failures(&self) -> impl Iterator<Item = &SpecModelOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_found".to_string(), self.cnt_found);
        dict_counts.insert("cnt_pending".to_string(), self.cnt_pending);
        dict_counts.insert("cnt_created".to_string(), self.cnt_created);
        dict_counts.insert("cnt_failed".to_string(), self.error_count() as u64);
        dict_counts.insert("cnt_skipped".to_string(), self.cnt_skipped);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} found={} pending={} created={} failed={} skipped={}",
            dict_counts["cnt_found"],
            dict_counts["cnt_pending"],
            dict_counts["cnt_created"],
            dict_counts["cnt_failed"],
            dict_counts["cnt_skipped"]
        )
    }
}

impl fmt::Display for ReportGenerate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[GENERATE]"))
    }
}

/// Mutable accumulator for generation statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportGenerateBuilder {
    /// See [`ReportGenerate::cnt_found`].
    pub cnt_found: u64,
    /// See [`ReportGenerate::cnt_pending`].
    pub cnt_pending: u64,
    /// See [`ReportGenerate::cnt_created`].
    pub cnt_created: u64,
    /// See [`ReportGenerate::cnt_skipped`].
    pub cnt_skipped: u64,
    /// See [`ReportGenerate::outcomes`].
    pub outcomes: Vec<SpecModelOutcome>,
}

impl ReportGenerateBuilder {
    /// Record load/filter counts.
    pub fn set_plan(&mut self, cnt_found: u64, cnt_pending: u64) {
        self.cnt_found = cnt_found;
        self.cnt_pending = cnt_pending;
        self.cnt_skipped = cnt_found.saturating_sub(cnt_pending);
    }

    /// Add one outcome; created outcomes bump the created counter.
    pub fn add_outcome(&mut self, outcome: SpecModelOutcome) -> &SpecModelOutcome {
        if outcome.status == EnumModelStatus::Created {
            self.cnt_created += 1;
        }
        self.outcomes.push(outcome);
        &self.outcomes[self.outcomes.len() - 1]
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportGenerate {
        ReportGenerate {
            cnt_found: self.cnt_found,
            cnt_pending: self.cnt_pending,
            cnt_created: self.cnt_created,
            cnt_skipped: self.cnt_skipped,
            outcomes: self.outcomes,
        }
    }
}
