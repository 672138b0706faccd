//! Batch orchestration: load, filter, then copy + fill + log per model.

use std::collections::HashSet;

use stickerkit_io_fs::{
    ProcessedLog, derive_output_path, ensure_output_dir, filter_unprocessed,
    materialize_template, sanitize_model_token, validate_template,
};
use stickerkit_io_xlsx::{ReportFill, fill_model_workbook, read_model_names};
use tracing::{info, warn};

use crate::report::{EnumModelStatus, ReportGenerate, ReportGenerateBuilder, SpecModelOutcome};
use crate::spec::{EnumGenerateEvent, EnumGenerateMode, GenerateError, SpecGenerateOptions};

/// Generate one workbook per pending model.
///
/// See [`generate_batch_with_observer`].
pub fn generate_batch(options: &SpecGenerateOptions) -> Result<ReportGenerate, GenerateError> {
    generate_batch_with_observer(options, |_| {})
}

/// Generate one workbook per pending model, notifying `on_event` as it goes.
///
/// This function performs:
/// 1. Setup checks: master exists, template exists, layout is valid.
/// 2. Model loading, plus processed-log filtering in incremental mode.
/// 3. Sequential copy + fill (+ log append) for each pending model.
///
/// Returns [`GenerateError`] only for setup failures, before any model is
/// touched. Per-model failures are recorded in the report and the run moves
/// on to the next model; partial outputs are left on disk.
pub fn generate_batch_with_observer<F>(
    options: &SpecGenerateOptions,
    mut on_event: F,
) -> Result<ReportGenerate, GenerateError>
where
    F: FnMut(EnumGenerateEvent<'_>),
{
    if !options.path_file_master.is_file() {
        return Err(GenerateError::MasterNotFound(
            options.path_file_master.clone(),
        ));
    }
    validate_template(&options.path_file_template)?;
    options
        .fill_layout
        .validate()
        .map_err(|e| GenerateError::InvalidLayout(e.to_string()))?;

    let processed_log = ProcessedLog::new(&options.path_file_processed_log);
    let set_processed = match options.rule_mode {
        EnumGenerateMode::Incremental => processed_log.read()?,
        EnumGenerateMode::Full => HashSet::new(),
    };

    let l_models = read_model_names(&options.path_file_master)?;
    let l_models_pending = match options.rule_mode {
        EnumGenerateMode::Incremental => filter_unprocessed(&l_models, &set_processed),
        EnumGenerateMode::Full => l_models.clone(),
    };

    let mut builder_report = ReportGenerateBuilder::default();
    builder_report.set_plan(l_models.len() as u64, l_models_pending.len() as u64);
    info!(
        n_found = l_models.len(),
        n_pending = l_models_pending.len(),
        mode = ?options.rule_mode,
        dry_run = options.if_dry_run,
        "models planned"
    );
    on_event(EnumGenerateEvent::Planned {
        cnt_found: builder_report.cnt_found,
        cnt_pending: builder_report.cnt_pending,
    });

    if l_models_pending.is_empty() {
        return Ok(builder_report.build());
    }
    if !options.if_dry_run {
        ensure_output_dir(&options.path_dir_output)?;
    }

    for model_name in &l_models_pending {
        let outcome = process_model(model_name, options, &processed_log);
        match &outcome.status {
            EnumModelStatus::Created => {
                info!(model = %model_name, path = %outcome.path_file_out.display(), "created");
            }
            EnumModelStatus::Failed { exception } => {
                warn!(model = %model_name, token = %outcome.token, %exception, "model failed");
            }
            EnumModelStatus::Planned => {}
        }
        on_event(EnumGenerateEvent::Finished(
            builder_report.add_outcome(outcome),
        ));
    }

    Ok(builder_report.build())
}

fn process_model(
    model_name: &str,
    options: &SpecGenerateOptions,
    processed_log: &ProcessedLog,
) -> SpecModelOutcome {
    let token = sanitize_model_token(model_name);
    let path_file_out = derive_output_path(&options.path_dir_output, &token);
    let mut outcome = SpecModelOutcome {
        model_name: model_name.to_string(),
        token,
        path_file_out,
        status: EnumModelStatus::Planned,
        fill: None,
    };
    if options.if_dry_run {
        return outcome;
    }

    match run_model_steps(model_name, options, processed_log) {
        Ok(report_fill) => {
            outcome.status = EnumModelStatus::Created;
            outcome.fill = Some(report_fill);
        }
        Err(exception) => outcome.status = EnumModelStatus::Failed { exception },
    }
    outcome
}

fn run_model_steps(
    model_name: &str,
    options: &SpecGenerateOptions,
    processed_log: &ProcessedLog,
) -> Result<ReportFill, String> {
    let spec_out = materialize_template(
        &options.path_file_template,
        &options.path_dir_output,
        model_name,
    )
    .map_err(|e| e.to_string())?;
    let report_fill = fill_model_workbook(
        &spec_out.path_file_out,
        &spec_out.token,
        &options.fill_layout,
    )
    .map_err(|e| e.to_string())?;
    if options.rule_mode == EnumGenerateMode::Incremental {
        processed_log
            .append(model_name)
            .map_err(|e| e.to_string())?;
    }
    Ok(report_fill)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use calamine::{Data, Reader, Xlsx, open_workbook};
    use rust_xlsxwriter::{Format, Workbook};
    use tempfile::TempDir;

    use super::*;

    const C_SHEET: &str = "Mobile-Cases---Covers-Fill this";

    struct Fixture {
        tmp: TempDir,
    }

    impl Fixture {
        fn new(models: &[Option<&str>]) -> Self {
            let tmp = TempDir::new().expect("tempdir");
            let fixture = Self { tmp };
            fixture.write_master(models);
            fixture.write_template();
            fixture
        }

        fn path(&self) -> &Path {
            self.tmp.path()
        }

        fn options(&self, rule_mode: EnumGenerateMode) -> SpecGenerateOptions {
            SpecGenerateOptions {
                path_file_master: self.path().join("master.xlsx"),
                path_file_template: self.path().join("template.xlsx"),
                path_dir_output: self.path().join("output"),
                path_file_processed_log: self.path().join("processed_models.txt"),
                rule_mode,
                ..SpecGenerateOptions::default()
            }
        }

        fn write_master(&self, models: &[Option<&str>]) {
            let mut workbook = Workbook::new();
            let worksheet = workbook.add_worksheet();
            worksheet.write_string(0, 0, "Model Name").expect("header");
            for (n_idx, model) in models.iter().enumerate() {
                if let Some(text) = model {
                    worksheet
                        .write_string(n_idx as u32 + 1, 0, *text)
                        .expect("model cell");
                }
            }
            workbook.save(self.path().join("master.xlsx")).expect("save master");
        }

        fn write_template(&self) {
            let mut workbook = Workbook::new();
            workbook.add_worksheet().set_name("Instructions").expect("name");
            let worksheet = workbook.add_worksheet().set_name(C_SHEET).expect("name");
            worksheet
                .merge_range(4, 3, 6, 3, "", &Format::new())
                .expect("merge D5:D7");
            workbook
                .save(self.path().join("template.xlsx"))
                .expect("save template");
        }

        fn output(&self, file_name: &str) -> PathBuf {
            self.path().join("output").join(file_name)
        }

        fn read_log(&self) -> String {
            std::fs::read_to_string(self.path().join("processed_models.txt")).unwrap_or_default()
        }
    }

    fn read_cell(path: &Path, row_idx: u32, col_idx: u32) -> Option<String> {
        let mut workbook: Xlsx<_> = open_workbook(path).expect("open output");
        let range = workbook.worksheet_range(C_SHEET).expect("sheet range");
        match range.get_value((row_idx - 1, col_idx - 1)) {
            Some(Data::String(s)) => Some(s.clone()),
            _ => None,
        }
    }

    #[test]
    fn full_mode_creates_filled_workbook_per_model() {
        let fixture = Fixture::new(&[Some("Pixel 7"), Some("Galaxy S21+")]);

        let report =
            generate_batch(&fixture.options(EnumGenerateMode::Full)).expect("generate batch");
        assert_eq!(report.cnt_found, 2);
        assert_eq!(report.cnt_created, 2);
        assert_eq!(report.error_count(), 0);

        let path_file_pixel = fixture.output("Pixel 7.xlsx");
        assert_eq!(report.outcomes[0].path_file_out, path_file_pixel);
        assert_eq!(
            read_cell(&path_file_pixel, 8, 4).as_deref(),
            Some("Pixel 7 / Sticker Printed Back Cover")
        );
        assert_eq!(read_cell(&path_file_pixel, 8, 24).as_deref(), Some("Pixel 7"));
        assert_eq!(
            read_cell(&path_file_pixel, 8, 36).as_deref(),
            Some("Sticker Pixel 7 EG 4")
        );
        assert_eq!(
            read_cell(&path_file_pixel, 8, 37).as_deref(),
            Some("Sticker Pixel 7 EG 4")
        );

        let path_file_galaxy = fixture.output("Galaxy S21.xlsx");
        assert_eq!(report.outcomes[1].token, "Galaxy S21");
        assert_eq!(
            read_cell(&path_file_galaxy, 5, 24).as_deref(),
            Some("Galaxy S21")
        );
        assert!(fixture.read_log().is_empty());
    }

    #[test]
    fn merged_d5_to_d7_receives_row_seven_text() {
        let fixture = Fixture::new(&[Some("Pixel 7")]);

        let report =
            generate_batch(&fixture.options(EnumGenerateMode::Full)).expect("generate batch");
        let report_fill = report.outcomes[0].fill.as_ref().expect("fill report");
        assert_eq!(report_fill.cnt_merge_regions, 1);
        assert_eq!(report_fill.cnt_writes_redirected, 2);

        let path_file = fixture.output("Pixel 7.xlsx");
        assert_eq!(
            read_cell(&path_file, 5, 4).as_deref(),
            Some("Pixel 7 / Sticker Printed Back Cover")
        );
        assert_eq!(read_cell(&path_file, 6, 4), None);
        assert_eq!(read_cell(&path_file, 7, 4), None);
        assert_eq!(
            read_cell(&path_file, 7, 36).as_deref(),
            Some("Sticker Pixel 7 EG 3")
        );
    }

    #[test]
    fn missing_template_is_fatal_before_any_model() {
        let fixture = Fixture::new(&[Some("Pixel 7")]);
        std::fs::remove_file(fixture.path().join("template.xlsx")).expect("remove template");

        let mut n_events = 0;
        let err = generate_batch_with_observer(&fixture.options(EnumGenerateMode::Full), |_| {
            n_events += 1
        })
        .expect_err("missing template is fatal");

        assert!(matches!(err, GenerateError::TemplateNotFound(_)));
        assert_eq!(n_events, 0);
        assert!(!fixture.path().join("output").exists());
    }

    #[test]
    fn missing_master_is_fatal() {
        let fixture = Fixture::new(&[Some("Pixel 7")]);
        std::fs::remove_file(fixture.path().join("master.xlsx")).expect("remove master");

        let err = generate_batch(&fixture.options(EnumGenerateMode::Incremental))
            .expect_err("missing master is fatal");
        assert!(matches!(err, GenerateError::MasterNotFound(_)));
        assert!(!fixture.path().join("output").exists());
    }

    #[test]
    fn missing_master_is_reported_before_missing_template() {
        let fixture = Fixture::new(&[Some("Pixel 7")]);
        std::fs::remove_file(fixture.path().join("master.xlsx")).expect("remove master");
        std::fs::remove_file(fixture.path().join("template.xlsx")).expect("remove template");

        let err = generate_batch(&fixture.options(EnumGenerateMode::Full))
            .expect_err("missing inputs are fatal");
        assert!(matches!(err, GenerateError::MasterNotFound(_)));
    }

    #[test]
    fn unreadable_master_is_fatal() {
        let fixture = Fixture::new(&[Some("Pixel 7")]);
        std::fs::write(fixture.path().join("master.xlsx"), b"not a workbook")
            .expect("corrupt master");

        let err = generate_batch(&fixture.options(EnumGenerateMode::Incremental))
            .expect_err("unreadable master is fatal");
        assert!(matches!(err, GenerateError::MasterUnreadable(_)));
        assert!(!fixture.path().join("output").exists());
    }

    #[test]
    fn incremental_skips_logged_models_and_logs_original_names() {
        let fixture = Fixture::new(&[Some("iPhone 12"), Some("Galaxy S21+")]);
        std::fs::write(fixture.path().join("processed_models.txt"), "iPhone 12\n")
            .expect("seed log");

        let report = generate_batch(&fixture.options(EnumGenerateMode::Incremental))
            .expect("generate batch");

        assert_eq!(report.cnt_found, 2);
        assert_eq!(report.cnt_pending, 1);
        assert_eq!(report.cnt_skipped, 1);
        assert_eq!(
            report
                .outcomes
                .iter()
                .map(|o| o.model_name.as_str())
                .collect::<Vec<_>>(),
            vec!["Galaxy S21+"]
        );
        assert!(!fixture.output("iPhone 12.xlsx").exists());
        assert!(fixture.output("Galaxy S21.xlsx").exists());
        assert_eq!(fixture.read_log(), "iPhone 12\nGalaxy S21+\n");
    }

    #[test]
    fn incremental_second_run_generates_nothing() {
        let fixture = Fixture::new(&[Some("A1"), None, Some("  B2 "), Some("A1")]);
        let options = fixture.options(EnumGenerateMode::Incremental);

        let report_first = generate_batch(&options).expect("first run");
        assert_eq!(report_first.cnt_found, 3);
        assert_eq!(report_first.cnt_created, 3);

        let mut l_events = Vec::new();
        let report_second = generate_batch_with_observer(&options, |event| {
            if let EnumGenerateEvent::Planned {
                cnt_found,
                cnt_pending,
            } = event
            {
                l_events.push((cnt_found, cnt_pending));
            }
        })
        .expect("second run");
        assert_eq!(l_events, vec![(3, 0)]);
        assert_eq!(report_second.cnt_pending, 0);
        assert_eq!(report_second.cnt_created, 0);
        assert!(report_second.outcomes.is_empty());
        assert_eq!(fixture.read_log(), "A1\nB2\nA1\n");
    }

    #[test]
    fn per_model_failure_does_not_stop_the_run() {
        let fixture = Fixture::new(&[Some("Broken"), Some("Pixel 7")]);
        std::fs::create_dir_all(fixture.output("Broken.xlsx")).expect("block output path");

        let mut l_finished = Vec::new();
        let report = generate_batch_with_observer(
            &fixture.options(EnumGenerateMode::Incremental),
            |event| {
                if let EnumGenerateEvent::Finished(outcome) = event {
                    l_finished.push((outcome.model_name.clone(), outcome.is_failed()));
                }
            },
        )
        .expect("generate batch");

        assert_eq!(
            l_finished,
            vec![("Broken".to_string(), true), ("Pixel 7".to_string(), false)]
        );
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.cnt_created, 1);
        assert_eq!(fixture.read_log(), "Pixel 7\n");
        match &report.outcomes[0].status {
            EnumModelStatus::Failed { exception } => {
                assert!(exception.contains("Broken.xlsx"), "{exception}");
            }
            other => panic!("unexpected status: {other:?}"),
        }
    }

    #[test]
    fn corrupt_template_fails_every_model_without_logging() {
        let fixture = Fixture::new(&[Some("A"), Some("B")]);
        std::fs::write(fixture.path().join("template.xlsx"), b"not a workbook")
            .expect("corrupt template");

        let report = generate_batch(&fixture.options(EnumGenerateMode::Incremental))
            .expect("generate batch");
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.cnt_created, 0);
        assert!(fixture.output("A.xlsx").exists());
        assert!(fixture.read_log().is_empty());
    }

    #[test]
    fn dry_run_plans_without_writing() {
        let fixture = Fixture::new(&[Some("Pixel 7"), Some("Moto/G")]);
        let options = SpecGenerateOptions {
            if_dry_run: true,
            ..fixture.options(EnumGenerateMode::Incremental)
        };

        let report = generate_batch(&options).expect("dry run");
        assert_eq!(report.outcomes.len(), 2);
        assert!(
            report
                .outcomes
                .iter()
                .all(|o| o.status == EnumModelStatus::Planned)
        );
        assert_eq!(report.outcomes[1].path_file_out, fixture.output("MotoG.xlsx"));
        assert!(!fixture.path().join("output").exists());
        assert!(!fixture.path().join("processed_models.txt").exists());
    }

    #[test]
    fn full_mode_processes_duplicates_each_time() {
        let fixture = Fixture::new(&[Some("Pixel 7"), Some("Pixel 7")]);
        std::fs::write(fixture.path().join("processed_models.txt"), "Pixel 7\n")
            .expect("seed log");

        let report =
            generate_batch(&fixture.options(EnumGenerateMode::Full)).expect("generate batch");
        assert_eq!(report.cnt_pending, 2);
        assert_eq!(report.cnt_created, 2);
        assert_eq!(fixture.read_log(), "Pixel 7\n");
    }

    #[test]
    fn empty_master_creates_no_output_dir() {
        let fixture = Fixture::new(&[]);
        let report =
            generate_batch(&fixture.options(EnumGenerateMode::Full)).expect("generate batch");
        assert_eq!(report.cnt_found, 0);
        assert!(!fixture.path().join("output").exists());
    }
}
