use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use stickerkit_gen::spec::{
    C_PATH_MASTER_DEFAULT, C_PATH_OUTPUT_DIR_DEFAULT, C_PATH_PROCESSED_LOG_DEFAULT,
    C_PATH_TEMPLATE_DEFAULT,
};
use stickerkit_gen::{
    EnumGenerateEvent, EnumGenerateMode, EnumModelStatus, SpecFillLayout, SpecGenerateOptions,
    generate_batch_with_observer,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "stickerkit",
    version,
    about = "Generate one filled sticker-order workbook per model"
)]
struct Cli {
    /// Master workbook; model names in column A from row 2.
    #[arg(long, default_value = C_PATH_MASTER_DEFAULT)]
    master: PathBuf,
    /// Template workbook copied once per model.
    #[arg(long, default_value = C_PATH_TEMPLATE_DEFAULT)]
    template: PathBuf,
    /// Directory receiving one `<model>.xlsx` per model.
    #[arg(long = "output-dir", default_value = C_PATH_OUTPUT_DIR_DEFAULT)]
    output_dir: PathBuf,
    /// Processed-model log used by incremental mode.
    #[arg(long = "processed-log", default_value = C_PATH_PROCESSED_LOG_DEFAULT)]
    processed_log: PathBuf,
    /// Target sheet name in the template.
    #[arg(long)]
    sheet: Option<String>,
    /// `full` or `incremental`.
    #[arg(long, default_value = "incremental")]
    mode: EnumGenerateMode,
    /// List planned outputs without writing anything.
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn into_options(self) -> SpecGenerateOptions {
        let mut fill_layout = SpecFillLayout::default();
        if let Some(sheet_name) = self.sheet {
            fill_layout.sheet_name_target = sheet_name;
        }
        SpecGenerateOptions {
            path_file_master: self.master,
            path_file_template: self.template,
            path_dir_output: self.output_dir,
            path_file_processed_log: self.processed_log,
            fill_layout,
            rule_mode: self.mode,
            if_dry_run: self.dry_run,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(options: &SpecGenerateOptions) -> Result<()> {
    let report = generate_batch_with_observer(options, |event| match event {
        EnumGenerateEvent::Planned {
            cnt_found,
            cnt_pending,
        } => {
            println!("Found {cnt_found} models in master file.");
            if cnt_pending == 0 {
                println!("No new models to process. Everything is up-to-date.");
            } else {
                println!("Generating {cnt_pending} new files...");
            }
        }
        EnumGenerateEvent::Finished(outcome) => match &outcome.status {
            EnumModelStatus::Created => {
                println!("Created and updated: {}", outcome.path_file_out.display());
            }
            EnumModelStatus::Failed { exception } => {
                println!("Failed for '{}': {exception}", outcome.token);
            }
            EnumModelStatus::Planned => {
                println!("Planned: {}", outcome.path_file_out.display());
            }
        },
    })?;
    println!("{report}");
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let options = Cli::parse().into_options();

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "generation aborted");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
