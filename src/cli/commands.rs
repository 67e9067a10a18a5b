//! Command implementations

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::adapters::ThinConfig;
use crate::app::container::{AppContainer, DefaultAppContainer};
use crate::app::FileOutcome;
use crate::cli::{Cli, ReportFormat};
use crate::output::{render_file_block, BatchReport};

/// Execute a thinning batch over the paths given on the command line
pub async fn run(cli: &Cli, config: ThinConfig) -> Result<ExitCode> {
    let container = DefaultAppContainer::new(&config).context("Failed to set up application")?;
    let interactor = container.thin_interactor();
    let text = cli.format == ReportFormat::Text;

    if text {
        print_banner(&config);
    }

    let files = interactor.collect_files(&cli.paths).await;
    if text {
        if files.is_empty() {
            println!("Found no video file(s) to process.");
        } else {
            println!("Found {} video file(s) to process:", files.len());
            for file in &files {
                println!("{}", file.display());
            }
        }
        println!();
    }

    let mut report = BatchReport::new(interactor.executes(), interactor.policy().languages());

    for file in &files {
        let outcome = match interactor.plan_file(file).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Skipping {}: {}", file.display(), e);
                report.record_error(file, &e);
                continue;
            }
        };

        if text {
            if let FileOutcome::Planned {
                selection, plan, ..
            } = &outcome
            {
                println!("{}", render_file_block(file, selection, plan));
            }
        }

        let outcome = interactor.apply(outcome).await;
        report.record(file, &outcome);
    }

    match cli.format {
        ReportFormat::Text => print!("{}", report.render_text()),
        ReportFormat::Json => println!("{}", report.to_json().context("Failed to serialize report")?),
        ReportFormat::Yaml => print!("{}", report.to_yaml().context("Failed to serialize report")?),
    }

    if report.execution_failed() {
        warn!("Some files could not be rewritten");
        return Ok(ExitCode::FAILURE);
    }

    info!("thinmux completed successfully");
    Ok(ExitCode::SUCCESS)
}

fn print_banner(config: &ThinConfig) {
    if !config.run {
        println!("DRYRUN - NO CHANGES WILL BE MADE. ADD '--run' TO MAKE CHANGES\n");
    }
    println!(
        "Removing all languages other than: {}",
        config.languages.join(",")
    );
    if config.convert_lossless {
        println!("Attempting to generate TrueHD audio tracks from DTS-HD MA.");
    }
}
