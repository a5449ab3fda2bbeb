//! Command handlers for Kernel Fetcher CLI
//!
//! This module connects the parsed arguments and loaded configuration to the
//! fetch pipeline and reports the outcome to the user.

use std::time::Instant;

use tracing::info;

use crate::app::{Coordinator, RunOutcome};
use crate::cli::FetchArgs;
use crate::config::AppConfig;
use crate::errors::Result;

/// Handle a fetch run
///
/// Merges the command-line flags into the file configuration, runs the
/// pipeline and prints a short summary. Runs that find nothing to download
/// still succeed.
pub async fn handle_fetch(args: &FetchArgs, mut config: AppConfig) -> Result<()> {
    let start_time = Instant::now();

    args.apply_to(&mut config);
    let mut fetch_config = config.to_runtime_config()?;
    fetch_config.dry_run = args.dry_run;

    info!(
        "Looking for {} {} kernels >= {} (release candidates: {})",
        fetch_config.variant,
        fetch_config.arch,
        fetch_config.min_version,
        if fetch_config.include_rc {
            "included"
        } else {
            "excluded"
        }
    );

    let coordinator = Coordinator::from_config(fetch_config)?;
    let outcome = coordinator.run().await?;

    println!("{}", describe_outcome(&outcome));
    info!("Run finished in {:?}", start_time.elapsed());
    Ok(())
}

/// One-line, user-facing description of how a run ended
pub fn describe_outcome(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::NoFolder => "No matching kernel version found".to_string(),
        RunOutcome::NoFiles { selection } => format!(
            "Found {} but it has no matching packages",
            selection.version
        ),
        RunOutcome::DryRun { selection, files } => {
            let mut text = format!(
                "Would download {} files for {}:",
                files.len(),
                selection.version
            );
            for file in files {
                text.push_str("\n  ");
                text.push_str(file);
            }
            text
        }
        RunOutcome::DownloadAborted {
            selection,
            output_dir,
            reason,
        } => format!(
            "Skipped download of {}: {} ({})",
            selection.version,
            reason,
            output_dir.display()
        ),
        RunOutcome::Downloaded { selection, summary } => format!(
            "Downloaded {} files ({} bytes) for {} to {}",
            summary.files,
            summary.bytes,
            selection.version,
            summary.output_dir.display()
        ),
    }
}
