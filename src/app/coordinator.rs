//! End-to-end fetch pipeline
//!
//! Runs the three stages in order: select the latest folder, list its
//! packages, download them. Empty results end the run early without error.

use std::path::PathBuf;

use tracing::{error, info};

use crate::app::client::ArchiveClient;
use crate::app::download::{download_all, DownloadSummary};
use crate::app::locator::locate_files;
use crate::app::selector::{select_latest, Selection};
use crate::config::FetchConfig;
use crate::errors::Result;

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No folder on the index matched the constraints
    NoFolder,
    /// The selected folder has no packages for the architecture and variant
    NoFiles { selection: Selection },
    /// Packages were listed but not downloaded
    DryRun {
        selection: Selection,
        files: Vec<String>,
    },
    /// The output directory could not be used; nothing was downloaded
    DownloadAborted {
        selection: Selection,
        output_dir: PathBuf,
        reason: String,
    },
    /// All packages were written
    Downloaded {
        selection: Selection,
        summary: DownloadSummary,
    },
}

/// Drives one fetch run with an explicit configuration
#[derive(Debug)]
pub struct Coordinator {
    client: ArchiveClient,
    config: FetchConfig,
}

impl Coordinator {
    /// Create a coordinator for the given client and configuration
    pub fn new(client: ArchiveClient, config: FetchConfig) -> Self {
        Self { client, config }
    }

    /// Build the HTTP client from the configuration and wrap both
    pub fn from_config(config: FetchConfig) -> Result<Self> {
        let client = ArchiveClient::with_config(&config.client)?;
        Ok(Self::new(client, config))
    }

    /// Run select, locate and download in sequence
    ///
    /// # Errors
    ///
    /// Returns `AppError` for any failed request or file write. A missing or
    /// unusable output directory is not an error; it ends the run with
    /// `RunOutcome::DownloadAborted`.
    pub async fn run(&self) -> Result<RunOutcome> {
        info!("Starting kernel fetch from {}", self.config.repository);

        let Some(selection) = select_latest(&self.client, &self.config).await? else {
            info!(
                "No version folder at or above {} found",
                self.config.min_version
            );
            return Ok(RunOutcome::NoFolder);
        };
        info!(
            "Found latest version: {} ({})",
            selection.version, selection.folder
        );

        let files = locate_files(&self.client, &self.config, &selection.folder).await?;
        info!("Got the list {:?}", files);
        if files.is_empty() {
            info!(
                "No {} packages for {} in {}",
                self.config.variant, self.config.arch, selection.folder
            );
            return Ok(RunOutcome::NoFiles { selection });
        }

        if self.config.dry_run {
            info!("Dry run: skipping download of {} files", files.len());
            return Ok(RunOutcome::DryRun { selection, files });
        }

        match download_all(&self.client, &self.config, &selection.folder, &files).await {
            Ok(summary) => {
                info!(
                    "Downloaded {} files ({} bytes) to {} in {:?}",
                    summary.files,
                    summary.bytes,
                    summary.output_dir.display(),
                    summary.elapsed
                );
                Ok(RunOutcome::Downloaded { selection, summary })
            }
            Err(e) if e.aborts_download_phase() => {
                error!("{}", e);
                let output_dir = self.config.output_root.join(selection.folder_name());
                Ok(RunOutcome::DownloadAborted {
                    selection,
                    output_dir,
                    reason: e.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}
