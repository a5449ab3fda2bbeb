//! Package downloads into a per-version output directory
//!
//! Every run writes into a fresh directory named after the selected folder.
//! An existing directory means an earlier run already fetched this version,
//! so nothing is downloaded and nothing on disk is touched.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::info;

use crate::app::client::{join_url, ArchiveClient};
use crate::config::FetchConfig;
use crate::errors::{DownloadError, DownloadResult};

/// Totals for one completed download phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Directory the packages were written to
    pub output_dir: PathBuf,
    /// Number of files written
    pub files: usize,
    /// Total bytes written
    pub bytes: u64,
    /// Wall time of the whole phase
    pub elapsed: Duration,
}

/// Create `output_root/<folder>` for a new run
///
/// Only the final directory is created; a missing output root is a failure.
///
/// # Errors
///
/// - `DownloadError::OutputExists` if the directory is already there
/// - `DownloadError::OutputDirCreate` if it cannot be created
pub async fn prepare_output_dir(output_root: &Path, folder: &str) -> DownloadResult<PathBuf> {
    let output_path = output_root.join(folder.trim_end_matches('/'));

    if output_path.exists() {
        return Err(DownloadError::OutputExists { path: output_path });
    }

    match tokio::fs::create_dir(&output_path).await {
        Ok(()) => Ok(output_path),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(DownloadError::OutputExists { path: output_path })
        }
        Err(source) => Err(DownloadError::OutputDirCreate {
            path: output_path,
            source,
        }),
    }
}

/// Local file name for a package href: its last path segment
///
/// # Errors
///
/// Returns `DownloadError::InvalidFileName` for names that would not land
/// inside the output directory as a plain file
pub fn local_file_name(href: &str) -> DownloadResult<&str> {
    let name = href.rsplit('/').next().unwrap_or(href);
    match name {
        "" | "." | ".." => Err(DownloadError::InvalidFileName {
            name: href.to_string(),
        }),
        name => Ok(name),
    }
}

/// Download every package in `files` from the selected folder, in order
///
/// The output directory is prepared before the first request, so a run that
/// cannot get a fresh directory makes no requests at all.
///
/// # Errors
///
/// Returns `DownloadError` if the output directory cannot be prepared, a
/// file name is unusable, a request fails, or a file cannot be written
pub async fn download_all(
    client: &ArchiveClient,
    config: &FetchConfig,
    folder: &str,
    files: &[String],
) -> DownloadResult<DownloadSummary> {
    let local_names = files
        .iter()
        .map(|href| local_file_name(href))
        .collect::<DownloadResult<Vec<_>>>()?;

    let output_dir = prepare_output_dir(&config.output_root, folder).await?;
    let started = Instant::now();
    let mut bytes = 0u64;

    for (href, local_name) in files.iter().zip(local_names) {
        let url = join_url(
            &config.repository,
            &[folder, config.arch.as_str(), href.as_str()],
            false,
        )?;
        info!("Downloading {}", url);

        let request_start = Instant::now();
        let content = client.get_bytes(&url).await?;
        info!(
            "Downloaded {} bytes in {:?}",
            content.len(),
            request_start.elapsed()
        );

        let destination = output_dir.join(local_name);
        tokio::fs::write(&destination, &content).await?;
        bytes += content.len() as u64;
    }

    Ok(DownloadSummary {
        output_dir,
        files: files.len(),
        bytes,
        elapsed: started.elapsed(),
    })
}
