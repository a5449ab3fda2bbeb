//! Latest-version selection over the archive index
//!
//! The index page lists one folder per build (`v5.10.4/`, `v5.11-rc1/`, ...)
//! next to unrelated links such as sort controls and the parent directory.
//! Each link is evaluated on its own into a [`Candidate`]; the scan keeps the
//! strictly greatest accepted version.

use tracing::{debug, info, warn};

use crate::app::client::{join_url, ArchiveClient};
use crate::app::links::extract_links;
use crate::app::version::Version;
use crate::config::FetchConfig;
use crate::constants::repository;
use crate::errors::DownloadResult;

/// Why a link was not considered as a version folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Anchor had no `href`
    MissingHref,
    /// Link does not start with `v` (parent directory, sort links, files)
    NotVersionFolder,
    /// Folder name after `v` is not a version
    Unparsable { reason: String },
    /// Release candidate while release candidates are excluded
    ReleaseCandidate,
    /// Version below the configured minimum
    BelowMinimum,
}

/// Outcome of evaluating a single index link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    Accepted(Version),
    Skipped(SkipReason),
}

/// The folder chosen by a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Folder href exactly as it appeared on the index page
    pub folder: String,
    /// Version parsed from the folder name
    pub version: Version,
}

impl Selection {
    /// Folder name without the trailing separator, e.g. `v5.10.4`
    pub fn folder_name(&self) -> &str {
        self.folder.trim_end_matches('/')
    }
}

/// Decide whether one index link is an acceptable version folder
pub fn evaluate_candidate(
    href: Option<&str>,
    min_version: &Version,
    include_rc: bool,
) -> Candidate {
    let Some(href) = href else {
        return Candidate::Skipped(SkipReason::MissingHref);
    };

    let name = href.trim_end_matches('/');
    let Some(remainder) = name.strip_prefix(repository::VERSION_FOLDER_PREFIX) else {
        return Candidate::Skipped(SkipReason::NotVersionFolder);
    };

    let version = match Version::parse(remainder) {
        Ok(version) => version,
        Err(e) => {
            return Candidate::Skipped(SkipReason::Unparsable {
                reason: e.to_string(),
            })
        }
    };

    if !include_rc && version.is_release_candidate() {
        return Candidate::Skipped(SkipReason::ReleaseCandidate);
    }

    if version < *min_version {
        return Candidate::Skipped(SkipReason::BelowMinimum);
    }

    Candidate::Accepted(version)
}

/// Pick the greatest acceptable version folder from a list of index links
///
/// Only a strictly greater version replaces the current best, so the first
/// of several equal versions wins.
pub fn select_from_links(
    links: &[Option<String>],
    min_version: &Version,
    include_rc: bool,
) -> Option<Selection> {
    let mut selected: Option<Selection> = None;

    for href in links {
        match evaluate_candidate(href.as_deref(), min_version, include_rc) {
            Candidate::Accepted(version) => {
                let folder = href.clone().unwrap_or_default();
                debug!(
                    "Folder: {} Parsed: {} Segments: {:?}",
                    folder,
                    version,
                    version.segments()
                );
                let replace = match &selected {
                    None => true,
                    Some(current) => current.version < version,
                };
                if replace {
                    selected = Some(Selection { folder, version });
                }
            }
            Candidate::Skipped(SkipReason::Unparsable { reason }) => {
                warn!(
                    "Skipping link '{}': {}",
                    href.as_deref().unwrap_or_default(),
                    reason
                );
            }
            Candidate::Skipped(reason) => {
                debug!("Skipping link {:?}: {:?}", href, reason);
            }
        }
    }

    selected
}

/// Scrape the archive index and select the latest matching version folder
///
/// # Errors
///
/// Returns `DownloadError` if the index page cannot be fetched
pub async fn select_latest(
    client: &ArchiveClient,
    config: &FetchConfig,
) -> DownloadResult<Option<Selection>> {
    let index_url = join_url(&config.repository, &[], true)?;
    info!("Scraping {}", index_url);

    let html = client.get_page(&index_url).await?;
    let links = extract_links(&html);
    if links.is_empty() {
        warn!("Index page {} contains no links", index_url);
    }

    Ok(select_from_links(
        &links,
        &config.min_version,
        config.include_rc,
    ))
}
