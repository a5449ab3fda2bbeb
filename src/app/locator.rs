//! Package file discovery inside a version folder
//!
//! A version folder holds one sub-listing per architecture. The packages for
//! one kernel flavour are the files whose names carry its variant token, plus
//! the architecture-independent `all` packages.

use std::fmt;

use tracing::{error, info};

use crate::app::client::{join_url, ArchiveClient};
use crate::app::links::extract_links;
use crate::config::FetchConfig;
use crate::constants::variants;
use crate::errors::DownloadResult;

/// Kernel build flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Generic,
    LowLatency,
}

impl Variant {
    /// Variant for the low-latency switch
    pub fn from_low_latency(low_latency: bool) -> Self {
        if low_latency {
            Variant::LowLatency
        } else {
            Variant::Generic
        }
    }

    /// Token that appears in package file names of this variant
    pub fn token(&self) -> &'static str {
        match self {
            Variant::Generic => variants::GENERIC,
            Variant::LowLatency => variants::LOW_LATENCY,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Keep the links naming packages for `variant`, in page order
pub fn filter_package_links(links: &[Option<String>], variant: Variant) -> Vec<String> {
    links
        .iter()
        .flatten()
        .filter(|href| {
            href.contains(variant.token()) || href.contains(variants::ARCH_INDEPENDENT)
        })
        .cloned()
        .collect()
}

/// List the package files of the configured architecture and variant
///
/// An architecture page without any links at all usually means the build
/// failed or is still being uploaded; that is logged and treated as an empty
/// folder.
///
/// # Errors
///
/// Returns `DownloadError` if the architecture page cannot be fetched
pub async fn locate_files(
    client: &ArchiveClient,
    config: &FetchConfig,
    folder: &str,
) -> DownloadResult<Vec<String>> {
    let arch_url = join_url(&config.repository, &[folder, config.arch.as_str()], true)?;
    info!("Listing {} packages in {}", config.variant, arch_url);

    let html = client.get_page(&arch_url).await?;
    let links = extract_links(&html);
    if links.is_empty() {
        error!("No links found on {}; the folder may be broken or empty", arch_url);
        return Ok(Vec::new());
    }

    Ok(filter_package_links(&links, config.variant))
}
