//! HTTP client for the mainline kernel archive
//!
//! One request at a time, full bodies only. Any non-success status is turned
//! into an error; there is no retry.
//!
//! The module is organized into:
//! - `config`: HTTP client configuration and building
//! - this file: the client wrapper and URL joining

use reqwest::{Client, Response};
use url::Url;

use crate::errors::{DownloadError, DownloadResult};

pub mod config;

pub use config::ClientConfig;

/// HTTP client for fetching directory listings and package files
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    client: Client,
}

impl ArchiveClient {
    /// Creates a client with default configuration
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if the underlying HTTP client cannot be built
    pub fn new() -> DownloadResult<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Creates a client with custom configuration
    pub fn with_config(config: &ClientConfig) -> DownloadResult<Self> {
        let client = config.build_http_client()?;
        Ok(Self { client })
    }

    /// Performs a GET and rejects non-success responses
    ///
    /// # Errors
    ///
    /// Returns `DownloadError::Http` on transport failure and
    /// `DownloadError::ServerError` when the server answers with a
    /// non-success status
    pub async fn get_response(&self, url: &Url) -> DownloadResult<Response> {
        let response = self.client.get(url.as_str()).send().await?;

        if !response.status().is_success() {
            return Err(DownloadError::ServerError {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        tracing::debug!("Successfully fetched response: {}", url);
        Ok(response)
    }

    /// Fetches a page body as text
    pub async fn get_page(&self, url: &Url) -> DownloadResult<String> {
        let response = self.get_response(url).await?;
        let text = response.text().await?;
        tracing::debug!("Fetched page {} ({} bytes)", url, text.len());
        Ok(text)
    }

    /// Fetches a response body as raw bytes
    pub async fn get_bytes(&self, url: &Url) -> DownloadResult<Vec<u8>> {
        let response = self.get_response(url).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Join a base URL and path segments with exactly one `/` between each
///
/// Scraped folder hrefs may or may not end in `/`; separators at the edges of
/// every piece are trimmed before joining. With `directory` set the result
/// ends in `/`, which directory listings expect.
///
/// # Errors
///
/// Returns `DownloadError::InvalidUrl` if the joined string is not a URL
pub fn join_url(base: &str, segments: &[&str], directory: bool) -> DownloadResult<Url> {
    let mut joined = base.trim_end_matches('/').to_string();

    for segment in segments {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            continue;
        }
        joined.push('/');
        joined.push_str(segment);
    }

    if directory {
        joined.push('/');
    }

    Url::parse(&joined).map_err(|e| DownloadError::InvalidUrl {
        url: joined.clone(),
        error: e.to_string(),
    })
}
