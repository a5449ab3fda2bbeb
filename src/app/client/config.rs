//! HTTP client configuration and building logic
//!
//! This module handles the configuration and construction of the HTTP client
//! used against the mainline archive.

use std::time::Duration;

use reqwest::Client;

use crate::constants::http;
use crate::errors::{DownloadError, DownloadResult};

/// Configuration for the archive HTTP client
///
/// No timeouts are set unless configured: a listing or package request waits
/// for the server for as long as it takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// User agent sent with every request
    pub user_agent: String,
    /// Whole-request timeout
    pub request_timeout: Option<Duration>,
    /// Connect timeout
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: http::USER_AGENT.to_string(),
            request_timeout: None,
            connect_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Builds the HTTP client with the specified configuration
    pub fn build_http_client(&self) -> DownloadResult<Client> {
        let mut client_builder = Client::builder().user_agent(self.user_agent.as_str());

        if let Some(timeout) = self.request_timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(timeout) = self.connect_timeout {
            client_builder = client_builder.connect_timeout(timeout);
        }

        client_builder.build().map_err(DownloadError::Http)
    }
}
