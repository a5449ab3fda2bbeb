//! Error types for Kernel Fetcher
//!
//! This module defines the error types for all components of the application.
//! Errors are designed to be actionable and provide clear context for debugging and
//! user feedback.

use std::path::PathBuf;
use thiserror::Error;

/// Version string parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Nothing to parse
    #[error("Version string is empty")]
    Empty,

    /// A separator with nothing on one side, e.g. `5..1` or `5.10.`
    #[error("Version string has an empty segment: '{input}'")]
    EmptySegment { input: String },
}

/// Download and HTTP client errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// HTTP request error
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// Server returned error status
    #[error("Server error: HTTP {status} for {url}")]
    ServerError { status: u16, url: String },

    /// Invalid URL provided
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// I/O error during file operations
    #[error("File I/O error")]
    Io(#[from] std::io::Error),

    /// Output directory left behind by an earlier run
    #[error("Output directory already exists: {path}. A previous download appears complete")]
    OutputExists { path: PathBuf },

    /// Output directory could not be created
    #[error("Unable to create output folder {path}: {source}")]
    OutputDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Package link that does not name a plain file
    #[error("Refusing to write package with unusable file name: '{name}'")]
    InvalidFileName { name: String },
}

impl DownloadError {
    /// Whether this error stops the download phase without failing the run
    pub fn aborts_download_phase(&self) -> bool {
        matches!(
            self,
            DownloadError::OutputExists { .. } | DownloadError::OutputDirCreate { .. }
        )
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Download error
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Download result type alias
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;

/// Version result type alias
pub type VersionResult<T> = std::result::Result<T, VersionError>;

/// Config result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
