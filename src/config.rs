//! Configuration management for Kernel Fetcher
//!
//! Settings come from three layers: built-in defaults, an optional TOML
//! file, and command-line flags. The merged result is validated once into a
//! [`FetchConfig`] that is handed to every pipeline component explicitly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::app::version::{host_kernel_version, Version};
use crate::app::{ClientConfig, Variant};
use crate::constants::{config as config_files, http, logging, repository, selection};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Archive location and architecture
    pub repository: RepositoryConfigToml,
    /// Version selection settings
    pub selection: SelectionConfigToml,
    /// Output location
    pub output: OutputConfigToml,
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly repository configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RepositoryConfigToml {
    /// Directory listing with one folder per kernel version
    pub url: String,
    /// Architecture sub-listing to download from
    pub arch: String,
}

impl Default for RepositoryConfigToml {
    fn default() -> Self {
        Self {
            url: repository::DEFAULT_URL.to_string(),
            arch: repository::DEFAULT_ARCH.to_string(),
        }
    }
}

/// TOML-friendly selection configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SelectionConfigToml {
    /// Ignore versions below this one (None = running kernel)
    pub min_version: Option<String>,
    /// Consider release candidates
    pub include_rc: bool,
    /// Download the low-latency flavour instead of generic
    pub low_latency: bool,
}

/// TOML-friendly output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfigToml {
    /// Directory in which the per-version folder is created
    pub root: PathBuf,
}

impl Default for OutputConfigToml {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfigToml {
    /// User agent header
    pub user_agent: String,
    /// Request timeout in seconds (None = wait indefinitely)
    pub request_timeout_secs: Option<u64>,
    /// Connect timeout in seconds (None = wait indefinitely)
    pub connect_timeout_secs: Option<u64>,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            user_agent: http::USER_AGENT.to_string(),
            request_timeout_secs: None,
            connect_timeout_secs: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Validated settings for one fetch run
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Archive root URL
    pub repository: String,
    /// Architecture sub-listing, e.g. `amd64`
    pub arch: String,
    /// Lowest acceptable version (inclusive)
    pub min_version: Version,
    /// Whether release candidates are eligible
    pub include_rc: bool,
    /// Kernel flavour to download
    pub variant: Variant,
    /// Parent of the per-version output directory
    pub output_root: PathBuf,
    /// List packages without downloading
    pub dry_run: bool,
    /// HTTP client settings
    pub client: ClientConfig,
}

/// Configuration as loaded, with the file it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    /// Merged file and default settings
    pub config: AppConfig,
    /// File the settings were read from; None when only defaults apply
    pub source: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (explicit path, or the first one found)
    ///
    /// CLI flags are applied on top by the caller. Nothing is logged here
    /// since logging is configured from the result.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<LoadedConfig> {
        let path = match config_file_override {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound { path }),
            Some(path) => Some(path),
            None => Self::find_config_file(),
        };

        let config = match &path {
            Some(path) => Self::load_from_file(path).await?,
            None => Self::default(),
        };
        Ok(LoadedConfig {
            config,
            source: path,
        })
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(".").join(config_files::LOCAL_CONFIG_FILE)];
        if let Some(config_dir) = dirs::config_dir() {
            search_paths.push(
                config_dir
                    .join(config_files::CONFIG_DIR_NAME)
                    .join(config_files::CONFIG_FILE_NAME),
            );
        }

        search_paths.into_iter().find(|path| path.exists())
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(toml::from_str(&content)?)
    }

    /// Validate and convert to the runtime configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unusable repository URL,
    /// architecture or minimum version
    pub fn to_runtime_config(&self) -> ConfigResult<FetchConfig> {
        let repository = validate_repository(&self.repository.url)?;
        let arch = validate_arch(&self.repository.arch)?;
        let min_version = resolve_min_version(self.selection.min_version.as_deref())?;

        Ok(FetchConfig {
            repository,
            arch,
            min_version,
            include_rc: self.selection.include_rc,
            variant: Variant::from_low_latency(self.selection.low_latency),
            output_root: self.output.root.clone(),
            dry_run: false,
            client: self.client.to_runtime_config(),
        })
    }
}

impl ClientConfigToml {
    /// Convert to runtime ClientConfig
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            user_agent: self.user_agent.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
        }
    }
}

fn validate_repository(raw: &str) -> ConfigResult<String> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        field: "repository".to_string(),
        value: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(raw.to_string()),
        scheme => Err(invalid(format!("Unsupported URL scheme '{}'", scheme))),
    }
}

fn validate_arch(raw: &str) -> ConfigResult<String> {
    let arch = raw.trim_matches('/');
    if arch.is_empty() || arch.contains('/') {
        return Err(ConfigError::InvalidValue {
            field: "arch".to_string(),
            value: raw.to_string(),
            reason: "Architecture must be a single folder name".to_string(),
        });
    }
    Ok(arch.to_string())
}

/// Pick the minimum version: configured value, else the running kernel,
/// else the built-in fallback
pub fn resolve_min_version(configured: Option<&str>) -> ConfigResult<Version> {
    let raw = match configured {
        Some(raw) => raw.to_string(),
        None => match host_kernel_version() {
            Some(host) => {
                debug!("Using running kernel {} as minimum version", host);
                host
            }
            None => selection::FALLBACK_MIN_VERSION.to_string(),
        },
    };

    let trimmed = raw
        .strip_prefix(repository::VERSION_FOLDER_PREFIX)
        .unwrap_or(raw.as_str());
    Version::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        field: "min_version".to_string(),
        value: raw.clone(),
        reason: e.to_string(),
    })
}
