//! Command-line argument parsing for Kernel Fetcher
//!
//! This module defines the CLI structure using clap derive macros. Every
//! selection flag is optional so that values from the config file apply
//! unless overridden on the command line.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::config::AppConfig;

/// Kernel Fetcher - Download the latest mainline kernel packages
#[derive(Parser, Debug)]
#[command(
    name = "kernel_fetcher",
    version,
    about = "Download the latest mainline Linux kernel packages",
    long_about = "Scrapes a mainline kernel archive for version folders, picks the newest one at or above a minimum version,
and downloads the packages for one architecture and kernel flavour into a new directory."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Selection and download options
    #[command(flatten)]
    pub fetch: FetchArgs,
}

/// Logging and configuration options
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long)]
    pub very_verbose: bool,

    /// Quiet mode - only errors are logged
    #[arg(short, long)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments controlling what is fetched and where it goes
#[derive(Args, Debug, Clone, Default)]
pub struct FetchArgs {
    /// The url for the custom kernel repository
    #[arg(short, long, value_name = "URL")]
    pub repository: Option<String>,

    /// Ignore earlier versions (default: running kernel, else 5.10.4)
    #[arg(long, value_name = "VERSION")]
    pub min_version: Option<String>,

    /// Use architecture (default: amd64)
    #[arg(long)]
    pub arch: Option<String>,

    /// Output folder (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Include release candidate versions
    #[arg(long, conflicts_with = "exclude_rc")]
    pub include_rc: bool,

    /// Exclude release candidates even if the config file includes them
    #[arg(long)]
    pub exclude_rc: bool,

    /// Use low latency kernel instead
    #[arg(long, conflicts_with = "generic")]
    pub low_latency: bool,

    /// Use the generic kernel even if the config file asks for low latency
    #[arg(long)]
    pub generic: bool,

    /// Show what would be downloaded without downloading
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level from the flags, falling back to the configured one
    pub fn log_level(&self, configured: &str) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            configured.parse().unwrap_or(tracing::Level::INFO)
        }
    }
}

impl FetchArgs {
    /// Overlay command-line values onto the file configuration
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(repository) = &self.repository {
            config.repository.url = repository.clone();
        }
        if let Some(arch) = &self.arch {
            config.repository.arch = arch.clone();
        }
        if let Some(min_version) = &self.min_version {
            config.selection.min_version = Some(min_version.clone());
        }
        if let Some(output) = &self.output {
            config.output.root = output.clone();
        }
        if self.include_rc {
            config.selection.include_rc = true;
        } else if self.exclude_rc {
            config.selection.include_rc = false;
        }
        if self.low_latency {
            config.selection.low_latency = true;
        } else if self.generic {
            config.selection.low_latency = false;
        }
    }
}
