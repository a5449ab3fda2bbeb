//! Prelude module for Kernel Fetcher Library
//!
//! Re-exports the items most integrations need, so a single
//! `use kernel_fetcher::prelude::*;` is enough.
//!
//! # Usage
//!
//! ```rust,no_run
//! use kernel_fetcher::prelude::*;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<()> {
//!     let mut config = AppConfig::default();
//!     config.selection.min_version = Some("6.1".to_string());
//!
//!     let coordinator = Coordinator::from_config(config.to_runtime_config()?)?;
//!     let outcome = coordinator.run().await?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Pipeline components
pub use crate::app::{
    ArchiveClient, ClientConfig, Coordinator, DownloadSummary, RunOutcome, Selection, Variant,
    Version,
};

// Configuration
pub use crate::config::{AppConfig, FetchConfig};

// Commonly used constants
pub use crate::constants::{DEFAULT_ARCH, DEFAULT_REPOSITORY, FALLBACK_MIN_VERSION, USER_AGENT};
