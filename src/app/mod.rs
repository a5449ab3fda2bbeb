//! Core application logic for Kernel Fetcher
//!
//! This module contains the pipeline components: version parsing, link
//! extraction, the archive HTTP client, folder selection, package discovery,
//! downloading and the coordinator that runs them in order.
//!
//! # Examples
//!
//! ```rust,no_run
//! use kernel_fetcher::app::{select_from_links, extract_links, Version};
//!
//! let html = r#"<a href="v5.10.4/">v5.10.4/</a><a href="v5.11-rc1/">v5.11-rc1/</a>"#;
//! let links = extract_links(html);
//! let min = Version::parse("5.0").unwrap();
//!
//! if let Some(selection) = select_from_links(&links, &min, false) {
//!     println!("Latest: {} in {}", selection.version, selection.folder);
//! }
//! ```

pub mod client;
pub mod coordinator;
pub mod download;
pub mod links;
pub mod locator;
pub mod selector;
pub mod version;

// Re-export main public API
pub use client::{join_url, ArchiveClient, ClientConfig};
pub use coordinator::{Coordinator, RunOutcome};
pub use download::{download_all, prepare_output_dir, DownloadSummary};
pub use links::extract_links;
pub use locator::{filter_package_links, locate_files, Variant};
pub use selector::{
    evaluate_candidate, select_from_links, select_latest, Candidate, Selection, SkipReason,
};
pub use version::{host_kernel_version, Segment, Version};
