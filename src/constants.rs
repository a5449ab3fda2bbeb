//! Application constants for Kernel Fetcher
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

/// Mainline archive defaults
pub mod repository {
    /// Default directory listing of mainline kernel builds
    pub const DEFAULT_URL: &str = "https://kernel.ubuntu.com/~kernel-ppa/mainline/";

    /// Default package architecture
    pub const DEFAULT_ARCH: &str = "amd64";

    /// Prefix carried by every version folder in the index listing
    pub const VERSION_FOLDER_PREFIX: char = 'v';
}

/// Version selection defaults
pub mod selection {
    /// Minimum version used when the host kernel cannot be detected
    pub const FALLBACK_MIN_VERSION: &str = "5.10.4";

    /// Substring that marks a release candidate segment
    pub const RELEASE_CANDIDATE_MARKER: &str = "rc";

    /// Number of dot-separated fields kept from the host release string
    pub const HOST_VERSION_FIELDS: usize = 3;
}

/// Package variant tokens as they appear in package file names
pub mod variants {
    /// Token for the generic kernel flavour
    pub const GENERIC: &str = "generic";

    /// Token for the low-latency kernel flavour
    pub const LOW_LATENCY: &str = "lowlatency";

    /// Token for architecture-independent packages (headers, docs)
    pub const ARCH_INDEPENDENT: &str = "all";
}

/// HTTP client configuration constants
pub mod http {
    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("Kernel-Fetcher/", env!("CARGO_PKG_VERSION"));
}

/// Web scraping CSS selectors
pub mod selectors {
    /// Every anchor in the document, with or without an href
    pub const ANCHOR_SELECTOR: &str = "a";
}

/// Host system paths
pub mod host {
    /// Kernel release string of the running system (Linux only)
    pub const OS_RELEASE_PATH: &str = "/proc/sys/kernel/osrelease";
}

/// Configuration file locations
pub mod config {
    /// Project-local configuration file name
    pub const LOCAL_CONFIG_FILE: &str = "kernel-fetcher.toml";

    /// Directory under the user config dir
    pub const CONFIG_DIR_NAME: &str = "kernel-fetcher";

    /// File name inside the user config directory
    pub const CONFIG_FILE_NAME: &str = "config.toml";
}

/// Logging and debugging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "info";

    /// Target used for the crate-level filter directive
    pub const CRATE_TARGET: &str = "kernel_fetcher";
}

// Re-export commonly used constants for convenience
pub use http::USER_AGENT;
pub use repository::{DEFAULT_ARCH, DEFAULT_URL as DEFAULT_REPOSITORY};
pub use selection::FALLBACK_MIN_VERSION;
