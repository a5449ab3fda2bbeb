//! Kernel Fetcher Library
//!
//! A Rust library for finding and downloading the latest mainline Linux kernel
//! packages from a directory-listing archive such as kernel.ubuntu.com.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
