//! Command-line interface components
//!
//! This module contains CLI-specific code for the Kernel Fetcher application:
//! argument parsing and the command handler.

pub mod args;
pub mod commands;

pub use args::{Cli, FetchArgs, GlobalArgs};
pub use commands::{describe_outcome, handle_fetch};
