//! Kernel Fetcher CLI application
//!
//! Finds the newest mainline kernel build matching the given constraints and
//! downloads its packages into a new directory.

use std::error::Error as _;
use std::process;

use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use kernel_fetcher::cli::{handle_fetch, Cli};
use kernel_fetcher::config::AppConfig;
use kernel_fetcher::constants::logging;
use kernel_fetcher::errors::{AppError, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        report_error(&e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let loaded = AppConfig::load(cli.global.config.clone()).await?;

    init_logging(&cli, &loaded.config.logging.level);

    info!("Kernel Fetcher v{} starting", env!("CARGO_PKG_VERSION"));
    match &loaded.source {
        Some(path) => info!("Loaded configuration from: {}", path.display()),
        None => debug!("No config file found in standard locations"),
    }

    handle_fetch(&cli.fetch, loaded.config).await
}

/// Initialize logging from CLI verbosity and the configured level
fn init_logging(cli: &Cli, configured_level: &str) {
    let log_level = cli.log_level(configured_level);

    let mut filter = EnvFilter::from_default_env();
    let directive = format!(
        "{}={}",
        logging::CRATE_TARGET,
        log_level.as_str().to_ascii_lowercase()
    );
    if let Ok(directive) = directive.parse() {
        filter = filter.add_directive(directive);
    }

    fmt().with_env_filter(filter).with_target(false).init();
}

/// Print the error with its chain of causes
fn report_error(e: &AppError) {
    eprintln!("Error: {}", e);
    let mut source = e.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}
