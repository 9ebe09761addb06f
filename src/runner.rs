//! Application runner: logging setup and runtime entry.

use std::fs::File;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Shared application configuration, filled in by the binary's CLI flags.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Enable debug logging
    pub debug: bool,
    /// Enable verbose (trace-level) logging
    pub verbose: bool,
}

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the log file or terminal cannot be set up.
pub fn run_tui(config: AppConfig) -> anyhow::Result<()> {
    // The TUI owns stdout, so logs go to a file.
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("platepal");
    std::fs::create_dir_all(&log_dir)?;
    let log_file = File::create(log_dir.join("platepal-tui.log"))?;

    let default_filter = if config.verbose {
        "trace"
    } else if config.debug {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(log_file)),
        )
        .init();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(crate::tui::run())
}
