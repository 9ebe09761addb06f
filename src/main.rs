//! PlatePal - recipe & nutrition chat assistant for the terminal.

use clap::Parser;
use platepal::runner::{run_tui, AppConfig};

/// PlatePal - your AI recipe & nutrition companion 🥗
#[derive(Parser, Debug)]
#[command(name = "platepal")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short = 'd', long)]
    debug: bool,

    /// Enable verbose (trace-level) logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl From<&Args> for AppConfig {
    fn from(args: &Args) -> Self {
        AppConfig {
            debug: args.debug,
            verbose: args.verbose,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run_tui(AppConfig::from(&args))
}
