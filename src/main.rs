use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use heartrisk::cli::{self, Cli};
use heartrisk::config::Config;

fn main() -> Result<()> {
    // Load configuration first
    let config = Config::load()?;

    // Initialize tracing; logs go to stderr so stdout stays clean for
    // command output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "HeartRisk starting up");

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    cli::run(cli, &config)?;

    info!("HeartRisk completed successfully");
    Ok(())
}
