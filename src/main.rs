//! Herald - decorated notifications fanned out to delivery channels.

use anyhow::Result;
use clap::Parser;
use herald::{app::App, cli::Cli, config::Config};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        // Manually initialize logging for this specific error
        tracing_subscriber::fmt().with_writer(std::io::stderr).init();
        error!("Failed to load configuration: {}", err);
        // Exit if configuration fails, as it's a critical step.
        std::process::exit(1);
    });

    // Initialize logging. RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Herald starting up...");
    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!("Output Format: {}", config.output.format);
    info!(
        "Deduplicate Subscriptions: {}",
        config.publisher.dedupe_subscriptions
    );
    info!("History Limit: {}", config.publisher.history_limit);
    info!("Timestamp: {}", config.notification.timestamp);
    info!(
        "Signature: {}",
        config.notification.signature.as_deref().unwrap_or("None")
    );
    info!("Channels: {}", config.channels.len());
    info!("-------------------------------------------------------");

    let mut app = App::builder(config).build()?;
    let report = app.run()?;

    info!(
        notified = report.notified,
        failures = report.failures.len(),
        "Done."
    );
    Ok(())
}
