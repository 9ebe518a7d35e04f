//! venue-graph CLI binary.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use venue_graph::cli::Cli;

/// Main entry point for the venue-graph CLI.
///
/// Commands run their lookups one after another, so the single-threaded
/// runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // RUST_LOG overrides the default, e.g. RUST_LOG=venue_graph=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("venue_graph=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting venue-graph CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("venue-graph CLI completed successfully");
    Ok(())
}
