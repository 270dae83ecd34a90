// SPDX-License-Identifier: GPL-3.0-only

use clap::Parser;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "scanline")]
#[command(about = "Scan an image for barcodes through the real-time pipeline")]
#[command(version)]
struct Cli {
    /// Image file to scan
    image: PathBuf,

    /// JSON file holding a scan configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Restrict decoding to a centered square covering this fraction of
    /// the shorter frame edge (0.0-1.0)
    #[arg(long)]
    viewport: Option<f32>,

    /// Give up after this many seconds
    #[arg(short, long, default_value = "5")]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=scanline=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    cli::scan_image(cli.image, cli.config, cli.viewport, cli.timeout).await
}
