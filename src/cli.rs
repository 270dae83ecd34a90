// SPDX-License-Identifier: GPL-3.0-only

//! CLI command feeding an image file through the scan pipeline
//!
//! Replays the same image as a ~30 fps frame stream, which exercises the
//! queue, the dispatch ticker, and the decode workers exactly as a live
//! camera source would.

use scanline::{
    CenteredViewport, FixedOrientation, FullFrameViewport, RawFrame, RqrrDecoder, ScanConfig,
    Scanner, SessionState, ViewportProvider,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Scan a single image file, printing the first decoded symbol.
pub async fn scan_image(
    image_path: PathBuf,
    config_path: Option<PathBuf>,
    viewport_fraction: Option<f32>,
    timeout_secs: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let config: ScanConfig = match config_path {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => ScanConfig::default(),
    };

    let luma = image::open(&image_path)?.to_luma8();
    let (width, height) = luma.dimensions();
    let pixels: Arc<[u8]> = luma.into_raw().into();
    info!(path = %image_path.display(), width, height, "loaded image");

    let viewport: Arc<dyn ViewportProvider> = match viewport_fraction {
        Some(fraction) => Arc::new(CenteredViewport::new(fraction)),
        None => Arc::new(FullFrameViewport),
    };

    let scanner = Arc::new(Scanner::new(
        config,
        Arc::new(FixedOrientation::landscape()),
        viewport,
        RqrrDecoder::factory(),
    ));

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    scanner.start(Box::new(move |symbol| {
        let _ = tx.send(symbol);
    }))?;

    // Producer: replay the image at camera cadence until the session ends
    let producer = {
        let scanner = Arc::clone(&scanner);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(33));
            loop {
                ticker.tick().await;
                if scanner.state() != SessionState::Scanning {
                    break;
                }
                scanner.accept(RawFrame::new(Arc::clone(&pixels), width, height));
            }
        })
    };

    let result = tokio::time::timeout(Duration::from_secs(timeout_secs), rx.recv()).await;
    scanner.stop();
    let _ = producer.await;

    match result {
        Ok(Some(symbol)) => {
            println!("{}: {}", symbol.format, symbol.payload);
            Ok(())
        }
        _ => Err(format!("no symbol found within {}s", timeout_secs).into()),
    }
}
