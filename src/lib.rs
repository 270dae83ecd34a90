// SPDX-License-Identifier: MPL-2.0

//! Scanline - a real-time barcode scanning pipeline
//!
//! Converts a continuous, uncontrolled stream of raw camera frames into at
//! most one successful decode result per scanning session, under bounded
//! memory and bounded concurrent work, with cooperative cancellation.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`scanner`]: session lifecycle, frame intake, dispatch ticker, decode
//!   workers, and exactly-once result delivery
//! - [`decode`]: the opaque decode capability trait plus the built-in
//!   `rqrr`-backed QR decoder
//! - [`providers`]: orientation and viewport collaborators
//! - [`frame`]: raw frame and region types
//! - [`config`]: session tuning knobs
//!
//! # Example
//!
//! ```ignore
//! let scanner = Scanner::new(
//!     ScanConfig::default(),
//!     Arc::new(FixedOrientation::landscape()),
//!     Arc::new(FullFrameViewport),
//!     RqrrDecoder::factory(),
//! );
//! scanner.start(Box::new(|symbol| println!("{}: {}", symbol.format, symbol.payload)))?;
//! scanner.accept(RawFrame::new(luma_bytes, 640, 480));
//! ```

pub mod config;
pub mod decode;
pub mod errors;
pub mod formats;
pub mod frame;
pub mod providers;
pub mod scanner;

// Re-export commonly used types
pub use config::ScanConfig;
pub use decode::rqrr_decoder::RqrrDecoder;
pub use decode::{DecodeOutcome, Decoder, DecoderFactory, LumaRegion, Symbol, decoder_factory};
pub use errors::{FrameError, ScanError, ScanResult};
pub use formats::SymbolFormat;
pub use frame::{FrameId, FrameRotation, RawFrame, ScanRect};
pub use providers::{
    CenteredViewport, DeviceOrientation, FixedOrientation, FullFrameViewport, OrientationProvider,
    ViewportProvider,
};
pub use scanner::{ResultHandler, Scanner, SessionState};
