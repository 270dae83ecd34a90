// SPDX-License-Identifier: GPL-3.0-only

//! Decode capability abstraction
//!
//! The pipeline treats barcode recognition as an opaque capability: a
//! [`Decoder`] is handed a grayscale region and a format filter and either
//! locates a symbol or reports a miss. A default QR implementation backed
//! by the `rqrr` crate lives in [`rqrr_decoder`].

pub mod rqrr_decoder;

use crate::formats::SymbolFormat;
use std::sync::Arc;

/// A successfully decoded symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Symbology the payload was encoded in
    pub format: SymbolFormat,
    /// Decoded text payload
    pub payload: String,
}

/// Terminal outcome of one decode task. Exactly one per task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// A symbol was located and read
    Found(Symbol),
    /// No symbol in this frame (includes malformed regions and decode
    /// faults, which are swallowed rather than surfaced)
    NotFound,
    /// The viewport was unavailable; the frame was never examined
    Aborted,
}

/// A grayscale region of interest cropped out of a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumaRegion {
    pub width: u32,
    pub height: u32,
    /// Row-major `width * height` grayscale bytes
    pub data: Vec<u8>,
}

impl LumaRegion {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            width,
            height,
            data,
        }
    }
}

/// External decode capability.
///
/// Implementations may carry internal state between calls (the pipeline
/// calls [`Decoder::reset`] after every attempt), but a single instance is
/// never shared across concurrently running tasks: each task builds its own
/// via the session's [`DecoderFactory`].
pub trait Decoder: Send {
    /// Attempt to locate and read one symbol in the region.
    ///
    /// `None` means no symbol was recognized; it is a routine miss, not an
    /// error, and makes the caller eligible for the single
    /// inverted-luminance retry.
    fn decode(&mut self, region: &LumaRegion, formats: &[SymbolFormat]) -> Option<Symbol>;

    /// Clear any state carried over from the previous attempt.
    fn reset(&mut self);
}

/// Builds one decoder instance per dispatched decode task, so concurrent
/// tasks never contend on shared decoder state.
pub type DecoderFactory = Arc<dyn Fn() -> Box<dyn Decoder> + Send + Sync>;

/// Wrap a closure producing decoder instances into a [`DecoderFactory`].
pub fn decoder_factory<D, F>(build: F) -> DecoderFactory
where
    D: Decoder + 'static,
    F: Fn() -> D + Send + Sync + 'static,
{
    Arc::new(move || Box::new(build()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverDecoder;

    impl Decoder for NeverDecoder {
        fn decode(&mut self, _region: &LumaRegion, _formats: &[SymbolFormat]) -> Option<Symbol> {
            None
        }

        fn reset(&mut self) {}
    }

    #[test]
    fn test_factory_builds_fresh_instances() {
        let factory = decoder_factory(|| NeverDecoder);
        let mut a = factory();
        let mut b = factory();
        let region = LumaRegion::new(vec![0; 4], 2, 2);
        assert_eq!(a.decode(&region, &SymbolFormat::ALL), None);
        assert_eq!(b.decode(&region, &SymbolFormat::ALL), None);
    }
}
