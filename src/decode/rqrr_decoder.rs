// SPDX-License-Identifier: GPL-3.0-only

//! QR decoder backed by the `rqrr` crate
//!
//! `rqrr` prepares a fresh binarized image per attempt, so this adapter
//! carries no state across frames and `reset` is a no-op.

use crate::decode::{Decoder, DecoderFactory, LumaRegion, Symbol, decoder_factory};
use crate::formats::SymbolFormat;
use tracing::debug;

/// QR-only decode capability
#[derive(Debug, Default)]
pub struct RqrrDecoder;

impl RqrrDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Factory handing each decode task its own instance
    pub fn factory() -> DecoderFactory {
        decoder_factory(RqrrDecoder::new)
    }
}

impl Decoder for RqrrDecoder {
    fn decode(&mut self, region: &LumaRegion, formats: &[SymbolFormat]) -> Option<Symbol> {
        if !formats.contains(&SymbolFormat::QrCode) {
            return None;
        }

        let width = region.width as usize;
        let height = region.height as usize;
        if width == 0 || height == 0 || region.data.len() < width * height {
            return None;
        }

        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| {
            region.data[y * width + x]
        });

        for grid in prepared.detect_grids() {
            match grid.decode() {
                Ok((_meta, payload)) => {
                    return Some(Symbol {
                        format: SymbolFormat::QrCode,
                        payload,
                    });
                }
                Err(e) => {
                    // A located grid that fails to read is still a miss
                    debug!(error = %e, "QR grid decode failed");
                }
            }
        }

        None
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_region_is_a_miss() {
        let mut decoder = RqrrDecoder::new();
        let region = LumaRegion::new(vec![255; 64 * 64], 64, 64);
        assert_eq!(decoder.decode(&region, &SymbolFormat::ALL), None);
    }

    #[test]
    fn test_format_filter_excluding_qr_skips_decode() {
        let mut decoder = RqrrDecoder::new();
        let region = LumaRegion::new(vec![0; 64 * 64], 64, 64);
        assert_eq!(decoder.decode(&region, &[SymbolFormat::Ean13]), None);
    }

    #[test]
    fn test_undersized_buffer_is_a_miss() {
        let mut decoder = RqrrDecoder::new();
        let region = LumaRegion {
            width: 64,
            height: 64,
            data: vec![0; 16],
        };
        assert_eq!(decoder.decode(&region, &SymbolFormat::ALL), None);
    }
}
