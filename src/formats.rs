// SPDX-License-Identifier: GPL-3.0-only

//! Barcode symbol formats

use serde::{Deserialize, Serialize};

/// A barcode symbology the pipeline can be configured to match.
///
/// Opaque beyond acting as a filter for the decode capability; the default
/// configuration enables every format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolFormat {
    Aztec,
    Codabar,
    Code39,
    Code93,
    Code128,
    DataMatrix,
    Ean8,
    Ean13,
    Itf,
    MaxiCode,
    Pdf417,
    QrCode,
    Rss14,
    RssExpanded,
    UpcA,
    UpcE,
    UpcEanExtension,
}

impl SymbolFormat {
    /// Every supported format, used as the default decode filter
    pub const ALL: [SymbolFormat; 17] = [
        SymbolFormat::Aztec,
        SymbolFormat::Codabar,
        SymbolFormat::Code39,
        SymbolFormat::Code93,
        SymbolFormat::Code128,
        SymbolFormat::DataMatrix,
        SymbolFormat::Ean8,
        SymbolFormat::Ean13,
        SymbolFormat::Itf,
        SymbolFormat::MaxiCode,
        SymbolFormat::Pdf417,
        SymbolFormat::QrCode,
        SymbolFormat::Rss14,
        SymbolFormat::RssExpanded,
        SymbolFormat::UpcA,
        SymbolFormat::UpcE,
        SymbolFormat::UpcEanExtension,
    ];

    /// Get display name for the format
    pub fn display_name(&self) -> &'static str {
        match self {
            SymbolFormat::Aztec => "Aztec",
            SymbolFormat::Codabar => "Codabar",
            SymbolFormat::Code39 => "Code 39",
            SymbolFormat::Code93 => "Code 93",
            SymbolFormat::Code128 => "Code 128",
            SymbolFormat::DataMatrix => "Data Matrix",
            SymbolFormat::Ean8 => "EAN-8",
            SymbolFormat::Ean13 => "EAN-13",
            SymbolFormat::Itf => "ITF",
            SymbolFormat::MaxiCode => "MaxiCode",
            SymbolFormat::Pdf417 => "PDF417",
            SymbolFormat::QrCode => "QR Code",
            SymbolFormat::Rss14 => "RSS-14",
            SymbolFormat::RssExpanded => "RSS Expanded",
            SymbolFormat::UpcA => "UPC-A",
            SymbolFormat::UpcE => "UPC-E",
            SymbolFormat::UpcEanExtension => "UPC/EAN Extension",
        }
    }
}

impl std::fmt::Display for SymbolFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_formats_are_distinct() {
        for (i, a) in SymbolFormat::ALL.iter().enumerate() {
            for b in SymbolFormat::ALL.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(SymbolFormat::QrCode.to_string(), "QR Code");
        assert_eq!(SymbolFormat::Ean13.display_name(), "EAN-13");
    }
}
