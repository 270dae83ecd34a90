// SPDX-License-Identifier: MPL-2.0

//! Error types for the scan pipeline
//!
//! Nothing in here is fatal to the pipeline: configuration errors make
//! intake a no-op, frame errors drop the offending frame, and decode misses
//! never surface as errors at all.

use std::fmt;

/// Result type alias using ScanError
pub type ScanResult<T> = Result<T, ScanError>;

/// Main pipeline error type
#[derive(Debug, Clone)]
pub enum ScanError {
    /// Session misconfiguration (missing handler, double start)
    Configuration(String),
    /// A frame was rejected at intake
    Frame(FrameError),
    /// Capture-source errors at the binary edge
    Source(String),
}

/// Frame-level rejection reasons
#[derive(Debug, Clone)]
pub enum FrameError {
    /// Buffer shorter than the luma plane the dimensions require
    BufferTooShort { expected: usize, actual: usize },
    /// Width or height is zero
    EmptyDimensions,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            ScanError::Frame(e) => write!(f, "Frame error: {}", e),
            ScanError::Source(msg) => write!(f, "Source error: {}", msg),
        }
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::BufferTooShort { expected, actual } => write!(
                f,
                "buffer holds {} bytes but the luma plane needs {}",
                actual, expected
            ),
            FrameError::EmptyDimensions => write!(f, "frame has zero width or height"),
        }
    }
}

impl std::error::Error for ScanError {}
impl std::error::Error for FrameError {}

impl From<FrameError> for ScanError {
    fn from(err: FrameError) -> Self {
        ScanError::Frame(err)
    }
}

impl From<String> for ScanError {
    fn from(msg: String) -> Self {
        ScanError::Source(msg)
    }
}

impl From<&str> for ScanError {
    fn from(msg: &str) -> Self {
        ScanError::Source(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ScanError::Configuration("no result handler".into());
        assert_eq!(err.to_string(), "Configuration error: no result handler");

        let err: ScanError = FrameError::BufferTooShort {
            expected: 12,
            actual: 4,
        }
        .into();
        assert!(err.to_string().contains("luma plane needs 12"));
    }
}
