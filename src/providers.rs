// SPDX-License-Identifier: GPL-3.0-only

//! Orientation and viewport collaborators
//!
//! The pipeline never talks to display or layout code directly. Decode
//! tasks query these traits for the current device orientation and for the
//! region of interest the framing UI allows them to examine.

use crate::frame::ScanRect;

/// Coarse device orientation class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceOrientation {
    /// Frames need rotating upright before decoding
    Portrait,
    /// Frames arrive upright
    #[default]
    Landscape,
}

/// Reports how the device is currently held.
///
/// Queried once per decode task, so implementations should be cheap and
/// must be safe to call from blocking worker threads.
pub trait OrientationProvider: Send + Sync {
    /// Current orientation class
    fn orientation(&self) -> DeviceOrientation;

    /// Clockwise quarter turns needed to upright a frame (0-3)
    fn quarter_turns(&self) -> u32;
}

/// Computes the region of interest for a frame of the given dimensions.
///
/// Returning `None` means the framing layout is not ready; the frame is
/// dropped silently rather than decoded whole.
pub trait ViewportProvider: Send + Sync {
    fn viewport(&self, width: u32, height: u32) -> Option<ScanRect>;
}

/// Fixed orientation, for headless capture sources and tests
#[derive(Debug, Clone, Copy)]
pub struct FixedOrientation {
    orientation: DeviceOrientation,
    quarter_turns: u32,
}

impl FixedOrientation {
    pub fn landscape() -> Self {
        Self {
            orientation: DeviceOrientation::Landscape,
            quarter_turns: 0,
        }
    }

    pub fn portrait(quarter_turns: u32) -> Self {
        Self {
            orientation: DeviceOrientation::Portrait,
            quarter_turns: quarter_turns % 4,
        }
    }
}

impl OrientationProvider for FixedOrientation {
    fn orientation(&self) -> DeviceOrientation {
        self.orientation
    }

    fn quarter_turns(&self) -> u32 {
        self.quarter_turns
    }
}

/// Viewport spanning the entire frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FullFrameViewport;

impl ViewportProvider for FullFrameViewport {
    fn viewport(&self, width: u32, height: u32) -> Option<ScanRect> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(ScanRect::new(0, 0, width, height))
    }
}

/// Centered square viewport sized to a fraction of the shorter frame edge,
/// the headless analog of an on-screen framing reticle.
#[derive(Debug, Clone, Copy)]
pub struct CenteredViewport {
    fraction: f32,
}

impl CenteredViewport {
    /// `fraction` is clamped to (0, 1]
    pub fn new(fraction: f32) -> Self {
        Self {
            fraction: if fraction > 0.0 && fraction <= 1.0 {
                fraction
            } else {
                1.0
            },
        }
    }
}

impl ViewportProvider for CenteredViewport {
    fn viewport(&self, width: u32, height: u32) -> Option<ScanRect> {
        let short_edge = width.min(height);
        if short_edge == 0 {
            return None;
        }
        let side = ((short_edge as f32 * self.fraction) as u32).max(1);
        Some(ScanRect::new(
            (width - side) / 2,
            (height - side) / 2,
            side,
            side,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_frame_viewport() {
        let rect = FullFrameViewport.viewport(640, 480);
        assert_eq!(rect, Some(ScanRect::new(0, 0, 640, 480)));
        assert_eq!(FullFrameViewport.viewport(0, 480), None);
    }

    #[test]
    fn test_centered_viewport_is_contained() {
        let rect = CenteredViewport::new(0.5).viewport(640, 480).unwrap();
        assert_eq!(rect.width, 240);
        assert_eq!(rect.height, 240);
        assert!(rect.fits_within(640, 480));
    }

    #[test]
    fn test_centered_viewport_bad_fraction_falls_back() {
        let rect = CenteredViewport::new(2.0).viewport(100, 80).unwrap();
        assert_eq!(rect.width, 80);
        assert!(rect.fits_within(100, 80));
    }

    #[test]
    fn test_fixed_orientation() {
        let portrait = FixedOrientation::portrait(5);
        assert_eq!(portrait.orientation(), DeviceOrientation::Portrait);
        assert_eq!(portrait.quarter_turns(), 1);

        let landscape = FixedOrientation::landscape();
        assert_eq!(landscape.orientation(), DeviceOrientation::Landscape);
    }
}
