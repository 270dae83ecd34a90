// SPDX-License-Identifier: GPL-3.0-only

//! Shared frame types for the scan pipeline

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Unique identity assigned to each captured frame.
///
/// Frame ids key the in-flight task registry, so every [`RawFrame`] must be
/// distinct even when two frames share the same underlying pixel buffer.
pub type FrameId = u64;

static NEXT_FRAME_ID: AtomicU64 = AtomicU64::new(1);

/// A single raw frame handed to the pipeline by a capture source.
///
/// The buffer is immutable after capture. Frames are deliberately not
/// `Clone`: ownership moves from the producer into the queue and from the
/// queue into the one decode task that claims it.
#[derive(Debug)]
pub struct RawFrame {
    id: FrameId,
    pub width: u32,
    pub height: u32,
    /// Luma plane followed by optional packed chroma bytes
    pub data: Arc<[u8]>,
    /// Timestamp when the frame was captured (for latency diagnostics)
    pub captured_at: Instant,
}

impl RawFrame {
    /// Wrap a captured buffer, assigning a fresh frame id.
    pub fn new(data: impl Into<Arc<[u8]>>, width: u32, height: u32) -> Self {
        Self {
            id: NEXT_FRAME_ID.fetch_add(1, Ordering::Relaxed),
            width,
            height,
            data: data.into(),
            captured_at: Instant::now(),
        }
    }

    /// Identity of this frame instance
    pub fn id(&self) -> FrameId {
        self.id
    }

    /// Number of bytes the luma plane requires for the stated dimensions
    pub fn luma_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the buffer holds at least a full luma plane.
    ///
    /// Buffers shorter than `width * height` cannot be rotated or cropped
    /// and are rejected at intake.
    pub fn has_full_luma_plane(&self) -> bool {
        self.width > 0 && self.height > 0 && self.data.len() >= self.luma_len()
    }
}

/// A rectangular region of interest within a frame, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ScanRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check that the rect is non-empty and lies fully inside a
    /// `frame_width` x `frame_height` plane.
    pub fn fits_within(&self, frame_width: u32, frame_height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x.checked_add(self.width).is_some_and(|r| r <= frame_width)
            && self.y.checked_add(self.height).is_some_and(|b| b <= frame_height)
    }
}

/// Frame rotation expressed in clockwise quarter turns
///
/// Mirrors how mounted camera sensors report their orientation: the frame
/// must be turned 0-3 quarter turns clockwise to appear upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameRotation {
    /// No rotation needed
    #[default]
    None,
    /// 90 degrees clockwise
    Rotate90,
    /// 180 degrees (upside down)
    Rotate180,
    /// 270 degrees clockwise
    Rotate270,
}

impl FrameRotation {
    /// Create a rotation from a quarter-turn count (wraps modulo 4).
    pub fn from_quarter_turns(turns: u32) -> Self {
        match turns % 4 {
            1 => FrameRotation::Rotate90,
            2 => FrameRotation::Rotate180,
            3 => FrameRotation::Rotate270,
            _ => FrameRotation::None,
        }
    }

    /// Get the quarter-turn count (0-3)
    pub fn quarter_turns(&self) -> u32 {
        match self {
            FrameRotation::None => 0,
            FrameRotation::Rotate90 => 1,
            FrameRotation::Rotate180 => 2,
            FrameRotation::Rotate270 => 3,
        }
    }

    /// Check if rotation swaps width and height
    pub fn swaps_dimensions(&self) -> bool {
        matches!(self, FrameRotation::Rotate90 | FrameRotation::Rotate270)
    }
}

impl std::fmt::Display for FrameRotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.quarter_turns() * 90)
    }
}
