// SPDX-License-Identifier: GPL-3.0-only

//! Pure luminance-plane operations
//!
//! Rotation, cropping, and tonal inversion used by decode tasks. All
//! functions are pure: output depends only on the arguments, and rotation
//! always preserves total buffer length.

use crate::decode::LumaRegion;
use crate::frame::ScanRect;

/// Rotate the `width * height` luma plane 90 degrees clockwise.
///
/// Bytes past the luma plane (packed chroma in YUV buffers) are carried
/// through unchanged so output length equals input length.
pub fn rotate_90_cw(data: &[u8], width: usize, height: usize) -> Vec<u8> {
    let luma_len = width * height;
    let mut out = vec![0u8; data.len()];
    for y in 0..height {
        for x in 0..width {
            out[x * height + (height - 1 - y)] = data[y * width + x];
        }
    }
    out[luma_len..].copy_from_slice(&data[luma_len..]);
    out
}

/// Rotate the luma plane clockwise `turns` quarter turns (wraps modulo 4).
///
/// Odd turn counts leave the buffer laid out for swapped dimensions; the
/// caller is responsible for swapping its width/height bookkeeping.
pub fn rotate_quarter_turns(data: &[u8], width: u32, height: u32, turns: u32) -> Vec<u8> {
    let mut buf = data.to_vec();
    let mut w = width as usize;
    let mut h = height as usize;
    for _ in 0..(turns % 4) {
        buf = rotate_90_cw(&buf, w, h);
        std::mem::swap(&mut w, &mut h);
    }
    buf
}

/// Extract a rectangular region from the luma plane.
///
/// Returns `None` when the rect is empty or falls outside the plane; the
/// caller treats that as a routine miss, matching how malformed regions are
/// swallowed everywhere else.
pub fn crop(data: &[u8], width: u32, height: u32, rect: &ScanRect) -> Option<LumaRegion> {
    if !rect.fits_within(width, height) {
        return None;
    }
    let stride = width as usize;
    if data.len() < stride * height as usize {
        return None;
    }

    let mut out = Vec::with_capacity(rect.width as usize * rect.height as usize);
    for row in rect.y..rect.y + rect.height {
        let start = row as usize * stride + rect.x as usize;
        out.extend_from_slice(&data[start..start + rect.width as usize]);
    }
    Some(LumaRegion::new(out, rect.width, rect.height))
}

/// Tonally invert a region (light/dark swapped) for the second-pass
/// attempt against inverted-polarity symbols.
pub fn invert(region: &LumaRegion) -> LumaRegion {
    LumaRegion {
        width: region.width,
        height: region.height,
        data: region.data.iter().map(|b| 255 - b).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_90_cw_small_plane() {
        // 3x2 plane:
        //   1 2 3
        //   4 5 6
        let data = [1u8, 2, 3, 4, 5, 6];
        let rotated = rotate_90_cw(&data, 3, 2);
        // Expected 2x3:
        //   4 1
        //   5 2
        //   6 3
        assert_eq!(rotated, vec![4, 1, 5, 2, 6, 3]);
    }

    #[test]
    fn test_rotate_preserves_chroma_tail() {
        let data = [1u8, 2, 3, 4, 9, 9, 9];
        let rotated = rotate_90_cw(&data, 2, 2);
        assert_eq!(rotated.len(), data.len());
        assert_eq!(&rotated[4..], &[9, 9, 9]);
    }

    #[test]
    fn test_four_turns_is_identity() {
        let data = [1u8, 2, 3, 4, 5, 6];
        assert_eq!(rotate_quarter_turns(&data, 3, 2, 4), data.to_vec());
        assert_eq!(rotate_quarter_turns(&data, 3, 2, 0), data.to_vec());
    }

    #[test]
    fn test_two_turns_reverses_plane() {
        let data = [1u8, 2, 3, 4];
        assert_eq!(rotate_quarter_turns(&data, 2, 2, 2), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_crop_interior_rect() {
        // 4x3 plane with row-major values 0..12
        let data: Vec<u8> = (0..12).collect();
        let region = crop(&data, 4, 3, &ScanRect::new(1, 1, 2, 2)).unwrap();
        assert_eq!(region.width, 2);
        assert_eq!(region.height, 2);
        assert_eq!(region.data, vec![5, 6, 9, 10]);
    }

    #[test]
    fn test_crop_rejects_out_of_bounds_rect() {
        let data: Vec<u8> = (0..12).collect();
        assert!(crop(&data, 4, 3, &ScanRect::new(2, 0, 3, 2)).is_none());
        assert!(crop(&data, 4, 3, &ScanRect::new(0, 0, 0, 2)).is_none());
    }

    #[test]
    fn test_invert_round_trips() {
        let region = LumaRegion::new(vec![0, 127, 255, 16], 2, 2);
        let inverted = invert(&region);
        assert_eq!(inverted.data, vec![255, 128, 0, 239]);
        assert_eq!(invert(&inverted), region);
    }
}
