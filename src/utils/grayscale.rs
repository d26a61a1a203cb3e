//! Convert BGR scanlines to grayscale
//! Y = 0.299*R + 0.587*G + 0.114*B
//!
//! The weighted sum is evaluated in f64, left to right, and truncated toward
//! zero. Existing reference output depends on these exact bytes, so the
//! weights must not be replaced with a fixed-point approximation.

/// Red weight (ITU-R BT.601)
pub const WEIGHT_R: f64 = 0.299;
/// Green weight (ITU-R BT.601)
pub const WEIGHT_G: f64 = 0.587;
/// Blue weight (ITU-R BT.601)
pub const WEIGHT_B: f64 = 0.114;

/// Bytes per BGR pixel
pub const BGR_PIXEL_SIZE: usize = 3;

/// Luminance of one pixel, truncated to u8
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    (WEIGHT_R * f64::from(r) + WEIGHT_G * f64::from(g) + WEIGHT_B * f64::from(b)) as u8
}

/// Convert `gray.len()` BGR pixels from `bgr` into `gray`
///
/// Any bytes in `bgr` past `gray.len() * 3` (scanline padding) are ignored.
///
/// # Panics
/// If `bgr` holds fewer than `gray.len()` pixels.
pub fn bgr_row_to_grayscale(bgr: &[u8], gray: &mut [u8]) {
    assert!(
        bgr.len() >= gray.len() * BGR_PIXEL_SIZE,
        "BGR row too short"
    );

    for (out, px) in gray.iter_mut().zip(bgr.chunks_exact(BGR_PIXEL_SIZE)) {
        *out = luma(px[2], px[1], px[0]);
    }
}
