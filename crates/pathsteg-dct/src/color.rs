//! Colour space conversion.
//!
//! RGB to YCbCr following the BT.601 full range model used by JFIF:
//! ```text
//! Y  =  0.299 * R + 0.587 * G + 0.114 * B
//! Cb = -0.169 * R - 0.331 * G + 0.500 * B + 128
//! Cr =  0.500 * R - 0.419 * G - 0.081 * B + 128
//! ```
//!
//! Values stay in floating point so that the only rounding of the whole
//! compression pipeline happens during quantization.

const CHROMA_CENTER: f64 = 128.0;

/// Convert a single RGB sample triple to YCbCr.
#[inline]
pub fn rgb_to_ycbcr(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = CHROMA_CENTER - 0.169 * r - 0.331 * g + 0.5 * b;
    let cr = CHROMA_CENTER + 0.5 * r - 0.419 * g - 0.081 * b;
    (y, cb, cr)
}

/// Convert a single YCbCr sample triple back to RGB.
///
/// Results are not clamped, callers rounding to 8 bit samples clamp afterwards.
#[inline]
pub fn ycbcr_to_rgb(y: f64, cb: f64, cr: f64) -> (f64, f64, f64) {
    let cb = cb - CHROMA_CENTER;
    let cr = cr - CHROMA_CENTER;
    let r = y + 1.402 * cr;
    let g = y - 0.34414 * cb - 0.71414 * cr;
    let b = y + 1.772 * cb;
    (r, g, b)
}
