//! Error types for block compression.

use std::fmt;
use thiserror::Error;

/// Result type alias for compression operations.
pub type Result<T> = std::result::Result<T, DctError>;

/// Errors that can occur while compressing or decompressing an image.
#[derive(Error)]
pub enum DctError {
    /// Width or height is not a multiple of the 8×8 block size.
    #[error("image dimensions {width}x{height} are not multiples of 8, crop before compressing")]
    Dimension { width: usize, height: usize },

    /// The colour planes of an image disagree in size.
    #[error("plane of {actual_width}x{actual_height} does not match {width}x{height}")]
    ShapeMismatch {
        width: usize,
        height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    /// A plane was built from a sample buffer of the wrong length.
    #[error("expected {expected} samples but got {actual}")]
    SampleCount { expected: usize, actual: usize },
}

impl fmt::Debug for DctError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
