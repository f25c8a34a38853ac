//! JPEG-style block compression for coefficient domain steganography.
//!
//! This crate turns pixel images into quantized DCT coefficients and back:
//! - RGB to YCbCr colour conversion (BT.601)
//! - 8×8 orthonormal DCT and its inverse
//! - quantization with quality scaled Annex K tables
//! - the zigzag scan order of a block
//!
//! No entropy coding is done, the quantized coefficients themselves are the
//! carrier that `pathsteg-core` hides data in.
//!
//! # Example
//!
//! ```
//! use pathsteg_dct::{compress_image, decompress_image, Image, Plane, QuantizationConfig};
//!
//! let image = Image::Greyscale(Plane::from_fn(16, 16, |y, x| (x * 8 + y) as u8));
//! let config = QuantizationConfig::with_quality(75);
//!
//! let coefficients = compress_image(&image, &config).unwrap();
//! let restored = decompress_image(&coefficients, &config).unwrap();
//! assert_eq!(restored.width(), 16);
//! ```

mod color;
mod compress;
mod dct;
mod error;
mod plane;
mod quality;
mod zigzag;

pub use color::{rgb_to_ycbcr, ycbcr_to_rgb};
pub use compress::{compress_channel, compress_image, decompress_channel, decompress_image};
pub use dct::{forward_dct, inverse_dct, Block, BLOCK_LEN, BLOCK_SIZE};
pub use error::{DctError, Result};
pub use plane::{CoefficientImage, Image, ImageKind, PixelImage, Plane};
pub use quality::{
    dequantize, quantize, QuantizationConfig, QuantizationTable, CHROMINANCE_BASE,
    DEFAULT_QUALITY, LUMINANCE_BASE,
};
pub use zigzag::{zigzag_offset, ZIGZAG_TO_NATURAL};
