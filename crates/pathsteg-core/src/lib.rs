//! # Pathsteg Core API
//!
//! Hides text messages in images, either in the plain pixel samples or in the
//! quantized DCT coefficients of a JPEG-style compression of the image. Where
//! the bits go is decided by a path strategy:
//! - simple: sequential pixels, or the zigzag order of the coefficient blocks
//! - key: a permutation both parties derive from a shared key
//! - path: a random path, handed to the receiver as an encrypted [`PathToken`]
//!
//! Bits are written by LSB replacement or LSB matching, see [`Technique`].
//!
//! # Usage Examples
//!
//! ## Hide and unveil in memory
//!
//! ```rust
//! use pathsteg_core::{image_key_decode, image_key_encode, Image, Message, Plane, SecretKey, Technique};
//!
//! let mut image = Image::Greyscale(Plane::from_fn(32, 32, |y, x| (x * 7 + y * 3) as u8));
//! let key = SecretKey::generate();
//! let message = Message::new("Hello, World!");
//!
//! image_key_encode(&mut image, &message, &key, Technique::Matching).unwrap();
//! assert_eq!(image_key_decode(&image, &key).unwrap(), message);
//! ```
//!
//! ## Hide data inside an image file
//!
//! ```rust
//! use pathsteg_core::{CodecOptions, Encoding, Image, Media, Persist, Plane};
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//! let carrier = temp_dir.path().join("carrier.png");
//! Media::from_image(Image::Greyscale(Plane::from_fn(64, 64, |y, x| (x ^ y) as u8)))
//!     .save_as(&carrier)
//!     .expect("Failed to write carrier");
//!
//! let hidden = pathsteg_core::api::hide::prepare()
//!     .with_message("Hello, World!")
//!     .with_key("SuperSecret42")
//!     .with_options(CodecOptions::default().with_encoding(Encoding::Key))
//!     .with_image(&carrier)
//!     .with_output(temp_dir.path().join("image-with-a-secret.png"))
//!     .execute()
//!     .expect("Failed to hide message in image");
//!
//! let message = pathsteg_core::api::unveil::prepare()
//!     .from_secret_file(hidden.output)
//!     .with_key("SuperSecret42")
//!     .with_encoding(Encoding::Key)
//!     .execute()
//!     .expect("Failed to unveil message from image");
//! assert_eq!(message.text, "Hello, World!");
//! ```

#![warn(clippy::redundant_else)]

pub mod bit_iterator;
pub use bit_iterator::BitIterator;

pub mod message;
pub use message::*;

pub mod api;
pub mod codec;
pub mod commands;
pub mod embed;
pub mod error;
pub mod key;
pub mod media;
pub mod path;
pub mod result;

pub use crate::codec::{
    decode, encode, hide, image_key_decode, image_key_encode, image_path_decode,
    image_path_encode, image_simple_decode, image_simple_encode, jpeg_key_decode,
    jpeg_key_encode, jpeg_path_decode, jpeg_path_encode, jpeg_zigzag_decode, jpeg_zigzag_encode,
    unveil, unveil_message, Encoded, Strategy,
};
pub use crate::embed::{embed, extract, Technique};
pub use crate::error::StegError;
pub use crate::key::SecretKey;
pub use crate::media::{CodecOptions, Encoding, Media, Persist};
pub use crate::path::{
    check_dct_capacity, check_image_capacity, decrypt_path, encrypt_path, generate_dct_path,
    generate_dct_path_from_key, generate_path, generate_path_from_key, generate_simple_path,
    generate_zigzag_dct_path, Carrier, Coordinate, Path, PathToken,
};
pub use crate::result::Result;
pub use pathsteg_cipher::generate_key;
pub use pathsteg_dct::{
    CoefficientImage, Image, ImageKind, PixelImage, Plane, QuantizationConfig, DEFAULT_QUALITY,
};
