//! The encode and decode operations.
//!
//! Every operation crosses a carrier domain (plain pixels or compressed
//! coefficients) with a path strategy (simple, keyed or path token) and,
//! for encoding, an embedding [`Technique`]. The steps are always the same:
//! check capacity, compress if asked to, derive the path, embed or extract,
//! and for path tokens encrypt or decrypt the path.

use log::debug;
use pathsteg_dct::{compress_image, CoefficientImage, Image, PixelImage, QuantizationConfig};

use crate::embed::{embed, extract, Sample, Technique};
use crate::media::{CodecOptions, Encoding, Media};
use crate::message::{Message, LENGTH_HEADER_BITS};
use crate::path::{decrypt_path, encrypt_path, Carrier, Path, PathToken};
use crate::{Result, SecretKey, StegError};

/// Where the bits go, with the key material the strategy needs.
#[derive(Debug, Clone, Copy)]
pub enum Strategy<'k> {
    /// Simple path on plain images, zigzag path on compressed ones.
    Simple,
    /// Path derived from the shared key on both ends.
    Keyed(&'k SecretKey),
    /// Random path, shipped encrypted under the key as a [`PathToken`].
    Path(&'k SecretKey),
}

impl<'k> Strategy<'k> {
    /// Pair an [`Encoding`] with an optional key.
    pub fn new(encoding: Encoding, key: Option<&'k SecretKey>) -> Result<Self> {
        match (encoding, key) {
            (Encoding::Simple, _) => Ok(Strategy::Simple),
            (Encoding::Key, Some(key)) => Ok(Strategy::Keyed(key)),
            (Encoding::Path, Some(key)) => Ok(Strategy::Path(key)),
            (_, None) => Err(StegError::MissingKey),
        }
    }
}

/// Hide `message` in `carrier` along the path `strategy` chooses.
///
/// Capacity is checked before any sample changes. Returns the path token
/// for [`Strategy::Path`] and `None` otherwise.
pub fn hide<T: Sample>(
    carrier: &mut Image<T>,
    message: &Message,
    strategy: Strategy<'_>,
    technique: Technique,
) -> Result<Option<PathToken>>
where
    Image<T>: Carrier,
{
    let bits = message.to_bits()?;
    carrier.check_capacity(bits.len())?;
    debug!(
        "hiding {} bits with {:?} in a {:?} carrier",
        bits.len(),
        technique,
        carrier.kind()
    );

    let (path, token) = match strategy {
        Strategy::Simple => (carrier.sequential_path().truncated(bits.len()), None),
        Strategy::Keyed(key) => (carrier.keyed_path(key)?.truncated(bits.len()), None),
        Strategy::Path(key) => {
            let path = carrier.random_path(bits.len())?;
            let token = encrypt_path(&path, key)?;
            (path, Some(token))
        }
    };

    embed(carrier, &path, &bits, technique)?;

    Ok(token)
}

/// Read a framed message along `path`, header first.
pub fn unveil_message<T: Sample>(carrier: &Image<T>, path: &Path) -> Result<Message> {
    if path.len() < LENGTH_HEADER_BITS {
        return Err(StegError::NoSecretData);
    }
    let header = extract(carrier, &path.truncated(LENGTH_HEADER_BITS))?;
    let total = Message::announced_bit_len(&header)?;
    if total > path.len() {
        return Err(StegError::CorruptMessage {
            announced: total,
            available: path.len(),
        });
    }

    Message::from_bits(&extract(carrier, &path.truncated(total))?)
}

/// Recover a message hidden by [`hide`] with the same strategy.
///
/// [`Strategy::Path`] needs the token produced when hiding.
pub fn unveil<T: Sample>(
    carrier: &Image<T>,
    strategy: Strategy<'_>,
    token: Option<&PathToken>,
) -> Result<Message>
where
    Image<T>: Carrier,
{
    let path = match strategy {
        Strategy::Simple => carrier.sequential_path(),
        Strategy::Keyed(key) => carrier.keyed_path(key)?,
        Strategy::Path(key) => {
            let token = token.ok_or(StegError::MissingPathToken)?;
            decrypt_path(token, key)?
        }
    };

    unveil_message(carrier, &path)
}

pub fn image_simple_encode(
    image: &mut PixelImage,
    message: &Message,
    technique: Technique,
) -> Result<()> {
    hide(image, message, Strategy::Simple, technique).map(|_| ())
}

pub fn image_simple_decode(image: &PixelImage) -> Result<Message> {
    unveil(image, Strategy::Simple, None)
}

pub fn image_key_encode(
    image: &mut PixelImage,
    message: &Message,
    key: &SecretKey,
    technique: Technique,
) -> Result<()> {
    hide(image, message, Strategy::Keyed(key), technique).map(|_| ())
}

pub fn image_key_decode(image: &PixelImage, key: &SecretKey) -> Result<Message> {
    unveil(image, Strategy::Keyed(key), None)
}

pub fn image_path_encode(
    image: &mut PixelImage,
    message: &Message,
    key: &SecretKey,
    technique: Technique,
) -> Result<PathToken> {
    hide(image, message, Strategy::Path(key), technique)?.ok_or(StegError::MissingPathToken)
}

pub fn image_path_decode(
    image: &PixelImage,
    token: &PathToken,
    key: &SecretKey,
) -> Result<Message> {
    unveil(image, Strategy::Path(key), Some(token))
}

/// Compress `image` and hide along the zigzag path of its coefficients.
pub fn jpeg_zigzag_encode(
    image: &PixelImage,
    message: &Message,
    config: &QuantizationConfig,
    technique: Technique,
) -> Result<CoefficientImage> {
    let mut coefficients = compress_image(image, config)?;
    hide(&mut coefficients, message, Strategy::Simple, technique)?;
    Ok(coefficients)
}

/// Regenerate the zigzag path from the received coefficients and read along it.
pub fn jpeg_zigzag_decode(coefficients: &CoefficientImage) -> Result<Message> {
    unveil(coefficients, Strategy::Simple, None)
}

pub fn jpeg_key_encode(
    image: &PixelImage,
    message: &Message,
    key: &SecretKey,
    config: &QuantizationConfig,
    technique: Technique,
) -> Result<CoefficientImage> {
    let mut coefficients = compress_image(image, config)?;
    hide(&mut coefficients, message, Strategy::Keyed(key), technique)?;
    Ok(coefficients)
}

pub fn jpeg_key_decode(coefficients: &CoefficientImage, key: &SecretKey) -> Result<Message> {
    unveil(coefficients, Strategy::Keyed(key), None)
}

pub fn jpeg_path_encode(
    image: &PixelImage,
    message: &Message,
    key: &SecretKey,
    config: &QuantizationConfig,
    technique: Technique,
) -> Result<(CoefficientImage, PathToken)> {
    let mut coefficients = compress_image(image, config)?;
    let token = hide(&mut coefficients, message, Strategy::Path(key), technique)?
        .ok_or(StegError::MissingPathToken)?;
    Ok((coefficients, token))
}

pub fn jpeg_path_decode(
    coefficients: &CoefficientImage,
    token: &PathToken,
    key: &SecretKey,
) -> Result<Message> {
    unveil(coefficients, Strategy::Path(key), Some(token))
}

/// Result of [`encode`]: the carrier and, for the path encoding, its token.
#[derive(Debug)]
pub struct Encoded {
    pub media: Media,
    pub token: Option<PathToken>,
}

/// Hide `message` in `cover` as `options` describe.
///
/// A plain cover is compressed first when `options.compression` is set.
/// A cover that already is a coefficient carrier is used as is.
pub fn encode(
    cover: Media,
    message: &Message,
    options: &CodecOptions,
    key: Option<&SecretKey>,
) -> Result<Encoded> {
    let strategy = Strategy::new(options.encoding, key)?;

    let media = match (cover, options.compression) {
        (Media::Image(image), Some(quality)) => {
            let config = QuantizationConfig::with_quality(quality);
            Media::Coefficients {
                quality: config.quality,
                coefficients: compress_image(&image, &config)?,
            }
        }
        (media, _) => media,
    };

    match media {
        Media::Image(mut image) => {
            let token = hide(&mut image, message, strategy, options.technique)?;
            Ok(Encoded {
                media: Media::Image(image),
                token,
            })
        }
        Media::Coefficients {
            quality,
            mut coefficients,
        } => {
            let token = hide(&mut coefficients, message, strategy, options.technique)?;
            Ok(Encoded {
                media: Media::Coefficients {
                    quality,
                    coefficients,
                },
                token,
            })
        }
    }
}

/// Recover a message from `media`, the carrier domain follows from the media itself.
pub fn decode(
    media: &Media,
    encoding: Encoding,
    key: Option<&SecretKey>,
    token: Option<&PathToken>,
) -> Result<Message> {
    let strategy = Strategy::new(encoding, key)?;
    match media {
        Media::Image(image) => unveil(image, strategy, token),
        Media::Coefficients { coefficients, .. } => unveil(coefficients, strategy, token),
    }
}
