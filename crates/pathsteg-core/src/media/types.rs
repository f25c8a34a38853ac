use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, Write};
use std::path::Path;

use image::ImageFormat;
use log::{error, warn};
use pathsteg_dct::{decompress_image, CoefficientImage, PixelImage, QuantizationConfig};

use super::container::{self, read_coefficients, write_coefficients};
use super::{pixel_image_from_dynamic, pixel_image_to_dynamic, Persist};
use crate::error::StegError;
use crate::result::Result;

/// a media container for steganography
#[derive(Debug, Clone, PartialEq)]
pub enum Media {
    /// plain pixels, carried losslessly as PNG
    Image(PixelImage),
    /// quantized DCT coefficients and the quality they were quantized with
    Coefficients {
        quality: u8,
        coefficients: CoefficientImage,
    },
}

impl Media {
    pub fn from_image(image: PixelImage) -> Self {
        Self::Image(image)
    }

    /// Load a carrier, picking the domain from the file extension.
    ///
    /// Images whose size is not a multiple of 8 are cropped to the largest
    /// block aligned area.
    pub fn from_file(f: &Path) -> Result<Self> {
        let ext = f
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .ok_or(StegError::UnsupportedMedia)?;

        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "bmp" => {
                let dynamic = image::open(f).map_err(|e| {
                    error!("Error opening image {f:?}: {e}");
                    StegError::InvalidImageMedia
                })?;
                let image = pixel_image_from_dynamic(&dynamic)?;
                match image.crop_to_blocks() {
                    Some(cropped) => {
                        warn!(
                            "{f:?} is {}x{}, cropping to {}x{}",
                            image.width(),
                            image.height(),
                            cropped.width(),
                            cropped.height()
                        );
                        Ok(Self::Image(cropped))
                    }
                    None => Ok(Self::Image(image)),
                }
            }
            container::EXTENSION => {
                let file = File::open(f).map_err(|source| StegError::ReadError { source })?;
                let (quality, coefficients) = read_coefficients(&mut BufReader::new(file))?;
                Ok(Self::Coefficients {
                    quality,
                    coefficients,
                })
            }
            _ => Err(StegError::UnsupportedMedia),
        }
    }

    /// Pixels a viewer would see.
    ///
    /// For coefficients this is the decompressed image.
    pub fn preview(&self) -> Result<PixelImage> {
        match self {
            Media::Image(image) => Ok(image.clone()),
            Media::Coefficients {
                quality,
                coefficients,
            } => Ok(decompress_image(
                coefficients,
                &QuantizationConfig::with_quality(*quality),
            )?),
        }
    }

    /// File extension matching the persisted format.
    pub fn extension(&self) -> &'static str {
        match self {
            Media::Image(_) => "png",
            Media::Coefficients { .. } => container::EXTENSION,
        }
    }

    pub fn save_to_writer<W: Write + Seek>(&self, mut writer: W) -> Result<()> {
        match self {
            Media::Image(image) => pixel_image_to_dynamic(image)?
                .write_to(&mut writer, ImageFormat::Png)
                .map_err(|e| {
                    error!("Error saving image: {e}");
                    StegError::ImageEncodingError
                })?,
            Media::Coefficients {
                quality,
                coefficients,
            } => write_coefficients(&mut writer, *quality, coefficients)?,
        }
        writer
            .flush()
            .map_err(|source| StegError::WriteError { source })
    }
}

impl Persist for Media {
    fn save_as(&self, file: &Path) -> Result<()> {
        let f = File::create(file).map_err(|e| {
            error!("Error creating file {file:?}: {e}");
            StegError::WriteError { source: e }
        })?;
        self.save_to_writer(BufWriter::new(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathsteg_dct::{Image, Plane};
    use tempfile::TempDir;

    fn gradient(width: usize, height: usize) -> PixelImage {
        Image::Colour(
            Plane::from_fn(width, height, |y, x| (y * 9 + x) as u8),
            Plane::from_fn(width, height, |y, _| (y * 3) as u8),
            Plane::from_fn(width, height, |_, x| 255 - x as u8),
        )
    }

    #[test]
    fn test_png_round_trip() -> Result<()> {
        let dir = TempDir::new()?;
        let file = dir.path().join("carrier.png");
        let media = Media::from_image(gradient(16, 8));

        media.save_as(&file)?;
        assert_eq!(Media::from_file(&file)?, media);
        Ok(())
    }

    #[test]
    fn test_coefficients_round_trip() -> Result<()> {
        let dir = TempDir::new()?;
        let file = dir.path().join("carrier.dct");
        let config = QuantizationConfig::with_quality(80);
        let media = Media::Coefficients {
            quality: 80,
            coefficients: pathsteg_dct::compress_image(&gradient(16, 16), &config)?,
        };

        media.save_as(&file)?;
        let loaded = Media::from_file(&file)?;
        assert_eq!(loaded, media);
        assert_eq!(loaded.preview()?.width(), 16);
        Ok(())
    }

    #[test]
    fn test_unaligned_image_is_cropped() -> Result<()> {
        let dir = TempDir::new()?;
        let file = dir.path().join("odd.png");
        Media::from_image(gradient(21, 13)).save_as(&file)?;

        let Media::Image(image) = Media::from_file(&file)? else {
            panic!("expected a pixel image");
        };
        assert_eq!((image.width(), image.height()), (16, 8));
        assert_eq!(image.get(7, 15, 0), Some(&((7 * 9 + 15) as u8)));
        Ok(())
    }

    #[test]
    fn test_unsupported_and_invalid_files() {
        assert!(matches!(
            Media::from_file(Path::new("Cargo.toml")),
            Err(StegError::UnsupportedMedia)
        ));
        assert!(matches!(
            Media::from_file(Path::new("no_such_carrier.png")),
            Err(StegError::InvalidImageMedia)
        ));
        assert!(matches!(
            Media::from_file(Path::new("no_extension")),
            Err(StegError::UnsupportedMedia)
        ));
    }
}
