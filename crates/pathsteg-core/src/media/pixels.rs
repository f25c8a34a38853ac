use image::{ColorType, DynamicImage, GrayImage, Rgb, RgbImage};
use log::error;
use pathsteg_dct::{Image, PixelImage, Plane};

use crate::{Result, StegError};

/// Convert a decoded image file into planes.
///
/// Luma sources stay greyscale, everything else becomes RGB. Alpha is dropped.
pub fn pixel_image_from_dynamic(img: &DynamicImage) -> Result<PixelImage> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    match img.color() {
        ColorType::L8 | ColorType::La8 | ColorType::L16 | ColorType::La16 => {
            let plane = Plane::from_samples(width, height, img.to_luma8().into_raw())?;
            Ok(Image::Greyscale(plane))
        }
        _ => {
            let rgb = img.to_rgb8();
            let channel = |c: usize| {
                Plane::from_fn(width, height, |y, x| rgb.get_pixel(x as u32, y as u32).0[c])
            };
            Ok(Image::colour(channel(0), channel(1), channel(2))?)
        }
    }
}

/// Convert planes back into an image that can be written to a file.
pub fn pixel_image_to_dynamic(image: &PixelImage) -> Result<DynamicImage> {
    let (width, height) = (image.width() as u32, image.height() as u32);
    match image {
        Image::Greyscale(plane) => GrayImage::from_raw(width, height, plane.samples().to_vec())
            .map(DynamicImage::ImageLuma8)
            .ok_or_else(|| {
                error!("Greyscale plane does not match {width}x{height}");
                StegError::ImageEncodingError
            }),
        Image::Colour(r, g, b) => {
            let pixel = |x: u32, y: u32| {
                let (x, y) = (x as usize, y as usize);
                Rgb([
                    r.get(y, x).copied().unwrap_or_default(),
                    g.get(y, x).copied().unwrap_or_default(),
                    b.get(y, x).copied().unwrap_or_default(),
                ])
            };
            Ok(DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, pixel)))
        }
    }
}
