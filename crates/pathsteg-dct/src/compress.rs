//! Whole channel and whole image compression.
//!
//! A channel is cut into non-overlapping 8×8 blocks, each block is level
//! shifted, transformed and quantized independently. With the `parallel`
//! feature each stripe of eight rows is handed to rayon, stripes never
//! overlap so no synchronisation is needed.

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::color::{rgb_to_ycbcr, ycbcr_to_rgb};
use crate::dct::{forward_dct, inverse_dct, BLOCK_LEN, BLOCK_SIZE};
use crate::error::{DctError, Result};
use crate::plane::{CoefficientImage, Image, Plane, PixelImage};
use crate::quality::{QuantizationConfig, QuantizationTable};

fn compress_stripe(width: usize, input: &[f64], output: &mut [i32], table: &QuantizationTable) {
    for bx in (0..width).step_by(BLOCK_SIZE) {
        let mut block = [0.0f64; BLOCK_LEN];
        for r in 0..BLOCK_SIZE {
            for c in 0..BLOCK_SIZE {
                block[r * BLOCK_SIZE + c] = input[r * width + bx + c];
            }
        }
        let quantized = table.quantize(&forward_dct(&block));
        for r in 0..BLOCK_SIZE {
            for c in 0..BLOCK_SIZE {
                output[r * width + bx + c] = quantized[r * BLOCK_SIZE + c];
            }
        }
    }
}

fn decompress_stripe(width: usize, input: &[i32], output: &mut [f64], table: &QuantizationTable) {
    for bx in (0..width).step_by(BLOCK_SIZE) {
        let mut quantized = [0i32; BLOCK_LEN];
        for r in 0..BLOCK_SIZE {
            for c in 0..BLOCK_SIZE {
                quantized[r * BLOCK_SIZE + c] = input[r * width + bx + c];
            }
        }
        let samples = inverse_dct(&table.dequantize(&quantized));
        for r in 0..BLOCK_SIZE {
            for c in 0..BLOCK_SIZE {
                output[r * width + bx + c] = samples[r * BLOCK_SIZE + c];
            }
        }
    }
}

fn ensure_aligned<T>(plane: &Plane<T>) -> Result<()> {
    if plane.is_block_aligned() {
        Ok(())
    } else {
        Err(DctError::Dimension {
            width: plane.width(),
            height: plane.height(),
        })
    }
}

/// DCT and quantize every block of one channel.
///
/// `table` is the luminance table for Y and greyscale channels and the
/// chrominance table otherwise.
pub fn compress_channel(channel: &Plane<f64>, table: &QuantizationTable) -> Result<Plane<i32>> {
    ensure_aligned(channel)?;
    let width = channel.width();
    let mut output = Plane::<i32>::new(width, channel.height());
    if channel.is_empty() {
        return Ok(output);
    }

    let stripe = width * BLOCK_SIZE;
    let process =
        |(input, out): (&[f64], &mut [i32])| compress_stripe(width, input, out, table);

    #[cfg(feature = "parallel")]
    channel
        .samples()
        .par_chunks(stripe)
        .zip(output.samples_mut().par_chunks_mut(stripe))
        .for_each(process);
    #[cfg(not(feature = "parallel"))]
    channel
        .samples()
        .chunks(stripe)
        .zip(output.samples_mut().chunks_mut(stripe))
        .for_each(process);

    Ok(output)
}

/// Dequantize and inverse DCT every block of one channel.
pub fn decompress_channel(channel: &Plane<i32>, table: &QuantizationTable) -> Result<Plane<f64>> {
    ensure_aligned(channel)?;
    let width = channel.width();
    let mut output = Plane::<f64>::new(width, channel.height());
    if channel.is_empty() {
        return Ok(output);
    }

    let stripe = width * BLOCK_SIZE;
    let process =
        |(input, out): (&[i32], &mut [f64])| decompress_stripe(width, input, out, table);

    #[cfg(feature = "parallel")]
    channel
        .samples()
        .par_chunks(stripe)
        .zip(output.samples_mut().par_chunks_mut(stripe))
        .for_each(process);
    #[cfg(not(feature = "parallel"))]
    channel
        .samples()
        .chunks(stripe)
        .zip(output.samples_mut().chunks_mut(stripe))
        .for_each(process);

    Ok(output)
}

#[inline]
fn to_sample(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Compress a pixel image into quantized coefficients.
///
/// Colour images are converted to YCbCr first, the result holds the Y, Cb
/// and Cr coefficient planes. Fails with [`DctError::Dimension`] unless the
/// image was cropped to multiples of 8.
pub fn compress_image(image: &PixelImage, config: &QuantizationConfig) -> Result<CoefficientImage> {
    image.ensure_block_aligned()?;
    debug!(
        "compressing {:?} image {}x{} at quality {}",
        image.kind(),
        image.width(),
        image.height(),
        config.quality
    );

    match image {
        Image::Greyscale(plane) => {
            let samples = plane.map(|&v| f64::from(v));
            Ok(Image::Greyscale(compress_channel(&samples, &config.luminance)?))
        }
        Image::Colour(r, g, b) => {
            let (width, height) = (r.width(), r.height());
            let mut y = Plane::<f64>::new(width, height);
            let mut cb = Plane::<f64>::new(width, height);
            let mut cr = Plane::<f64>::new(width, height);
            for i in 0..r.len() {
                let (vy, vcb, vcr) = rgb_to_ycbcr(
                    f64::from(r.samples()[i]),
                    f64::from(g.samples()[i]),
                    f64::from(b.samples()[i]),
                );
                y.samples_mut()[i] = vy;
                cb.samples_mut()[i] = vcb;
                cr.samples_mut()[i] = vcr;
            }
            Ok(Image::Colour(
                compress_channel(&y, &config.luminance)?,
                compress_channel(&cb, &config.chrominance)?,
                compress_channel(&cr, &config.chrominance)?,
            ))
        }
    }
}

/// Reconstruct a pixel image from quantized coefficients.
///
/// Lossy: samples are rounded and clamped to `0..=255`.
pub fn decompress_image(
    coefficients: &CoefficientImage,
    config: &QuantizationConfig,
) -> Result<PixelImage> {
    coefficients.ensure_block_aligned()?;

    match coefficients {
        Image::Greyscale(plane) => {
            let samples = decompress_channel(plane, &config.luminance)?;
            Ok(Image::Greyscale(samples.map(|&v| to_sample(v))))
        }
        Image::Colour(y, cb, cr) => {
            let y = decompress_channel(y, &config.luminance)?;
            let cb = decompress_channel(cb, &config.chrominance)?;
            let cr = decompress_channel(cr, &config.chrominance)?;

            let (width, height) = (y.width(), y.height());
            let mut r = Plane::<u8>::new(width, height);
            let mut g = Plane::<u8>::new(width, height);
            let mut b = Plane::<u8>::new(width, height);
            for i in 0..y.len() {
                let (vr, vg, vb) = ycbcr_to_rgb(y.samples()[i], cb.samples()[i], cr.samples()[i]);
                r.samples_mut()[i] = to_sample(vr);
                g.samples_mut()[i] = to_sample(vg);
                b.samples_mut()[i] = to_sample(vb);
            }
            Ok(Image::Colour(r, g, b))
        }
    }
}
