//! In-memory sample planes and images.

use crate::dct::BLOCK_SIZE;
use crate::error::{DctError, Result};

/// A single 2-D channel, samples stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane<T> {
    width: usize,
    height: usize,
    samples: Vec<T>,
}

impl<T: Copy + Default> Plane<T> {
    /// A plane filled with `T::default()`.
    pub fn new(width: usize, height: usize) -> Self {
        Plane {
            width,
            height,
            samples: vec![T::default(); width * height],
        }
    }

    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut samples = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                samples.push(f(y, x));
            }
        }
        Plane {
            width,
            height,
            samples,
        }
    }

    /// Crop to the top-left `width`×`height` region.
    pub fn cropped(&self, width: usize, height: usize) -> Self {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Plane::from_fn(width, height, |y, x| self.samples[y * self.width + x])
    }
}

impl<T> Plane<T> {
    pub fn from_samples(width: usize, height: usize, samples: Vec<T>) -> Result<Self> {
        if samples.len() != width * height {
            return Err(DctError::SampleCount {
                expected: width * height,
                actual: samples.len(),
            });
        }
        Ok(Plane {
            width,
            height,
            samples,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at row `y`, column `x`, `None` when out of bounds.
    #[inline]
    pub fn get(&self, y: usize, x: usize) -> Option<&T> {
        if y < self.height && x < self.width {
            self.samples.get(y * self.width + x)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, y: usize, x: usize) -> Option<&mut T> {
        if y < self.height && x < self.width {
            self.samples.get_mut(y * self.width + x)
        } else {
            None
        }
    }

    #[inline]
    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    #[inline]
    pub fn samples_mut(&mut self) -> &mut [T] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<T> {
        self.samples
    }

    /// Apply `f` to every sample, keeping the shape.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Plane<U> {
        Plane {
            width: self.width,
            height: self.height,
            samples: self.samples.iter().map(f).collect(),
        }
    }

    /// Both dimensions are multiples of the block size.
    pub fn is_block_aligned(&self) -> bool {
        self.width % BLOCK_SIZE == 0 && self.height % BLOCK_SIZE == 0
    }
}

/// Whether an image carries one or three channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Greyscale,
    Colour,
}

impl ImageKind {
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ImageKind::Greyscale => 1,
            ImageKind::Colour => 3,
        }
    }
}

/// A greyscale image or a colour image of three equally sized planes.
///
/// For pixel images the colour planes are R, G and B in that order, for
/// coefficient images they are Y, Cb and Cr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Image<T> {
    Greyscale(Plane<T>),
    Colour(Plane<T>, Plane<T>, Plane<T>),
}

/// 8 bit pixel samples.
pub type PixelImage = Image<u8>;

/// Quantized DCT coefficients.
pub type CoefficientImage = Image<i32>;

impl<T> Image<T> {
    /// Build a colour image, rejecting planes of differing sizes.
    pub fn colour(first: Plane<T>, second: Plane<T>, third: Plane<T>) -> Result<Self> {
        let image = Image::Colour(first, second, third);
        image.ensure_uniform()?;
        Ok(image)
    }

    #[inline]
    pub fn kind(&self) -> ImageKind {
        match self {
            Image::Greyscale(_) => ImageKind::Greyscale,
            Image::Colour(..) => ImageKind::Colour,
        }
    }

    #[inline]
    fn first(&self) -> &Plane<T> {
        match self {
            Image::Greyscale(p) | Image::Colour(p, _, _) => p,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.first().width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.first().height
    }

    /// Total number of addressable samples over all channels.
    pub fn sample_count(&self) -> usize {
        self.planes().iter().map(|p| p.len()).sum()
    }

    /// The planes in channel order.
    pub fn planes(&self) -> Vec<&Plane<T>> {
        match self {
            Image::Greyscale(p) => vec![p],
            Image::Colour(a, b, c) => vec![a, b, c],
        }
    }

    pub fn planes_mut(&mut self) -> Vec<&mut Plane<T>> {
        match self {
            Image::Greyscale(p) => vec![p],
            Image::Colour(a, b, c) => vec![a, b, c],
        }
    }

    /// Plane for channel `z`, `None` for an out of range channel.
    pub fn plane(&self, z: usize) -> Option<&Plane<T>> {
        match (self, z) {
            (Image::Greyscale(p), 0) => Some(p),
            (Image::Colour(a, _, _), 0) => Some(a),
            (Image::Colour(_, b, _), 1) => Some(b),
            (Image::Colour(_, _, c), 2) => Some(c),
            _ => None,
        }
    }

    pub fn plane_mut(&mut self, z: usize) -> Option<&mut Plane<T>> {
        match (self, z) {
            (Image::Greyscale(p), 0) => Some(p),
            (Image::Colour(a, _, _), 0) => Some(a),
            (Image::Colour(_, b, _), 1) => Some(b),
            (Image::Colour(_, _, c), 2) => Some(c),
            _ => None,
        }
    }

    /// Sample at (`y`, `x`) of channel `z`.
    #[inline]
    pub fn get(&self, y: usize, x: usize, z: usize) -> Option<&T> {
        self.plane(z).and_then(|p| p.get(y, x))
    }

    #[inline]
    pub fn get_mut(&mut self, y: usize, x: usize, z: usize) -> Option<&mut T> {
        self.plane_mut(z).and_then(|p| p.get_mut(y, x))
    }

    /// Fail with [`DctError::ShapeMismatch`] unless all planes share one size.
    pub fn ensure_uniform(&self) -> Result<()> {
        let first = self.first();
        match self
            .planes()
            .into_iter()
            .find(|p| p.width != first.width || p.height != first.height)
        {
            Some(plane) => Err(DctError::ShapeMismatch {
                width: first.width,
                height: first.height,
                actual_width: plane.width,
                actual_height: plane.height,
            }),
            None => Ok(()),
        }
    }

    /// Fail with [`DctError::Dimension`] unless both sides are multiples of 8.
    ///
    /// Planes of differing sizes fail with [`DctError::ShapeMismatch`] first.
    pub fn ensure_block_aligned(&self) -> Result<()> {
        self.ensure_uniform()?;
        if self.planes().iter().all(|p| p.is_block_aligned()) {
            Ok(())
        } else {
            Err(DctError::Dimension {
                width: self.width(),
                height: self.height(),
            })
        }
    }
}

impl<T: Copy + Default> Image<T> {
    /// Largest block aligned size not exceeding the current one.
    pub fn block_aligned_size(&self) -> (usize, usize) {
        (
            self.width() - self.width() % BLOCK_SIZE,
            self.height() - self.height() % BLOCK_SIZE,
        )
    }

    /// Crop every plane down to multiples of 8, `None` if already aligned.
    pub fn crop_to_blocks(&self) -> Option<Self> {
        let (width, height) = self.block_aligned_size();
        if width == self.width() && height == self.height() {
            return None;
        }
        Some(match self {
            Image::Greyscale(p) => Image::Greyscale(p.cropped(width, height)),
            Image::Colour(a, b, c) => Image::Colour(
                a.cropped(width, height),
                b.cropped(width, height),
                c.cropped(width, height),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_indexing() {
        let plane = Plane::from_fn(4, 3, |y, x| (y * 10 + x) as u8);
        assert_eq!(plane.get(2, 3), Some(&23));
        assert_eq!(plane.get(3, 0), None);
        assert_eq!(plane.get(0, 4), None);
    }

    #[test]
    fn test_from_samples_checks_length() {
        assert!(Plane::from_samples(2, 2, vec![0u8; 4]).is_ok());
        assert!(matches!(
            Plane::from_samples(2, 2, vec![0u8; 5]),
            Err(DctError::SampleCount { expected: 4, actual: 5 })
        ));
    }

    #[test]
    fn test_colour_requires_equal_planes() {
        let a = Plane::<u8>::new(8, 8);
        let b = Plane::<u8>::new(8, 8);
        let c = Plane::<u8>::new(16, 8);
        assert!(Image::colour(a, b, c).is_err());
    }

    #[test]
    fn test_block_aligned_planes_must_agree() {
        let image = Image::Colour(Plane::<u8>::new(8, 8), Plane::new(8, 16), Plane::new(8, 8));
        assert!(matches!(
            image.ensure_block_aligned(),
            Err(DctError::ShapeMismatch { actual_width: 8, actual_height: 16, .. })
        ));
        assert!(Image::Greyscale(Plane::<u8>::new(8, 8)).ensure_uniform().is_ok());
    }

    #[test]
    fn test_channel_access() {
        let image = Image::Colour(
            Plane::from_fn(8, 8, |_, _| 1u8),
            Plane::from_fn(8, 8, |_, _| 2u8),
            Plane::from_fn(8, 8, |_, _| 3u8),
        );
        assert_eq!(image.kind(), ImageKind::Colour);
        assert_eq!(image.get(0, 0, 2), Some(&3));
        assert_eq!(image.get(0, 0, 3), None);
        assert_eq!(image.sample_count(), 192);

        let grey = Image::Greyscale(Plane::<u8>::new(8, 8));
        assert_eq!(grey.get(0, 0, 1), None);
    }

    #[test]
    fn test_crop_to_blocks() {
        let image = Image::Greyscale(Plane::from_fn(13, 17, |y, x| (y + x) as u8));
        assert!(image.ensure_block_aligned().is_err());

        let cropped = image.crop_to_blocks().unwrap();
        assert_eq!((cropped.width(), cropped.height()), (8, 16));
        assert_eq!(cropped.get(15, 7, 0), Some(&22));
        assert!(cropped.ensure_block_aligned().is_ok());
        assert!(cropped.crop_to_blocks().is_none());
    }
}
