//! Coordinate paths through a carrier.
//!
//! A path is the ordered list of sample coordinates that message bits are
//! written to and read from. Four strategies produce one:
//!
//! - **simple**: every coordinate in a fixed order, channel outer, then
//!   column, then row. Plain images only.
//! - **random**: distinct coordinates drawn from the operating system RNG.
//!   The path is shipped to the receiver as an encrypted [`PathToken`].
//! - **keyed**: a shuffle seeded from the shared key, so both sides derive
//!   the same path without exchanging anything else.
//! - **zigzag**: the non-zero coefficients of every 8×8 block in zigzag
//!   scan order. Compressed images only.
//!
//! Coefficient domain strategies never select a zero coefficient.

mod permutation;
pub mod token;

pub use permutation::Permutation;
pub use token::{decrypt_path, encrypt_path, PathToken};

use byteorder::{BigEndian, ByteOrder};
use log::debug;
use pathsteg_dct::{zigzag_offset, CoefficientImage, Image, ImageKind, PixelImage, BLOCK_LEN, BLOCK_SIZE};
use rand::rngs::OsRng;
use rand::seq::index;

use crate::embed::Sample;
use crate::{Result, SecretKey, StegError};

/// Argon2 salt for the per axis seeds of keyed plain paths.
const KEYED_PATH_DOMAIN: &[u8; 16] = b"pathsteg-axis-v1";

/// Argon2 salt for the seed of keyed coefficient paths.
const KEYED_DCT_PATH_DOMAIN: &[u8; 16] = b"pathsteg-dct--v1";

/// Position of one sample: row `y`, column `x`, channel `z` (0 for greyscale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub y: usize,
    pub x: usize,
    pub z: usize,
}

impl Coordinate {
    #[inline]
    pub fn new(y: usize, x: usize, z: usize) -> Self {
        Self { y, x, z }
    }
}

/// An ordered sequence of coordinates for one kind of image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    kind: ImageKind,
    coordinates: Vec<Coordinate>,
}

impl Path {
    pub fn new(kind: ImageKind, coordinates: Vec<Coordinate>) -> Self {
        Self { kind, coordinates }
    }

    #[inline]
    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    #[inline]
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.coordinates.iter()
    }

    /// Keep only the first `len` coordinates.
    pub fn truncate(&mut self, len: usize) {
        self.coordinates.truncate(len);
    }

    /// A copy of the first `len` coordinates.
    pub fn truncated(&self, len: usize) -> Path {
        Path {
            kind: self.kind,
            coordinates: self.coordinates[..len.min(self.len())].to_vec(),
        }
    }
}

/// Number of samples a path may address.
pub fn usable_count<T: Sample>(image: &Image<T>) -> usize {
    image
        .planes()
        .iter()
        .map(|p| p.samples().iter().filter(|s| s.is_usable()).count())
        .sum()
}

fn check_capacity(required: usize, available: usize) -> Result<()> {
    if required > available {
        return Err(StegError::Capacity {
            required,
            available,
        });
    }
    Ok(())
}

/// Fail unless `bits` fit into the samples of a plain image.
pub fn check_image_capacity(image: &PixelImage, bits: usize) -> Result<()> {
    check_capacity(bits, image.sample_count())
}

/// Fail unless `bits` fit into the non-zero coefficients of a compressed image.
pub fn check_dct_capacity(image: &CoefficientImage, bits: usize) -> Result<()> {
    check_capacity(bits, usable_count(image))
}

/// Every coordinate of the image, channel outer, then column, then row.
pub fn generate_simple_path<T>(image: &Image<T>) -> Path {
    let (width, height) = (image.width(), image.height());
    let channels = image.kind().channels();

    let mut coordinates = Vec::with_capacity(width * height * channels);
    for z in 0..channels {
        for x in 0..width {
            for y in 0..height {
                coordinates.push(Coordinate::new(y, x, z));
            }
        }
    }
    Path::new(image.kind(), coordinates)
}

/// `len` distinct uniformly random coordinates of a plain image.
pub fn generate_path(image: &PixelImage, len: usize) -> Result<Path> {
    check_image_capacity(image, len)?;

    let (width, height) = (image.width(), image.height());
    let plane = width * height;
    let coordinates = index::sample(&mut OsRng, image.sample_count(), len)
        .into_iter()
        .map(|i| {
            let within = i % plane;
            Coordinate::new(within / width, within % width, i / plane)
        })
        .collect();

    Ok(Path::new(image.kind(), coordinates))
}

/// Coordinates of all non-zero coefficients, channel by channel in raster order.
fn usable_coordinates(image: &CoefficientImage) -> Vec<Coordinate> {
    let mut coordinates = Vec::new();
    for (z, plane) in image.planes().into_iter().enumerate() {
        for y in 0..plane.height() {
            for x in 0..plane.width() {
                if plane.get(y, x).is_some_and(|c| c.is_usable()) {
                    coordinates.push(Coordinate::new(y, x, z));
                }
            }
        }
    }
    coordinates
}

/// `len` distinct uniformly random coordinates of non-zero coefficients.
///
/// Zero coefficients and coordinates already taken are never drawn.
pub fn generate_dct_path(image: &CoefficientImage, len: usize) -> Result<Path> {
    let candidates = usable_coordinates(image);
    check_capacity(len, candidates.len())?;

    let coordinates = index::sample(&mut OsRng, candidates.len(), len)
        .into_iter()
        .map(|i| candidates[i])
        .collect();

    Ok(Path::new(image.kind(), coordinates))
}

/// Every coordinate of the image, each axis shuffled by its own seed derived from `key`.
///
/// Channel outer, column middle, row inner, in shuffled order per axis.
pub fn generate_path_from_key<T>(image: &Image<T>, key: &SecretKey) -> Result<Path> {
    let mut seeds = [0u8; 24];
    pathsteg_cipher::derive_seed(key.as_bytes(), KEYED_PATH_DOMAIN, &mut seeds)?;

    let (width, height) = (image.width(), image.height());
    let channels = image.kind().channels();
    let ys = Permutation::from_seed(BigEndian::read_u64(&seeds[0..8]), height);
    let xs = Permutation::from_seed(BigEndian::read_u64(&seeds[8..16]), width);
    let zs = Permutation::from_seed(BigEndian::read_u64(&seeds[16..24]), channels);

    let mut coordinates = Vec::with_capacity(width * height * channels);
    for &z in zs.indices() {
        for &x in xs.indices() {
            for &y in ys.indices() {
                coordinates.push(Coordinate::new(y, x, z));
            }
        }
    }
    debug!("derived keyed path over {} samples", coordinates.len());

    Ok(Path::new(image.kind(), coordinates))
}

/// Non-zero coefficients of every block in zigzag scan order.
///
/// Channels in order, blocks in raster order, each block from the DC
/// coefficient to (7, 7). Depends on nothing but the coefficients, so the
/// receiver regenerates it from the carrier it got.
pub fn generate_zigzag_dct_path(image: &CoefficientImage) -> Path {
    let mut coordinates = Vec::new();
    for (z, plane) in image.planes().into_iter().enumerate() {
        for by in (0..plane.height()).step_by(BLOCK_SIZE) {
            for bx in (0..plane.width()).step_by(BLOCK_SIZE) {
                for i in 0..BLOCK_LEN {
                    let (r, c) = zigzag_offset(i);
                    let (y, x) = (by + r, bx + c);
                    if plane.get(y, x).is_some_and(|v| v.is_usable()) {
                        coordinates.push(Coordinate::new(y, x, z));
                    }
                }
            }
        }
    }
    Path::new(image.kind(), coordinates)
}

/// The zigzag path shuffled by a seed derived from `key`.
pub fn generate_dct_path_from_key(image: &CoefficientImage, key: &SecretKey) -> Result<Path> {
    let mut seed = [0u8; 8];
    pathsteg_cipher::derive_seed(key.as_bytes(), KEYED_DCT_PATH_DOMAIN, &mut seed)?;

    let zigzag = generate_zigzag_dct_path(image);
    let permutation = Permutation::from_seed(BigEndian::read_u64(&seed), zigzag.len());
    debug!("derived keyed coefficient path over {} coefficients", zigzag.len());

    Ok(Path::new(image.kind(), permutation.apply(zigzag.coordinates())))
}

/// A carrier buffer that paths can be generated for.
///
/// Plain images use every sample, compressed images only non-zero
/// coefficients, which is why sequential and keyed paths differ per domain.
pub trait Carrier {
    /// Number of bits the carrier can take.
    fn usable_capacity(&self) -> usize;

    /// Simple path for plain images, zigzag path for compressed ones.
    fn sequential_path(&self) -> Path;

    fn keyed_path(&self, key: &SecretKey) -> Result<Path>;

    fn random_path(&self, len: usize) -> Result<Path>;

    fn check_capacity(&self, bits: usize) -> Result<()> {
        check_capacity(bits, self.usable_capacity())
    }
}

impl Carrier for PixelImage {
    fn usable_capacity(&self) -> usize {
        self.sample_count()
    }

    fn sequential_path(&self) -> Path {
        generate_simple_path(self)
    }

    fn keyed_path(&self, key: &SecretKey) -> Result<Path> {
        generate_path_from_key(self, key)
    }

    fn random_path(&self, len: usize) -> Result<Path> {
        generate_path(self, len)
    }
}

impl Carrier for CoefficientImage {
    fn usable_capacity(&self) -> usize {
        usable_count(self)
    }

    fn sequential_path(&self) -> Path {
        generate_zigzag_dct_path(self)
    }

    fn keyed_path(&self, key: &SecretKey) -> Result<Path> {
        generate_dct_path_from_key(self, key)
    }

    fn random_path(&self, len: usize) -> Result<Path> {
        generate_dct_path(self, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathsteg_dct::Plane;
    use std::collections::HashSet;

    fn grey(width: usize, height: usize) -> PixelImage {
        Image::Greyscale(Plane::new(width, height))
    }

    fn colour(width: usize, height: usize) -> PixelImage {
        Image::Colour(
            Plane::new(width, height),
            Plane::new(width, height),
            Plane::new(width, height),
        )
    }

    fn sparse_coefficients() -> CoefficientImage {
        // non-zero where (y + x) % 3 == 0, 16x16 greyscale
        Image::Greyscale(Plane::from_fn(16, 16, |y, x| {
            if (y + x) % 3 == 0 {
                (y as i32 - x as i32) | 1
            } else {
                0
            }
        }))
    }

    #[test]
    fn test_simple_path_order() {
        let path = generate_simple_path(&colour(2, 3));

        assert_eq!(path.len(), 18);
        assert_eq!(path.kind(), ImageKind::Colour);
        assert_eq!(path.coordinates()[0], Coordinate::new(0, 0, 0));
        assert_eq!(path.coordinates()[1], Coordinate::new(1, 0, 0));
        assert_eq!(path.coordinates()[3], Coordinate::new(0, 1, 0));
        assert_eq!(path.coordinates()[6], Coordinate::new(0, 0, 1));
        assert_eq!(path.coordinates()[17], Coordinate::new(2, 1, 2));
    }

    #[test]
    fn test_random_path_is_unique_and_in_bounds() {
        let image = colour(8, 8);
        let path = generate_path(&image, 150).unwrap();

        assert_eq!(path.len(), 150);
        let unique: HashSet<_> = path.iter().collect();
        assert_eq!(unique.len(), 150);
        assert!(path.iter().all(|c| image.get(c.y, c.x, c.z).is_some()));
    }

    #[test]
    fn test_random_path_can_fill_the_image() {
        let image = grey(8, 8);
        let path = generate_path(&image, 64).unwrap();
        let unique: HashSet<_> = path.iter().collect();
        assert_eq!(unique.len(), 64);
    }

    #[test]
    fn test_random_path_capacity() {
        assert!(matches!(
            generate_path(&grey(8, 8), 65),
            Err(StegError::Capacity { required: 65, available: 64 })
        ));
    }

    #[test]
    fn test_dct_path_skips_zero_coefficients() {
        let image = sparse_coefficients();
        let available = usable_count(&image);
        let path = generate_dct_path(&image, available).unwrap();

        let unique: HashSet<_> = path.iter().collect();
        assert_eq!(unique.len(), available);
        for c in path.iter() {
            assert_ne!(image.get(c.y, c.x, c.z), Some(&0));
        }
        assert!(generate_dct_path(&image, available + 1).is_err());
    }

    #[test]
    fn test_zigzag_path_order_within_block() {
        let image: CoefficientImage = Image::Greyscale(Plane::from_fn(8, 8, |_, _| 1));
        let path = generate_zigzag_dct_path(&image);

        assert_eq!(path.len(), 64);
        assert_eq!(path.coordinates()[0], Coordinate::new(0, 0, 0));
        assert_eq!(path.coordinates()[1], Coordinate::new(0, 1, 0));
        assert_eq!(path.coordinates()[2], Coordinate::new(1, 0, 0));
        assert_eq!(path.coordinates()[3], Coordinate::new(2, 0, 0));
        assert_eq!(path.coordinates()[63], Coordinate::new(7, 7, 0));
    }

    #[test]
    fn test_zigzag_path_walks_blocks_in_raster_order() {
        let mut plane = Plane::<i32>::new(16, 16);
        *plane.get_mut(0, 8).unwrap() = 5; // block (0, 1)
        *plane.get_mut(8, 0).unwrap() = 5; // block (1, 0)
        *plane.get_mut(1, 1).unwrap() = 5; // block (0, 0)
        let path = generate_zigzag_dct_path(&Image::Greyscale(plane));

        assert_eq!(
            path.coordinates(),
            &[
                Coordinate::new(1, 1, 0),
                Coordinate::new(0, 8, 0),
                Coordinate::new(8, 0, 0)
            ]
        );
    }

    #[test]
    fn test_zigzag_checks_each_channel() {
        let y = Plane::<i32>::new(8, 8);
        let mut cb = Plane::<i32>::new(8, 8);
        *cb.get_mut(0, 0).unwrap() = -3;
        let cr = Plane::from_fn(8, 8, |_, _| 1);
        let path = generate_zigzag_dct_path(&Image::Colour(y, cb, cr));

        assert_eq!(path.len(), 65);
        assert_eq!(path.coordinates()[0], Coordinate::new(0, 0, 1));
        assert!(path.iter().skip(1).all(|c| c.z == 2));
    }

    #[test]
    fn test_keyed_path_is_deterministic() {
        let image = colour(16, 8);
        let key = SecretKey::new("correct horse battery staple");

        let first = generate_path_from_key(&image, &key).unwrap();
        let second = generate_path_from_key(&image, &key).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), image.sample_count());

        let unique: HashSet<_> = first.iter().collect();
        assert_eq!(unique.len(), image.sample_count());
    }

    #[test]
    fn test_keyed_path_nesting() {
        let image = colour(16, 8);
        let path = generate_path_from_key(&image, &SecretKey::new("nesting")).unwrap();

        // rows vary fastest, then columns, channel is constant for a whole plane
        let first = path.coordinates()[0];
        assert!(path.iter().take(8).all(|c| c.x == first.x && c.z == first.z));
        assert!(path.iter().take(128).all(|c| c.z == first.z));
    }

    #[test]
    fn test_keyed_path_depends_on_key() {
        let image = grey(64, 64);
        let a = generate_path_from_key(&image, &SecretKey::new("alice")).unwrap();
        let b = generate_path_from_key(&image, &SecretKey::new("bob")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_keyed_dct_path_shuffles_zigzag() {
        let image = sparse_coefficients();
        let key = SecretKey::new("shuffle");
        let zigzag = generate_zigzag_dct_path(&image);
        let keyed = generate_dct_path_from_key(&image, &key).unwrap();

        assert_eq!(keyed, generate_dct_path_from_key(&image, &key).unwrap());
        assert_ne!(keyed, zigzag);

        let mut sorted_keyed = keyed.coordinates().to_vec();
        let mut sorted_zigzag = zigzag.coordinates().to_vec();
        sorted_keyed.sort();
        sorted_zigzag.sort();
        assert_eq!(sorted_keyed, sorted_zigzag);
    }

    #[test]
    fn test_capacity_checks() {
        let image = colour(8, 8);
        assert!(check_image_capacity(&image, 192).is_ok());
        assert!(check_image_capacity(&image, 193).is_err());

        let coefficients = sparse_coefficients();
        let available = usable_count(&coefficients);
        assert_eq!(coefficients.usable_capacity(), available);
        assert!(check_dct_capacity(&coefficients, available).is_ok());
        assert!(matches!(
            check_dct_capacity(&coefficients, available + 1),
            Err(StegError::Capacity { .. })
        ));
    }

    #[test]
    fn test_truncated() {
        let path = generate_simple_path(&grey(8, 8));
        assert_eq!(path.truncated(10).len(), 10);
        assert_eq!(path.truncated(100).len(), 64);
        assert_eq!(path.truncated(10).coordinates(), &path.coordinates()[..10]);
    }
}
