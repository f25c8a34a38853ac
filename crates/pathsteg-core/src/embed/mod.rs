//! Writing message bits into carrier samples and reading them back.
//!
//! Both techniques only ever touch bit 0 of the samples named by the path,
//! in path order. Extraction is the same for both.

mod sample;

pub use sample::Sample;

use fastrand::Rng;
use pathsteg_dct::Image;

use crate::path::Path;
use crate::{Result, StegError};

/// How a message bit is forced into a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Technique {
    /// Set or clear bit 0 directly.
    Replacement,
    /// Step the value by ±1 when its LSB differs, leave it alone otherwise.
    #[default]
    Matching,
}

/// Fail unless every coordinate addresses a sample of `image`.
fn check_bounds<T>(image: &Image<T>, path: &Path) -> Result<()> {
    let kind_matches = path.kind() == image.kind();
    for c in path.iter() {
        if !kind_matches || image.get(c.y, c.x, c.z).is_none() {
            return Err(StegError::PathBounds {
                y: c.y,
                x: c.x,
                z: c.z,
            });
        }
    }
    Ok(())
}

/// Embed `bits` along `path`, pairing bit `i` with coordinate `i`.
///
/// The path must be exactly as long as `bits` and lie within `image`,
/// both are checked before the first sample changes.
pub fn embed<T: Sample>(
    image: &mut Image<T>,
    path: &Path,
    bits: &[bool],
    technique: Technique,
) -> Result<()> {
    embed_with_rng(image, path, bits, technique, &mut Rng::new())
}

/// [`embed`] with a caller provided source for the matching coin flips.
pub fn embed_with_rng<T: Sample>(
    image: &mut Image<T>,
    path: &Path,
    bits: &[bool],
    technique: Technique,
    rng: &mut Rng,
) -> Result<()> {
    if path.len() != bits.len() {
        return Err(StegError::LengthMismatch {
            path: path.len(),
            bits: bits.len(),
        });
    }
    check_bounds(image, path)?;

    for (c, &bit) in path.iter().zip(bits) {
        let Some(sample) = image.get_mut(c.y, c.x, c.z) else {
            return Err(StegError::PathBounds {
                y: c.y,
                x: c.x,
                z: c.z,
            });
        };
        *sample = match technique {
            Technique::Replacement => sample.replaced(bit),
            Technique::Matching => sample.matched(bit, rng),
        };
    }

    Ok(())
}

/// Read the LSB at every coordinate of `path`, in order.
pub fn extract<T: Sample>(image: &Image<T>, path: &Path) -> Result<Vec<bool>> {
    check_bounds(image, path)?;

    Ok(path
        .iter()
        .filter_map(|c| image.get(c.y, c.x, c.z))
        .map(|s| s.lsb())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{generate_simple_path, Coordinate};
    use pathsteg_dct::{ImageKind, Plane};

    fn noise(seed: u64) -> Image<u8> {
        let mut rng = Rng::with_seed(seed);
        Image::Colour(
            Plane::from_fn(8, 8, |_, _| rng.u8(..)),
            Plane::from_fn(8, 8, |_, _| rng.u8(..)),
            Plane::from_fn(8, 8, |_, _| rng.u8(..)),
        )
    }

    fn bits(seed: u64, len: usize) -> Vec<bool> {
        let mut rng = Rng::with_seed(seed);
        (0..len).map(|_| rng.bool()).collect()
    }

    #[test]
    fn test_replacement_round_trip() {
        let mut image = noise(1);
        let path = generate_simple_path(&image).truncated(100);
        let message = bits(2, 100);

        embed(&mut image, &path, &message, Technique::Replacement).unwrap();
        assert_eq!(extract(&image, &path).unwrap(), message);
    }

    #[test]
    fn test_matching_round_trip_and_locality() {
        let original = noise(3);
        let mut image = original.clone();
        let path = generate_simple_path(&image);
        let message = bits(4, path.len());

        embed(&mut image, &path, &message, Technique::Matching).unwrap();
        assert_eq!(extract(&image, &path).unwrap(), message);

        for (c, &bit) in path.iter().zip(&message) {
            let before = *original.get(c.y, c.x, c.z).unwrap();
            let after = *image.get(c.y, c.x, c.z).unwrap();
            if before.lsb() == bit {
                assert_eq!(before, after, "matching sample at {c:?} was touched");
            } else {
                assert_eq!(before.abs_diff(after), 1);
            }
        }
    }

    #[test]
    fn test_length_mismatch_is_rejected_before_mutation() {
        let original = noise(5);
        let mut image = original.clone();
        let path = generate_simple_path(&image).truncated(10);

        assert!(matches!(
            embed(&mut image, &path, &bits(6, 11), Technique::Replacement),
            Err(StegError::LengthMismatch { path: 10, bits: 11 })
        ));
        assert_eq!(image, original);
    }

    #[test]
    fn test_out_of_bounds_is_rejected_before_mutation() {
        let original = noise(7);
        let mut image = original.clone();
        let path = Path::new(
            ImageKind::Colour,
            vec![Coordinate::new(0, 0, 0), Coordinate::new(8, 0, 0)],
        );

        assert!(matches!(
            embed(&mut image, &path, &[true, true], Technique::Replacement),
            Err(StegError::PathBounds { y: 8, x: 0, z: 0 })
        ));
        assert_eq!(image, original);
        assert!(extract(&image, &path).is_err());
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        let mut image = noise(8);
        let path = Path::new(ImageKind::Greyscale, vec![Coordinate::new(0, 0, 0)]);

        assert!(matches!(
            embed(&mut image, &path, &[true], Technique::Matching),
            Err(StegError::PathBounds { .. })
        ));
    }

    #[test]
    fn test_coefficients_stay_non_zero() {
        let original: Image<i32> = Image::Greyscale(Plane::from_fn(8, 8, |y, x| {
            [1, -1, 2, -2][(y * 8 + x) % 4]
        }));
        let path = generate_simple_path(&original);

        for technique in [Technique::Replacement, Technique::Matching] {
            for seed in 0..8 {
                let mut image = original.clone();
                let message = bits(seed, path.len());
                embed(&mut image, &path, &message, technique).unwrap();

                assert_eq!(extract(&image, &path).unwrap(), message);
                assert!(image.plane(0).unwrap().samples().iter().all(|&c| c != 0));
            }
        }
    }
}
