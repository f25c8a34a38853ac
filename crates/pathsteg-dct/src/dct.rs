//! 8×8 forward and inverse discrete cosine transform.
//!
//! Orthonormal type-II DCT, computed separably (rows then columns) from a
//! precomputed cosine table. Blocks are in natural row-major order.

use std::sync::OnceLock;

/// Number of samples in one 8×8 block.
pub const BLOCK_LEN: usize = 64;

/// Edge length of a block.
pub const BLOCK_SIZE: usize = 8;

/// One 8×8 block of samples or coefficients, natural row-major order.
pub type Block = [f64; BLOCK_LEN];

const LEVEL_SHIFT: f64 = 128.0;

/// `COSINE[u][x] = cos((2x + 1) * u * PI / 16)`
static COSINE: OnceLock<[[f64; 8]; 8]> = OnceLock::new();

/// C(0) = 1/sqrt(8), C(u>0) = 1/2.
static NORM: OnceLock<[f64; 8]> = OnceLock::new();

fn cosine_table() -> &'static [[f64; 8]; 8] {
    COSINE.get_or_init(|| {
        let mut table = [[0.0f64; 8]; 8];
        for (u, row) in table.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = ((2 * x + 1) as f64 * u as f64 * std::f64::consts::PI / 16.0).cos();
            }
        }
        table
    })
}

fn norm_table() -> &'static [f64; 8] {
    NORM.get_or_init(|| {
        let mut n = [0.5f64; 8];
        n[0] = 1.0 / (8.0f64).sqrt();
        n
    })
}

/// Level shift by -128 then apply the 2-D DCT.
pub fn forward_dct(samples: &Block) -> Block {
    let cos = cosine_table();
    let c = norm_table();

    let mut shifted = [0.0f64; BLOCK_LEN];
    for (s, &v) in shifted.iter_mut().zip(samples.iter()) {
        *s = v - LEVEL_SHIFT;
    }

    let mut temp = [0.0f64; BLOCK_LEN];
    for row in 0..8 {
        for u in 0..8 {
            let mut sum = 0.0;
            for x in 0..8 {
                sum += shifted[row * 8 + x] * cos[u][x];
            }
            temp[row * 8 + u] = c[u] * sum;
        }
    }

    let mut coefficients = [0.0f64; BLOCK_LEN];
    for col in 0..8 {
        for v in 0..8 {
            let mut sum = 0.0;
            for y in 0..8 {
                sum += temp[y * 8 + col] * cos[v][y];
            }
            coefficients[v * 8 + col] = c[v] * sum;
        }
    }

    coefficients
}

/// Inverse of [`forward_dct`], including the +128 level shift.
pub fn inverse_dct(coefficients: &Block) -> Block {
    let cos = cosine_table();
    let c = norm_table();

    let mut temp = [0.0f64; BLOCK_LEN];
    for col in 0..8 {
        for y in 0..8 {
            let mut sum = 0.0;
            for v in 0..8 {
                sum += c[v] * coefficients[v * 8 + col] * cos[v][y];
            }
            temp[y * 8 + col] = sum;
        }
    }

    let mut samples = [0.0f64; BLOCK_LEN];
    for row in 0..8 {
        for x in 0..8 {
            let mut sum = 0.0;
            for u in 0..8 {
                sum += c[u] * temp[row * 8 + u] * cos[u][x];
            }
            samples[row * 8 + x] = sum + LEVEL_SHIFT;
        }
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_block_has_only_dc() {
        let block = [200.0f64; BLOCK_LEN];
        let coefficients = forward_dct(&block);

        // DC = 8 * (200 - 128)
        assert!((coefficients[0] - 576.0).abs() < 1e-9);
        for (i, &ac) in coefficients.iter().enumerate().skip(1) {
            assert!(ac.abs() < 1e-9, "AC coefficient {i} = {ac}");
        }
    }

    #[test]
    fn test_mid_grey_is_all_zero() {
        let coefficients = forward_dct(&[128.0; BLOCK_LEN]);
        assert!(coefficients.iter().all(|c| c.abs() < 1e-9));
    }

    #[test]
    fn test_inverse_restores_block() {
        let mut rng = fastrand::Rng::with_seed(8);
        let mut block = [0.0f64; BLOCK_LEN];
        for v in block.iter_mut() {
            *v = rng.u8(..) as f64;
        }

        let restored = inverse_dct(&forward_dct(&block));
        for i in 0..BLOCK_LEN {
            assert!(
                (block[i] - restored[i]).abs() < 1e-9,
                "sample {i}: expected {}, got {}",
                block[i],
                restored[i]
            );
        }
    }

    #[test]
    fn test_transform_preserves_energy() {
        let mut rng = fastrand::Rng::with_seed(64);
        let mut block = [0.0f64; BLOCK_LEN];
        for v in block.iter_mut() {
            *v = rng.u8(..) as f64;
        }

        let spatial: f64 = block.iter().map(|v| (v - 128.0).powi(2)).sum();
        let spectral: f64 = forward_dct(&block).iter().map(|c| c.powi(2)).sum();
        assert!((spatial - spectral).abs() < 1e-6 * spatial.max(1.0));
    }
}
