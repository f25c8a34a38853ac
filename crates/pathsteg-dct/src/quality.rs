//! Quantization tables and quality scaling.
//!
//! The base tables are the luminance and chrominance tables from Annex K of
//! the JPEG standard. A single quality factor in `0..=100` rescales both:
//! ```text
//! q' = max(floor((50 + q * (200 - 2 * Q)) / 100), 1)
//! ```
//! Quality 50 reproduces the base tables, quality 100 yields all ones.

use crate::dct::{Block, BLOCK_LEN};

/// Quality used when nothing else is configured.
pub const DEFAULT_QUALITY: u8 = 75;

/// Annex K luminance table, natural row-major order.
#[rustfmt::skip]
pub const LUMINANCE_BASE: [u16; BLOCK_LEN] = [
    16,  11,  10,  16,  24,  40,  51,  61,
    12,  12,  14,  19,  26,  58,  60,  55,
    14,  13,  16,  24,  40,  57,  69,  56,
    14,  17,  22,  29,  51,  87,  80,  62,
    18,  22,  37,  56,  68, 109, 103,  77,
    24,  35,  55,  64,  81, 104, 113,  92,
    49,  64,  78,  87, 103, 121, 120, 101,
    72,  92,  95,  98, 112, 100, 103,  99,
];

/// Annex K chrominance table, natural row-major order.
#[rustfmt::skip]
pub const CHROMINANCE_BASE: [u16; BLOCK_LEN] = [
    17,  18,  24,  47,  99,  99,  99,  99,
    18,  21,  26,  66,  99,  99,  99,  99,
    24,  26,  56,  99,  99,  99,  99,  99,
    47,  66,  99,  99,  99,  99,  99,  99,
    99,  99,  99,  99,  99,  99,  99,  99,
    99,  99,  99,  99,  99,  99,  99,  99,
    99,  99,  99,  99,  99,  99,  99,  99,
    99,  99,  99,  99,  99,  99,  99,  99,
];

/// Rescale a single table entry for the given quality.
#[inline]
fn scale_entry(base: u16, quality: u8) -> u16 {
    let quality = i64::from(quality.min(100));
    let scaled = (50 + i64::from(base) * (200 - 2 * quality)).div_euclid(100);
    scaled.max(1) as u16
}

/// An 8×8 quantization matrix in natural row-major order.
///
/// Entries are never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizationTable([u16; BLOCK_LEN]);

impl QuantizationTable {
    /// Build a table from raw entries, zero entries are lifted to 1.
    pub fn new(mut values: [u16; BLOCK_LEN]) -> Self {
        for v in values.iter_mut() {
            *v = (*v).max(1);
        }
        QuantizationTable(values)
    }

    /// The luminance base table rescaled for `quality`.
    pub fn luminance(quality: u8) -> Self {
        Self::scaled(&LUMINANCE_BASE, quality)
    }

    /// The chrominance base table rescaled for `quality`.
    pub fn chrominance(quality: u8) -> Self {
        Self::scaled(&CHROMINANCE_BASE, quality)
    }

    /// Rescale `base` elementwise for `quality`, clamped to `0..=100`.
    pub fn scaled(base: &[u16; BLOCK_LEN], quality: u8) -> Self {
        let mut values = [0u16; BLOCK_LEN];
        for (v, &b) in values.iter_mut().zip(base.iter()) {
            *v = scale_entry(b, quality);
        }
        QuantizationTable(values)
    }

    #[inline]
    pub fn values(&self) -> &[u16; BLOCK_LEN] {
        &self.0
    }

    /// Divide each coefficient by its table entry and round half to even.
    pub fn quantize(&self, coefficients: &Block) -> [i32; BLOCK_LEN] {
        let mut quantized = [0i32; BLOCK_LEN];
        for i in 0..BLOCK_LEN {
            quantized[i] = (coefficients[i] / f64::from(self.0[i])).round_ties_even() as i32;
        }
        quantized
    }

    /// Multiply each quantized coefficient by its table entry.
    pub fn dequantize(&self, quantized: &[i32; BLOCK_LEN]) -> Block {
        let mut coefficients = [0.0f64; BLOCK_LEN];
        for i in 0..BLOCK_LEN {
            coefficients[i] = f64::from(quantized[i]) * f64::from(self.0[i]);
        }
        coefficients
    }
}

/// The pair of tables used for one encode or decode session.
///
/// Both parties must build it from the same quality, otherwise coefficient
/// magnitudes and with them every coefficient domain path will differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizationConfig {
    pub quality: u8,
    /// Applied to the Y channel and to greyscale images.
    pub luminance: QuantizationTable,
    /// Applied to the Cb and Cr channels.
    pub chrominance: QuantizationTable,
}

impl QuantizationConfig {
    pub fn with_quality(quality: u8) -> Self {
        let quality = quality.min(100);
        QuantizationConfig {
            quality,
            luminance: QuantizationTable::luminance(quality),
            chrominance: QuantizationTable::chrominance(quality),
        }
    }

    /// The table for a channel, luminance for Y and greyscale planes.
    #[inline]
    pub fn table(&self, is_luminance: bool) -> &QuantizationTable {
        if is_luminance {
            &self.luminance
        } else {
            &self.chrominance
        }
    }
}

impl Default for QuantizationConfig {
    fn default() -> Self {
        Self::with_quality(DEFAULT_QUALITY)
    }
}

/// Free function form of [`QuantizationTable::quantize`].
pub fn quantize(coefficients: &Block, table: &QuantizationTable) -> [i32; BLOCK_LEN] {
    table.quantize(coefficients)
}

/// Free function form of [`QuantizationTable::dequantize`].
pub fn dequantize(quantized: &[i32; BLOCK_LEN], table: &QuantizationTable) -> Block {
    table.dequantize(quantized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_50_is_base_table() {
        assert_eq!(QuantizationTable::luminance(50).values(), &LUMINANCE_BASE);
        assert_eq!(QuantizationTable::chrominance(50).values(), &CHROMINANCE_BASE);
    }

    #[test]
    fn test_quality_100_is_all_ones() {
        assert!(QuantizationTable::luminance(100).values().iter().all(|&v| v == 1));
        assert!(QuantizationTable::chrominance(100).values().iter().all(|&v| v == 1));
    }

    #[test]
    fn test_quality_75_scaling() {
        let table = QuantizationTable::luminance(75);
        // floor((50 + 16 * 50) / 100) = 8
        assert_eq!(table.values()[0], 8);
        // floor((50 + 11 * 50) / 100) = 6
        assert_eq!(table.values()[1], 6);
        // floor((50 + 99 * 50) / 100) = 50
        assert_eq!(table.values()[63], 50);
    }

    #[test]
    fn test_quality_0_doubles_base() {
        let table = QuantizationTable::luminance(0);
        assert_eq!(table.values()[0], 32);
        assert_eq!(table.values()[63], 198);
    }

    #[test]
    fn test_quality_above_100_is_clamped() {
        assert_eq!(QuantizationConfig::with_quality(200), QuantizationConfig::with_quality(100));
    }

    #[test]
    fn test_entries_never_zero() {
        for q in 0..=100 {
            let config = QuantizationConfig::with_quality(q);
            assert!(config.luminance.values().iter().all(|&v| v >= 1));
            assert!(config.chrominance.values().iter().all(|&v| v >= 1));
        }
        assert!(QuantizationTable::new([0; BLOCK_LEN]).values().iter().all(|&v| v == 1));
    }

    #[test]
    fn test_quantize_rounds_half_to_even() {
        let table = QuantizationTable::new([2; BLOCK_LEN]);
        let mut block = [0.0f64; BLOCK_LEN];
        block[0] = 5.0; // 2.5 -> 2
        block[1] = 7.0; // 3.5 -> 4
        block[2] = -5.0; // -2.5 -> -2
        block[3] = 5.2; // 2.6 -> 3

        let quantized = quantize(&block, &table);
        assert_eq!(&quantized[..4], &[2, 4, -2, 3]);

        let restored = dequantize(&quantized, &table);
        assert_eq!(&restored[..4], &[4.0, 8.0, -4.0, 6.0]);
    }

    #[test]
    fn test_table_selection() {
        let config = QuantizationConfig::with_quality(50);
        assert_eq!(config.table(true).values(), &LUMINANCE_BASE);
        assert_eq!(config.table(false).values(), &CHROMINANCE_BASE);
    }
}
