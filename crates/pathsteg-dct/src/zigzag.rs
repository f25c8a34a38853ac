//! Zigzag scan order of an 8×8 block.

/// Maps zigzag index (0–63) to natural row-major index (0–63).
///
/// Index 0 is the DC coefficient at (0, 0), index 63 sits at (7, 7).
#[rustfmt::skip]
pub const ZIGZAG_TO_NATURAL: [usize; 64] = [
     0,  1,  8, 16,  9,  2,  3, 10,
    17, 24, 32, 25, 18, 11,  4,  5,
    12, 19, 26, 33, 40, 48, 41, 34,
    27, 20, 13,  6,  7, 14, 21, 28,
    35, 42, 49, 56, 57, 50, 43, 36,
    29, 22, 15, 23, 30, 37, 44, 51,
    58, 59, 52, 45, 38, 31, 39, 46,
    53, 60, 61, 54, 47, 55, 62, 63,
];

/// Row and column offset inside the block for a zigzag index.
#[inline]
pub fn zigzag_offset(index: usize) -> (usize, usize) {
    let natural = ZIGZAG_TO_NATURAL[index];
    (natural / 8, natural % 8)
}
