//! Seeded permutation used by the keyed strategies.

use fastrand::Rng;

/// Pseudo-random permutation of `0..length`.
///
/// Deterministic given the same seed, which is what allows the receiver to
/// reconstruct the sender's ordering from the shared key alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    indices: Vec<usize>,
}

impl Permutation {
    pub fn from_seed(seed: u64, length: usize) -> Self {
        let mut rng = Rng::with_seed(seed);
        let mut indices: Vec<usize> = (0..length).collect();

        // Fisher-Yates shuffle, drawn as u64 so 32 bit targets agree
        for i in (1..length).rev() {
            let j = rng.u64(0..=i as u64) as usize;
            indices.swap(i, j);
        }

        Permutation { indices }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The shuffled sequence of indices.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Reorder `items`, element `i` of the result is `items[indices[i]]`.
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        debug_assert_eq!(items.len(), self.indices.len());
        self.indices.iter().map(|&i| items[i].clone()).collect()
    }
}
