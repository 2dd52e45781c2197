use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use tracing::debug;

use crate::data::DataTable;
use crate::error::MosaicResult;

/// Default seed shared by every sampling entry point.
pub const DEFAULT_SEED: u64 = 123;

/// Seeded sample of `n` distinct indices out of `len`, in draw order.
///
/// Returns every index in order when `n >= len`.
#[must_use]
pub fn sample_indices(len: usize, n: usize, seed: u64) -> Vec<usize> {
    if n >= len {
        return (0..len).collect();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    index::sample(&mut rng, len, n).into_vec()
}

impl DataTable {
    /// Random subset of `n` rows without replacement; the whole table when
    /// `n` is at least the row count.
    pub fn sample(&self, n: usize, seed: u64) -> MosaicResult<Self> {
        if n >= self.len() {
            return Ok(self.clone());
        }
        debug!(rows = self.len(), n, seed, "sampling table rows");
        self.take_rows(&sample_indices(self.len(), n, seed))
    }
}

#[cfg(test)]
mod tests {
    use super::sample_indices;
    use crate::data::DataTable;

    #[test]
    fn sampling_is_deterministic_and_distinct() {
        let a = sample_indices(100, 10, 7);
        let b = sample_indices(100, 10, 7);
        assert_eq!(a, b);
        let mut sorted = a.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 10);
    }

    #[test]
    fn oversized_sample_is_identity() {
        assert_eq!(sample_indices(3, 5, 1), vec![0, 1, 2]);
        let table = DataTable::new().with_numeric("x", vec![1.0, 2.0]).expect("x");
        assert_eq!(table.sample(10, 1).expect("sample"), table);
    }
}
