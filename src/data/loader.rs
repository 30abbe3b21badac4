//! Batch loader for training data
//!
//! Wraps a point array as a shuffled, fixed-batch-size iterable: a fresh
//! shuffle every pass, and a final batch smaller than the requested size is
//! dropped.

use ndarray::{Array2, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffled drop-last batch iterator over an (N, D) array.
pub struct BatchLoader {
    data: Array2<f64>,
    batch_size: usize,
    indices: Vec<usize>,
    current_idx: usize,
    rng: StdRng,
}

impl BatchLoader {
    /// Create a loader with entropy-seeded shuffling.
    pub fn new(data: Array2<f64>, batch_size: usize) -> Self {
        Self::build(data, batch_size, StdRng::from_entropy())
    }

    /// Create a loader whose shuffle order is reproducible.
    pub fn with_seed(data: Array2<f64>, batch_size: usize, seed: u64) -> Self {
        Self::build(data, batch_size, StdRng::seed_from_u64(seed))
    }

    fn build(data: Array2<f64>, batch_size: usize, rng: StdRng) -> Self {
        assert!(batch_size > 0, "batch size must be > 0");
        let indices: Vec<usize> = (0..data.nrows()).collect();
        let mut loader = Self {
            data,
            batch_size,
            indices,
            current_idx: 0,
            rng,
        };
        loader.shuffle_indices();
        loader
    }

    /// Number of full batches per pass.
    pub fn num_batches(&self) -> usize {
        self.data.nrows() / self.batch_size
    }

    pub fn num_samples(&self) -> usize {
        self.data.nrows()
    }

    pub fn num_features(&self) -> usize {
        self.data.ncols()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn shuffle_indices(&mut self) {
        self.indices.shuffle(&mut self.rng);
    }

    /// Restart the pass with a fresh shuffle.
    pub fn reset(&mut self) {
        self.current_idx = 0;
        self.shuffle_indices();
    }

    /// Next full batch, or `None` when the pass is exhausted.
    pub fn next_batch(&mut self) -> Option<Array2<f64>> {
        let start = self.current_idx;
        let end = start + self.batch_size;
        if end > self.indices.len() {
            return None;
        }

        let mut batch = Array2::zeros((self.batch_size, self.data.ncols()));
        for (batch_idx, &data_idx) in self.indices[start..end].iter().enumerate() {
            batch
                .index_axis_mut(Axis(0), batch_idx)
                .assign(&self.data.index_axis(Axis(0), data_idx));
        }

        self.current_idx = end;
        Some(batch)
    }

    /// Iterate one full pass, reshuffling first.
    pub fn iter(&mut self) -> BatchLoaderIter<'_> {
        self.reset();
        BatchLoaderIter { loader: self }
    }

    /// View of the underlying data.
    pub fn data(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }
}

/// Iterator adapter for [`BatchLoader`].
pub struct BatchLoaderIter<'a> {
    loader: &'a mut BatchLoader,
}

impl Iterator for BatchLoaderIter<'_> {
    type Item = Array2<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        self.loader.next_batch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_data(n: usize) -> Array2<f64> {
        Array2::from_shape_fn((n, 2), |(i, j)| (i * 2 + j) as f64)
    }

    #[test]
    fn test_drop_last() {
        let mut loader = BatchLoader::with_seed(numbered_data(10), 3, 0);
        assert_eq!(loader.num_batches(), 3);

        let mut batch_count = 0;
        while let Some(batch) = loader.next_batch() {
            assert_eq!(batch.shape(), &[3, 2]);
            batch_count += 1;
        }
        assert_eq!(batch_count, 3);
    }

    #[test]
    fn test_iter_restarts_each_pass() {
        let mut loader = BatchLoader::with_seed(numbered_data(10), 5, 1);

        let first: Vec<_> = loader.iter().collect();
        let second: Vec<_> = loader.iter().collect();
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_reshuffle_between_passes() {
        let mut loader = BatchLoader::with_seed(numbered_data(64), 64, 7);

        let first = loader.iter().next().unwrap();
        let second = loader.iter().next().unwrap();
        // Same rows overall, near-certainly different order
        assert_ne!(first, second);
    }

    #[test]
    fn test_batches_partition_rows() {
        let mut loader = BatchLoader::with_seed(numbered_data(9), 3, 3);
        let mut seen: Vec<i64> = loader
            .iter()
            .flat_map(|b| b.column(0).to_vec())
            .map(|v| v as i64)
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 2, 4, 6, 8, 10, 12, 14, 16]);
    }
}
