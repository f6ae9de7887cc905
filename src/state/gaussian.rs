//! The shared Gaussian state: mean vector and covariance matrix.

use nalgebra::{DMatrix, DVector};

use crate::core::SlotRange;

/// Mean vector `x` and covariance matrix `P` over a fixed slot capacity.
///
/// Storage is allocated once at construction; entities come and go by
/// claiming and releasing slot ranges, never by resizing. Only the rows and
/// columns of live ranges carry meaning, and `P` is kept symmetric by every
/// operation that writes it.
///
/// Block accessors copy data in and out; the filter gathers the sub-blocks
/// it needs, works on them densely, and scatters the results back.
#[derive(Debug, Clone)]
pub struct StateEstimate {
    x: DVector<f64>,
    p: DMatrix<f64>,
}

impl StateEstimate {
    /// Create a zeroed estimate with room for `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            x: DVector::zeros(capacity),
            p: DMatrix::zeros(capacity, capacity),
        }
    }

    /// Total slot capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.x.len()
    }

    /// The full mean vector.
    #[inline]
    pub fn mean(&self) -> &DVector<f64> {
        &self.x
    }

    /// The full covariance matrix.
    #[inline]
    pub fn covariance(&self) -> &DMatrix<f64> {
        &self.p
    }

    // =========================================================================
    // RANGE-BLOCK ACCESS
    // =========================================================================

    /// Copy of the mean over `range`.
    pub fn mean_block(&self, range: SlotRange) -> DVector<f64> {
        self.assert_in_bounds(range);
        DVector::from_fn(range.size(), |i, _| self.x[range.start() + i])
    }

    /// Write the mean over `range`.
    pub fn set_mean_block(&mut self, range: SlotRange, block: &DVector<f64>) {
        self.assert_in_bounds(range);
        assert_eq!(
            block.len(),
            range.size(),
            "mean block shape does not match range {}",
            range
        );
        for (i, slot) in range.indices().enumerate() {
            self.x[slot] = block[i];
        }
    }

    /// Copy of the covariance block `P[rows, cols]`.
    pub fn covariance_block(&self, rows: SlotRange, cols: SlotRange) -> DMatrix<f64> {
        self.assert_in_bounds(rows);
        self.assert_in_bounds(cols);
        DMatrix::from_fn(rows.size(), cols.size(), |i, j| {
            self.p[(rows.start() + i, cols.start() + j)]
        })
    }

    /// Write the covariance block `P[rows, cols]`.
    pub fn set_covariance_block(&mut self, rows: SlotRange, cols: SlotRange, block: &DMatrix<f64>) {
        self.assert_in_bounds(rows);
        self.assert_in_bounds(cols);
        assert_eq!(
            (block.nrows(), block.ncols()),
            (rows.size(), cols.size()),
            "covariance block shape does not match ranges {} x {}",
            rows,
            cols
        );
        for (i, r) in rows.indices().enumerate() {
            for (j, c) in cols.indices().enumerate() {
                self.p[(r, c)] = block[(i, j)];
            }
        }
    }

    // =========================================================================
    // INDEX-LIST ACCESS
    // =========================================================================

    /// Gather mean entries at `indices`, in the given order.
    pub fn mean_at(&self, indices: &[usize]) -> DVector<f64> {
        DVector::from_fn(indices.len(), |i, _| self.x[indices[i]])
    }

    /// Scatter mean entries back to `indices`.
    pub fn set_mean_at(&mut self, indices: &[usize], values: &DVector<f64>) {
        assert_eq!(
            values.len(),
            indices.len(),
            "mean scatter shape does not match index list"
        );
        for (i, &slot) in indices.iter().enumerate() {
            self.x[slot] = values[i];
        }
    }

    /// Gather the covariance sub-matrix `P[rows, cols]`, in the given orders.
    pub fn covariance_at(&self, rows: &[usize], cols: &[usize]) -> DMatrix<f64> {
        DMatrix::from_fn(rows.len(), cols.len(), |i, j| self.p[(rows[i], cols[j])])
    }

    /// Scatter a covariance sub-matrix back to `P[rows, cols]`.
    pub fn set_covariance_at(&mut self, rows: &[usize], cols: &[usize], block: &DMatrix<f64>) {
        assert_eq!(
            (block.nrows(), block.ncols()),
            (rows.len(), cols.len()),
            "covariance scatter shape does not match index lists"
        );
        for (i, &r) in rows.iter().enumerate() {
            for (j, &c) in cols.iter().enumerate() {
                self.p[(r, c)] = block[(i, j)];
            }
        }
    }

    // =========================================================================
    // BLOCK LIFECYCLE
    // =========================================================================

    /// Seed a freshly allocated range with a mean and a diagonal variance.
    ///
    /// Clears the range's rows and columns across the whole matrix first, so
    /// the new entity starts uncorrelated with everything else.
    pub fn init_block(&mut self, range: SlotRange, mean: &DVector<f64>, variances: &DVector<f64>) {
        assert_eq!(
            mean.len(),
            range.size(),
            "initial mean shape does not match range {}",
            range
        );
        assert_eq!(
            variances.len(),
            range.size(),
            "initial variance shape does not match range {}",
            range
        );
        self.clear_block(range);
        for (i, slot) in range.indices().enumerate() {
            self.x[slot] = mean[i];
            self.p[(slot, slot)] = variances[i];
        }
    }

    /// Zero the mean over `range` and the covariance rows/columns it spans.
    pub fn clear_block(&mut self, range: SlotRange) {
        self.assert_in_bounds(range);
        let n = self.capacity();
        for slot in range.indices() {
            self.x[slot] = 0.0;
            for k in 0..n {
                self.p[(slot, k)] = 0.0;
                self.p[(k, slot)] = 0.0;
            }
        }
    }

    /// Largest absolute asymmetry `max |P − Pᵀ|` over the index list.
    pub fn symmetry_error(&self, indices: &[usize]) -> f64 {
        let mut worst: f64 = 0.0;
        for &r in indices {
            for &c in indices {
                worst = worst.max((self.p[(r, c)] - self.p[(c, r)]).abs());
            }
        }
        worst
    }

    fn assert_in_bounds(&self, range: SlotRange) {
        assert!(
            range.end() <= self.capacity(),
            "range {} exceeds state capacity {}",
            range,
            self.capacity()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_block_roundtrip() {
        let mut est = StateEstimate::new(10);
        let r = SlotRange::new(2, 3);
        est.set_mean_block(r, &DVector::from_vec(vec![1.0, 2.0, 3.0]));
        let block = est.mean_block(r);
        assert_relative_eq!(block[0], 1.0);
        assert_relative_eq!(block[2], 3.0);
        assert_relative_eq!(est.mean()[4], 3.0);
        assert_relative_eq!(est.mean()[5], 0.0);
    }

    #[test]
    fn test_covariance_block_roundtrip() {
        let mut est = StateEstimate::new(6);
        let rows = SlotRange::new(0, 2);
        let cols = SlotRange::new(3, 2);
        let block = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        est.set_covariance_block(rows, cols, &block);
        assert_relative_eq!(est.covariance()[(0, 3)], 1.0);
        assert_relative_eq!(est.covariance()[(1, 4)], 4.0);
        let back = est.covariance_block(rows, cols);
        assert_relative_eq!(back[(1, 0)], 3.0);
    }

    #[test]
    fn test_index_list_access_preserves_order() {
        let mut est = StateEstimate::new(5);
        est.set_mean_at(&[4, 0, 2], &DVector::from_vec(vec![40.0, 0.5, 20.0]));
        let gathered = est.mean_at(&[4, 0, 2]);
        assert_relative_eq!(gathered[0], 40.0);
        assert_relative_eq!(gathered[1], 0.5);
        assert_relative_eq!(gathered[2], 20.0);
    }

    #[test]
    fn test_init_block_seeds_diagonal() {
        let mut est = StateEstimate::new(8);
        let r = SlotRange::new(1, 3);
        // Leave stale correlation that the init must wipe.
        est.set_covariance_at(&[1, 5], &[5, 1], &DMatrix::from_element(2, 2, 9.0));
        est.init_block(
            r,
            &DVector::from_vec(vec![1.0, 2.0, 3.0]),
            &DVector::from_vec(vec![0.1, 0.2, 0.3]),
        );
        assert_relative_eq!(est.mean()[2], 2.0);
        assert_relative_eq!(est.covariance()[(1, 1)], 0.1);
        assert_relative_eq!(est.covariance()[(3, 3)], 0.3);
        assert_relative_eq!(est.covariance()[(1, 5)], 0.0);
        assert_relative_eq!(est.covariance()[(5, 1)], 0.0);
        assert_relative_eq!(est.covariance()[(1, 2)], 0.0);
    }

    #[test]
    fn test_clear_block_zeroes_rows_and_cols() {
        let mut est = StateEstimate::new(4);
        let all = SlotRange::new(0, 4);
        est.set_covariance_block(all, all, &DMatrix::from_element(4, 4, 2.0));
        est.set_mean_block(all, &DVector::from_element(4, 1.0));
        est.clear_block(SlotRange::new(1, 2));
        assert_relative_eq!(est.mean()[1], 0.0);
        assert_relative_eq!(est.mean()[0], 1.0);
        assert_relative_eq!(est.covariance()[(1, 3)], 0.0);
        assert_relative_eq!(est.covariance()[(3, 1)], 0.0);
        assert_relative_eq!(est.covariance()[(0, 3)], 2.0);
    }

    #[test]
    fn test_symmetry_error() {
        let mut est = StateEstimate::new(3);
        let all = SlotRange::new(0, 3);
        let mut m = DMatrix::identity(3, 3);
        m[(0, 1)] = 0.5;
        m[(1, 0)] = 0.5 + 1e-9;
        est.set_covariance_block(all, all, &m);
        let err = est.symmetry_error(&[0, 1, 2]);
        assert_relative_eq!(err, 1e-9, epsilon = 1e-15);
    }

    #[test]
    #[should_panic(expected = "shape does not match")]
    fn test_mean_block_shape_mismatch_panics() {
        let mut est = StateEstimate::new(10);
        est.set_mean_block(SlotRange::new(0, 3), &DVector::zeros(4));
    }

    #[test]
    #[should_panic(expected = "exceeds state capacity")]
    fn test_out_of_bounds_range_panics() {
        let est = StateEstimate::new(4);
        est.mean_block(SlotRange::new(2, 3));
    }
}
