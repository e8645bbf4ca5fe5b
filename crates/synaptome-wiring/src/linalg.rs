// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Numeric helpers shared by the generators.

Everything here works in `f64`; callers convert to their dtype once.
*/

use crate::rng::RandomSource;
use crate::types::{WiringError, WiringResult};
use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use std::cmp::Ordering;

/// Iterations allowed before the eigen-solver gives up
const MAX_EIGEN_ITERATIONS: usize = 10_000;

/// Kronecker product of two matrices
pub fn kron<F>(pattern: &ArrayView2<F>, patch: &ArrayView2<F>) -> Array2<F>
where
    F: ndarray::LinalgScalar,
{
    ndarray::linalg::kron(pattern, patch)
}

/// Cosine similarity between every pair of columns.
///
/// All-zero columns have similarity 0 with everything, themselves included.
pub fn column_cosine_similarity(matrix: &ArrayView2<f64>) -> Array2<f64> {
    let gram = matrix.t().dot(matrix);
    let norms: Array1<f64> = gram.diag().mapv(f64::sqrt);
    let n = gram.nrows();
    Array2::from_shape_fn((n, n), |(i, j)| {
        let denom = norms[i] * norms[j];
        if denom > 0.0 {
            gram[[i, j]] / denom
        } else {
            0.0
        }
    })
}

/// Softmax with temperature `tau`: `exp(x / tau)` normalised to sum 1.
///
/// The maximum is subtracted first, so large inputs or small temperatures
/// do not overflow.
pub fn softmax(values: &ArrayView1<f64>, tau: f64) -> Array1<f64> {
    let max = values.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
    let exps = values.mapv(|v| ((v - max) / tau).exp());
    let total = exps.sum();
    exps / total
}

/// Indices that sort `values` ascending; ties keep their storage order
pub fn argsort(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));
    order
}

/// Shuffle the rows of `matrix`, keeping each row's columns aligned
pub fn permute_rows<F, R>(matrix: &Array2<F>, rng: &mut R) -> Array2<F>
where
    F: Clone,
    R: RandomSource + ?Sized,
{
    let order = rng.permutation(matrix.nrows());
    matrix.select(Axis(0), &order)
}

/// Eigen-decomposition of a symmetric matrix.
///
/// Returns eigenvalues in descending order and the matching unit
/// eigenvectors as columns.
///
/// # Errors
/// `DimensionMismatch` for a non-square input, `Numerical` for non-finite
/// entries or when the solver does not converge.
pub fn symmetric_eigen(matrix: &ArrayView2<f64>) -> WiringResult<(Array1<f64>, Array2<f64>)> {
    let n = matrix.nrows();
    if matrix.ncols() != n {
        return Err(WiringError::DimensionMismatch {
            expected: (n, n),
            actual: matrix.dim(),
        });
    }
    if n == 0 {
        return Ok((Array1::zeros(0), Array2::zeros((0, 0))));
    }
    if matrix.iter().any(|x| !x.is_finite()) {
        return Err(WiringError::Numerical(
            "cannot decompose a matrix with non-finite entries".to_string(),
        ));
    }

    let dense = DMatrix::from_fn(n, n, |i, j| matrix[[i, j]]);
    let eigen = SymmetricEigen::try_new(dense, f64::EPSILON, MAX_EIGEN_ITERATIONS)
        .ok_or_else(|| {
            WiringError::Numerical(format!(
                "symmetric eigen-decomposition did not converge in {} iterations",
                MAX_EIGEN_ITERATIONS
            ))
        })?;

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        eigen.eigenvalues[j]
            .partial_cmp(&eigen.eigenvalues[i])
            .unwrap_or(Ordering::Equal)
    });

    let values = Array1::from_iter(order.iter().map(|&i| eigen.eigenvalues[i]));
    let vectors = Array2::from_shape_fn((n, n), |(row, k)| eigen.eigenvectors[(row, order[k])]);
    Ok((values, vectors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded_rng;
    use ndarray::array;

    #[test]
    fn test_kron_block_layout() {
        let pattern = array![[1.0, 0.0], [0.0, 2.0]];
        let patch = array![[1.0, 1.0]];
        let product = kron(&pattern.view(), &patch.view());
        assert_eq!(product, array![[1.0, 1.0, 0.0, 0.0], [0.0, 0.0, 2.0, 2.0]]);
    }

    #[test]
    fn test_cosine_similarity() {
        let m = array![[1.0, 2.0, 0.0], [0.0, 0.0, 0.0], [1.0, 2.0, 3.0]];
        let c = column_cosine_similarity(&m.view());
        assert!((c[[0, 1]] - 1.0).abs() < 1e-12);
        assert!((c[[0, 2]] - 1.0 / 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(c[[0, 2]], c[[2, 0]]);

        let zero_column = array![[1.0, 0.0], [1.0, 0.0]];
        let c = column_cosine_similarity(&zero_column.view());
        assert_eq!(c[[0, 1]], 0.0);
        assert_eq!(c[[1, 1]], 0.0);
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let x = array![1.0, 0.5, 0.99, -3.0];
        let y = softmax(&x.view(), 0.02);
        assert!((y.sum() - 1.0).abs() < 1e-12);
        assert!(y.iter().all(|&v| v >= 0.0));
        assert!(y[0] > y[2] && y[2] > y[1]);
    }

    #[test]
    fn test_argsort_is_stable() {
        assert_eq!(argsort(&[0.3, 0.1, 0.3, 0.0]), vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_permute_rows_keeps_rows_intact() {
        let m = Array2::from_shape_fn((6, 3), |(i, j)| (10 * i + j) as f64);
        let permuted = permute_rows(&m, &mut seeded_rng(3));
        for row in permuted.rows() {
            let i = (row[0] / 10.0) as usize;
            assert_eq!(row, m.row(i));
        }
    }

    #[test]
    fn test_symmetric_eigen_reconstructs() {
        let m = array![[4.0, 1.0, 0.5], [1.0, 3.0, 0.2], [0.5, 0.2, 1.0]];
        let (values, vectors) = symmetric_eigen(&m.view()).unwrap();
        assert!(values[0] >= values[1] && values[1] >= values[2]);

        let rebuilt = vectors.dot(&Array2::from_diag(&values)).dot(&vectors.t());
        for (a, b) in rebuilt.iter().zip(m.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
        let identity = vectors.t().dot(&vectors);
        for ((i, j), x) in identity.indexed_iter() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!((x - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_symmetric_eigen_rejects_non_finite() {
        let m = array![[1.0, f64::NAN], [f64::NAN, 1.0]];
        assert!(matches!(
            symmetric_eigen(&m.view()),
            Err(WiringError::Numerical(_))
        ));
    }

    #[test]
    fn test_symmetric_eigen_rejects_non_square() {
        let m = Array2::<f64>::zeros((2, 3));
        assert!(matches!(
            symmetric_eigen(&m.view()),
            Err(WiringError::DimensionMismatch { .. })
        ));
    }
}
