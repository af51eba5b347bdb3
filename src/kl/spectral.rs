// src/kl/spectral.rs
//! Spectral Decomposition of the Covariance Matrix
//!
//! # Mathematical Framework
//!
//! The symmetric eigendecomposition
//! ```text
//! C = Σ_n λ_n v_n v_nᵀ
//! ```
//! yields the discrete Karhunen–Loève basis: eigenvalues λ_1 ≥ λ_2 ≥ … ≥ 0
//! and orthonormal eigenvectors v_n. A symmetric solver is required here;
//! it guarantees real eigenvalues and orthogonal eigenvectors, which a
//! general unsymmetric solver does not.
//!
//! # PSD Clamping
//!
//! In exact arithmetic C is positive semidefinite, but the solver may return
//! tiny negative eigenvalues near a rank deficiency (e.g. the zero row/column
//! when the grid starts at t = 0). Eigenvalues in `(-ε·λ_max, 0)` are clamped
//! to exactly 0; anything below that threshold signals a genuine fault in the
//! input rather than floating noise and fails with `NonPositiveSemidefinite`.
//!
//! # Sign and Tie Order
//!
//! The sign of each eigenvector is solver-dependent and NOT part of this
//! module's contract: -v_n is as valid as v_n, and both produce the same
//! sample-path law. Consumers must treat sample paths, not raw eigenvectors,
//! as the stable output. Eigenpairs with equal eigenvalues keep the solver's
//! order (the descending sort is stable).

use crate::error::{validation::*, KlError, KlResult};
use crate::kl::covariance::CovarianceMatrix;
use nalgebra::{DVector, SymmetricEigen};

/// Default relative tolerance for the PSD clamp
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Eigenpairs of a covariance matrix, sorted by descending eigenvalue
///
/// Immutable once produced; safe to share read-only across threads. All
/// eigenvalues are ≥ 0 (clamped) and all eigenvectors have unit L2 norm.
#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    eigenvalues: Vec<f64>,
    eigenvectors: Vec<DVector<f64>>,
}

impl EigenDecomposition {
    /// Number of eigenpairs N (the grid size)
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }

    /// λ_i (0-based, descending order)
    pub fn eigenvalue(&self, i: usize) -> f64 {
        self.eigenvalues[i]
    }

    /// v_i, unit L2 norm; sign is arbitrary
    pub fn eigenvector(&self, i: usize) -> &DVector<f64> {
        &self.eigenvectors[i]
    }

    /// The full eigenvalue sequence, descending
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// (λ_i, v_i) pairs in descending eigenvalue order
    pub fn pairs(&self) -> impl Iterator<Item = (f64, &DVector<f64>)> {
        self.eigenvalues
            .iter()
            .copied()
            .zip(self.eigenvectors.iter())
    }

    /// Σ λ_i, the total variance of the discretized process (trace of C)
    pub fn total_variance(&self) -> f64 {
        self.eigenvalues.iter().sum()
    }
}

/// Decompose with the default clamp tolerance [`DEFAULT_EPSILON`]
pub fn decompose(c: &CovarianceMatrix) -> KlResult<EigenDecomposition> {
    decompose_with_tolerance(c, DEFAULT_EPSILON)
}

/// Full symmetric eigendecomposition with an explicit clamp tolerance
///
/// `epsilon` is relative to the largest eigenvalue: the clamp threshold is
/// `epsilon * λ_max` (falling back to `epsilon` itself when λ_max ≤ 0).
/// Eigenvalues in `(-threshold, 0)` become exactly 0; an eigenvalue below
/// `-threshold` fails with `NonPositiveSemidefinite`.
pub fn decompose_with_tolerance(
    c: &CovarianceMatrix,
    epsilon: f64,
) -> KlResult<EigenDecomposition> {
    validate_positive("epsilon", epsilon)?;

    let eig = SymmetricEigen::new(c.as_matrix().clone());
    let n = c.dim();

    // Descending eigenvalue order; stable sort keeps solver order on ties
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| eig.eigenvalues[b].total_cmp(&eig.eigenvalues[a]));

    let lambda_max = eig.eigenvalues[order[0]];
    let threshold = if lambda_max > 0.0 {
        epsilon * lambda_max
    } else {
        epsilon
    };

    let mut eigenvalues = Vec::with_capacity(n);
    let mut eigenvectors = Vec::with_capacity(n);
    for &idx in &order {
        let lambda = eig.eigenvalues[idx];
        if lambda < -threshold {
            return Err(KlError::NonPositiveSemidefinite {
                eigenvalue: lambda,
                tolerance: threshold,
            });
        }
        eigenvalues.push(lambda.max(0.0));

        let mut v = eig.eigenvectors.column(idx).into_owned();
        let norm = v.norm();
        if norm > 0.0 {
            v /= norm;
        }
        eigenvectors.push(v);
    }

    Ok(EigenDecomposition {
        eigenvalues,
        eigenvectors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kl::covariance::build_matrix;
    use crate::process::{FbmKernel, Grid};

    fn decompose_fbm(h: f64, n: usize) -> EigenDecomposition {
        let kernel = FbmKernel::new(h).unwrap();
        let grid = Grid::uniform(n, 1.0).unwrap();
        decompose(&build_matrix(&kernel, &grid)).unwrap()
    }

    #[test]
    fn test_eigenvalues_sorted_descending_and_non_negative() {
        let eig = decompose_fbm(0.7, 30);
        for i in 0..eig.len() - 1 {
            assert!(eig.eigenvalue(i) >= eig.eigenvalue(i + 1));
        }
        for i in 0..eig.len() {
            assert!(eig.eigenvalue(i) >= 0.0, "λ_{} = {}", i, eig.eigenvalue(i));
        }
    }

    #[test]
    fn test_eigenvectors_unit_norm() {
        let eig = decompose_fbm(0.3, 25);
        for i in 0..eig.len() {
            assert!((eig.eigenvector(i).norm() - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_total_variance_matches_trace() {
        let kernel = FbmKernel::new(0.6).unwrap();
        let grid = Grid::uniform(20, 1.0).unwrap();
        let c = build_matrix(&kernel, &grid);
        let eig = decompose(&c).unwrap();
        assert!((eig.total_variance() - c.trace()).abs() < 1e-8);
    }

    #[test]
    fn test_two_point_boundary_case() {
        // H = 1/2, grid [0, 1]: C = [[0, 0], [0, 1]], eigenvalues {1, 0}
        let kernel = FbmKernel::new(0.5).unwrap();
        let grid = Grid::from_points(vec![0.0, 1.0]).unwrap();
        let eig = decompose(&build_matrix(&kernel, &grid)).unwrap();

        assert_eq!(eig.len(), 2);
        assert!((eig.eigenvalue(0) - 1.0).abs() < 1e-12);
        // The degenerate direction at t = 0 must clamp to exactly zero
        assert_eq!(eig.eigenvalue(1), 0.0);
    }

    #[test]
    fn test_invalid_epsilon_rejected() {
        let kernel = FbmKernel::new(0.5).unwrap();
        let grid = Grid::uniform(5, 1.0).unwrap();
        let c = build_matrix(&kernel, &grid);
        assert!(decompose_with_tolerance(&c, 0.0).is_err());
        assert!(decompose_with_tolerance(&c, -1e-10).is_err());
    }
}
