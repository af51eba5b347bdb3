// src/kl/covariance.rs
//! Covariance Matrix Assembly
//!
//! # Nyström Discretization
//!
//! The continuous eigenproblem of the covariance operator
//! ```text
//! ∫ R_H(s, t) φ(s) ds = λ φ(t)
//! ```
//! is approximated by the matrix eigenproblem of
//! ```text
//! C[i][j] = R_H(t_i, t_j)
//! ```
//! over the grid points t_0 < t_1 < … < t_{N-1}.
//!
//! # Symmetry Contract
//!
//! Only the upper triangle is evaluated; the lower triangle is mirrored from
//! it. This makes `C[i][j] == C[j][i]` hold bit-for-bit, independent of any
//! floating-point asymmetry in kernel evaluation order. The symmetric
//! eigensolver downstream requires this. PSD validation is the decomposer's
//! job, not the builder's.

use crate::process::{FbmKernel, Grid};
use nalgebra::DMatrix;

/// Symmetric N×N fBm covariance matrix over a grid
///
/// Opaque wrapper: the only constructor is [`build_matrix`], so every value
/// of this type is exactly symmetric by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceMatrix {
    matrix: DMatrix<f64>,
}

impl CovarianceMatrix {
    /// Matrix dimension N (the number of grid points)
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// Element C[i][j]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix[(i, j)]
    }

    /// Borrow the underlying matrix
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Trace of the matrix, Σ_i C[i][i] = Σ_i t_i^{2H}
    pub fn trace(&self) -> f64 {
        self.matrix.trace()
    }
}

/// Build the covariance matrix `C[i][j] = R_H(t_i, t_j)` for a kernel and grid
///
/// O(N²) kernel evaluations on the upper triangle, mirrored to the lower.
/// The grid type guarantees strictly increasing points, so the degenerate
/// (singular) case is already ruled out at this boundary.
pub fn build_matrix(kernel: &FbmKernel, grid: &Grid) -> CovarianceMatrix {
    let n = grid.len();
    let t = grid.points();
    let mut matrix = DMatrix::<f64>::zeros(n, n);

    for i in 0..n {
        for j in i..n {
            let c = kernel.covariance(t[i], t[j]);
            matrix[(i, j)] = c;
            matrix[(j, i)] = c;
        }
    }

    CovarianceMatrix { matrix }
}
