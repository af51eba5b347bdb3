// src/diagnostics.rs
//! Truncation Diagnostics
//!
//! Purely informational helpers for choosing the truncation level K and for
//! validating sampled batches against the spectrum. Nothing here imposes
//! policy; the caller decides what error is acceptable.
//!
//! # Truncation Error
//!
//! Discarding eigenpairs K+1..N discards variance. The relative truncation
//! error
//! ```text
//! e(K) = (Σ_{n>K} λ_n) / (Σ_n λ_n)
//! ```
//! is the fraction of total variance lost, in [0, 1], non-increasing in K,
//! and exactly 0 at K = N.

use crate::error::{KlError, KlResult};
use crate::kl::sampler::SamplePath;
use crate::kl::spectral::EigenDecomposition;

/// Fraction of total variance discarded by keeping only the top `k` eigenpairs
///
/// `k` ranges over [0, N]: `k = 0` returns exactly 1 (everything discarded),
/// `k = N` returns exactly 0 (no truncation). Fails with `InvalidTruncation`
/// outside that range.
pub fn truncation_error(eig: &EigenDecomposition, k: usize) -> KlResult<f64> {
    let n = eig.len();
    if k > n {
        return Err(KlError::InvalidTruncation { k, n });
    }
    if k == n {
        return Ok(0.0);
    }
    if k == 0 {
        return Ok(1.0);
    }

    let total = eig.total_variance();
    let discarded: f64 = eig.eigenvalues()[k..].iter().sum();
    Ok(discarded / total)
}

/// The full sweep `e(1), e(2), …, e(N)` for choosing K
pub fn truncation_error_profile(eig: &EigenDecomposition) -> Vec<f64> {
    let total = eig.total_variance();
    let mut profile = Vec::with_capacity(eig.len());
    let mut discarded = total;
    for &lambda in eig.eigenvalues() {
        discarded -= lambda;
        // Running subtraction can dip below zero in the last few ulps
        profile.push((discarded / total).max(0.0));
    }
    // No truncation at K = N: exactly zero by contract
    if let Some(last) = profile.last_mut() {
        *last = 0.0;
    }
    profile
}

/// The covariance the rank-`k` truncation actually realizes at grid indices
/// (i, j): `Σ_{n≤K} λ_n v_n(i) v_n(j)`
///
/// This, not R_H itself, is the target the empirical covariance of sampled
/// paths converges to.
pub fn truncated_covariance(
    eig: &EigenDecomposition,
    k: usize,
    i: usize,
    j: usize,
) -> KlResult<f64> {
    let n = eig.len();
    if k < 1 || k > n {
        return Err(KlError::InvalidTruncation { k, n });
    }

    let mut acc = 0.0;
    for (lambda, v) in eig.pairs().take(k) {
        acc += lambda * v[i] * v[j];
    }
    Ok(acc)
}

/// Empirical covariance of path values at grid indices (i, j) over a batch
///
/// Centered Monte Carlo estimate; the process has mean zero but the sample
/// mean is subtracted anyway so the estimate is unbiased in the usual sense.
pub fn empirical_covariance(paths: &[SamplePath], i: usize, j: usize) -> f64 {
    let m = paths.len();
    if m < 2 {
        return 0.0;
    }

    let mean_i: f64 = paths.iter().map(|p| p[i]).sum::<f64>() / m as f64;
    let mean_j: f64 = paths.iter().map(|p| p[j]).sum::<f64>() / m as f64;

    let cross: f64 = paths
        .iter()
        .map(|p| (p[i] - mean_i) * (p[j] - mean_j))
        .sum();
    cross / (m - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kl::covariance::build_matrix;
    use crate::kl::spectral::decompose;
    use crate::process::{FbmKernel, Grid};

    fn decomposition(h: f64, n: usize) -> EigenDecomposition {
        let kernel = FbmKernel::new(h).unwrap();
        let grid = Grid::uniform(n, 1.0).unwrap();
        decompose(&build_matrix(&kernel, &grid)).unwrap()
    }

    #[test]
    fn test_no_truncation_is_exactly_zero() {
        let eig = decomposition(0.7, 20);
        assert_eq!(truncation_error(&eig, 20).unwrap(), 0.0);
    }

    #[test]
    fn test_full_truncation_is_exactly_one() {
        let eig = decomposition(0.7, 20);
        assert_eq!(truncation_error(&eig, 0).unwrap(), 1.0);
    }

    #[test]
    fn test_error_is_non_increasing_in_k() {
        let eig = decomposition(0.3, 30);
        let mut prev = 1.0;
        for k in 1..=30 {
            let e = truncation_error(&eig, k).unwrap();
            assert!(
                e <= prev + 1e-15,
                "e({}) = {} exceeds e({}) = {}",
                k,
                e,
                k - 1,
                prev
            );
            assert!((0.0..=1.0).contains(&e));
            prev = e;
        }
    }

    #[test]
    fn test_out_of_range_k_rejected() {
        let eig = decomposition(0.5, 10);
        assert!(matches!(
            truncation_error(&eig, 11),
            Err(KlError::InvalidTruncation { k: 11, n: 10 })
        ));
    }

    #[test]
    fn test_profile_matches_pointwise_error() {
        let eig = decomposition(0.6, 15);
        let profile = truncation_error_profile(&eig);
        assert_eq!(profile.len(), 15);
        for (k, &e) in profile.iter().enumerate() {
            let direct = truncation_error(&eig, k + 1).unwrap();
            assert!((e - direct).abs() < 1e-10, "profile[{}] = {} vs {}", k, e, direct);
        }
        assert_eq!(profile[14], 0.0);
    }

    #[test]
    fn test_truncated_covariance_recovers_matrix_at_full_rank() {
        let kernel = FbmKernel::new(0.7).unwrap();
        let grid = Grid::uniform(12, 1.0).unwrap();
        let c = build_matrix(&kernel, &grid);
        let eig = decompose(&c).unwrap();

        for i in 0..12 {
            for j in 0..12 {
                let rebuilt = truncated_covariance(&eig, 12, i, j).unwrap();
                assert!(
                    (rebuilt - c.get(i, j)).abs() < 1e-8,
                    "C[{}][{}]: rebuilt {} vs {}",
                    i,
                    j,
                    rebuilt,
                    c.get(i, j)
                );
            }
        }
    }

    #[test]
    fn test_empirical_covariance_degenerate_batches() {
        assert_eq!(empirical_covariance(&[], 0, 0), 0.0);
        assert_eq!(empirical_covariance(&[vec![1.0, 2.0]], 0, 1), 0.0);
    }
}
