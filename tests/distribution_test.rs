// tests/distribution_test.rs
//! Monte Carlo checks that sampled batches realize the covariance the
//! truncated expansion promises.

use fbm_kl::diagnostics::{empirical_covariance, truncated_covariance};
use fbm_kl::kl::covariance::build_matrix;
use fbm_kl::kl::sampler::sample_many_par;
use fbm_kl::kl::spectral::{decompose, EigenDecomposition};
use fbm_kl::math_utils::norm_cdf;
use fbm_kl::process::{FbmKernel, Grid};

const M_PATHS: usize = 20_000;

fn decomposition(h: f64, n: usize) -> EigenDecomposition {
    let kernel = FbmKernel::new(h).expect("Valid Hurst exponent");
    let grid = Grid::uniform(n, 1.0).expect("Valid grid");
    decompose(&build_matrix(&kernel, &grid)).expect("PSD covariance matrix")
}

#[test]
fn test_empirical_covariance_converges_to_truncated_target() {
    // The empirical covariance of X_{t_i}, X_{t_j} converges to the
    // truncated-KL covariance Σ_{n≤K} λ_n v_n(i) v_n(j), not to R_H itself
    let h = 0.7;
    let n = 30;
    let k = 8;
    let eig = decomposition(h, n);

    let paths = sample_many_par(&eig, k, 2024, M_PATHS).expect("Valid truncation");

    // Spot-check a spread of index pairs, diagonal and off-diagonal
    let pairs = [(5, 5), (29, 29), (5, 20), (10, 29), (0, 15)];
    for &(i, j) in &pairs {
        let target = truncated_covariance(&eig, k, i, j).expect("K within range");
        let empirical = empirical_covariance(&paths, i, j);
        // Monte Carlo noise at M = 20,000 is well under this bound for
        // covariances of order ≤ 1
        assert!(
            (empirical - target).abs() < 0.05,
            "cov(X_{}, X_{}): empirical {} vs truncated target {}",
            i,
            j,
            empirical,
            target
        );
        println!(
            "cov({:2}, {:2}): empirical {:+.4}, target {:+.4}",
            i, j, empirical, target
        );
    }
}

#[test]
fn test_full_expansion_recovers_terminal_variance() {
    // With K = N nothing is truncated, so Var(X_T) → T^{2H} = 1 at T = 1
    let h = 0.6;
    let n = 25;
    let eig = decomposition(h, n);

    let paths = sample_many_par(&eig, n, 7, M_PATHS).expect("Valid truncation");
    let terminal_var = empirical_covariance(&paths, n - 1, n - 1);

    assert!(
        (terminal_var - 1.0).abs() < 0.05,
        "Var(X_1) = {}, expected 1",
        terminal_var
    );
}

#[test]
fn test_sample_mean_is_centered() {
    let eig = decomposition(0.7, 25);
    let paths = sample_many_par(&eig, 25, 99, M_PATHS).expect("Valid truncation");

    // fBm is centered; the sample mean at the terminal point is
    // N(0, 1/M)-distributed
    let mean: f64 = paths.iter().map(|p| p[24]).sum::<f64>() / M_PATHS as f64;
    assert!(mean.abs() < 0.05, "terminal sample mean = {}", mean);
}

#[test]
fn test_terminal_marginal_is_gaussian() {
    // At T = 1 with full expansion, X_T ~ N(0, 1) regardless of H. Check a
    // tail fraction against the normal CDF.
    let eig = decomposition(0.7, 25);
    let paths = sample_many_par(&eig, 25, 31337, M_PATHS).expect("Valid truncation");

    for &z in &[-1.0, 0.0, 1.0] {
        let below = paths.iter().filter(|p| p[24] <= z).count();
        let fraction = below as f64 / M_PATHS as f64;
        let expected = norm_cdf(z);
        // Binomial noise: σ ≈ √(p(1-p)/M) ≈ 0.003 here
        assert!(
            (fraction - expected).abs() < 0.02,
            "P(X_1 ≤ {}): empirical {} vs Φ = {}",
            z,
            fraction,
            expected
        );
    }
}
