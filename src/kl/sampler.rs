// src/kl/sampler.rs
//! Truncated Karhunen–Loève Sampler
//!
//! # Mathematical Framework
//!
//! Given the top-K eigenpairs of the covariance matrix, one realization of
//! the discretized process is
//! ```text
//! X = Σ_{n=1..K} √λ_n · ξ_n · v_n,    ξ_n ~ N(0, 1) i.i.d.
//! ```
//! an N-dimensional Gaussian vector whose covariance is the rank-K
//! approximation `Σ_{n≤K} λ_n v_n v_nᵀ` of C.
//!
//! # Amortization
//!
//! The decomposition is the O(N³) step; a single sample is O(N·K). The
//! intended usage is one `decompose` shared read-only across arbitrarily
//! many sampling calls, which is the entire economic rationale for keeping
//! the two stages separate.
//!
//! # Generator Discipline
//!
//! `sample` advances the generator by exactly K draws per path, including
//! for clamped-zero eigenvalues. This keeps seeded runs reproducible and
//! independent of how many eigenvalues happen to clamp.

use crate::error::{validation::*, KlError, KlResult};
use crate::kl::spectral::EigenDecomposition;
use crate::rng::{self, RngFactory};
use nalgebra::DVector;
use rand::Rng;
use rayon::prelude::*;

/// One realization of the process at the N grid points
pub type SamplePath = Vec<f64>;

/// Draw a single truncated-KL sample path from the top `k` eigenpairs
///
/// Requires `1 ≤ k ≤ N`; fails with `InvalidTruncation` otherwise. The
/// generator is advanced by exactly `k` standard-normal draws.
pub fn sample<R: Rng + ?Sized>(
    eig: &EigenDecomposition,
    k: usize,
    rng: &mut R,
) -> KlResult<SamplePath> {
    let n = eig.len();
    if k < 1 || k > n {
        return Err(KlError::InvalidTruncation { k, n });
    }

    let mut path = DVector::<f64>::zeros(n);
    for i in 0..k {
        let xi = rng::get_normal_draw(rng);
        // √λ of a clamped-zero eigenvalue is 0: the term vanishes but the
        // draw above still happened
        let coeff = eig.eigenvalue(i).sqrt() * xi;
        path.axpy(coeff, eig.eigenvector(i), 1.0);
    }

    Ok(path.iter().copied().collect())
}

/// Draw `m` independent sample paths from one sequential generator
///
/// The generator advances by exactly `m * k` draws; paths share nothing but
/// the (read-only) eigenpairs.
pub fn sample_many<R: Rng + ?Sized>(
    eig: &EigenDecomposition,
    k: usize,
    rng: &mut R,
    m: usize,
) -> KlResult<Vec<SamplePath>> {
    validate_paths(m)?;
    let mut paths = Vec::with_capacity(m);
    for _ in 0..m {
        paths.push(sample(eig, k, rng)?);
    }
    Ok(paths)
}

/// Draw `m` independent sample paths in parallel
///
/// Each path id gets its own deterministic generator stream from
/// [`RngFactory`], so the result is identical for a fixed `seed` regardless
/// of thread count or scheduling. The decomposition is shared read-only
/// across worker threads.
pub fn sample_many_par(
    eig: &EigenDecomposition,
    k: usize,
    seed: u64,
    m: usize,
) -> KlResult<Vec<SamplePath>> {
    validate_paths(m)?;
    let n = eig.len();
    if k < 1 || k > n {
        return Err(KlError::InvalidTruncation { k, n });
    }

    let factory = RngFactory::new(seed);
    (0..m)
        .into_par_iter()
        .map(|i| {
            let mut rng = factory.stream(i as u64);
            sample(eig, k, &mut rng)
        })
        .collect()
}
