// src/process/kernel.rs
//! Fractional Brownian Motion Covariance Kernel
//!
//! # Mathematical Framework
//!
//! Fractional Brownian motion B^H is the centered Gaussian process with
//! covariance
//! ```text
//! R_H(s, t) = ½ (|s|^{2H} + |t|^{2H} - |t - s|^{2H})
//! ```
//!
//! Where:
//! - H ∈ (0, 1): Hurst exponent controlling self-similarity and long-range
//!   dependence
//! - H = ½ recovers standard Brownian motion, R(s, t) = min(s, t)
//! - H > ½: positively correlated increments (persistent paths)
//! - H < ½: negatively correlated increments (anti-persistent paths)
//!
//! The endpoints are rejected: H = 0 degenerates to a non-Gaussian limit and
//! H = 1 to the deterministic line B_t = t·B_1.

use crate::error::{validation::*, KlResult};

/// fBm covariance kernel with a validated Hurst exponent
///
/// Validating H once at construction lets the matrix builder evaluate the
/// kernel N² times without per-call checks.
#[derive(Debug, Clone, Copy)]
pub struct FbmKernel {
    hurst: f64,
    two_h: f64,
}

impl FbmKernel {
    /// Create a kernel for Hurst exponent `hurst` ∈ (0, 1)
    pub fn new(hurst: f64) -> KlResult<Self> {
        validate_hurst(hurst)?;
        Ok(FbmKernel {
            hurst,
            two_h: 2.0 * hurst,
        })
    }

    pub fn hurst(&self) -> f64 {
        self.hurst
    }

    /// Evaluate R_H(s, t) for s, t ≥ 0
    ///
    /// Pure function. `0^{2H} = 0` for H > 0, so s = t = 0 yields exactly 0
    /// with no NaN.
    pub fn covariance(&self, s: f64, t: f64) -> f64 {
        0.5 * (s.abs().powf(self.two_h) + t.abs().powf(self.two_h)
            - (t - s).abs().powf(self.two_h))
    }
}

/// One-off kernel evaluation with full parameter validation
///
/// For repeated evaluation over a grid, construct an [`FbmKernel`] instead.
pub fn fbm_covariance(hurst: f64, s: f64, t: f64) -> KlResult<f64> {
    let kernel = FbmKernel::new(hurst)?;
    validate_non_negative("s", s)?;
    validate_non_negative("t", t)?;
    Ok(kernel.covariance(s, t))
}
