// src/kl/engine.rs
//! One-Shot Simulation Engine
//!
//! Convenience pipeline gluing the stages together:
//! grid + H → kernel → covariance matrix → eigendecomposition → M sample
//! paths. The intermediate decomposition is returned alongside the paths so
//! callers can keep sampling from it without paying the O(N³) step again.

use crate::diagnostics;
use crate::error::{validation::*, KlError, KlResult};
use crate::kl::covariance::build_matrix;
use crate::kl::sampler::{sample_many, sample_many_par, SamplePath};
use crate::kl::spectral::{decompose_with_tolerance, EigenDecomposition, DEFAULT_EPSILON};
use crate::process::{FbmKernel, Grid};
use crate::rng;

/// Configuration for a truncated-KL fBm simulation
#[derive(Debug, Clone)]
pub struct KlConfig {
    /// Hurst exponent, open interval (0, 1)
    pub hurst: f64,
    /// Number of grid points N on [0, horizon]
    pub n_points: usize,
    /// Time horizon T
    pub horizon: f64,
    /// Number of leading eigenpairs K to keep, 1 ≤ K ≤ N
    pub truncation: usize,
    /// Number of sample paths to draw
    pub paths: usize,
    /// Seed for the sampling generator
    pub seed: u64,
    /// Relative tolerance for the PSD clamp
    pub epsilon: f64,
    /// Draw the batch in parallel (one deterministic stream per path)
    pub parallel: bool,
}

impl KlConfig {
    /// Validate the configuration eagerly, before any O(N³) work
    pub fn validate(&self) -> KlResult<()> {
        validate_hurst(self.hurst)?;
        validate_positive("horizon", self.horizon)?;
        validate_positive("epsilon", self.epsilon)?;
        validate_paths(self.paths)?;

        if self.n_points < 2 {
            return Err(KlError::InvalidParameter {
                parameter: "n_points".to_string(),
                value: self.n_points as f64,
                constraint: "grid needs at least 2 points".to_string(),
            });
        }
        if self.truncation < 1 || self.truncation > self.n_points {
            return Err(KlError::InvalidTruncation {
                k: self.truncation,
                n: self.n_points,
            });
        }
        Ok(())
    }
}

impl Default for KlConfig {
    fn default() -> Self {
        KlConfig {
            hurst: 0.7,
            n_points: 201,
            horizon: 1.0,
            truncation: 20,
            paths: 1,
            seed: 12345,
            epsilon: DEFAULT_EPSILON,
            parallel: false,
        }
    }
}

/// Result of a one-shot simulation
///
/// Holds the derived artifacts so further sampling or diagnostics can reuse
/// them without recomputation.
#[derive(Debug, Clone)]
pub struct KlSimulation {
    pub grid: Grid,
    pub decomposition: EigenDecomposition,
    pub paths: Vec<SamplePath>,
    /// Fraction of total variance discarded at the configured K
    pub truncation_error: f64,
}

/// Run the full pipeline for one configuration
///
/// All-or-nothing: any precondition violation fails before partial results
/// exist. Deterministic for a fixed config (including `parallel: true`,
/// where each path id owns a seed-derived stream).
pub fn simulate_fbm(cfg: &KlConfig) -> KlResult<KlSimulation> {
    cfg.validate()?;

    let kernel = FbmKernel::new(cfg.hurst)?;
    let grid = Grid::uniform(cfg.n_points, cfg.horizon)?;
    let matrix = build_matrix(&kernel, &grid);
    let decomposition = decompose_with_tolerance(&matrix, cfg.epsilon)?;

    let paths = if cfg.parallel {
        sample_many_par(&decomposition, cfg.truncation, cfg.seed, cfg.paths)?
    } else {
        let mut rng = rng::seed_rng_from_u64(cfg.seed);
        sample_many(&decomposition, cfg.truncation, &mut rng, cfg.paths)?
    };

    let truncation_error = diagnostics::truncation_error(&decomposition, cfg.truncation)?;

    Ok(KlSimulation {
        grid,
        decomposition,
        paths,
        truncation_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(KlConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_rejects_bad_fields() {
        let cfg = KlConfig {
            hurst: 1.2,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = KlConfig {
            truncation: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(KlError::InvalidTruncation { .. })
        ));

        let cfg = KlConfig {
            truncation: 202,
            n_points: 201,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = KlConfig {
            paths: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_simulation_shapes() {
        let cfg = KlConfig {
            n_points: 50,
            truncation: 10,
            paths: 3,
            ..Default::default()
        };
        let sim = simulate_fbm(&cfg).unwrap();

        assert_eq!(sim.grid.len(), 50);
        assert_eq!(sim.decomposition.len(), 50);
        assert_eq!(sim.paths.len(), 3);
        assert!(sim.paths.iter().all(|p| p.len() == 50));
        assert!(sim.truncation_error >= 0.0 && sim.truncation_error < 1.0);
    }

    #[test]
    fn test_sequential_and_parallel_are_each_deterministic() {
        let base = KlConfig {
            n_points: 40,
            truncation: 8,
            paths: 6,
            seed: 7,
            ..Default::default()
        };

        let s1 = simulate_fbm(&base).unwrap();
        let s2 = simulate_fbm(&base).unwrap();
        assert_eq!(s1.paths, s2.paths);

        let par = KlConfig {
            parallel: true,
            ..base
        };
        let p1 = simulate_fbm(&par).unwrap();
        let p2 = simulate_fbm(&par).unwrap();
        assert_eq!(p1.paths, p2.paths);
    }
}
