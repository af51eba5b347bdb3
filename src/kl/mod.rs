//! Karhunen–Loève machinery: covariance matrix assembly, spectral
//! decomposition, truncated sampling, and the one-shot simulation engine.

pub mod covariance;
pub mod engine;
pub mod sampler;
pub mod spectral;

pub use covariance::{build_matrix, CovarianceMatrix};
pub use engine::{simulate_fbm, KlConfig, KlSimulation};
pub use sampler::{sample, sample_many, sample_many_par, SamplePath};
pub use spectral::{decompose, decompose_with_tolerance, EigenDecomposition, DEFAULT_EPSILON};
