// src/error.rs
use std::fmt;

/// Custom error types for the fbm-kl library
#[derive(Debug, Clone, PartialEq)]
pub enum KlError {
    /// Invalid parameter values (Hurst exponent outside (0,1), negative times, ...)
    InvalidParameter {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Two grid points coincide, making the covariance matrix singular
    DegenerateGrid { index: usize, value: f64 },

    /// Decomposition produced an eigenvalue below -epsilon, beyond
    /// floating-point noise
    NonPositiveSemidefinite { eigenvalue: f64, tolerance: f64 },

    /// Truncation level K outside the valid range for the decomposition
    InvalidTruncation { k: usize, n: usize },
}

impl fmt::Display for KlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KlError::InvalidParameter {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            KlError::DegenerateGrid { index, value } => {
                write!(
                    f,
                    "Degenerate grid: points {} and {} coincide at t = {} (covariance matrix would be singular)",
                    index, index + 1, value
                )
            }
            KlError::NonPositiveSemidefinite {
                eigenvalue,
                tolerance,
            } => {
                write!(
                    f,
                    "Covariance matrix is not positive semidefinite: eigenvalue {:.6e} below -{:.6e}",
                    eigenvalue, tolerance
                )
            }
            KlError::InvalidTruncation { k, n } => {
                write!(
                    f,
                    "Invalid truncation level K = {} for a decomposition of size N = {}",
                    k, n
                )
            }
        }
    }
}

impl std::error::Error for KlError {}

/// Result type alias for fbm-kl operations
pub type KlResult<T> = Result<T, KlError>;

/// Validation utilities
pub mod validation {
    use super::{KlError, KlResult};

    /// Validate a Hurst exponent: must be finite and strictly inside (0, 1).
    /// H = 0 and H = 1 are rejected; the process degenerates at the endpoints.
    pub fn validate_hurst(h: f64) -> KlResult<()> {
        if !h.is_finite() || h <= 0.0 || h >= 1.0 {
            Err(KlError::InvalidParameter {
                parameter: "hurst".to_string(),
                value: h,
                constraint: "must be in the open interval (0, 1)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> KlResult<()> {
        if value > 0.0 {
            Ok(())
        } else {
            Err(KlError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> KlResult<()> {
        if value >= 0.0 {
            Ok(())
        } else {
            Err(KlError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> KlResult<()> {
        if !value.is_finite() {
            Err(KlError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate paths count for batch sampling
    pub fn validate_paths(paths: usize) -> KlResult<()> {
        if paths == 0 {
            Err(KlError::InvalidParameter {
                parameter: "paths".to_string(),
                value: 0.0,
                constraint: "must be greater than 0".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_validate_hurst() {
        assert!(validate_hurst(0.5).is_ok());
        assert!(validate_hurst(0.001).is_ok());
        assert!(validate_hurst(0.999).is_ok());
        assert!(validate_hurst(0.0).is_err());
        assert!(validate_hurst(1.0).is_err());
        assert!(validate_hurst(-0.3).is_err());
        assert!(validate_hurst(1.5).is_err());
        assert!(validate_hurst(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("horizon", 1.0).is_ok());
        assert!(validate_positive("horizon", 0.0).is_err());
        assert!(validate_positive("horizon", -0.1).is_err());
        assert!(validate_positive("horizon", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("value", 1.0).is_ok());
        assert!(validate_finite("value", f64::NAN).is_err());
        assert!(validate_finite("value", f64::INFINITY).is_err());
        assert!(validate_finite("value", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_error_display() {
        let error = KlError::InvalidParameter {
            parameter: "hurst".to_string(),
            value: 1.5,
            constraint: "must be in the open interval (0, 1)".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("hurst"));
        assert!(display.contains("1.5"));
        assert!(display.contains("(0, 1)"));
    }

    #[test]
    fn test_truncation_error_display() {
        let error = KlError::InvalidTruncation { k: 51, n: 50 };

        let display = format!("{}", error);
        assert!(display.contains("51"));
        assert!(display.contains("50"));
    }
}
