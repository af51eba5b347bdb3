//! Process definition: the fBm covariance kernel and the time grid it is
//! discretized on.

pub mod grid;
pub mod kernel;

pub use grid::Grid;
pub use kernel::{fbm_covariance, FbmKernel};
