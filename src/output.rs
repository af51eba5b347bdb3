// src/output.rs
use crate::kl::sampler::SamplePath;
use crate::kl::spectral::EigenDecomposition;
use crate::process::Grid;
use std::fs::File;
use std::io::{self, Write};

/// Write a batch of sample paths as CSV: one row per grid point, one column
/// per path, with the time coordinate first.
pub fn write_paths_to_csv(filename: &str, grid: &Grid, paths: &[SamplePath]) -> io::Result<()> {
    let mut file = File::create(filename)?;

    write!(file, "t")?;
    for i in 0..paths.len() {
        write!(file, ",path_{}", i)?;
    }
    writeln!(file)?;

    for (row, &t) in grid.points().iter().enumerate() {
        write!(file, "{}", t)?;
        for path in paths {
            write!(file, ",{}", path[row])?;
        }
        writeln!(file)?;
    }
    Ok(())
}

/// Write the eigenvalue spectrum as CSV: index, eigenvalue, and cumulative
/// fraction of total variance captured up to that index.
pub fn write_spectrum_to_csv(filename: &str, eig: &EigenDecomposition) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "index,eigenvalue,cumulative_variance_fraction")?;

    let total = eig.total_variance();
    let mut captured = 0.0;
    for (i, &lambda) in eig.eigenvalues().iter().enumerate() {
        captured += lambda;
        writeln!(file, "{},{},{}", i, lambda, captured / total)?;
    }
    Ok(())
}
