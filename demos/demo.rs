// demos/demo.rs
use fbm_kl::diagnostics;
use fbm_kl::kl::covariance::build_matrix;
use fbm_kl::kl::sampler::{sample_many, sample_many_par};
use fbm_kl::kl::spectral::decompose;
use fbm_kl::math_utils::Timer;
use fbm_kl::output;
use fbm_kl::process::{FbmKernel, Grid};
use fbm_kl::rng;

fn main() {
    println!("fbm-kl demo: truncated KL simulation of fractional Brownian motion");
    println!("===================================================================\n");

    let hurst = 0.7;
    let n_points = 200;
    let horizon = 1.0;
    let truncation = 20;
    let n_paths = 8;
    let seed = 42;

    let kernel = FbmKernel::new(hurst).expect("Valid Hurst exponent");
    let grid = Grid::uniform(n_points, horizon).expect("Valid grid");

    // The expensive part: assemble C and diagonalize it once
    let mut timer = Timer::new();
    let matrix = build_matrix(&kernel, &grid);
    let build_ms = timer.elapsed_ms();

    timer.start();
    let eig = decompose(&matrix).expect("PSD covariance matrix");
    let decompose_ms = timer.elapsed_ms();

    println!(
        "H = {}, N = {} points on [0, {}], K = {}",
        hurst, n_points, horizon, truncation
    );
    println!("Covariance build:   {:8.2} ms", build_ms);
    println!("Eigendecomposition: {:8.2} ms", decompose_ms);

    // Spectrum summary: how fast does the eigenvalue mass decay?
    println!("\nLeading eigenvalues:");
    for i in 0..5 {
        println!("  λ_{} = {:.6e}", i + 1, eig.eigenvalue(i));
    }
    println!("  total variance (trace) = {:.6}", eig.total_variance());

    println!("\nTruncation error by K:");
    for &k in &[1, 5, 10, 20, 50, n_points] {
        let e = diagnostics::truncation_error(&eig, k).expect("K within range");
        println!("  K = {:3} → {:.3e} of variance discarded", k, e);
    }

    // The cheap part: sampling amortizes the decomposition
    timer.start();
    let mut rng = rng::seed_rng_from_u64(seed);
    let paths = sample_many(&eig, truncation, &mut rng, n_paths).expect("Valid truncation");
    let sample_ms = timer.elapsed_ms();
    println!(
        "\nDrew {} paths of length {} in {:.2} ms ({:.1} paths/sec)",
        n_paths,
        paths[0].len(),
        sample_ms,
        n_paths as f64 / (sample_ms / 1000.0)
    );

    // Same thing in parallel, one deterministic stream per path
    timer.start();
    let par_paths = sample_many_par(&eig, truncation, seed, 1000).expect("Valid truncation");
    let par_ms = timer.elapsed_ms();
    println!(
        "Parallel batch: {} paths in {:.2} ms ({:.0} paths/sec)",
        par_paths.len(),
        par_ms,
        par_paths.len() as f64 / (par_ms / 1000.0)
    );

    output::write_paths_to_csv("fbm_paths.csv", &grid, &paths).expect("Could not write paths CSV");
    output::write_spectrum_to_csv("fbm_spectrum.csv", &eig).expect("Could not write spectrum CSV");
    println!("\nWrote fbm_paths.csv and fbm_spectrum.csv");
}
