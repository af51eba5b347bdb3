// scripts/benchmark.rs
use fbm_kl::diagnostics;
use fbm_kl::kl::covariance::build_matrix;
use fbm_kl::kl::sampler::{sample_many, sample_many_par};
use fbm_kl::kl::spectral::decompose;
use fbm_kl::math_utils::Timer;
use fbm_kl::process::{FbmKernel, Grid};
use fbm_kl::rng;
use std::env;
use std::fs::File;
use std::io::Write;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rust_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rust_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    n_points: usize,
    truncation: usize,
    paths: usize,
    time_ms: f64,
    throughput_paths_per_sec: Option<f64>,
    truncation_error: Option<f64>,
}

fn bench_decomposition(hurst: f64, sizes: &[usize]) -> Vec<BenchmarkResult> {
    let kernel = FbmKernel::new(hurst).expect("Valid Hurst exponent");
    let mut results = Vec::new();
    let mut timer = Timer::new();

    for &n in sizes {
        let grid = Grid::uniform(n, 1.0).expect("Valid grid");

        timer.start();
        let matrix = build_matrix(&kernel, &grid);
        let build_ms = timer.elapsed_ms();
        results.push(BenchmarkResult {
            name: "covariance_build".to_string(),
            n_points: n,
            truncation: 0,
            paths: 0,
            time_ms: build_ms,
            throughput_paths_per_sec: None,
            truncation_error: None,
        });

        timer.start();
        let eig = decompose(&matrix).expect("PSD covariance matrix");
        let decompose_ms = timer.elapsed_ms();
        let k = (n / 10).max(1);
        results.push(BenchmarkResult {
            name: "eigendecomposition".to_string(),
            n_points: n,
            truncation: k,
            paths: 0,
            time_ms: decompose_ms,
            throughput_paths_per_sec: None,
            truncation_error: diagnostics::truncation_error(&eig, k).ok(),
        });

        println!(
            "N = {:4}: build {:8.2} ms, decompose {:8.2} ms",
            n, build_ms, decompose_ms
        );
    }

    results
}

fn bench_sampling(hurst: f64, n: usize, k: usize, paths: usize) -> Vec<BenchmarkResult> {
    let kernel = FbmKernel::new(hurst).expect("Valid Hurst exponent");
    let grid = Grid::uniform(n, 1.0).expect("Valid grid");
    let eig = decompose(&build_matrix(&kernel, &grid)).expect("PSD covariance matrix");

    let mut results = Vec::new();
    let mut timer = Timer::new();

    timer.start();
    let mut sequential_rng = rng::seed_rng_from_u64(42);
    sample_many(&eig, k, &mut sequential_rng, paths).expect("Valid truncation");
    let seq_ms = timer.elapsed_ms();
    let seq_throughput = paths as f64 / (seq_ms / 1000.0);
    results.push(BenchmarkResult {
        name: "sample_many".to_string(),
        n_points: n,
        truncation: k,
        paths,
        time_ms: seq_ms,
        throughput_paths_per_sec: Some(seq_throughput),
        truncation_error: None,
    });

    timer.start();
    sample_many_par(&eig, k, 42, paths).expect("Valid truncation");
    let par_ms = timer.elapsed_ms();
    let par_throughput = paths as f64 / (par_ms / 1000.0);
    results.push(BenchmarkResult {
        name: "sample_many_par".to_string(),
        n_points: n,
        truncation: k,
        paths,
        time_ms: par_ms,
        throughput_paths_per_sec: Some(par_throughput),
        truncation_error: None,
    });

    println!(
        "N = {}, K = {}, {} paths: sequential {:.0} paths/sec, parallel {:.0} paths/sec",
        n, k, paths, seq_throughput, par_throughput
    );

    results
}

fn write_results_to_csv(results: &[BenchmarkResult], system_info: &SystemInfo, filename: &str) {
    let mut file = File::create(filename).expect("Could not create CSV file");

    // Write system information as comments
    writeln!(file, "# System Information").unwrap();
    writeln!(file, "# OS: {}", system_info.os).unwrap();
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores).unwrap();
    writeln!(file, "# RUSTFLAGS: {}", system_info.rust_flags).unwrap();
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads).unwrap();
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
    .unwrap();
    writeln!(file, "#").unwrap();

    writeln!(
        file,
        "Benchmark,N,K,Paths,Time_ms,Throughput_paths_per_sec,Truncation_Error"
    )
    .unwrap();

    for result in results {
        writeln!(
            file,
            "{},{},{},{},{:.2},{},{}",
            result.name,
            result.n_points,
            result.truncation,
            result.paths,
            result.time_ms,
            result
                .throughput_paths_per_sec
                .map(|v| format!("{:.0}", v))
                .unwrap_or_else(|| "N/A".to_string()),
            result
                .truncation_error
                .map(|e| format!("{:.6e}", e))
                .unwrap_or_else(|| "N/A".to_string())
        )
        .unwrap();
    }
}

fn main() {
    let system_info = SystemInfo::gather();
    println!("fbm-kl benchmark");
    println!("================");
    println!("OS: {}", system_info.os);
    println!("CPU Cores: {}", system_info.cpu_cores);
    println!("Rayon Threads: {}", system_info.rayon_threads);
    println!();

    let hurst = 0.7;
    let mut results = Vec::new();

    println!("Decomposition cost by grid size (the O(N³) step):");
    results.extend(bench_decomposition(hurst, &[50, 100, 200, 400]));

    println!("\nSampling throughput against a shared decomposition:");
    results.extend(bench_sampling(hurst, 200, 20, 100_000));

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_{}.csv", timestamp);
    write_results_to_csv(&results, &system_info, &filename);
    println!("\nResults written to {}", filename);
}
