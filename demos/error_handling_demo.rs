// demos/error_handling_demo.rs
use fbm_kl::error::KlError;
use fbm_kl::kl::engine::{simulate_fbm, KlConfig};
use fbm_kl::process::{fbm_covariance, FbmKernel, Grid};

fn main() {
    println!("Error Handling Demo for fbm-kl");
    println!("==============================\n");

    // Test 1: Hurst exponent outside (0, 1)
    println!("1. Testing invalid Hurst exponent...");

    match FbmKernel::new(1.0) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Negative time coordinate
    println!("\n2. Testing negative time coordinate...");

    match fbm_covariance(0.5, -0.5, 1.0) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 3: Degenerate grid with coincident points
    println!("\n3. Testing degenerate grid...");

    match Grid::from_points(vec![0.0, 0.25, 0.25, 1.0]) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 4: Truncation level above the grid size
    println!("\n4. Testing invalid truncation level...");

    let invalid_truncation = KlConfig {
        n_points: 50,
        truncation: 51,
        ..Default::default()
    };

    match simulate_fbm(&invalid_truncation) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 5: Zero paths requested
    println!("\n5. Testing zero paths...");

    let zero_paths = KlConfig {
        paths: 0,
        ..Default::default()
    };

    match simulate_fbm(&zero_paths) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 6: Valid configuration should work
    println!("\n6. Testing valid configuration...");

    let valid = KlConfig {
        hurst: 0.7,
        n_points: 50,
        horizon: 1.0,
        truncation: 10,
        paths: 2,
        ..Default::default()
    };

    match simulate_fbm(&valid) {
        Ok(sim) => println!(
            "   ✓ Success: {} paths of length {}, truncation error = {:.3e}",
            sim.paths.len(),
            sim.grid.len(),
            sim.truncation_error
        ),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // Test 7: Error type matching
    println!("\n7. Testing error type matching...");

    match FbmKernel::new(-0.3) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(KlError::InvalidParameter {
            parameter,
            value,
            constraint,
        }) => {
            println!(
                "   ✓ Caught InvalidParameter: {} = {} ({})",
                parameter, value, constraint
            );
        }
        Err(other) => println!("   Unexpected error type: {}", other),
    }

    println!("\n✓ Error handling demo complete!");
    println!("All error cases were properly caught and handled.");
}
