// demos/error_handling_demo.rs
use bs_implied::batch::OptionBatch;
use bs_implied::error::PricingError;
use bs_implied::pricing::OptionContract;
use bs_implied::solvers::SolverConfig;
use bs_implied::units::{Days, Percent};

fn main() {
    println!("Error Handling Demo for bs-implied");
    println!("==================================\n");

    // Test 1: Mismatched batch inputs
    println!("1. Testing mismatched spot/strike lengths...");

    match OptionBatch::new(&[95.0, 100.0, 105.0], &[100.0, 100.0], Days(30.0), Percent(4.0), None) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Pricing without a volatility
    println!("\n2. Testing price query without volatility...");

    let unknown = OptionContract::new(100.0, 90.0, Days(182.5), Percent(4.0), None)
        .expect("Valid contract");
    match unknown.call_price() {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 3: Degenerate maturity and volatility
    println!("\n3. Testing zero maturity and negative volatility...");

    match OptionContract::new(100.0, 90.0, Days(0.0), Percent(4.0), None) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }
    match OptionContract::new(100.0, 90.0, Days(30.0), Percent(4.0), Some(Percent(-10.0))) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 4: Market price outside the volatility bracket
    println!("\n4. Testing unattainable market price...");

    match unknown.implied_volatility(5.0, &SolverConfig::default()) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 5: Iteration budget too small
    println!("\n5. Testing an exhausted iteration budget...");

    let tight = SolverConfig::new().with_max_iterations(2).with_tolerance(1e-14);
    match unknown.implied_volatility(16.32, &tight) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 6: Invalid solver configuration
    println!("\n6. Testing invalid solver configuration...");

    let inverted = SolverConfig::new().with_bracket(2.0, 0.01);
    match unknown.implied_volatility(16.32, &inverted) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 7: Per-element failures inside a batch
    println!("\n7. Testing per-element failures in a batch...");

    let batch = OptionBatch::new(&[100.0, 100.0], &[90.0, 90.0], Days(182.5), Percent(4.0), None)
        .expect("Valid batch");
    let results = batch
        .implied_vols(&[16.32, 500.0], &SolverConfig::default())
        .expect("Lengths match");
    for (i, result) in results.iter().enumerate() {
        match result {
            Ok(vol) => println!("   ✓ Element {}: implied volatility {:.4}", i, vol),
            Err(PricingError::NoBracket { f_lower, f_upper, .. }) => {
                println!("   ✓ Element {}: NoBracket (f(lo) = {:.4}, f(hi) = {:.4})", i, f_lower, f_upper)
            }
            Err(other) => println!("   Unexpected error type: {}", other),
        }
    }

    println!("\n✓ Error handling demo complete!");
    println!("All error cases were properly caught and handled.");
}
