// demos/sensitivity.rs
use bs_implied::batch::OptionBatch;
use bs_implied::output;
use bs_implied::report::Quantities;
use bs_implied::units::{Days, Percent};
use tracing::Level;

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    // Call price vs. stock price for a fixed strike
    let stock_prices: Vec<f64> = (65..=140).step_by(5).map(|s| s as f64).collect();
    let exercise_prices = vec![90.0; stock_prices.len()];

    let options = OptionBatch::new(
        &stock_prices,
        &exercise_prices,
        Days(182.5),
        Percent(4.0),
        Some(Percent(35.0)),
    )
    .expect("Valid batch");

    let table = options
        .valuation_table(Quantities::CALL_PRICE | Quantities::CALL_INTRINSIC)
        .expect("Volatility is set");
    println!("{}", table);

    let series = options.sensitivity_series().expect("Volatility is set");
    let filename = "call_price_sensitivity.csv";
    match output::write_sensitivity_to_csv(filename, &series) {
        Ok(()) => println!("Sensitivity series ({} points) written to {}", series.len(), filename),
        Err(e) => eprintln!("Could not write {}: {}", filename, e),
    }
}
