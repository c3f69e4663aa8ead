// demos/implied_vol.rs
use bs_implied::pricing::OptionContract;
use bs_implied::solvers::{solve_implied_vol, SolverConfig};
use bs_implied::units::{Days, Percent};
use tracing::Level;

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let option = OptionContract::new(100.0, 90.0, Days(182.5), Percent(4.0), Some(Percent(35.0)))
        .expect("Valid contract");

    let diagnostics = option.diagnostics().expect("Volatility is set");
    println!("{}", diagnostics);

    let market_price = 16.32;
    let config = SolverConfig::default();
    match solve_implied_vol(option.terms(), market_price, &config) {
        Ok(result) => println!(
            "Implied volatility (%): {:.2} ({} iterations)",
            Percent::from_fraction(result.volatility).0,
            result.iterations
        ),
        Err(e) => eprintln!("Implied volatility failed: {}", e),
    }
}
