// src/solvers/implied_vol.rs
//! Implied volatility by inverting the Black-Scholes call price
//!
//! For fixed spot, strike, maturity and rate the call price is strictly
//! increasing in σ, so the relative residual
//! ```text
//! f(σ) = (C(S, K, r, σ, T) - market_price) / market_price
//! ```
//! has at most one root. The solver looks for it with [`brent_with_noise`]
//! inside a fixed volatility bracket, 1% to 200% by default. A market price
//! outside `[C(σ_lo), C(σ_hi)]` is reported as `NoBracket`; there is no
//! extrapolation beyond the bracket.
//!
//! Measuring the residual relative to the quote keeps the stopping rule
//! meaningful for a 1e-9 out-of-the-money call and a 1e6 notional alike.

use super::brent::brent_with_noise;
use crate::error::{validation::*, PricingError, PricingResult};
use crate::math_utils::norm_cdf;
use crate::pricing::ContractTerms;
use tracing::debug;

/// Lower end of the default search bracket (1% volatility)
pub const DEFAULT_LOWER_VOL: f64 = 0.01;
/// Upper end of the default search bracket (200% volatility)
pub const DEFAULT_UPPER_VOL: f64 = 2.0;
/// Tolerance on the price residual, relative to the market price
pub const DEFAULT_TOLERANCE: f64 = 1e-10;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Rounding allowance, in units of `f64::EPSILON`, on the two terms of `C(σ)`
const EVALUATION_NOISE_ULPS: f64 = 64.0;

/// Configuration for the implied volatility search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Lowest volatility considered, as a fraction
    pub lower_bound: f64,
    /// Highest volatility considered, as a fraction
    pub upper_bound: f64,
    /// Convergence is `|C(σ) - market_price| <= tolerance * market_price`
    pub tolerance: f64,
    /// Function evaluations allowed beyond the bracket endpoints
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            lower_bound: DEFAULT_LOWER_VOL,
            upper_bound: DEFAULT_UPPER_VOL,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_bracket(mut self, lower_bound: f64, upper_bound: f64) -> Self {
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Validate the solver configuration
    pub fn validate(&self) -> PricingResult<()> {
        if !(self.lower_bound.is_finite() && self.lower_bound > 0.0) {
            return Err(PricingError::InvalidConfiguration {
                field: "lower_bound".to_string(),
                reason: format!("must be a positive volatility, got {}", self.lower_bound),
            });
        }
        if !(self.upper_bound.is_finite() && self.upper_bound > self.lower_bound) {
            return Err(PricingError::InvalidConfiguration {
                field: "upper_bound".to_string(),
                reason: format!(
                    "must be finite and above lower_bound ({}), got {}",
                    self.lower_bound, self.upper_bound
                ),
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(PricingError::InvalidConfiguration {
                field: "tolerance".to_string(),
                reason: format!("must be positive, got {}", self.tolerance),
            });
        }
        if self.max_iterations == 0 {
            return Err(PricingError::InvalidConfiguration {
                field: "max_iterations".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Outcome of a successful implied volatility search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpliedVolResult {
    /// Annualized volatility as a fraction
    pub volatility: f64,
    pub iterations: usize,
}

/// Solve `C(σ) = market_price` for σ over the configured bracket
///
/// # Errors
///
/// - `InvalidConfiguration` for an unusable `config`
/// - `DomainError` if `market_price` is not a positive finite number
/// - `NoBracket` if the market price is not attainable inside the bracket
/// - `ConvergenceFailure` if the iteration budget runs out, or the bracket
///   collapses with the residual still above rounding noise
pub fn solve_implied_vol(
    terms: &ContractTerms,
    market_price: f64,
    config: &SolverConfig,
) -> PricingResult<ImpliedVolResult> {
    config.validate()?;
    validate_positive("market_price", market_price)?;

    let root = brent_with_noise(
        |sigma| (terms.call_price_at(sigma) - market_price) / market_price,
        |sigma| evaluation_noise(terms, sigma) / market_price,
        config.lower_bound,
        config.upper_bound,
        config.tolerance,
        config.max_iterations,
    )?;

    debug!(
        spot = terms.spot(),
        strike = terms.strike(),
        market_price,
        volatility = root.x,
        iterations = root.iterations,
        "implied volatility converged"
    );

    Ok(ImpliedVolResult {
        volatility: root.x,
        iterations: root.iterations,
    })
}

/// Rounding error bound on `C(σ) = S·Φ(d1) - K·e^(-rT)·Φ(d2)`
///
/// Out of the money both terms dwarf their difference, so the bound follows
/// the terms rather than the price.
fn evaluation_noise(terms: &ContractTerms, sigma: f64) -> f64 {
    let magnitude = terms.spot() * norm_cdf(terms.d1(sigma))
        + terms.strike() * terms.discount_factor() * norm_cdf(terms.d2(sigma));
    EVALUATION_NOISE_ULPS * f64::EPSILON * magnitude
}

/// Implied volatility as a fraction, see [`solve_implied_vol`]
pub fn implied_volatility(
    terms: &ContractTerms,
    market_price: f64,
    config: &SolverConfig,
) -> PricingResult<f64> {
    solve_implied_vol(terms, market_price, config).map(|result| result.volatility)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Days, Percent, Years};

    const TOLERANCE: f64 = 1e-6;

    fn atm_terms() -> ContractTerms {
        ContractTerms::from_years(100.0, 100.0, Years(0.25), 0.05).unwrap()
    }

    #[test]
    fn test_solve_worked_example() {
        let terms = ContractTerms::new(100.0, 90.0, Days(182.5), Percent(4.0)).unwrap();
        let result = solve_implied_vol(&terms, 16.32, &SolverConfig::default()).unwrap();

        assert!((result.volatility - 0.35).abs() < 1e-3);
        assert!((terms.call_price_at(result.volatility) - 16.32).abs() <= DEFAULT_TOLERANCE * 16.32);
        assert!(result.iterations < 20);
    }

    #[test]
    fn test_solve_various_moneyness() {
        let target_vol = 0.25;
        let config = SolverConfig::default();

        for strike in [80.0, 90.0, 100.0, 110.0, 120.0] {
            let terms = ContractTerms::from_years(100.0, strike, Years(0.25), 0.05).unwrap();
            let market_price = terms.call_price_at(target_vol);

            let iv = implied_volatility(&terms, market_price, &config).unwrap();
            assert!(
                (iv - target_vol).abs() < TOLERANCE,
                "Failed for strike {}",
                strike
            );
        }
    }

    #[test]
    fn test_price_below_bracket() {
        let terms = atm_terms();
        let floor = terms.call_price_at(DEFAULT_LOWER_VOL);

        let result = implied_volatility(&terms, floor * 0.5, &SolverConfig::default());
        assert!(matches!(result, Err(PricingError::NoBracket { .. })));
    }

    #[test]
    fn test_price_above_bracket() {
        let terms = atm_terms();
        let ceiling = terms.call_price_at(DEFAULT_UPPER_VOL);

        let result = implied_volatility(&terms, ceiling + 1.0, &SolverConfig::default());
        assert!(matches!(result, Err(PricingError::NoBracket { .. })));
    }

    #[test]
    fn test_wider_bracket_reaches_higher_vol() {
        let terms = atm_terms();
        let market_price = terms.call_price_at(3.0);

        assert!(implied_volatility(&terms, market_price, &SolverConfig::default()).is_err());

        let config = SolverConfig::new().with_bracket(0.01, 5.0);
        let iv = implied_volatility(&terms, market_price, &config).unwrap();
        assert!((iv - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_iteration_cap_is_enforced() {
        let terms = atm_terms();
        let market_price = terms.call_price_at(0.4321);
        let config = SolverConfig::new().with_max_iterations(1);

        let result = solve_implied_vol(&terms, market_price, &config);
        assert!(matches!(
            result,
            Err(PricingError::ConvergenceFailure { iterations: 1, .. })
        ));
    }

    #[test]
    fn test_unreachable_tolerance_settles_at_rounding_noise() {
        let terms = ContractTerms::new(100.0, 90.0, Days(182.5), Percent(4.0)).unwrap();
        let config = SolverConfig::new().with_tolerance(1e-18);

        let result = solve_implied_vol(&terms, 16.32, &config).unwrap();
        let loose = solve_implied_vol(&terms, 16.32, &SolverConfig::default()).unwrap();

        assert!((result.volatility - loose.volatility).abs() < 1e-9);
        assert!(result.iterations < config.max_iterations);
    }

    #[test]
    fn test_evaluation_noise_tracks_cancellation() {
        // Deep out of the money, both terms are ~100x the price
        let terms = ContractTerms::from_years(100.0, 130.0, Years(0.05), 0.0).unwrap();
        let price = terms.call_price_at(0.2);
        let noise = evaluation_noise(&terms, 0.2);

        assert!(noise > EVALUATION_NOISE_ULPS * f64::EPSILON * price * 10.0);
        assert!(noise < price * 1e-10);
    }

    #[test]
    fn test_invalid_market_price() {
        let terms = atm_terms();
        let config = SolverConfig::default();

        for price in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                implied_volatility(&terms, price, &config),
                Err(PricingError::DomainError { .. })
            ));
        }
    }

    #[test]
    fn test_solver_config_builder() {
        let config = SolverConfig::new()
            .with_max_iterations(50)
            .with_tolerance(1e-6)
            .with_bracket(0.05, 3.0);

        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.tolerance, 1e-6);
        assert_eq!(config.lower_bound, 0.05);
        assert_eq!(config.upper_bound, 3.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_solver_config_validation() {
        let bad = [
            SolverConfig::new().with_bracket(0.0, 2.0),
            SolverConfig::new().with_bracket(1.0, 0.5),
            SolverConfig::new().with_tolerance(0.0),
            SolverConfig::new().with_max_iterations(0),
        ];
        for config in bad {
            assert!(matches!(
                config.validate(),
                Err(PricingError::InvalidConfiguration { .. })
            ));
        }
    }
}
