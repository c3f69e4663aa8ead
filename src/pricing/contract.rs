// src/pricing/contract.rs
//! Option contracts and their validated terms
//!
//! A contract is split in two:
//! - [`ContractTerms`]: spot, strike, maturity and rate. Always complete.
//! - [`Volatility`]: either known or still to be solved for.
//!
//! Pricing goes through [`Pricer`], which only exists for a known volatility,
//! while the implied volatility solver only ever sees the terms.

use super::diagnostics::PricingDiagnostics;
use super::pricer::Pricer;
use crate::analytics::bs_analytic;
use crate::error::{validation::*, PricingError, PricingResult};
use crate::solvers::implied_vol::{implied_volatility, SolverConfig};
use crate::units::{Days, Percent, Years};

/// Everything that defines a European option except its volatility
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContractTerms {
    spot: f64,
    strike: f64,
    maturity: Years,
    rate: f64,
}

impl ContractTerms {
    /// Build terms from analyst units: days to maturity and a percentage rate
    pub fn new(spot: f64, strike: f64, maturity: Days, rate: Percent) -> PricingResult<Self> {
        Self::from_years(spot, strike, maturity.to_years(), rate.to_fraction())
    }

    /// Build terms from a year fraction and a rate already expressed as a fraction
    pub fn from_years(spot: f64, strike: f64, maturity: Years, rate: f64) -> PricingResult<Self> {
        validate_positive("spot", spot)?;
        validate_positive("strike", strike)?;
        validate_positive("maturity", maturity.value())?;
        validate_finite("rate", rate)?;

        Ok(ContractTerms {
            spot,
            strike,
            maturity,
            rate,
        })
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn maturity(&self) -> Years {
        self.maturity
    }

    /// Annualized risk-free rate as a fraction
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// `e^(-rT)`
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity.value()).exp()
    }

    pub fn d1(&self, sigma: f64) -> f64 {
        bs_analytic::d1(self.spot, self.strike, self.rate, sigma, self.maturity.value())
    }

    pub fn d2(&self, sigma: f64) -> f64 {
        bs_analytic::d2(self.spot, self.strike, self.rate, sigma, self.maturity.value())
    }

    /// Call price as a function of volatility; the scalar function the solver inverts
    pub fn call_price_at(&self, sigma: f64) -> f64 {
        bs_analytic::bs_call_price(self.spot, self.strike, self.rate, sigma, self.maturity.value())
    }

    pub fn put_price_at(&self, sigma: f64) -> f64 {
        bs_analytic::bs_put_price(self.spot, self.strike, self.rate, sigma, self.maturity.value())
    }

    pub fn call_intrinsic_value(&self) -> f64 {
        bs_analytic::call_intrinsic(self.spot, self.strike)
    }

    pub fn put_intrinsic_value(&self) -> f64 {
        bs_analytic::put_intrinsic(self.spot, self.strike)
    }
}

/// Volatility of a contract, annualized, as a fraction
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Volatility {
    Known(f64),
    Unknown,
}

impl Volatility {
    /// Convert an optional percentage input, rejecting non-positive values
    pub fn from_percent(volatility: Option<Percent>) -> PricingResult<Self> {
        match volatility {
            Some(pct) => {
                let sigma = pct.to_fraction();
                validate_positive("volatility", sigma)?;
                Ok(Volatility::Known(sigma))
            }
            None => Ok(Volatility::Unknown),
        }
    }

    pub fn known(self) -> Option<f64> {
        match self {
            Volatility::Known(sigma) => Some(sigma),
            Volatility::Unknown => None,
        }
    }
}

/// A single European option, immutable once constructed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OptionContract {
    terms: ContractTerms,
    volatility: Volatility,
}

impl OptionContract {
    /// # Example
    /// ```
    /// use bs_implied::pricing::OptionContract;
    /// use bs_implied::units::{Days, Percent};
    ///
    /// let option = OptionContract::new(100.0, 90.0, Days(182.5), Percent(4.0), Some(Percent(35.0)))
    ///     .expect("valid contract");
    /// assert!((option.call_price().unwrap() - 16.32).abs() < 0.01);
    /// ```
    pub fn new(
        spot: f64,
        strike: f64,
        maturity: Days,
        rate: Percent,
        volatility: Option<Percent>,
    ) -> PricingResult<Self> {
        let terms = ContractTerms::new(spot, strike, maturity, rate)?;
        let volatility = Volatility::from_percent(volatility)?;
        Ok(OptionContract { terms, volatility })
    }

    pub fn from_terms(terms: ContractTerms, volatility: Volatility) -> PricingResult<Self> {
        if let Volatility::Known(sigma) = volatility {
            validate_positive("volatility", sigma)?;
        }
        Ok(OptionContract { terms, volatility })
    }

    pub fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    pub fn volatility(&self) -> Volatility {
        self.volatility
    }

    /// Pricer for this contract, available only when the volatility is known
    pub fn pricer(&self) -> PricingResult<Pricer> {
        match self.volatility {
            Volatility::Known(sigma) => Pricer::new(self.terms, sigma),
            Volatility::Unknown => Err(PricingError::MissingParameter {
                parameter: "volatility".to_string(),
            }),
        }
    }

    pub fn call_price(&self) -> PricingResult<f64> {
        Ok(self.pricer()?.call_price())
    }

    pub fn put_price(&self) -> PricingResult<f64> {
        Ok(self.pricer()?.put_price())
    }

    pub fn call_intrinsic_value(&self) -> f64 {
        self.terms.call_intrinsic_value()
    }

    pub fn put_intrinsic_value(&self) -> f64 {
        self.terms.put_intrinsic_value()
    }

    pub fn diagnostics(&self) -> PricingResult<PricingDiagnostics> {
        Ok(self.pricer()?.diagnostics())
    }

    /// Volatility (fraction) at which the model call price matches `market_price`
    ///
    /// Any stored volatility is ignored; only the terms are inverted.
    pub fn implied_volatility(&self, market_price: f64, config: &SolverConfig) -> PricingResult<f64> {
        implied_volatility(&self.terms, market_price, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worked_example(volatility: Option<Percent>) -> OptionContract {
        OptionContract::new(100.0, 90.0, Days(182.5), Percent(4.0), volatility).unwrap()
    }

    #[test]
    fn test_unit_conversion_at_construction() {
        let option = worked_example(Some(Percent(35.0)));
        assert_eq!(option.terms().maturity(), Years(0.5));
        assert!((option.terms().rate() - 0.04).abs() < 1e-15);
        assert_eq!(option.volatility(), Volatility::Known(0.35));
    }

    #[test]
    fn test_missing_volatility() {
        let option = worked_example(None);
        assert_eq!(option.volatility(), Volatility::Unknown);
        assert!(matches!(
            option.call_price(),
            Err(PricingError::MissingParameter { .. })
        ));
        assert!(matches!(
            option.put_price(),
            Err(PricingError::MissingParameter { .. })
        ));
        assert!(option.diagnostics().is_err());
        assert_eq!(option.call_intrinsic_value(), 10.0);
        assert_eq!(option.put_intrinsic_value(), 0.0);
    }

    #[test]
    fn test_domain_errors() {
        let cases = [
            OptionContract::new(100.0, 90.0, Days(0.0), Percent(4.0), None),
            OptionContract::new(100.0, 90.0, Days(-10.0), Percent(4.0), None),
            OptionContract::new(100.0, 90.0, Days(30.0), Percent(4.0), Some(Percent(0.0))),
            OptionContract::new(100.0, 90.0, Days(30.0), Percent(4.0), Some(Percent(-5.0))),
            OptionContract::new(0.0, 90.0, Days(30.0), Percent(4.0), None),
            OptionContract::new(100.0, -1.0, Days(30.0), Percent(4.0), None),
            OptionContract::new(100.0, 90.0, Days(30.0), Percent(f64::NAN), None),
        ];
        for case in cases {
            assert!(
                matches!(case, Err(PricingError::DomainError { .. })),
                "expected domain error, got {:?}",
                case
            );
        }
    }

    #[test]
    fn test_from_terms_rejects_bad_volatility() {
        let terms = ContractTerms::from_years(100.0, 100.0, Years(1.0), 0.05).unwrap();
        assert!(OptionContract::from_terms(terms, Volatility::Known(0.0)).is_err());
        assert!(OptionContract::from_terms(terms, Volatility::Unknown).is_ok());
    }

    #[test]
    fn test_negative_rate_is_allowed() {
        let terms = ContractTerms::new(100.0, 100.0, Days(365.0), Percent(-0.5));
        assert!(terms.is_ok());
    }
}
