// src/pricing/pricer.rs
use super::contract::ContractTerms;
use super::diagnostics::PricingDiagnostics;
use crate::error::{validation::validate_positive, PricingResult};
use crate::math_utils::norm_cdf;
use tracing::debug;

/// Black-Scholes pricer for contract terms with a definite volatility
///
/// Every query is a pure function of the terms and `sigma`; pricing cannot
/// fail once a `Pricer` exists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pricer {
    terms: ContractTerms,
    sigma: f64,
}

impl Pricer {
    /// `sigma` is an annualized fraction (0.35 for 35%)
    pub fn new(terms: ContractTerms, sigma: f64) -> PricingResult<Self> {
        validate_positive("volatility", sigma)?;
        Ok(Pricer { terms, sigma })
    }

    pub fn terms(&self) -> &ContractTerms {
        &self.terms
    }

    pub fn volatility(&self) -> f64 {
        self.sigma
    }

    pub fn d1(&self) -> f64 {
        self.terms.d1(self.sigma)
    }

    pub fn d2(&self) -> f64 {
        self.terms.d2(self.sigma)
    }

    pub fn call_price(&self) -> f64 {
        self.terms.call_price_at(self.sigma)
    }

    pub fn put_price(&self) -> f64 {
        self.terms.put_price_at(self.sigma)
    }

    pub fn call_intrinsic_value(&self) -> f64 {
        self.terms.call_intrinsic_value()
    }

    pub fn put_intrinsic_value(&self) -> f64 {
        self.terms.put_intrinsic_value()
    }

    /// Snapshot of the intermediate quantities behind both prices
    pub fn diagnostics(&self) -> PricingDiagnostics {
        let d1 = self.d1();
        let d2 = self.d2();
        let record = PricingDiagnostics {
            d1,
            d2,
            n_d1: norm_cdf(d1),
            n_d2: norm_cdf(d2),
            call_intrinsic: self.call_intrinsic_value(),
            put_intrinsic: self.put_intrinsic_value(),
            call_price: self.call_price(),
            put_price: self.put_price(),
        };
        debug!(
            spot = self.terms.spot(),
            strike = self.terms.strike(),
            sigma = self.sigma,
            d1 = record.d1,
            d2 = record.d2,
            call_price = record.call_price,
            put_price = record.put_price,
            "computed pricing diagnostics"
        );
        record
    }
}
