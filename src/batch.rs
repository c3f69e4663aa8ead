// src/batch.rs
//! Batches of options sharing maturity, rate and volatility
//!
//! A batch is built once from parallel spot/strike sequences and queried any
//! number of times. Each query returns one value per contract, in input order.
//!
//! Contracts never share state, so every query also has a rayon-parallel
//! variant (`par_*`) that returns exactly the same values.

use crate::error::{validation::validate_same_length, PricingResult};
use crate::pricing::{OptionContract, PricingDiagnostics};
use crate::report::{Quantities, ValuationRow, ValuationTable};
use crate::solvers::SolverConfig;
use crate::units::{Days, Percent};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Spot-sensitivity data handed to a plotting or reporting layer
///
/// The three vectors always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct SensitivitySeries {
    pub spots: Vec<f64>,
    pub call_prices: Vec<f64>,
    pub call_intrinsic_values: Vec<f64>,
}

impl SensitivitySeries {
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }
}

/// Ordered, immutable sequence of option contracts
#[derive(Debug, Clone, PartialEq)]
pub struct OptionBatch {
    contracts: Vec<OptionContract>,
}

impl OptionBatch {
    /// Build one contract per (spot, strike) pair
    ///
    /// # Errors
    ///
    /// - `LengthMismatch` if `spots` and `strikes` differ in length
    /// - `DomainError` if any contract is invalid; no partial batch is returned
    ///
    /// # Example
    /// ```
    /// use bs_implied::batch::OptionBatch;
    /// use bs_implied::units::{Days, Percent};
    ///
    /// let batch = OptionBatch::new(
    ///     &[90.0, 100.0, 110.0],
    ///     &[100.0, 100.0, 100.0],
    ///     Days(91.25),
    ///     Percent(5.0),
    ///     Some(Percent(20.0)),
    /// )
    /// .expect("valid batch");
    /// assert_eq!(batch.call_prices().unwrap().len(), 3);
    /// ```
    pub fn new(
        spots: &[f64],
        strikes: &[f64],
        maturity: Days,
        rate: Percent,
        volatility: Option<Percent>,
    ) -> PricingResult<Self> {
        validate_same_length("strike prices", spots.len(), strikes.len())?;

        let contracts = spots
            .iter()
            .zip(strikes)
            .map(|(&spot, &strike)| OptionContract::new(spot, strike, maturity, rate, volatility))
            .collect::<PricingResult<Vec<_>>>()?;

        debug!(
            contracts = contracts.len(),
            maturity_days = maturity.0,
            rate_pct = rate.0,
            "constructed option batch"
        );

        Ok(OptionBatch { contracts })
    }

    pub fn contracts(&self) -> &[OptionContract] {
        &self.contracts
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn spots(&self) -> Vec<f64> {
        self.contracts.iter().map(|c| c.terms().spot()).collect()
    }

    pub fn strikes(&self) -> Vec<f64> {
        self.contracts.iter().map(|c| c.terms().strike()).collect()
    }

    /// Black-Scholes call prices; `MissingParameter` if volatility is unknown
    pub fn call_prices(&self) -> PricingResult<Vec<f64>> {
        self.contracts.iter().map(OptionContract::call_price).collect()
    }

    /// Black-Scholes put prices; `MissingParameter` if volatility is unknown
    pub fn put_prices(&self) -> PricingResult<Vec<f64>> {
        self.contracts.iter().map(OptionContract::put_price).collect()
    }

    pub fn call_intrinsic_values(&self) -> Vec<f64> {
        self.contracts
            .iter()
            .map(OptionContract::call_intrinsic_value)
            .collect()
    }

    pub fn put_intrinsic_values(&self) -> Vec<f64> {
        self.contracts
            .iter()
            .map(OptionContract::put_intrinsic_value)
            .collect()
    }

    pub fn par_call_prices(&self) -> PricingResult<Vec<f64>> {
        self.contracts.par_iter().map(OptionContract::call_price).collect()
    }

    pub fn par_put_prices(&self) -> PricingResult<Vec<f64>> {
        self.contracts.par_iter().map(OptionContract::put_price).collect()
    }

    /// Implied volatility (fraction) of each contract from its market price
    ///
    /// The outer result fails only on a length mismatch. Each element
    /// succeeds or fails on its own, so one unattainable price does not
    /// abort the rest of the batch.
    pub fn implied_vols(
        &self,
        market_prices: &[f64],
        config: &SolverConfig,
    ) -> PricingResult<Vec<PricingResult<f64>>> {
        validate_same_length("market prices", self.contracts.len(), market_prices.len())?;

        Ok(self
            .contracts
            .iter()
            .zip(market_prices)
            .enumerate()
            .map(|(index, (contract, &price))| invert_one(index, contract, price, config))
            .collect())
    }

    /// Parallel [`OptionBatch::implied_vols`], identical results in input order
    pub fn par_implied_vols(
        &self,
        market_prices: &[f64],
        config: &SolverConfig,
    ) -> PricingResult<Vec<PricingResult<f64>>> {
        validate_same_length("market prices", self.contracts.len(), market_prices.len())?;

        Ok(self
            .contracts
            .par_iter()
            .zip(market_prices.par_iter())
            .enumerate()
            .map(|(index, (contract, &price))| invert_one(index, contract, price, config))
            .collect())
    }

    /// Diagnostics record for each contract, computed on demand
    pub fn diagnostics(&self) -> PricingResult<Vec<PricingDiagnostics>> {
        self.contracts
            .iter()
            .map(OptionContract::diagnostics)
            .collect()
    }

    /// Spots, model call prices and call intrinsic values, aligned by index
    pub fn sensitivity_series(&self) -> PricingResult<SensitivitySeries> {
        Ok(SensitivitySeries {
            spots: self.spots(),
            call_prices: self.call_prices()?,
            call_intrinsic_values: self.call_intrinsic_values(),
        })
    }

    /// Per-contract table with the selected quantities filled in
    pub fn valuation_table(&self, quantities: Quantities) -> PricingResult<ValuationTable> {
        let rows = self
            .contracts
            .iter()
            .map(|contract| ValuationRow::evaluate(contract, quantities))
            .collect::<PricingResult<Vec<_>>>()?;

        Ok(ValuationTable { quantities, rows })
    }
}

fn invert_one(
    index: usize,
    contract: &OptionContract,
    market_price: f64,
    config: &SolverConfig,
) -> PricingResult<f64> {
    let result = contract.implied_volatility(market_price, config);
    if let Err(ref e) = result {
        warn!(index, market_price, error = %e, "implied volatility failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricingError;

    fn sample_batch(volatility: Option<Percent>) -> OptionBatch {
        OptionBatch::new(
            &[80.0, 90.0, 100.0, 110.0],
            &[90.0, 90.0, 90.0, 90.0],
            Days(182.5),
            Percent(4.0),
            volatility,
        )
        .unwrap()
    }

    #[test]
    fn test_length_mismatch() {
        let result = OptionBatch::new(
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            &[1.0, 2.0, 3.0, 4.0],
            Days(30.0),
            Percent(1.0),
            None,
        );
        assert!(matches!(
            result,
            Err(PricingError::LengthMismatch {
                expected: 5,
                actual: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_element_aborts_construction() {
        let result = OptionBatch::new(
            &[100.0, -5.0],
            &[90.0, 90.0],
            Days(30.0),
            Percent(1.0),
            None,
        );
        assert!(matches!(result, Err(PricingError::DomainError { .. })));
    }

    #[test]
    fn test_queries_preserve_input_order() {
        let batch = sample_batch(Some(Percent(35.0)));
        assert_eq!(batch.call_intrinsic_values(), vec![0.0, 0.0, 10.0, 20.0]);
        assert_eq!(batch.put_intrinsic_values(), vec![10.0, 0.0, 0.0, 0.0]);

        let calls = batch.call_prices().unwrap();
        assert_eq!(calls.len(), 4);
        assert!(calls.windows(2).all(|w| w[0] < w[1]));
        assert!((calls[2] - 16.315446694222).abs() < 1e-9);
    }

    #[test]
    fn test_prices_need_volatility() {
        let batch = sample_batch(None);
        assert!(matches!(
            batch.call_prices(),
            Err(PricingError::MissingParameter { .. })
        ));
        assert!(batch.put_prices().is_err());
        assert!(batch.sensitivity_series().is_err());
        assert_eq!(batch.call_intrinsic_values().len(), 4);
    }

    #[test]
    fn test_implied_vols_length_mismatch() {
        let batch = sample_batch(None);
        let result = batch.implied_vols(&[1.0, 2.0], &SolverConfig::default());
        assert!(matches!(result, Err(PricingError::LengthMismatch { .. })));
    }

    #[test]
    fn test_empty_batch() {
        let batch = OptionBatch::new(&[], &[], Days(30.0), Percent(1.0), Some(Percent(20.0))).unwrap();
        assert!(batch.is_empty());
        assert!(batch.call_prices().unwrap().is_empty());
        assert!(batch.sensitivity_series().unwrap().is_empty());
    }

    #[test]
    fn test_contracts_share_maturity_rate_and_volatility() {
        let batch = sample_batch(Some(Percent(35.0)));
        let first = batch.contracts()[0];

        for contract in batch.contracts() {
            assert_eq!(contract.terms().maturity(), first.terms().maturity());
            assert_eq!(contract.terms().rate(), first.terms().rate());
            assert_eq!(contract.volatility(), first.volatility());
        }
    }
}
