// src/report.rs
//! Tabular valuation output for a batch
//!
//! [`Quantities`] selects which columns to compute, so a table of intrinsic
//! values can be produced for a batch whose volatility is still unknown.

use crate::error::PricingResult;
use crate::pricing::OptionContract;
use bitflags::bitflags;
use std::fmt;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Quantities: u32 {
        const NONE           = 0;
        const CALL_PRICE     = 1 << 0;
        const PUT_PRICE      = 1 << 1;
        const CALL_INTRINSIC = 1 << 2;
        const PUT_INTRINSIC  = 1 << 3;
        const PRICES     = Self::CALL_PRICE.bits() | Self::PUT_PRICE.bits();
        const INTRINSICS = Self::CALL_INTRINSIC.bits() | Self::PUT_INTRINSIC.bits();
    }
}

impl Quantities {
    /// Column headers of the selected quantities, in display order
    pub fn headers(self) -> Vec<&'static str> {
        let mut headers = Vec::new();
        if self.contains(Quantities::CALL_PRICE) {
            headers.push("BS call price");
        }
        if self.contains(Quantities::PUT_PRICE) {
            headers.push("BS put price");
        }
        if self.contains(Quantities::CALL_INTRINSIC) {
            headers.push("Call intrinsic value");
        }
        if self.contains(Quantities::PUT_INTRINSIC) {
            headers.push("Put intrinsic value");
        }
        headers
    }
}

/// One contract's line in a [`ValuationTable`]; unselected quantities are `None`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuationRow {
    pub spot: f64,
    pub strike: f64,
    pub call_price: Option<f64>,
    pub put_price: Option<f64>,
    pub call_intrinsic: Option<f64>,
    pub put_intrinsic: Option<f64>,
}

impl ValuationRow {
    pub fn evaluate(contract: &OptionContract, quantities: Quantities) -> PricingResult<Self> {
        let call_price = if quantities.contains(Quantities::CALL_PRICE) {
            Some(contract.call_price()?)
        } else {
            None
        };
        let put_price = if quantities.contains(Quantities::PUT_PRICE) {
            Some(contract.put_price()?)
        } else {
            None
        };

        Ok(ValuationRow {
            spot: contract.terms().spot(),
            strike: contract.terms().strike(),
            call_price,
            put_price,
            call_intrinsic: quantities
                .contains(Quantities::CALL_INTRINSIC)
                .then(|| contract.call_intrinsic_value()),
            put_intrinsic: quantities
                .contains(Quantities::PUT_INTRINSIC)
                .then(|| contract.put_intrinsic_value()),
        })
    }

    /// Selected values in the same order as [`Quantities::headers`]
    pub fn values(&self) -> Vec<f64> {
        [
            self.call_price,
            self.put_price,
            self.call_intrinsic,
            self.put_intrinsic,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValuationTable {
    pub quantities: Quantities,
    pub rows: Vec<ValuationRow>,
}

impl fmt::Display for ValuationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>12} {:>12}", "Stock price", "Strike")?;
        for header in self.quantities.headers() {
            write!(f, " {:>22}", header)?;
        }
        writeln!(f)?;
        for row in &self.rows {
            write!(f, "{:>12.2} {:>12.2}", row.spot, row.strike)?;
            for value in row.values() {
                write!(f, " {:>22.6}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
