// src/pricing/diagnostics.rs
use std::fmt;

/// Intermediate Black-Scholes quantities for one contract, for debugging
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PricingDiagnostics {
    pub d1: f64,
    pub d2: f64,
    /// Φ(d₁)
    pub n_d1: f64,
    /// Φ(d₂)
    pub n_d2: f64,
    pub call_intrinsic: f64,
    pub put_intrinsic: f64,
    pub call_price: f64,
    pub put_price: f64,
}

impl fmt::Display for PricingDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "d1: {}", self.d1)?;
        writeln!(f, "d2: {}", self.d2)?;
        writeln!(f, "N(d1): {}", self.n_d1)?;
        writeln!(f, "N(d2): {}", self.n_d2)?;
        writeln!(f, "Call intrinsic: {}", self.call_intrinsic)?;
        writeln!(f, "Put intrinsic: {}", self.put_intrinsic)?;
        writeln!(f, "Call price: {}", self.call_price)?;
        write!(f, "Put price: {}", self.put_price)
    }
}
