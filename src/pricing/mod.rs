//! Black-Scholes pricing of single contracts

pub mod contract;
pub mod diagnostics;
pub mod pricer;

pub use contract::{ContractTerms, OptionContract, Volatility};
pub use diagnostics::PricingDiagnostics;
pub use pricer::Pricer;
