//! # bs-implied: Black-Scholes Pricing and Implied Volatility
//!
//! A Rust library for valuing European vanilla options under the
//! Black-Scholes model and recovering implied volatility from market prices.
//!
//! ## Key Features
//!
//! - **Closed-form pricing**: call/put prices and intrinsic values
//! - **Implied volatility**: Brent's method over a fixed 1%–200% bracket
//! - **Explicit units**: `Percent`, `Days` and `Years` at the input boundary
//! - **Batches**: parallel spot/strike sequences, with rayon variants
//! - **Typed errors**: every failure mode is a `PricingError` variant
//!
//! ## Quick Start
//!
//! ```rust
//! use bs_implied::pricing::OptionContract;
//! use bs_implied::solvers::SolverConfig;
//! use bs_implied::units::{Days, Percent};
//!
//! // Spot 100, strike 90, half a year, 4% rate, 35% volatility
//! let option = OptionContract::new(100.0, 90.0, Days(182.5), Percent(4.0), Some(Percent(35.0)))
//!     .expect("Valid contract");
//! let price = option.call_price().expect("Volatility is set");
//! println!("Call price: {:.2}", price);
//!
//! // Back out the volatility from a quoted price
//! let iv = option
//!     .implied_volatility(16.32, &SolverConfig::default())
//!     .expect("Price is inside the bracket");
//! assert!((iv - 0.35).abs() < 1e-3);
//! ```
//!
//! ## Mathematical Foundation
//!
//! With `d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)` and `d₂ = d₁ - σ√T`, the
//! European call is worth `S·Φ(d₁) - K·e^(-rT)·Φ(d₂)` and the put
//! `K·e^(-rT)·Φ(-d₂) - S·Φ(-d₁)`. The call price is strictly increasing in σ,
//! which is what makes the implied volatility unique inside its bracket.

// Module declarations
pub mod error;
pub mod units;
pub mod math_utils;
pub mod analytics;
pub mod pricing;
pub mod solvers;
pub mod batch;
pub mod report;
pub mod output;

// Re-export commonly used types for convenience
pub use batch::{OptionBatch, SensitivitySeries};
pub use error::{PricingError, PricingResult};
pub use pricing::{ContractTerms, OptionContract, Pricer, PricingDiagnostics, Volatility};
pub use report::Quantities;
pub use solvers::SolverConfig;
pub use units::{Days, Percent, Years};
