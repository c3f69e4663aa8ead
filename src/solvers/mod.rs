//! Root finding and implied volatility

pub mod brent;
pub mod implied_vol;

pub use implied_vol::{implied_volatility, solve_implied_vol, ImpliedVolResult, SolverConfig};
