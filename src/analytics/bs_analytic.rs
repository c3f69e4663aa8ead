// src/analytics/bs_analytic.rs
//! Closed-form Black-Scholes formulas for European options
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model the underlying follows
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//! and a European option is worth its discounted risk-neutral expected payoff.
//! For vanilla calls and puts on a non-dividend-paying underlying this has a
//! closed form in terms of the standard normal CDF Φ(x).
//!
//! All functions take plain fractions and year fractions; unit handling
//! lives in [`crate::units`]. None of them validate their inputs: `t > 0`
//! and `sigma > 0` are required for `d₁`/`d₂` to be defined and are enforced
//! when a contract is constructed.

use crate::math_utils::norm_cdf;

/// Black-Scholes d₁
///
/// # Formula
/// ```text
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// ```
///
/// # Parameters
/// - `s`: Current stock price
/// - `k`: Strike price
/// - `r`: Risk-free rate
/// - `sigma`: Volatility
/// - `t`: Time to expiration in years
pub fn d1(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / (sigma * t.sqrt())
}

/// Black-Scholes d₂
///
/// # Formula
/// ```text
/// d₂ = d₁ - σ√T
/// ```
pub fn d2(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    d1(s, k, r, sigma, t) - sigma * t.sqrt()
}

/// Black-Scholes European call option price
///
/// # Formula
/// ```text
/// C(S,K,r,σ,T) = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// ```
///
/// # Returns
/// Present value of the call option
pub fn bs_call_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let d1 = d1(s, k, r, sigma, t);
    let d2 = d1 - sigma * t.sqrt();
    s * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2)
}

/// Black-Scholes European put option price
///
/// # Formula
/// ```text
/// P(S,K,r,σ,T) = K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)
/// ```
///
/// Together with [`bs_call_price`] this satisfies put-call parity
/// `C - P = S - K*e^(-rT)` identically, since `Φ(x) + Φ(-x) = 1`.
pub fn bs_put_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let d1 = d1(s, k, r, sigma, t);
    let d2 = d1 - sigma * t.sqrt();
    k * (-r * t).exp() * norm_cdf(-d2) - s * norm_cdf(-d1)
}

/// Payoff of a call exercised now: `max(S - K, 0)`
pub fn call_intrinsic(s: f64, k: f64) -> f64 {
    (s - k).max(0.0)
}

/// Payoff of a put exercised now: `max(K - S, 0)`
pub fn put_intrinsic(s: f64, k: f64) -> f64 {
    (k - s).max(0.0)
}
