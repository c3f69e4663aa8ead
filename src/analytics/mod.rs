//! Closed-form analytics

pub mod bs_analytic;
