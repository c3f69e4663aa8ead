//! Unit types for the inputs analysts type in
//!
//! Rates and volatilities are quoted in percent and maturities in calendar
//! days, while the Black-Scholes formulas want fractions and years. The
//! conversions happen exactly once, at contract construction, through these
//! types:
//!
//! ```text
//! Percent(4.0)   -> 0.04
//! Days(182.5)    -> Years(0.5)
//! ```
//!
//! The day-count basis is fixed at 365 days per year.

use chrono::NaiveDate;

/// Calendar days per year used for every maturity conversion
pub const DAYS_PER_YEAR: f64 = 365.0;

/// A percentage quantity, e.g. `Percent(35.0)` for 35% volatility
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percent(pub f64);

impl Percent {
    pub fn to_fraction(self) -> f64 {
        self.0 / 100.0
    }

    pub fn from_fraction(fraction: f64) -> Self {
        Percent(fraction * 100.0)
    }
}

/// A calendar-day count to maturity
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Days(pub f64);

impl Days {
    /// Calendar days from `valuation` to `expiry`; negative if expiry is earlier
    pub fn between(valuation: NaiveDate, expiry: NaiveDate) -> Self {
        Days(expiry.signed_duration_since(valuation).num_days() as f64)
    }

    pub fn to_years(self) -> Years {
        Years(self.0 / DAYS_PER_YEAR)
    }
}

/// Time to maturity as a year fraction
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Years(pub f64);

impl Years {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn sqrt(self) -> f64 {
        self.0.sqrt()
    }
}

impl From<Days> for Years {
    fn from(days: Days) -> Self {
        days.to_years()
    }
}
