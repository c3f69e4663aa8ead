// src/error.rs
use std::fmt;

/// Custom error types for the bs-implied library
#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Two input sequences that must line up have different lengths
    LengthMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    /// A price was requested without a volatility
    MissingParameter { parameter: String },

    /// Input outside the domain where the Black-Scholes formulas are defined
    DomainError {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Root-finding bracket does not straddle a sign change
    ///
    /// For implied volatility, `f_lower`/`f_upper` are residuals relative to
    /// the market price.
    NoBracket {
        lower: f64,
        upper: f64,
        f_lower: f64,
        f_upper: f64,
    },

    /// Iteration budget exhausted, or bracket collapsed, before reaching tolerance
    ConvergenceFailure { iterations: usize, last_estimate: f64 },

    /// Invalid solver configuration
    InvalidConfiguration { field: String, reason: String },
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::LengthMismatch {
                what,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Length mismatch for {}: expected {}, got {}",
                    what, expected, actual
                )
            }
            PricingError::MissingParameter { parameter } => {
                write!(f, "Missing parameter '{}': must be set to price", parameter)
            }
            PricingError::DomainError {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            PricingError::NoBracket {
                lower,
                upper,
                f_lower,
                f_upper,
            } => {
                write!(f,
                    "Root not bracketed in [{}, {}]: f(lower) = {:.6}, f(upper) = {:.6} have the same sign",
                    lower, upper, f_lower, f_upper
                )
            }
            PricingError::ConvergenceFailure {
                iterations,
                last_estimate,
            } => {
                write!(
                    f,
                    "Solver did not converge after {} iterations (last estimate: {:.8})",
                    iterations, last_estimate
                )
            }
            PricingError::InvalidConfiguration { field, reason } => {
                write!(f, "Invalid configuration for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for PricingError {}

/// Result type alias for bs-implied operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Validation utilities
pub mod validation {
    use super::{PricingError, PricingResult};

    /// Validate that a parameter is finite and strictly positive
    pub fn validate_positive(name: &str, value: f64) -> PricingResult<()> {
        validate_finite(name, value)?;
        if value <= 0.0 {
            Err(PricingError::DomainError {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> PricingResult<()> {
        if !value.is_finite() {
            Err(PricingError::DomainError {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that two parallel sequences have the same length
    pub fn validate_same_length(what: &str, expected: usize, actual: usize) -> PricingResult<()> {
        if expected != actual {
            Err(PricingError::LengthMismatch {
                what: what.to_string(),
                expected,
                actual,
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("sigma", 0.2).is_ok());
        assert!(validate_positive("sigma", 0.0).is_err());
        assert!(validate_positive("sigma", -0.1).is_err());
        assert!(validate_positive("sigma", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("rate", -0.01).is_ok());
        assert!(validate_finite("rate", f64::NAN).is_err());
        assert!(validate_finite("rate", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_same_length() {
        assert!(validate_same_length("strikes", 3, 3).is_ok());
        assert_eq!(
            validate_same_length("strikes", 5, 4),
            Err(PricingError::LengthMismatch {
                what: "strikes".to_string(),
                expected: 5,
                actual: 4,
            })
        );
    }

    #[test]
    fn test_error_display() {
        let error = PricingError::DomainError {
            parameter: "maturity".to_string(),
            value: -0.5,
            constraint: "must be positive".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("maturity"));
        assert!(display.contains("-0.5"));
        assert!(display.contains("positive"));
    }

    #[test]
    fn test_no_bracket_display() {
        let error = PricingError::NoBracket {
            lower: 0.01,
            upper: 2.0,
            f_lower: 1.5,
            f_upper: 40.25,
        };

        let display = format!("{}", error);
        assert!(display.contains("[0.01, 2]"));
        assert!(display.contains("1.500000"));
        assert!(display.contains("same sign"));
    }
}
