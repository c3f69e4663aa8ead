// src/solvers/brent.rs
//! Brent's bracketed root finder
//!
//! # Algorithm
//!
//! Brent (1973) keeps a bracket `[b, c]` with `f(b)` and `f(c)` of opposite
//! sign, `b` being the best estimate so far. Each iteration tries, in order:
//! 1. **Inverse quadratic interpolation** through the last three points
//! 2. **Secant step** when only two distinct points are available
//! 3. **Bisection** whenever the interpolated step is not trustworthy
//!
//! An interpolated step is accepted only if it lands inside the bracket and
//! shrinks faster than bisection would have two steps earlier, so the method
//! never does worse than bisection and converges superlinearly near a simple
//! root.
//!
//! # Stopping rule
//!
//! The search stops with success as soon as `|f(b)| <= tolerance`. Once the
//! bracket has shrunk to machine precision no further progress is possible in
//! `f64`: the estimate is accepted if `|f(b)|` is within the caller's noise
//! bound for evaluating `f` at `b`, and is a `ConvergenceFailure` otherwise.
//! Spending `max_iterations` evaluations is also a `ConvergenceFailure`.

use crate::error::{PricingError, PricingResult};
use tracing::trace;

/// Root located by [`brent`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Root {
    pub x: f64,
    /// Function evaluations spent after the two bracket endpoints
    pub iterations: usize,
}

/// Find `x` in `[lower, upper]` with `|f(x)| <= tolerance`
///
/// `f` is taken as exact: a bracket collapsed to machine precision without
/// meeting the tolerance is a failure.
///
/// # Errors
///
/// - `NoBracket` if `f(lower)` and `f(upper)` do not have opposite signs
///   (or either is not finite)
/// - `ConvergenceFailure` if the tolerance is not met within `max_iterations`
pub fn brent<F>(
    f: F,
    lower: f64,
    upper: f64,
    tolerance: f64,
    max_iterations: usize,
) -> PricingResult<Root>
where
    F: Fn(f64) -> f64,
{
    brent_with_noise(f, |_| 0.0, lower, upper, tolerance, max_iterations)
}

/// [`brent`] for a function evaluated with rounding noise
///
/// `noise(x)` bounds the floating-point error of `f(x)`. When the bracket can
/// no longer shrink, `x` is a root if `|f(x)| <= noise(x)`.
pub fn brent_with_noise<F, N>(
    f: F,
    noise: N,
    lower: f64,
    upper: f64,
    tolerance: f64,
    max_iterations: usize,
) -> PricingResult<Root>
where
    F: Fn(f64) -> f64,
    N: Fn(f64) -> f64,
{
    let mut a = lower;
    let mut b = upper;
    let mut fa = f(a);
    let mut fb = f(b);

    if fa.abs() <= tolerance {
        return Ok(Root { x: a, iterations: 0 });
    }
    if fb.abs() <= tolerance {
        return Ok(Root { x: b, iterations: 0 });
    }
    if !fa.is_finite() || !fb.is_finite() || fa * fb > 0.0 {
        return Err(PricingError::NoBracket {
            lower,
            upper,
            f_lower: fa,
            f_upper: fb,
        });
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iteration in 1..=max_iterations {
        // Re-establish the bracket [b, c] after the previous step
        if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        // Keep b as the endpoint with the smaller residual
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol1 = 2.0 * f64::EPSILON * b.abs();
        let xm = 0.5 * (c - b);

        if fb.abs() <= tolerance {
            return Ok(Root {
                x: b,
                iterations: iteration - 1,
            });
        }
        if xm.abs() <= tol1 {
            if fb.abs() <= noise(b) {
                trace!(x = b, fx = fb, "bracket collapsed at evaluation noise");
                return Ok(Root {
                    x: b,
                    iterations: iteration - 1,
                });
            }
            return Err(PricingError::ConvergenceFailure {
                iterations: iteration - 1,
                last_estimate: b,
            });
        }

        if e.abs() >= tol1 && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let min1 = 3.0 * xm * q - (tol1 * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol1 { d } else { tol1.copysign(xm) };
        fb = f(b);

        trace!(iteration, x = b, fx = fb, "brent step");
    }

    // The last evaluation may already be good enough
    if fb.abs() <= tolerance {
        return Ok(Root {
            x: b,
            iterations: max_iterations,
        });
    }

    Err(PricingError::ConvergenceFailure {
        iterations: max_iterations,
        last_estimate: b,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_square_root_of_two() {
        let root = brent(|x| x * x - 2.0, 0.0, 2.0, 1e-14, 100).unwrap();
        assert!((root.x - std::f64::consts::SQRT_2).abs() < 1e-12);
        assert!(root.iterations < 20);
    }

    #[test]
    fn test_decreasing_function() {
        let root = brent(|x| (-x).exp() - 0.5, 0.0, 5.0, 1e-13, 100).unwrap();
        assert!((root.x - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn test_root_at_endpoint() {
        let root = brent(|x| x - 1.0, 1.0, 3.0, 1e-12, 100).unwrap();
        assert_eq!(root.x, 1.0);
        assert_eq!(root.iterations, 0);
    }

    #[test]
    fn test_no_bracket() {
        let result = brent(|x| x * x + 1.0, -1.0, 1.0, 1e-12, 100);
        assert!(matches!(result, Err(PricingError::NoBracket { .. })));
    }

    #[test]
    fn test_non_finite_endpoint_is_no_bracket() {
        let result = brent(|x| 1.0 / x - 1.0, 0.0, 2.0, 1e-12, 100);
        assert!(matches!(result, Err(PricingError::NoBracket { .. })));
    }

    #[test]
    fn test_iteration_budget_exhausted() {
        // Flat-bottomed near the root, bisection-bound
        let result = brent(|x| (x - 0.3).powi(5), 0.0, 1.0, 1e-30, 3);
        assert!(matches!(
            result,
            Err(PricingError::ConvergenceFailure { iterations: 3, .. })
        ));
    }

    #[test]
    fn test_unreachable_tolerance_fails_instead_of_guessing() {
        // A jump discontinuity has a sign change but no point with |f| <= tol
        let result = brent(|x| if x < 0.5 { -1.0 } else { 1.0 }, 0.0, 1.0, 1e-6, 500);
        assert!(matches!(
            result,
            Err(PricingError::ConvergenceFailure { .. })
        ));
    }

    #[test]
    fn test_collapsed_bracket_accepted_within_noise() {
        // sqrt(2) is not representable, so |f| never reaches 1e-30
        let f = |x: f64| x * x - 2.0;
        let exact = brent(f, 0.0, 2.0, 1e-30, 200);
        assert!(matches!(
            exact,
            Err(PricingError::ConvergenceFailure { .. })
        ));

        let root = brent_with_noise(f, |x| 8.0 * f64::EPSILON * x * x, 0.0, 2.0, 1e-30, 200)
            .unwrap();
        assert!((root.x - std::f64::consts::SQRT_2).abs() <= 4.0 * f64::EPSILON);
        assert!(root.iterations < 200);
    }

    #[test]
    fn test_noise_does_not_hide_a_jump() {
        let result = brent_with_noise(
            |x| if x < 0.5 { -1.0 } else { 1.0 },
            |_| 1e-12,
            0.0,
            1.0,
            1e-6,
            500,
        );
        assert!(matches!(
            result,
            Err(PricingError::ConvergenceFailure { .. })
        ));
    }
}
