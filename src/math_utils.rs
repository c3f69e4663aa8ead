// src/math_utils.rs
use statrs::function::erf;
use std::f64::consts::SQRT_2;
use std::time::Instant;

/// Standard normal cumulative distribution function
///
/// ```text
/// Φ(x) = ½ erfc(-x / √2)
/// ```
/// Accurate to full relative precision in the lower tail, where
/// `½ (1 + erf(x / √2))` cancels to zero.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erf::erfc(-x / SQRT_2)
}

/// Wall-clock stopwatch for the benchmark and demos
pub struct Timer {
    start_time: Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
