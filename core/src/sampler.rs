//! Seeded numeric sampling around a fixed target.
//!
//! Draws come in antithetic pairs: a jitter `d` in `[-spread, spread]`
//! produces `mean + d`, and the following draw is `mean - d`. Every
//! completed pair averages to the target exactly, so over `n` draws the
//! realised mean sits within `spread / n` of the target plus rounding.
//! `RateTarget::validate` guarantees that bound fits the tolerance for
//! every `n >= 1`.

use crate::{config::RateTarget, rng::StreamRng};

pub struct RateSampler {
    target: RateTarget,
    rng: StreamRng,
    pending: Option<f64>,
}

impl RateSampler {
    pub fn new(target: RateTarget, rng: StreamRng) -> Self {
        Self { target, rng, pending: None }
    }

    /// Next value, clamped to the target's bounds and rounded to its
    /// decimal places.
    pub fn sample(&mut self) -> f64 {
        let jitter = match self.pending.take() {
            Some(previous) => -previous,
            None => {
                let d = self.rng.uniform(-self.target.spread, self.target.spread);
                self.pending = Some(d);
                d
            }
        };
        let value = (self.target.mean + jitter).clamp(self.target.min, self.target.max);
        round_to(value, self.target.decimals)
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Arithmetic mean; zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
