/*
 * BrushFilter
 * Copyright (C) 2024 BrushFilter Contributors
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */

/// Monotonic transform applied to domain values before linear interpolation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interpolator {
    Linear,
    Log { base: f64 },
    Pow { exponent: f64 },
}

impl Interpolator {
    fn forward(&self, v: f64, negative: bool) -> f64 {
        match self {
            Interpolator::Linear => v,
            Interpolator::Log { base } => {
                // Domains entirely below zero are handled by mirroring
                if negative {
                    -(-v).ln() / base.ln()
                } else {
                    v.ln() / base.ln()
                }
            }
            Interpolator::Pow { exponent } => v.signum() * v.abs().powf(*exponent),
        }
    }

    fn inverse(&self, t: f64, negative: bool) -> f64 {
        match self {
            Interpolator::Linear => t,
            Interpolator::Log { base } => {
                if negative {
                    -base.powf(-t)
                } else {
                    base.powf(t)
                }
            }
            Interpolator::Pow { exponent } => t.signum() * t.abs().powf(1.0 / exponent),
        }
    }
}

/// Numeric scale mapping a `[d0, d1]` domain onto a `[r0, r1]` range.
///
/// The range defaults to the normalized `[0, 1]` interval that slider
/// positions are expressed in. Reversed domains and ranges are kept as given.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousScale {
    pub domain: [f64; 2],
    pub range: [f64; 2],
    pub interpolator: Interpolator,
}

impl ContinuousScale {
    pub fn linear(d0: f64, d1: f64) -> Self {
        Self {
            domain: [d0, d1],
            range: [0.0, 1.0],
            interpolator: Interpolator::Linear,
        }
    }

    pub fn log(d0: f64, d1: f64, base: f64) -> Self {
        Self {
            domain: [d0, d1],
            range: [0.0, 1.0],
            interpolator: Interpolator::Log { base },
        }
    }

    pub fn pow(d0: f64, d1: f64, exponent: f64) -> Self {
        Self {
            domain: [d0, d1],
            range: [0.0, 1.0],
            interpolator: Interpolator::Pow { exponent },
        }
    }

    pub fn sqrt(d0: f64, d1: f64) -> Self {
        Self::pow(d0, d1, 0.5)
    }

    pub fn with_range(mut self, r0: f64, r1: f64) -> Self {
        self.range = [r0, r1];
        self
    }

    fn negative(&self) -> bool {
        self.domain[0] < 0.0 && self.domain[1] <= 0.0
    }

    pub fn map(&self, value: f64) -> f64 {
        let negative = self.negative();
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let t0 = self.interpolator.forward(d0, negative);
        let t1 = self.interpolator.forward(d1, negative);
        let span = t1 - t0;
        if span == 0.0 || !span.is_finite() {
            return r0;
        }
        let t = (self.interpolator.forward(value, negative) - t0) / span;
        r0 + t * (r1 - r0)
    }

    pub fn invert(&self, position: f64) -> f64 {
        let negative = self.negative();
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if r1 == r0 {
            return d0;
        }
        let t0 = self.interpolator.forward(d0, negative);
        let t1 = self.interpolator.forward(d1, negative);
        let t = (position - r0) / (r1 - r0);
        self.interpolator.inverse(t0 + t * (t1 - t0), negative)
    }
}
