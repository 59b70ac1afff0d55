//! Synthetic series for the report charts.
//!
//! Every generator takes the random source explicitly; seed a
//! `rand::rngs::StdRng` to get the same series twice.

use rand::Rng;

use crate::descriptor::Point;
use crate::error::{DashboardError, DashboardResult};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HistogramShape {
    /// `round(base + u * spread)` for `u` in `[0, 1)`.
    Uniform { base: f64, spread: f64 },
    /// Bell curve around `center` with `u * noise` added on top.
    Gaussian {
        center: f64,
        sigma: f64,
        peak: f64,
        noise: f64,
    },
}

impl HistogramShape {
    fn is_valid(&self) -> bool {
        match *self {
            HistogramShape::Uniform { base, spread } => {
                base.is_finite() && spread.is_finite() && spread >= 0.0
            }
            HistogramShape::Gaussian {
                center,
                sigma,
                peak,
                noise,
            } => {
                [center, sigma, peak, noise].iter().all(|v| v.is_finite())
                    && sigma > 0.0
                    && peak >= 0.0
                    && noise >= 0.0
            }
        }
    }

    /// Inclusive range every generated count falls into.
    ///
    /// Only meaningful for shapes accepted by [`HistogramSpec::bin_count`].
    pub fn bounds(&self) -> (u64, u64) {
        match *self {
            HistogramShape::Uniform { base, spread } => (
                base.round().max(0.0) as u64,
                (base + spread).round().max(0.0) as u64,
            ),
            HistogramShape::Gaussian { peak, noise, .. } => (0, (peak + noise).round() as u64),
        }
    }

    fn sample<R: Rng + ?Sized>(&self, x: f64, rng: &mut R) -> u64 {
        let u: f64 = rng.gen();
        let raw = match *self {
            HistogramShape::Uniform { base, spread } => base + u * spread,
            HistogramShape::Gaussian {
                center,
                sigma,
                peak,
                noise,
            } => {
                let z = (x - center) / sigma;
                peak * (-0.5 * z * z).exp() + u * noise
            }
        };
        raw.round().max(0.0) as u64
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistogramSpec {
    pub low: f64,
    pub high: f64,
    pub width: f64,
    /// Decimal places in the bin labels.
    pub precision: usize,
    pub shape: HistogramShape,
}

/// Upper limit on the number of bins a histogram may have.
pub const MAX_BINS: usize = 100_000;

impl HistogramSpec {
    /// `ceil((high - low) / width) + 1`, at most [`MAX_BINS`].
    pub fn bin_count(&self) -> DashboardResult<usize> {
        if !self.shape.is_valid() {
            return Err(DashboardError::InvalidHistogramShape(format!("{:?}", self.shape)));
        }
        let invalid_range = || DashboardError::InvalidHistogram {
            low: self.low,
            high: self.high,
            width: self.width,
        };
        let valid = [self.low, self.high, self.width].iter().all(|v| v.is_finite())
            && self.width > 0.0
            && self.high >= self.low;
        if !valid {
            return Err(invalid_range());
        }
        // Slack for a quotient that overshoots an integer, e.g. 1.1 / 0.1 = 11.000000000000002.
        let steps = ((self.high - self.low) / self.width - 1e-9).ceil().max(0.0);
        if !steps.is_finite() || steps >= MAX_BINS as f64 {
            return Err(invalid_range());
        }
        (steps as usize)
            .checked_add(1)
            .filter(|bins| *bins <= MAX_BINS)
            .ok_or_else(invalid_range)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistogramBin {
    pub label: String,
    pub count: u64,
}

pub fn generate_histogram<R: Rng + ?Sized>(
    spec: &HistogramSpec,
    rng: &mut R,
) -> DashboardResult<Vec<HistogramBin>> {
    let bins = spec.bin_count()?;
    Ok((0..bins)
        .map(|i| {
            let x = spec.low + i as f64 * spec.width;
            // `+ 0.0` turns a rounded -0.0 into 0.0 so the centre bin reads "0.00".
            let shown = round_to(x, spec.precision as i32) + 0.0;
            HistogramBin {
                label: format!("{:.*}", spec.precision, shown),
                count: spec.shape.sample(x, rng),
            }
        })
        .collect())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvergenceSpec {
    pub start: f64,
    pub floor: f64,
    pub steps: usize,
    /// Exponential decay rate per step.
    pub rate: f64,
    /// Peak-to-peak width of the uniform jitter.
    pub noise: f64,
}

impl ConvergenceSpec {
    pub fn new(start: f64, floor: f64, steps: usize) -> Self {
        Self {
            start,
            floor,
            steps,
            rate: 0.2,
            noise: 0.01,
        }
    }

    /// Largest distance between the last best-so-far value and `floor`.
    ///
    /// Covers the jitter, the decay left after the final step and the
    /// 4-decimal rounding.
    pub fn final_tolerance(&self) -> f64 {
        let last = self.steps.saturating_sub(1) as f64;
        let residual = (self.start - self.floor).abs() * (-self.rate * last).exp();
        self.noise / 2.0 + residual + 0.5e-4
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrialPoint {
    pub value: f64,
    /// Running minimum of `value`, starting from `start`.
    pub best: f64,
}

pub fn generate_convergence_series<R: Rng + ?Sized>(
    spec: &ConvergenceSpec,
    rng: &mut R,
) -> Vec<TrialPoint> {
    let mut best = spec.start;
    (0..spec.steps)
        .map(|i| {
            let decay = 1.0 - (-(i as f64) * spec.rate).exp();
            let jitter = (rng.gen::<f64>() - 0.5) * spec.noise;
            let value = spec.start - (spec.start - spec.floor) * decay + jitter;
            best = best.min(value);
            TrialPoint {
                value: round_to(value, 4),
                best: round_to(best, 4),
            }
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScatterSpec {
    pub count: usize,
    /// Actual values are whole numbers in `[low, low + span]`.
    pub low: f64,
    pub span: f64,
    /// Peak-to-peak width of the prediction error.
    pub jitter: f64,
}

/// Predicted-vs-actual points for a near-perfect regressor.
pub fn generate_prediction_scatter<R: Rng + ?Sized>(spec: &ScatterSpec, rng: &mut R) -> Vec<Point> {
    (0..spec.count)
        .map(|_| {
            let actual = (spec.low + rng.gen::<f64>() * spec.span).round();
            let predicted = actual + (rng.gen::<f64>() - 0.5) * spec.jitter;
            Point::new(actual, round_to(predicted, 2))
        })
        .collect()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
