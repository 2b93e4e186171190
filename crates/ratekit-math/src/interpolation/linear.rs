//! Piecewise linear interpolation.

use super::{Extrapolation, Interpolator};
use crate::error::{MathError, MathResult};

/// Straight lines between nodes.
///
/// A single node defines a constant, at every `x` the extrapolation mode
/// allows.
///
/// # Example
///
/// ```rust
/// use ratekit_math::interpolation::{Extrapolation, Interpolator, LinearInterpolator};
///
/// // zero rates at 1y and 2y
/// let zeros = LinearInterpolator::new(vec![1.0, 2.0], vec![0.03, 0.04])
///     .unwrap()
///     .with_extrapolation(Extrapolation::Linear);
///
/// assert!((zeros.value(1.5).unwrap() - 0.035).abs() < 1e-15);
/// assert!((zeros.value(3.0).unwrap() - 0.05).abs() < 1e-15);
/// assert!((zeros.value(0.5).unwrap() - 0.025).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    extrapolation: Extrapolation,
}

impl LinearInterpolator {
    /// Builds the interpolator; extrapolation starts out forbidden.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for no nodes, mismatched lengths, non-finite values or
    /// abscissas that are not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.is_empty() {
            return Err(MathError::invalid_input(
                "interpolation needs at least one point",
            ));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "{} abscissas but {} ordinates",
                xs.len(),
                ys.len()
            )));
        }
        if xs.iter().chain(&ys).any(|v| !v.is_finite()) {
            return Err(MathError::invalid_input("interpolation nodes must be finite"));
        }
        if let Some(pair) = xs.windows(2).find(|pair| pair[1] <= pair[0]) {
            return Err(MathError::invalid_input(format!(
                "abscissas must be strictly increasing ({} then {})",
                pair[0], pair[1]
            )));
        }

        Ok(Self {
            xs,
            ys,
            extrapolation: Extrapolation::Forbidden,
        })
    }

    /// Sets the behaviour outside the nodes.
    #[must_use]
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Where `x` is evaluated: inside, or clamped to an end for flat
    /// extrapolation.
    fn locate(&self, x: f64) -> MathResult<f64> {
        let (min, max) = self.domain();
        if (min..=max).contains(&x) {
            return Ok(x);
        }
        match self.extrapolation {
            Extrapolation::Forbidden => Err(MathError::OutOfRange { x, min, max }),
            Extrapolation::Flat => Ok(x.clamp(min, max)),
            Extrapolation::Linear => Ok(x),
        }
    }

    /// Segment `[xs[i], xs[i + 1]]` that governs `x`; end segments extend
    /// outward.
    fn segment(&self, x: f64) -> usize {
        let upper = self.xs.partition_point(|&node| node <= x);
        upper.saturating_sub(1).min(self.xs.len() - 2)
    }
}

impl Interpolator for LinearInterpolator {
    fn value(&self, x: f64) -> MathResult<f64> {
        let x = self.locate(x)?;
        if self.xs.len() == 1 {
            return Ok(self.ys[0]);
        }

        let i = self.segment(x);
        let w = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        Ok(self.ys[i] + w * (self.ys[i + 1] - self.ys[i]))
    }

    fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
