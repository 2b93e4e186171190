//! One-dimensional interpolation.

mod linear;

pub use linear::LinearInterpolator;

use crate::error::MathResult;

/// Behaviour outside the node range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Extrapolation {
    /// Queries outside the nodes are errors
    #[default]
    Forbidden,
    /// Hold the end values
    Flat,
    /// Continue the end segments
    Linear,
}

/// Interpolated function of one variable.
pub trait Interpolator: Send + Sync {
    /// Value at `x`.
    fn value(&self, x: f64) -> MathResult<f64>;

    /// Smallest and largest node.
    fn domain(&self) -> (f64, f64);
}
