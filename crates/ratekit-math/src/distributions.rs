//! Standard normal distribution.

use statrs::function::erf::erfc;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Standard normal cumulative distribution function.
///
/// Evaluated as `erfc(-x / sqrt(2)) / 2`, which keeps full relative
/// precision in the lower tail.
#[must_use]
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

/// Standard normal probability density function.
#[must_use]
pub fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_cdf_reference_values() {
        assert_abs_diff_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(normal_cdf(1.0), 0.841_344_746_068_543, epsilon = 1e-12);
        assert_abs_diff_eq!(normal_cdf(-1.96), 0.024_997_895_148_220, epsilon = 1e-12);
    }

    #[test]
    fn test_cdf_symmetry() {
        for x in [0.1, 0.5, 1.3, 2.7] {
            assert_abs_diff_eq!(normal_cdf(x) + normal_cdf(-x), 1.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_pdf_peak() {
        assert_abs_diff_eq!(
            normal_pdf(0.0),
            1.0 / (2.0 * std::f64::consts::PI).sqrt(),
            epsilon = 1e-15
        );
    }
}
