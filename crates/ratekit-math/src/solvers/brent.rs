//! Brent's bracketing method.

use std::mem::swap;

use crate::error::{MathError, MathResult};
use crate::solvers::newton::evaluate;
use crate::solvers::{SolverConfig, SolverResult};

/// Finds a root of `f` inside `[lower, upper]`.
///
/// Each step tries inverse quadratic interpolation (or the secant when only
/// two distinct points are known) and falls back to bisection whenever the
/// candidate leaves the safe part of the bracket or the bracket is not
/// shrinking fast enough. The bracket always contains a sign change.
///
/// # Errors
///
/// - `InvalidBracket` if `f` has the same sign at both ends
/// - `NonFiniteObjective` if `f` is NaN or infinite at a visited point
/// - `ConvergenceFailed` at the iteration cap, with the best point so far
pub fn brent<F>(f: F, lower: f64, upper: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let (mut a, mut b) = (lower, upper);
    let mut fa = evaluate(&f, a)?;
    let mut fb = evaluate(&f, b)?;

    if fa == 0.0 {
        return Ok(SolverResult::new(a, 0, fa));
    }
    if fb == 0.0 {
        return Ok(SolverResult::new(b, 0, fb));
    }
    if fa.signum() == fb.signum() {
        return Err(MathError::InvalidBracket {
            lower,
            upper,
            f_lower: fa,
            f_upper: fb,
        });
    }

    // b holds the best estimate, a the contrapoint
    if fa.abs() < fb.abs() {
        swap(&mut a, &mut b);
        swap(&mut fa, &mut fb);
    }

    let (mut c, mut fc) = (a, fa);
    let mut d = c;
    let mut bisected = true;

    for iteration in 0..config.max_iterations {
        if fb.abs() < config.tolerance || (b - a).abs() < config.tolerance {
            return Ok(SolverResult::new(b, iteration, fb));
        }

        let mut s = if fa != fc && fb != fc {
            a * fb * fc / ((fa - fb) * (fa - fc))
                + b * fa * fc / ((fb - fa) * (fb - fc))
                + c * fa * fb / ((fc - fa) * (fc - fb))
        } else {
            b - fb * (b - a) / (fb - fa)
        };

        let quarter = (3.0 * a + b) / 4.0;
        let outside = !((s > quarter.min(b)) && (s < quarter.max(b)));
        let slow = if bisected {
            (s - b).abs() >= (b - c).abs() / 2.0 || (b - c).abs() < config.tolerance
        } else {
            (s - b).abs() >= (c - d).abs() / 2.0 || (c - d).abs() < config.tolerance
        };

        bisected = outside || slow;
        if bisected {
            s = (a + b) / 2.0;
        }

        let fs = evaluate(&f, s)?;
        d = c;
        c = b;
        fc = fb;

        if fa.signum() == fs.signum() {
            a = s;
            fa = fs;
        } else {
            b = s;
            fb = fs;
        }

        if fa.abs() < fb.abs() {
            swap(&mut a, &mut b);
            swap(&mut fa, &mut fb);
        }
    }

    Err(MathError::convergence_failed(config.max_iterations, b, fb))
}
