//! Newton-Raphson iteration.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Derivatives smaller than this in magnitude stop the iteration.
pub(crate) const MIN_DERIVATIVE: f64 = 1e-14;

/// Central-difference derivative of `f` at `x`, with a step scaled to `x`.
pub(crate) fn central_difference<F>(f: &F, x: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let h = 1e-7 * x.abs().max(1.0);
    (f(x + h) - f(x - h)) / (2.0 * h)
}

/// Evaluates `f(x)`, rejecting NaN and infinite values.
pub(crate) fn evaluate<F>(f: &F, x: f64) -> MathResult<f64>
where
    F: Fn(f64) -> f64,
{
    let value = f(x);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MathError::NonFiniteObjective { x })
    }
}

/// Newton-Raphson root finder, `x <- x - f(x) / f'(x)`.
///
/// Stops when `|f(x)|` or the last step falls below the tolerance.
///
/// # Example
///
/// ```rust
/// use ratekit_math::solvers::{newton_raphson, SolverConfig};
///
/// // Continuously compounded rate for a 5y discount factor of 0.86
/// let f = |r: f64| (-5.0 * r).exp() - 0.86;
/// let df = |r: f64| -5.0 * (-5.0 * r).exp();
///
/// let result = newton_raphson(f, df, 0.0, &SolverConfig::default()).unwrap();
/// assert!((result.root + 0.86f64.ln() / 5.0).abs() < 1e-12);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;
    let mut fx = evaluate(&f, x)?;

    for iteration in 0..config.max_iterations {
        if fx.abs() < config.tolerance {
            return Ok(SolverResult::new(x, iteration, fx));
        }

        let slope = df(x);
        if !slope.is_finite() || slope.abs() < MIN_DERIVATIVE {
            return Err(MathError::FlatDerivative {
                x,
                derivative: slope,
            });
        }

        let step = fx / slope;
        x -= step;
        fx = evaluate(&f, x)?;

        if step.abs() < config.tolerance {
            return Ok(SolverResult::new(x, iteration + 1, fx));
        }
    }

    Err(MathError::convergence_failed(config.max_iterations, x, fx))
}

/// Newton-Raphson with a central-difference derivative.
pub fn newton_raphson_numerical<F>(
    f: F,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    newton_raphson(&f, |x| central_difference(&f, x), initial_guess, config)
}
