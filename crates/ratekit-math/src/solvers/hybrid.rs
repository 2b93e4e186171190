//! Damped Newton with a Brent fallback.

use log::{debug, trace};

use crate::error::{MathError, MathResult};
use crate::solvers::newton::{central_difference, evaluate, MIN_DERIVATIVE};
use crate::solvers::{brent, SolverConfig, SolverResult};

/// Newton iterations allowed before handing over to Brent.
const NEWTON_MAX_ITERATIONS: u32 = 20;

/// Step halvings tried when a full Newton step does not reduce `|f|`.
const MAX_HALVINGS: u32 = 8;

/// Widest half-width searched when no bracket is supplied.
const MAX_BRACKET_WIDTH: f64 = 1e6;

/// Solves `f(x) = 0` with Newton steps, then Brent if Newton fails.
///
/// Each Newton step is halved until `|f|` decreases and `f` stays finite,
/// so objectives that are undefined far from the root (NaN) are tolerated.
/// When Newton fails, Brent runs on `bounds` or on a bracket found by
/// widening around the initial guess. Without a bracket the Newton failure
/// is returned, carrying the last iterate and residual.
///
/// # Example
///
/// ```rust
/// use ratekit_math::solvers::{hybrid, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
/// let df = |x: f64| 3.0 * x * x - 1.0;
///
/// let result = hybrid(f, df, 1.5, Some((1.0, 2.0)), &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-10);
/// ```
pub fn hybrid<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let newton_err = match damped_newton(&f, &df, initial_guess, config) {
        Ok(result) => return Ok(result),
        Err(err) => err,
    };
    debug!("Newton from {initial_guess} failed ({newton_err}), trying Brent");

    match bounds.or_else(|| search_bracket(&f, initial_guess)) {
        Some((lower, upper)) => brent(&f, lower, upper, config),
        None => Err(newton_err),
    }
}

/// [`hybrid`] with a central-difference derivative.
pub fn hybrid_numerical<F>(
    f: F,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    hybrid(&f, |x| central_difference(&f, x), initial_guess, bounds, config)
}

fn damped_newton<F, DF>(
    f: &F,
    df: &DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let max_iterations = config.max_iterations.min(NEWTON_MAX_ITERATIONS);
    let mut x = initial_guess;
    let mut fx = evaluate(f, x)?;

    for iteration in 0..max_iterations {
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

        let mut step = fx / slope;
        let mut accepted = None;
        for _ in 0..=MAX_HALVINGS {
            let candidate = x - step;
            let f_candidate = f(candidate);
            if f_candidate.is_finite() && f_candidate.abs() < fx.abs() {
                accepted = Some((candidate, f_candidate));
                break;
            }
            step /= 2.0;
        }

        let Some((next, f_next)) = accepted else {
            return Err(MathError::convergence_failed(iteration, x, fx));
        };
        trace!("Newton {iteration}: x = {next}, f = {f_next:.3e}");
        x = next;
        fx = f_next;

        if step.abs() < config.tolerance {
            return Ok(SolverResult::new(x, iteration + 1, fx));
        }
    }

    Err(MathError::convergence_failed(max_iterations, x, fx))
}

/// Widens `[guess - w, guess + w]` geometrically until `f` changes sign
/// against `f(guess)`. Points where `f` is not finite are skipped.
fn search_bracket<F>(f: &F, guess: f64) -> Option<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let f_guess = f(guess);
    if !f_guess.is_finite() {
        return None;
    }

    let mut width = 0.05;
    while width <= MAX_BRACKET_WIDTH {
        for (lower, upper, probe) in [
            (guess - width, guess, guess - width),
            (guess, guess + width, guess + width),
        ] {
            let value = f(probe);
            if value.is_finite() && value.signum() != f_guess.signum() {
                return Some((lower, upper));
            }
        }
        width *= 2.0;
    }

    None
}
