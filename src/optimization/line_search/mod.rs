//! line_search — step-length strategies for descent methods.
//!
//! Purpose
//! -------
//! Given a point `x`, its objective `f(x)` and gradient `g`, a search
//! direction `d` and an initial step `α₀`, find a step `α` such that
//! `x + αd` satisfies a sufficient-decrease (and optionally curvature)
//! condition.
//!
//! Key behaviors
//! -------------
//! - [`Backtracking`]: shrink `α` by `decrease_factor` until the Armijo
//!   condition holds; accept immediately.
//! - [`Bracketing`]: shrink on Armijo failure, grow when the curvature test
//!   says the step is too short, shrink when strong-Wolfe curvature is
//!   violated from above, otherwise accept.
//! - Both reject non-positive or out-of-range `α₀` and non-descent
//!   directions before the first evaluation, and fail when a rescaled `α`
//!   leaves `[min_step, max_step]` or the trial budget `max_linesearch` is
//!   spent. Every accepted step therefore lies in `[min_step, max_step]`.
//!
//! Conventions
//! -----------
//! - Inputs arrive as an immutable [`LineSearchStart`]; results leave as a
//!   [`LineSearchOutcome`]. No optimizer state is shared by reference.
//! - Problems are anything implementing argmin's `CostFunction` and
//!   `Gradient` over [`Theta`]; in practice a
//!   [`crate::optimization::loss::LossAdapter`].
//! - Failures are terminal for the search and are returned to the caller;
//!   there are no retries.

pub mod backtracking;
pub mod bracketing;
pub mod params;
pub mod policy;

pub use self::backtracking::Backtracking;
pub use self::bracketing::Bracketing;
pub use self::params::{LineSearchCondition, LineSearchParams};
pub use self::policy::{
    LineSearch, LineSearchOutcome, LineSearchPolicy, LineSearchStart, LineSearcher,
};

use argmin::core::{CostFunction, Gradient};

use crate::optimization::{
    errors::{OptError, OptResult},
    types::{Cost, Grad, Theta},
};

/// Check the preconditions of a search and return `d·g₀`.
///
/// # Errors
/// - `InvalidInitialStep` if `start.step` is not strictly positive.
/// - `StepOutOfBounds` if `start.step` lies outside `[min_step, max_step]`.
/// - `NonDescentDirection` if `d·g₀` is not strictly negative.
pub(crate) fn initial_slope(
    params: &LineSearchParams, start: &LineSearchStart<'_>,
) -> OptResult<f64> {
    if !(start.step > 0.0) {
        return Err(OptError::InvalidInitialStep { step: start.step });
    }
    if start.step < params.min_step || start.step > params.max_step {
        log::debug!(
            "line search: initial step {} outside [{}, {}]",
            start.step,
            params.min_step,
            params.max_step
        );
        return Err(OptError::StepOutOfBounds {
            step: start.step,
            min_step: params.min_step,
            max_step: params.max_step,
        });
    }
    let dg_init = start.direction.dot(start.grad);
    if !(dg_init < 0.0) {
        log::debug!("line search: direction increases the objective (d·g = {dg_init})");
        return Err(OptError::NonDescentDirection { directional_derivative: dg_init });
    }
    Ok(dg_init)
}

/// Evaluate `x = x₀ + step·d` together with its objective and gradient.
pub(crate) fn evaluate_trial<P>(
    problem: &P, start: &LineSearchStart<'_>, step: f64,
) -> OptResult<(Theta, Cost, Grad)>
where
    P: CostFunction<Param = Theta, Output = Cost> + Gradient<Param = Theta, Gradient = Grad>,
{
    let mut x = start.x.clone();
    x.scaled_add(step, start.direction);
    let fx = problem.cost(&x)?;
    let grad = problem.gradient(&x)?;
    Ok((x, fx, grad))
}

/// Scale `step` by `width` after a rejected trial, enforcing the trial
/// budget and the step bounds.
///
/// # Errors
/// - `LineSearchExhausted` once `trials` reaches `max_linesearch`.
/// - `StepOutOfBounds` if the scaled step leaves `[min_step, max_step]`.
pub(crate) fn next_step(
    params: &LineSearchParams, step: f64, width: f64, trials: usize,
) -> OptResult<f64> {
    if trials >= params.max_linesearch {
        log::debug!("line search: reached {trials} trials at step {step}");
        return Err(OptError::LineSearchExhausted { trials, step });
    }
    let next = step * width;
    if next < params.min_step || next > params.max_step {
        log::debug!("line search: step {next} left [{}, {}]", params.min_step, params.max_step);
        return Err(OptError::StepOutOfBounds {
            step: next,
            min_step: params.min_step,
            max_step: params.max_step,
        });
    }
    Ok(next)
}
