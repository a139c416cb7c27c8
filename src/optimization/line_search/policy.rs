//! Line-search strategy interface and policy dispatch.
//!
//! A line search receives an immutable [`LineSearchStart`] snapshot
//! `(x, f(x), ∇f(x), d, α₀)` and returns a [`LineSearchOutcome`] record
//! `(α, x + αd, f, ∇f, trials)`; it never mutates optimizer state.
//!
//! Strategies are chosen once, at optimizer construction, through the closed
//! [`LineSearchPolicy`] enum (parsable from `"backtracking"` /
//! `"bracketing"`), which builds a [`LineSearcher`].
use std::str::FromStr;

use argmin::core::{CostFunction, Gradient};

use crate::optimization::{
    errors::{OptError, OptResult},
    line_search::{backtracking::Backtracking, bracketing::Bracketing, params::LineSearchParams},
    types::{Cost, Grad, Theta},
};

/// Immutable input to a line search.
#[derive(Debug, Clone, Copy)]
pub struct LineSearchStart<'s> {
    /// Current point `x_k`.
    pub x: &'s Theta,
    /// Objective at `x_k`.
    pub fx: Cost,
    /// Gradient at `x_k`.
    pub grad: &'s Grad,
    /// Search direction `d_k`.
    pub direction: &'s Grad,
    /// Initial trial step `α₀ > 0`.
    pub step: f64,
}

/// Accepted step and the state at the new point.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSearchOutcome {
    pub step: f64,
    pub x: Theta,
    pub fx: Cost,
    pub grad: Grad,
    /// Number of trial points evaluated, including the accepted one.
    pub trials: usize,
}

/// A step-length search along a fixed direction.
pub trait LineSearch {
    fn params(&self) -> &LineSearchParams;

    /// Search along `start.direction` from `start.x`.
    ///
    /// # Errors
    /// - `InvalidInitialStep` if `start.step <= 0`.
    /// - `StepOutOfBounds` if `start.step` is outside `[min_step, max_step]`;
    ///   the loss is not evaluated.
    /// - `NonDescentDirection` if `d·g ≥ 0`; the loss is not evaluated.
    /// - `StepOutOfBounds` / `LineSearchExhausted` when the search fails.
    /// - Any error raised by the problem's cost or gradient.
    fn search<P>(&self, problem: &P, start: &LineSearchStart<'_>) -> OptResult<LineSearchOutcome>
    where
        P: CostFunction<Param = Theta, Output = Cost> + Gradient<Param = Theta, Gradient = Grad>;
}

/// Choice of line-search strategy used by L-BFGS.
///
/// Variants:
/// - `Backtracking`: shrink until the Armijo condition holds.
/// - `Bracketing`: shrink or grow until the configured condition holds.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"backtracking"`, `"bracketing"`). Unknown names return
/// `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineSearchPolicy {
    #[default]
    Backtracking,
    Bracketing,
}

impl FromStr for LineSearchPolicy {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "backtracking" => Ok(LineSearchPolicy::Backtracking),
            "bracketing" => Ok(LineSearchPolicy::Bracketing),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'backtracking' or 'bracketing'.",
            }),
        }
    }
}

impl LineSearchPolicy {
    /// Build the strategy for this policy.
    ///
    /// # Errors
    /// Propagates parameter validation errors.
    pub fn build(self, params: LineSearchParams) -> OptResult<LineSearcher> {
        match self {
            LineSearchPolicy::Backtracking => {
                Ok(LineSearcher::Backtracking(Backtracking::new(params)?))
            }
            LineSearchPolicy::Bracketing => Ok(LineSearcher::Bracketing(Bracketing::new(params)?)),
        }
    }
}

/// A constructed line-search strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum LineSearcher {
    Backtracking(Backtracking),
    Bracketing(Bracketing),
}

impl LineSearcher {
    pub fn policy(&self) -> LineSearchPolicy {
        match self {
            LineSearcher::Backtracking(_) => LineSearchPolicy::Backtracking,
            LineSearcher::Bracketing(_) => LineSearchPolicy::Bracketing,
        }
    }
}

impl LineSearch for LineSearcher {
    fn params(&self) -> &LineSearchParams {
        match self {
            LineSearcher::Backtracking(ls) => ls.params(),
            LineSearcher::Bracketing(ls) => ls.params(),
        }
    }

    fn search<P>(&self, problem: &P, start: &LineSearchStart<'_>) -> OptResult<LineSearchOutcome>
    where
        P: CostFunction<Param = Theta, Output = Cost> + Gradient<Param = Theta, Gradient = Grad>,
    {
        match self {
            LineSearcher::Backtracking(ls) => ls.search(problem, start),
            LineSearcher::Bracketing(ls) => ls.search(problem, start),
        }
    }
}
