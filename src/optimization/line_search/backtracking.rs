//! Backtracking line search (Armijo only).
use argmin::core::{CostFunction, Gradient};

use crate::optimization::{
    errors::OptResult,
    line_search::{
        evaluate_trial, initial_slope, next_step,
        params::LineSearchParams,
        policy::{LineSearch, LineSearchOutcome, LineSearchStart},
    },
    types::{Cost, Grad, Theta},
};

/// Shrinks the step by `decrease_factor` until
/// `f(x + αd) ≤ f(x) + α·ftol·(d·g₀)`; the first step that passes is
/// accepted without a curvature check, whatever `params.condition` says.
#[derive(Debug, Clone, PartialEq)]
pub struct Backtracking {
    params: LineSearchParams,
}

impl Backtracking {
    /// # Errors
    /// Returns parameter validation errors from [`LineSearchParams::validate`].
    pub fn new(params: LineSearchParams) -> OptResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }
}

impl LineSearch for Backtracking {
    fn params(&self) -> &LineSearchParams {
        &self.params
    }

    fn search<P>(&self, problem: &P, start: &LineSearchStart<'_>) -> OptResult<LineSearchOutcome>
    where
        P: CostFunction<Param = Theta, Output = Cost> + Gradient<Param = Theta, Gradient = Grad>,
    {
        let dg_init = initial_slope(&self.params, start)?;
        let dg_test = self.params.ftol * dg_init;
        let mut step = start.step;
        let mut trials = 0;
        loop {
            let (x, fx, grad) = evaluate_trial(problem, start, step)?;
            trials += 1;
            if fx <= start.fx + step * dg_test {
                return Ok(LineSearchOutcome { step, x, fx, grad, trials });
            }
            step = next_step(&self.params, step, self.params.decrease_factor, trials)?;
        }
    }
}
