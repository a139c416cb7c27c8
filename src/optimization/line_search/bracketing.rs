//! Bracketing line search (Armijo, Wolfe or strong Wolfe).
use argmin::core::{CostFunction, Gradient};

use crate::optimization::{
    errors::OptResult,
    line_search::{
        evaluate_trial, initial_slope, next_step,
        params::{LineSearchCondition, LineSearchParams},
        policy::{LineSearch, LineSearchOutcome, LineSearchStart},
    },
    types::{Cost, Grad, Theta},
};

/// Shrinks or grows the step until `params.condition` holds.
///
/// For each trial `α` with `g(α)` the gradient at `x + αd`:
/// 1. Armijo fails → shrink by `decrease_factor`.
/// 2. `condition == Armijo` → accept.
/// 3. `d·g(α) < wolfe·(d·g₀)` (slope still steep, step too short) → grow by
///    `increase_factor`.
/// 4. `condition == Wolfe` → accept.
/// 5. `d·g(α) > −wolfe·(d·g₀)` (overshot the minimizer) → shrink.
/// 6. Otherwise accept (strong Wolfe holds).
#[derive(Debug, Clone, PartialEq)]
pub struct Bracketing {
    params: LineSearchParams,
}

impl Bracketing {
    /// # Errors
    /// Returns parameter validation errors from [`LineSearchParams::validate`].
    pub fn new(params: LineSearchParams) -> OptResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }
}

impl LineSearch for Bracketing {
    fn params(&self) -> &LineSearchParams {
        &self.params
    }

    fn search<P>(&self, problem: &P, start: &LineSearchStart<'_>) -> OptResult<LineSearchOutcome>
    where
        P: CostFunction<Param = Theta, Output = Cost> + Gradient<Param = Theta, Gradient = Grad>,
    {
        let params = &self.params;
        let dg_init = initial_slope(&self.params, start)?;
        let dg_test = params.ftol * dg_init;
        let mut step = start.step;
        let mut trials = 0;
        loop {
            let (x, fx, grad) = evaluate_trial(problem, start, step)?;
            trials += 1;

            let width = if fx > start.fx + step * dg_test {
                params.decrease_factor
            } else if params.condition == LineSearchCondition::Armijo {
                return Ok(LineSearchOutcome { step, x, fx, grad, trials });
            } else {
                let dg = start.direction.dot(&grad);
                if dg < params.wolfe * dg_init {
                    params.increase_factor
                } else if params.condition == LineSearchCondition::Wolfe {
                    return Ok(LineSearchOutcome { step, x, fx, grad, trials });
                } else if dg > -params.wolfe * dg_init {
                    params.decrease_factor
                } else {
                    return Ok(LineSearchOutcome { step, x, fx, grad, trials });
                }
            };

            step = next_step(params, step, width, trials)?;
        }
    }
}
