//! The L-BFGS driver loop.
use argmin::core::{CostFunction, Gradient, TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;

use crate::optimization::{
    base::{BaseOptimizer, OptimOutcome, OptimizerOptions},
    errors::OptResult,
    lbfgs::{history::LbfgsHistory, options::LbfgsOptions, window::PastObjectiveWindow},
    line_search::{LineSearch, LineSearchStart, LineSearcher},
    loss::{EvalCounter, LossAdapter, LossFunction},
    types::{Features, Grad, Targets, Theta},
};

/// Limited-memory BFGS over a [`LossFunction`].
///
/// Each iteration:
/// 1. Convergence checks at the current point, in order:
///    - `‖g‖ ≤ tol·max(‖x‖, 1)`;
///    - if `past > 0` and `past` earlier values are known,
///      `|f_{k−past} − f_k| / max(|f_k|, 1) < delta`.
/// 2. Direction `d = −H_k·g` from the two-loop recursion. While the history
///    is empty `d = −g` and the first trial step is `1/‖g‖`; afterwards it
///    is `1`.
/// 3. Line search along `d`. Any failure ends the run with that error.
/// 4. Store `(s, y)` unless `y·s ≤ 0`.
///
/// Reaching `max_iter` iterations is a normal, non-converged outcome.
#[derive(Debug, Clone)]
pub struct Lbfgs<L: LossFunction> {
    pub base: BaseOptimizer<L>,
    pub options: LbfgsOptions,
    searcher: LineSearcher,
}

impl<L: LossFunction> Lbfgs<L> {
    /// Build the optimizer and its line-search strategy.
    ///
    /// # Errors
    /// Any configuration error from [`LbfgsOptions::validate`].
    pub fn new(
        x0: Theta, loss: L, opts: OptimizerOptions, options: LbfgsOptions,
    ) -> OptResult<Self> {
        options.validate()?;
        let searcher = options.line_search.build(options.params)?;
        Ok(Self { base: BaseOptimizer::new(x0, loss, opts), options, searcher })
    }

    pub fn line_searcher(&self) -> &LineSearcher {
        &self.searcher
    }

    /// Minimize the loss over `(x, y)` starting from `x0`.
    ///
    /// # Errors
    /// - `EmptyData` / `DimensionMismatch` before the first evaluation.
    /// - Line-search failures (`NonDescentDirection`, `StepOutOfBounds`,
    ///   `LineSearchExhausted`) and loss errors, as raised.
    pub fn optimize(&self, x: &Features, y: &Targets) -> OptResult<OptimOutcome> {
        self.base.check_problem(x.view(), y.view())?;
        let opts = &self.base.opts;
        let counter = EvalCounter::new();
        let problem = LossAdapter::new(&self.base.loss, x.view(), y.view(), &counter);

        let mut w = self.base.x0.clone();
        let mut fx = problem.cost(&w)?;
        let mut g = problem.gradient(&w)?;
        let mut history = LbfgsHistory::new(self.options.mem_size);
        let mut window = PastObjectiveWindow::new(self.options.past);
        let mut trace = vec![fx];
        let mut iterations = 0;

        let mut converged = gradient_converged(&w, &g, opts.tol);
        window.push(fx);

        while !converged && iterations < opts.max_iter {
            let d = history.direction(&g);
            let step = if history.is_empty() { 1.0 / g.l2_norm() } else { 1.0 };
            let start = LineSearchStart { x: &w, fx, grad: &g, direction: &d, step };
            let found = self.searcher.search(&problem, &start)?;
            iterations += 1;

            let s = &found.x - &w;
            let y_diff = &found.grad - &g;
            if !history.push(s, y_diff) {
                log::debug!("lbfgs: iter {iterations}, skipped pair with y·s <= 0");
            }
            w = found.x;
            fx = found.fx;
            g = found.grad;
            trace.push(fx);

            if opts.verbose {
                log::info!(
                    "lbfgs: iter {iterations}, f = {fx:.6e}, |w| = {:.6e}, α = {:.3e} ({} trials)",
                    w.l2_norm(),
                    found.step,
                    found.trials
                );
            }

            converged = gradient_converged(&w, &g, opts.tol);
            if !converged {
                if let Some(rate) = window.relative_decrease(fx) {
                    converged = rate < self.options.delta;
                }
            }
            window.push(fx);
        }

        let termination = if converged {
            TerminationStatus::Terminated(TerminationReason::SolverConverged)
        } else {
            TerminationStatus::Terminated(TerminationReason::MaxItersReached)
        };
        OptimOutcome::new(w, fx, termination, iterations, counter.to_map(), Some(&g), trace)
    }
}

fn gradient_converged(w: &Theta, g: &Grad, tol: f64) -> bool {
    g.l2_norm() <= tol * w.l2_norm().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        line_search::{LineSearchCondition, LineSearchParams, LineSearchPolicy},
        loss::{LeastSquares, LogLoss},
    };
    use approx::assert_abs_diff_eq;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Convergence on a small least-squares problem under both policies.
    // - Immediate convergence at a stationary start.
    // - Budget exhaustion reported as a normal outcome.
    // - The relative-decrease stopping rule, isolated from the gradient test.
    // - Shape validation before any evaluation.
    // -------------------------------------------------------------------------

    fn regression() -> (Features, Targets, Theta) {
        let x = array![[1.0, 0.0], [0.0, 3.0], [1.0, 1.0], [2.0, -1.0]];
        let w_true = array![0.5, -2.0];
        let y = x.dot(&w_true);
        (x, y, w_true)
    }

    #[test]
    // Purpose
    // -------
    // L-BFGS recovers exact least-squares weights with either policy.
    //
    // Given
    // -----
    // - Noiseless `y = X·w*` with a full-rank 4×2 design.
    // - Backtracking/Armijo and bracketing/Wolfe configurations.
    //
    // Expect
    // ------
    // - Converged outcome with `theta_hat ≈ w*` and a non-increasing trace.
    fn recovers_least_squares_solution_with_both_policies() {
        // Arrange
        let (x, y, w_true) = regression();
        let opts = OptimizerOptions::new(200, 1e-8, false, false).unwrap();
        let configs = [
            LbfgsOptions::default(),
            LbfgsOptions {
                line_search: LineSearchPolicy::Bracketing,
                params: LineSearchParams::with_condition(LineSearchCondition::Wolfe),
                ..Default::default()
            },
        ];

        for lbfgs in configs {
            let solver = Lbfgs::new(Array1::zeros(2), LeastSquares, opts, lbfgs).unwrap();

            // Act
            let out = solver.optimize(&x, &y).expect("lbfgs should succeed");

            // Assert
            assert!(out.converged, "{:?} did not converge", lbfgs.line_search);
            assert_abs_diff_eq!(out.theta_hat[0], w_true[0], epsilon = 1e-4);
            assert_abs_diff_eq!(out.theta_hat[1], w_true[1], epsilon = 1e-4);
            assert!(out.trace.windows(2).all(|p| p[1] <= p[0]));
            assert_eq!(out.trace.len(), out.iterations + 1);
            assert!(out.fn_evals["gradient_count"] >= out.iterations as u64);
        }
    }

    #[test]
    // Purpose
    // -------
    // A start with zero gradient converges before any iteration.
    fn stationary_start_converges_immediately() {
        let (x, y, w_true) = regression();
        let opts = OptimizerOptions::default();
        let solver = Lbfgs::new(w_true.clone(), LeastSquares, opts, Default::default()).unwrap();

        let out = solver.optimize(&x, &y).unwrap();

        assert!(out.converged);
        assert_eq!(out.iterations, 0);
        assert_eq!(out.theta_hat, w_true);
        assert_eq!(out.fn_evals["cost_count"], 1);
    }

    #[test]
    // Purpose
    // -------
    // Running out of iterations is not an error.
    fn budget_exhaustion_is_a_normal_outcome() {
        let (x, y, _) = regression();
        let opts = OptimizerOptions::new(1, 1e-12, false, false).unwrap();
        let lbfgs = LbfgsOptions { past: 0, ..Default::default() };
        let solver = Lbfgs::new(Array1::zeros(2), LeastSquares, opts, lbfgs).unwrap();

        let out = solver.optimize(&x, &y).unwrap();

        assert!(!out.converged);
        assert_eq!(out.iterations, 1);
        assert_eq!(
            out.termination,
            TerminationStatus::Terminated(TerminationReason::MaxItersReached)
        );
        assert!(out.trace[1] < out.trace[0]);
    }

    #[test]
    // Purpose
    // -------
    // Mismatched shapes fail before the loss is touched; bad options fail at
    // construction.
    fn rejects_bad_shapes_and_options() {
        let (x, y, _) = regression();
        let opts = OptimizerOptions::default();
        let solver = Lbfgs::new(Array1::zeros(3), LeastSquares, opts, Default::default()).unwrap();
        let bad_mem = LbfgsOptions { mem_size: 0, ..Default::default() };

        let shape_err = solver.optimize(&x, &y).unwrap_err();
        let mem_err = Lbfgs::new(Array1::zeros(2), LeastSquares, opts, bad_mem).unwrap_err();

        assert!(matches!(shape_err, OptError::DimensionMismatch { what: "parameters", .. }));
        assert!(mem_err.is_configuration_error());
    }

    #[test]
    // Purpose
    // -------
    // The `past`/`delta` rule stops a run on its own, at the first iteration
    // where the objective has stalled, and never fires when `past = 0`.
    //
    // Given
    // -----
    // - Unregularized `LogLoss` on four separable rows: the infimum `0` is
    //   never attained, so the loss keeps decreasing.
    // - `tol = 1e-300`, which the gradient test cannot reach.
    // - `past = 3, delta = 1e-2` versus `past = 0`, both with 60 iterations.
    //
    // Expect
    // ------
    // - With the window: converged before the budget; the relative decrease
    //   over the last 3 iterations is below `delta`, and at no earlier
    //   iteration.
    // - Without it: `MaxItersReached` after all 60 iterations, at a lower loss.
    fn relative_decrease_stops_a_stalled_run() {
        // Arrange
        let x = array![[1.0, 0.5], [2.0, -0.3], [-1.0, 0.2], [-1.5, -0.4]];
        let y = array![1.0, 1.0, 0.0, 0.0];
        let opts = OptimizerOptions::new(60, 1e-300, false, false).unwrap();
        let windowed = LbfgsOptions { past: 3, delta: 1e-2, ..Default::default() };
        let unwindowed = LbfgsOptions { past: 0, ..windowed };
        let stalled = |trace: &[f64], k: usize| {
            (trace[k - 3] - trace[k]).abs() / trace[k].abs().max(1.0) < 1e-2
        };

        // Act
        let early = Lbfgs::new(Array1::zeros(2), LogLoss::new(), opts, windowed)
            .unwrap()
            .optimize(&x, &y)
            .expect("windowed run should succeed");
        let full = Lbfgs::new(Array1::zeros(2), LogLoss::new(), opts, unwindowed)
            .unwrap()
            .optimize(&x, &y)
            .expect("unwindowed run should succeed");

        // Assert
        let k = early.iterations;
        assert!(early.converged);
        assert!(k >= 3 && k < 60, "stopped after {k} iterations");
        let trace = early.trace.as_slice();
        assert!(stalled(trace, k));
        assert!((3..k).all(|j| !stalled(trace, j)));
        assert!(early.grad_norm.unwrap() > 0.0);

        assert!(!full.converged);
        assert_eq!(full.iterations, 60);
        assert_eq!(full.status, "MaxItersReached");
        assert!(full.value < early.value);
    }
}
