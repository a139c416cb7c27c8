//! base — shared optimizer configuration, state and result type.
//!
//! Purpose
//! -------
//! Hold what every optimizer in this crate has in common: the starting
//! point, the loss handle, the iteration budget and tolerance, the shuffle
//! and verbosity flags, and the normalized [`OptimOutcome`] each run returns.
//!
//! Key behaviors
//! -------------
//! - [`OptimizerOptions::new`] validates `max_iter` and `tol` once, at
//!   construction; nothing is re-checked per iteration.
//! - [`BaseOptimizer`] is plain storage. Concrete optimizers
//!   ([`crate::optimization::lbfgs::Lbfgs`], [`crate::optimization::sgd::Sgd`],
//!   [`crate::optimization::sgd::Scd`]) embed it and add their own options.
//! - [`OptimOutcome::new`] validates the estimate and final value and maps
//!   argmin's `TerminationStatus` onto `(converged, status)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `max_iter > 0`, `tol` finite and `> 0` for any constructed
//!   [`OptimizerOptions`].
//! - Only `TerminationReason::SolverConverged` counts as converged; running
//!   out of iterations is a normal, non-converged outcome.
//!
//! Conventions
//! -----------
//! - `seed = None` seeds shuffling from OS entropy; `Some(s)` makes every run
//!   with the same data reproducible.
//!
//! Testing notes
//! -------------
//! - Unit tests cover option validation and outcome construction; the
//!   optimizers exercise the rest.
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use ndarray::{ArrayView1, ArrayView2};
use rand::{SeedableRng, rngs::StdRng};

use crate::optimization::{
    errors::OptResult,
    loss::LossFunction,
    types::{DEFAULT_MAX_ITER, DEFAULT_TOL, FnEvalMap, Grad, Theta},
    validation::{validate_problem, validate_theta_hat, validate_value, verify_max_iter, verify_tol},
};

/// Options shared by every optimizer.
///
/// Fields:
/// - `max_iter`: outer iteration budget (L-BFGS iterations, SGD epochs, SCD
///   coordinate steps).
/// - `tol`: convergence tolerance; its meaning is optimizer-specific.
/// - `shuffle`: jointly permute the rows of `(X, y)` every outer iteration
///   (SGD and SCD only).
/// - `verbose`: emit `log::info!` progress records.
/// - `seed`: optional seed for the shuffling RNG.
///
/// Default:
/// `max_iter = 100`, `tol = 1e-5`, `shuffle = true`, `verbose = false`,
/// `seed = None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerOptions {
    pub max_iter: usize,
    pub tol: f64,
    pub shuffle: bool,
    pub verbose: bool,
    pub seed: Option<u64>,
}

impl OptimizerOptions {
    /// Create validated options with no fixed seed.
    ///
    /// # Errors
    /// - `OptError::InvalidMaxIter` if `max_iter == 0`.
    /// - `OptError::InvalidTolerance` if `tol` is non-finite or `<= 0`.
    pub fn new(max_iter: usize, tol: f64, shuffle: bool, verbose: bool) -> OptResult<Self> {
        verify_max_iter(max_iter)?;
        verify_tol(tol)?;
        Ok(Self { max_iter, tol, shuffle, verbose, seed: None })
    }

    /// Fix the shuffling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fresh RNG for one run.
    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOL,
            shuffle: true,
            verbose: false,
            seed: None,
        }
    }
}

/// Starting point, loss and shared options of an optimizer.
#[derive(Debug, Clone)]
pub struct BaseOptimizer<L: LossFunction> {
    pub x0: Theta,
    pub loss: L,
    pub opts: OptimizerOptions,
}

impl<L: LossFunction> BaseOptimizer<L> {
    pub fn new(x0: Theta, loss: L, opts: OptimizerOptions) -> Self {
        Self { x0, loss, opts }
    }

    /// Number of parameters being optimized.
    pub fn dim(&self) -> usize {
        self.x0.len()
    }

    /// Check that `x`, `y` and the starting point agree in shape.
    ///
    /// # Errors
    /// `EmptyData` or `DimensionMismatch`, see
    /// [`crate::optimization::validation::validate_problem`].
    pub fn check_problem(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> OptResult<()> {
        validate_problem(x, y, &self.x0)
    }
}

/// Normalized result of an optimizer run.
///
/// - `theta_hat`: final parameter vector.
/// - `value`: objective at `theta_hat` (for SGD the last average epoch loss,
///   for SCD the L1-regularized objective).
/// - `converged`: `true` only if the optimizer's own stopping rule fired.
/// - `status`: human-readable termination status.
/// - `termination`: argmin termination status.
/// - `iterations`: outer iterations performed.
/// - `fn_evals`: `"cost_count"` / `"gradient_count"` totals.
/// - `grad_norm`: `‖g‖₂` of the last gradient, if one was computed.
/// - `trace`: objective value recorded after each outer iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub termination: TerminationStatus,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
    pub trace: Vec<f64>,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`].
    ///
    /// # Errors
    /// - `InvalidThetaHat` if any entry of `theta_hat` is non-finite.
    /// - `NonFiniteCost` if `value` is non-finite.
    pub fn new(
        theta_hat: Theta, value: f64, termination: TerminationStatus, iterations: usize,
        fn_evals: FnEvalMap, grad: Option<&Grad>, trace: Vec<f64>,
    ) -> OptResult<Self> {
        validate_theta_hat(&theta_hat)?;
        validate_value(value)?;
        let converged =
            termination == TerminationStatus::Terminated(TerminationReason::SolverConverged);
        let status = match &termination {
            TerminationStatus::NotTerminated => "Not terminated".to_string(),
            TerminationStatus::Terminated(reason) => format!("{reason:?}"),
        };
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self {
            theta_hat,
            value,
            converged,
            status,
            termination,
            iterations,
            fn_evals,
            grad_norm,
            trace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{errors::OptError, loss::LeastSquares};
    use ndarray::{Array1, Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Option validation and defaults.
    // - Reproducible seeding.
    // - Outcome construction from argmin termination statuses.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Invalid budgets and tolerances are rejected at construction.
    fn options_validate_budget_and_tolerance() {
        assert!(OptimizerOptions::new(0, 1e-5, true, false).unwrap_err().is_configuration_error());
        assert!(matches!(
            OptimizerOptions::new(10, -1.0, true, false),
            Err(OptError::InvalidTolerance { .. })
        ));
        let opts = OptimizerOptions::new(10, 1e-3, false, true).unwrap();
        assert_eq!(opts.seed, None);
        assert!(opts.verbose && !opts.shuffle);

        let default = OptimizerOptions::default();
        assert_eq!((default.max_iter, default.tol, default.shuffle), (100, 1e-5, true));
    }

    #[test]
    // Purpose
    // -------
    // A fixed seed yields identical RNG streams across runs.
    fn seeded_options_reproduce_rng() {
        use rand::Rng;

        let opts = OptimizerOptions::default().with_seed(7);
        let mut r1 = opts.rng();
        let mut r2 = opts.rng();

        let a: Vec<u64> = (0..4).map(|_| r1.gen()).collect();
        let b: Vec<u64> = (0..4).map(|_| r2.gen()).collect();

        assert_eq!(opts.seed, Some(7));
        assert_eq!(a, b);
    }

    #[test]
    // Purpose
    // -------
    // Shape checks run against the stored starting point.
    fn base_optimizer_checks_problem_shape() {
        let base = BaseOptimizer::new(Array1::zeros(2), LeastSquares, OptimizerOptions::default());
        let x = Array2::<f64>::zeros((4, 3));
        let y = Array1::<f64>::zeros(4);

        let err = base.check_problem(x.view(), y.view()).unwrap_err();

        assert_eq!(base.dim(), 2);
        assert_eq!(err, OptError::DimensionMismatch { what: "parameters", expected: 3, found: 2 });
    }

    #[test]
    // Purpose
    // -------
    // Only `SolverConverged` marks an outcome as converged, and non-finite
    // estimates are refused.
    //
    // Given
    // -----
    // - A converged status, a max-iterations status and a NaN estimate.
    //
    // Expect
    // ------
    // - `converged` true, then false with status `"MaxItersReached"`.
    // - `InvalidThetaHat` for the NaN estimate.
    fn outcome_maps_termination_and_validates() {
        // Arrange
        let done = TerminationStatus::Terminated(TerminationReason::SolverConverged);
        let budget = TerminationStatus::Terminated(TerminationReason::MaxItersReached);
        let g = array![3.0, 4.0];

        // Act
        let ok = OptimOutcome::new(
            array![1.0, 2.0], 0.5, done, 3, FnEvalMap::new(), Some(&g), vec![1.0, 0.5],
        )
        .unwrap();
        let capped =
            OptimOutcome::new(array![1.0], 0.5, budget, 100, FnEvalMap::new(), None, vec![]);
        let bad = OptimOutcome::new(
            array![f64::NAN],
            0.5,
            TerminationStatus::NotTerminated,
            0,
            FnEvalMap::new(),
            None,
            vec![],
        );

        // Assert
        assert!(ok.converged);
        assert_eq!(ok.grad_norm, Some(5.0));
        let capped = capped.unwrap();
        assert!(!capped.converged);
        assert_eq!(capped.status, "MaxItersReached");
        assert!(matches!(bad, Err(OptError::InvalidThetaHat { index: 0, .. })));
    }
}
