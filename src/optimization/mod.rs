//! optimization — gradient-based optimizers, line searches, and a unified
//! error surface.
//!
//! Purpose
//! -------
//! Fit parametric models by minimizing a user loss `f(X, y, w)` over the
//! parameter vector `w`. Callers implement [`loss::LossFunction`], pick an
//! optimizer and its options, and obtain the fitted parameters together with
//! diagnostics in an [`base::OptimOutcome`].
//!
//! Key behaviors
//! -------------
//! - [`lbfgs::Lbfgs`]: limited-memory quasi-Newton method driven by a
//!   [`line_search`] strategy chosen once at construction.
//! - [`sgd::Sgd`]: mini-batch SGD with learning-rate decay and vanilla or
//!   momentum updates.
//! - [`sgd::Scd`]: greedy coordinate descent for L1-regularized objectives.
//! - Configuration issues, shape mismatches, numerical failures and
//!   line-search failures are normalized into [`errors::OptError`] with the
//!   common alias [`errors::OptResult`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Options are validated when they are built; a constructed optimizer
//!   never fails for configuration reasons mid-run, except for a
//!   `batch_size` larger than the data, which is only known at run time.
//! - Shapes of `X`, `y` and `x0` are checked before the first loss call.
//! - Costs and gradients are finite whenever they reach an optimizer;
//!   violations surface as `OptError`, never as panics.
//!
//! Conventions
//! -----------
//! - `X` has one row per sample; `y` one entry per row; `w` one entry per
//!   column (see [`types`]).
//! - Running out of iterations is a normal outcome (`converged = false`),
//!   not an error.
//! - Progress is reported through the `log` facade at `info` level when
//!   `verbose` is set; line-search failures are logged at `debug` level
//!   before being returned.
//!
//! Downstream usage
//! ----------------
//! - Import the curated surface with `use rust_optim::optimization::prelude::*;`.
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule cover local behavior: option validation,
//!   line-search acceptance rules, the two-loop recursion, schedules and the
//!   coordinate step.
//! - `tests/integration_optimizers.rs` runs the optimizers end to end on
//!   quadratic, least-squares, Lasso and logistic problems.

pub mod base;
pub mod errors;
pub mod lbfgs;
pub mod line_search;
pub mod loss;
pub mod sgd;
pub mod types;
pub mod validation;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_optim::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::base::{BaseOptimizer, OptimOutcome, OptimizerOptions};
    pub use super::errors::{OptError, OptResult};
    pub use super::lbfgs::{Lbfgs, LbfgsHistory, LbfgsOptions, PastObjectiveWindow};
    pub use super::line_search::{
        Backtracking, Bracketing, LineSearch, LineSearchCondition, LineSearchOutcome,
        LineSearchParams, LineSearchPolicy, LineSearchStart, LineSearcher,
    };
    pub use super::loss::{
        EvalCounter, LeastSquares, LogLoss, LossAdapter, LossFunction, MeanSquaredError,
    };
    pub use super::sgd::{
        DecayPolicy, LearningRate, Scd, ScdOptions, Sgd, SgdOptions, UpdatePolicy,
    };
    pub use super::types::{Cost, Features, Grad, Targets, Theta};
}
