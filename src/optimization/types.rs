//! optimization::types — shared numeric aliases and default constants.
//!
//! Purpose
//! -------
//! Centralize the numeric types used by every optimizer so the rest of the
//! code stays agnostic to `ndarray` generics and can evolve in one place.
//!
//! Conventions
//! -----------
//! - `Features` is row-major in meaning: one row per sample, one column per
//!   feature. `Targets` has one entry per row of `Features`.
//! - `Theta` and `Grad` have length `Features.ncols()`.
//! - Default constants mirror the option defaults documented on
//!   [`crate::optimization::base::OptimizerOptions`],
//!   [`crate::optimization::lbfgs::LbfgsOptions`] and
//!   [`crate::optimization::line_search::LineSearchParams`].
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Parameter vector being optimized.
pub type Theta = Array1<f64>;

/// Gradient of the loss, same shape as [`Theta`].
pub type Grad = Array1<f64>;

/// Scalar objective value.
pub type Cost = f64;

/// Sample matrix `X`, shape `(n_samples, n_features)`.
pub type Features = Array2<f64>;

/// Target vector `y`, length `n_samples`.
pub type Targets = Array1<f64>;

/// Function-evaluation counters keyed by name (`"cost_count"`,
/// `"gradient_count"`).
pub type FnEvalMap = HashMap<String, u64>;

/// Default iteration budget.
pub const DEFAULT_MAX_ITER: usize = 100;

/// Default convergence tolerance.
pub const DEFAULT_TOL: f64 = 1e-5;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 8;

/// Default look-back window for the relative-decrease test.
pub const DEFAULT_PAST: usize = 3;

/// Default relative-decrease threshold.
pub const DEFAULT_DELTA: f64 = 1e-6;
