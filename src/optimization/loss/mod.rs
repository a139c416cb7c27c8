//! loss — the loss-function boundary shared by all optimizers.
//!
//! Purpose
//! -------
//! Define the contract between optimizers and the model code that supplies a
//! scalar loss and its gradient, and bridge that contract into `argmin`'s
//! `CostFunction` / `Gradient` traits so line searches can be written once.
//!
//! Key behaviors
//! -------------
//! - [`LossFunction`]: `evaluate(X, y, w)` and optional `gradient(X, y, w)`.
//! - [`LossAdapter`]: binds a loss to one data slice, validates outputs,
//!   falls back to finite differences, and counts evaluations in an
//!   [`EvalCounter`].
//! - Reference losses ([`LeastSquares`], [`MeanSquaredError`], [`LogLoss`])
//!   for linear regression and logistic-style classifiers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Losses are pure and deterministic; they may be called on full data or on
//!   mini-batch views in any order.
//! - Costs and gradients leaving the adapter are finite and correctly sized;
//!   violations surface as [`crate::optimization::errors::OptError`].

pub mod adapter;
pub mod logistic;
pub mod squared;
pub mod traits;

pub use self::adapter::{EvalCounter, LossAdapter};
pub use self::logistic::LogLoss;
pub use self::squared::{LeastSquares, MeanSquaredError};
pub use self::traits::LossFunction;
