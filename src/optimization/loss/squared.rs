//! Squared-error losses for linear models `ŷ = X·w`.
//!
//! - [`LeastSquares`]: `½‖Xw − y‖²`, gradient `Xᵀ(Xw − y)`. Its Hessian is
//!   `XᵀX`, so the per-coordinate curvature is the squared column norm; this
//!   is the natural loss for coordinate descent with an explicit `rho`.
//! - [`MeanSquaredError`]: `‖Xw − y‖² / (2n)`, gradient `Xᵀ(Xw − y) / n`.
//!   Scale-free in the number of rows, which keeps mini-batch losses
//!   comparable across batch sizes.
use ndarray::{ArrayView1, ArrayView2};

use crate::optimization::{
    errors::OptResult,
    loss::traits::LossFunction,
    types::{Cost, Grad, Theta},
};

/// `½‖Xw − y‖²`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LeastSquares;

impl LossFunction for LeastSquares {
    fn evaluate(&self, x: ArrayView2<f64>, y: ArrayView1<f64>, w: &Theta) -> OptResult<Cost> {
        let residual = x.dot(w) - y;
        Ok(0.5 * residual.dot(&residual))
    }

    fn gradient(&self, x: ArrayView2<f64>, y: ArrayView1<f64>, w: &Theta) -> OptResult<Grad> {
        let residual = x.dot(w) - y;
        Ok(x.t().dot(&residual))
    }
}

/// `‖Xw − y‖² / (2n)` with `n` the number of rows passed in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanSquaredError;

impl LossFunction for MeanSquaredError {
    fn evaluate(&self, x: ArrayView2<f64>, y: ArrayView1<f64>, w: &Theta) -> OptResult<Cost> {
        let n = x.nrows().max(1) as f64;
        let residual = x.dot(w) - y;
        Ok(residual.dot(&residual) / (2.0 * n))
    }

    fn gradient(&self, x: ArrayView2<f64>, y: ArrayView1<f64>, w: &Theta) -> OptResult<Grad> {
        let n = x.nrows().max(1) as f64;
        let residual = x.dot(w) - y;
        Ok(x.t().dot(&residual) / n)
    }
}
