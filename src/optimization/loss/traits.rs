//! The loss-function contract consumed by every optimizer.
//!
//! Implementors evaluate a scalar loss and (optionally) its gradient at a
//! parameter vector `w`, given a sample matrix `X` and targets `y`. Both
//! methods must be pure: the optimizers call them repeatedly, on full data
//! and on mini-batch views, without synchronization.
use ndarray::{ArrayView1, ArrayView2};

use crate::optimization::{
    errors::{OptError, OptResult},
    types::{Cost, Grad, Theta},
};

/// User-implemented loss interface.
///
/// Required:
/// - `evaluate(X, y, w) -> OptResult<Cost>`: total loss over the given rows.
///
/// Optional:
/// - `gradient(X, y, w) -> OptResult<Grad>`: analytic gradient, same length
///   as `w` and consistent with `evaluate`. If not implemented, the loss
///   adapter falls back to finite differences of `evaluate`.
///
/// Shape agreement between `X`, `y` and `w` is validated once by the
/// optimizers before the first call.
pub trait LossFunction {
    fn evaluate(&self, x: ArrayView2<f64>, y: ArrayView1<f64>, w: &Theta) -> OptResult<Cost>;

    fn gradient(&self, _x: ArrayView2<f64>, _y: ArrayView1<f64>, _w: &Theta) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

impl<L: LossFunction + ?Sized> LossFunction for &L {
    fn evaluate(&self, x: ArrayView2<f64>, y: ArrayView1<f64>, w: &Theta) -> OptResult<Cost> {
        (**self).evaluate(x, y, w)
    }

    fn gradient(&self, x: ArrayView2<f64>, y: ArrayView1<f64>, w: &Theta) -> OptResult<Grad> {
        (**self).gradient(x, y, w)
    }
}
