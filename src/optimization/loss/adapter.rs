//! Adapter that exposes a user `LossFunction` as an `argmin` problem.
//!
//! A [`LossAdapter`] binds a loss to one slice of data (`X`, `y`), so the
//! line searches and optimizers only ever see a function of `w`:
//!
//! - `CostFunction::cost` returns `loss.evaluate(X, y, w)`, rejecting
//!   non-finite values.
//! - `Gradient::gradient` returns the analytic gradient if the loss provides
//!   one, otherwise a finite-difference gradient of the cost.
//!
//! Every evaluation is counted in a shared [`EvalCounter`], so a run that
//! builds one adapter per mini-batch still reports totals.
use std::cell::{Cell, RefCell};

use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;
use ndarray::{ArrayView1, ArrayView2};

use crate::optimization::{
    errors::OptError,
    loss::traits::LossFunction,
    types::{Cost, FnEvalMap, Grad, Theta},
    validation::validate_grad,
};

/// Running totals of cost and gradient evaluations for one optimizer run.
#[derive(Debug, Default)]
pub struct EvalCounter {
    cost: Cell<u64>,
    gradient: Cell<u64>,
}

impl EvalCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cost_count(&self) -> u64 {
        self.cost.get()
    }

    pub fn gradient_count(&self) -> u64 {
        self.gradient.get()
    }

    /// Snapshot the counters under the keys reported in `OptimOutcome`.
    pub fn to_map(&self) -> FnEvalMap {
        let mut map = FnEvalMap::new();
        map.insert("cost_count".to_string(), self.cost_count());
        map.insert("gradient_count".to_string(), self.gradient_count());
        map
    }

    fn bump_cost(&self) {
        self.cost.set(self.cost.get() + 1);
    }

    fn bump_gradient(&self) {
        self.gradient.set(self.gradient.get() + 1);
    }
}

/// Bridges a user `LossFunction` and a data slice to `argmin`'s
/// `CostFunction` and `Gradient`.
#[derive(Debug)]
pub struct LossAdapter<'a, L: LossFunction> {
    pub loss: &'a L,
    pub x: ArrayView2<'a, f64>,
    pub y: ArrayView1<'a, f64>,
    counter: &'a EvalCounter,
}

impl<'a, L: LossFunction> LossAdapter<'a, L> {
    /// Bind `loss` to the rows `x` / `y`, counting evaluations in `counter`.
    pub fn new(
        loss: &'a L, x: ArrayView2<'a, f64>, y: ArrayView1<'a, f64>, counter: &'a EvalCounter,
    ) -> Self {
        Self { loss, x, y, counter }
    }
}

impl<'a, L: LossFunction> CostFunction for LossAdapter<'a, L> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the loss at `w`.
    ///
    /// # Errors
    /// - Propagates any `OptError` from the user's `evaluate`.
    /// - Returns `NonFiniteCost` if the value is `NaN` or infinite.
    fn cost(&self, w: &Self::Param) -> Result<Self::Output, Error> {
        self.counter.bump_cost();
        let output = self.loss.evaluate(self.x, self.y, w)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(output)
    }
}

impl<'a, L: LossFunction> Gradient for LossAdapter<'a, L> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the loss at `w`.
    ///
    /// Behavior:
    /// - If the loss implements `gradient`, it is validated and returned.
    /// - On `GradientNotImplemented`, a central-difference gradient of the
    ///   cost is computed; if any cost evaluation failed or the result is not
    ///   finite, the computation is retried once with forward differences.
    ///
    /// # Errors
    /// - Propagates user errors from `gradient` (other than
    ///   `GradientNotImplemented`).
    /// - Propagates any error raised by cost evaluations during FD.
    /// - Returns validation errors for wrong dimension or non-finite entries.
    fn gradient(&self, w: &Self::Param) -> Result<Self::Gradient, Error> {
        self.counter.bump_gradient();
        let dim = w.len();
        match self.loss.gradient(self.x, self.y, w) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(g)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |w: &Theta| -> f64 {
                    match self.cost(w) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                let fd_grad = w.central_diff(&cost_func);
                if closure_err.borrow().is_none() && validate_grad(&fd_grad, dim).is_ok() {
                    return Ok(fd_grad);
                }
                run_forward_diff(w, &cost_func, &closure_err)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Compute a forward-difference gradient of `func` at `w`, with error capture.
///
/// The FD closure can't return `Result`, so any error raised by `func` is
/// stored into `closure_err` and the closure returns `NaN`.
///
/// # Errors
/// Returns any error captured during evaluation of `func` or by validation
/// of the resulting gradient.
fn run_forward_diff<G: Fn(&Theta) -> f64>(
    w: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    closure_err.replace(None);
    let fd_grad = w.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, w.len())?;
    Ok(fd_grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array1, Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Cost evaluation, non-finite rejection and counting.
    // - Validation of analytic gradients returned by the loss.
    // - Finite-difference fallback when no gradient is implemented.
    // - Propagation of user errors through argmin's boxed error.
    // -------------------------------------------------------------------------

    /// `Σ_i (x_i·w − y_i)²` with no analytic gradient.
    struct SquaredNoGrad;

    impl LossFunction for SquaredNoGrad {
        fn evaluate(&self, x: ArrayView2<f64>, y: ArrayView1<f64>, w: &Theta) -> OptResult<Cost> {
            let r = x.dot(w) - y;
            Ok(r.dot(&r))
        }
    }

    /// Always fails in `evaluate`, reports a bad-length gradient.
    struct Broken;

    impl LossFunction for Broken {
        fn evaluate(&self, _: ArrayView2<f64>, _: ArrayView1<f64>, _: &Theta) -> OptResult<Cost> {
            Ok(f64::NAN)
        }

        fn gradient(&self, _: ArrayView2<f64>, _: ArrayView1<f64>, _: &Theta) -> OptResult<Grad> {
            Ok(Array1::zeros(5))
        }
    }

    fn data() -> (Array2<f64>, Array1<f64>) {
        (array![[1.0, 0.0], [0.0, 2.0], [1.0, 1.0]], array![1.0, 2.0, 0.0])
    }

    #[test]
    // Purpose
    // -------
    // Finite differences stand in for a missing analytic gradient.
    //
    // Given
    // -----
    // - `SquaredNoGrad` on a 3×2 design; exact gradient `2·Xᵀ(Xw − y)`.
    //
    // Expect
    // ------
    // - FD gradient matches the exact gradient to ~1e-5.
    // - One gradient evaluation and several cost evaluations are counted.
    fn gradient_falls_back_to_finite_differences() {
        // Arrange
        let (x, y) = data();
        let counter = EvalCounter::new();
        let adapter = LossAdapter::new(&SquaredNoGrad, x.view(), y.view(), &counter);
        let w = array![0.5, -0.25];
        let exact = 2.0 * x.t().dot(&(x.dot(&w) - &y));

        // Act
        let g = adapter.gradient(&w).expect("FD gradient should succeed");

        // Assert
        for (a, b) in g.iter().zip(exact.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-5);
        }
        assert_eq!(counter.gradient_count(), 1);
        assert!(counter.cost_count() >= 2);
    }

    #[test]
    // Purpose
    // -------
    // Non-finite costs and malformed gradients surface as `OptError`s after
    // crossing argmin's error type.
    fn broken_loss_errors_are_recovered() {
        // Arrange
        let (x, y) = data();
        let counter = EvalCounter::new();
        let adapter = LossAdapter::new(&Broken, x.view(), y.view(), &counter);
        let w = array![0.0, 0.0];

        // Act
        let cost_err = OptError::from(adapter.cost(&w).expect_err("NaN cost must fail"));
        let grad_err = OptError::from(adapter.gradient(&w).expect_err("bad gradient must fail"));

        // Assert
        assert!(matches!(cost_err, OptError::NonFiniteCost { .. }));
        assert_eq!(grad_err, OptError::GradientDimMismatch { expected: 2, found: 5 });
        let map = counter.to_map();
        assert_eq!(map["cost_count"], 1);
        assert_eq!(map["gradient_count"], 1);
    }
}
