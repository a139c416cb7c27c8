//! Logistic (binary cross-entropy) loss for linear classifiers.
//!
//! For labels `y_i ∈ {0, 1}` and margins `z_i = x_i·w`:
//!
//! `L(w) = (1/n) Σ_i [softplus(z_i) − y_i·z_i] + (l2/2)‖w‖²`
//!
//! with gradient `(1/n) Xᵀ(σ(z) − y) + l2·w`. `softplus` is evaluated as
//! `max(z, 0) + ln(1 + e^{−|z|})`, which never overflows.
use ndarray::{ArrayView1, ArrayView2};

use crate::optimization::{
    errors::OptResult,
    loss::traits::LossFunction,
    types::{Cost, Grad, Theta},
};

/// Mean logistic loss with an optional ridge penalty.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogLoss {
    /// Ridge strength; `0.0` disables the penalty.
    pub l2: f64,
}

impl LogLoss {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `(l2/2)‖w‖²` penalty, which keeps the minimizer finite on
    /// linearly separable data.
    pub fn with_l2(l2: f64) -> Self {
        Self { l2 }
    }
}

impl LossFunction for LogLoss {
    fn evaluate(&self, x: ArrayView2<f64>, y: ArrayView1<f64>, w: &Theta) -> OptResult<Cost> {
        let n = x.nrows().max(1) as f64;
        let z = x.dot(w);
        let data_term: f64 =
            z.iter().zip(y.iter()).map(|(&zi, &yi)| softplus(zi) - yi * zi).sum::<f64>() / n;
        Ok(data_term + 0.5 * self.l2 * w.dot(w))
    }

    fn gradient(&self, x: ArrayView2<f64>, y: ArrayView1<f64>, w: &Theta) -> OptResult<Grad> {
        let n = x.nrows().max(1) as f64;
        let mut residual = x.dot(w);
        residual.zip_mut_with(&y, |zi, &yi| *zi = sigmoid(*zi) - yi);
        let mut grad = x.t().dot(&residual) / n;
        if self.l2 != 0.0 {
            grad.scaled_add(self.l2, w);
        }
        Ok(grad)
    }
}

fn softplus(z: f64) -> f64 {
    z.max(0.0) + (-z.abs()).exp().ln_1p()
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
