//! Greedy stochastic coordinate descent for L1-regularized objectives.
//!
//! Minimizes `F(w) = f(w) + λ‖w‖₁` where `f` is the loss. Each iteration
//! computes `g = ∇f(w)` and, for every coordinate `j`, the proximal step
//!
//! ```text
//! η_j = S_{λ/ρ}(w_j − g_j/ρ) − w_j,     S_τ(z) = sign(z)·max(|z| − τ, 0)
//! ```
//!
//! together with the descent it predicts from the quadratic model
//! `f(w + ηe_j) ≈ f(w) + η g_j + ρη²/2`:
//!
//! ```text
//! D_j = −η_j g_j − ρη_j²/2 − λ|w_j + η_j| + λ|w_j|
//! ```
//!
//! Only the coordinate with the largest `D_j` is moved (lowest index on
//! ties). When `ρ` bounds the coordinate-wise curvature of `f`, `F` never
//! increases.
use argmin::core::{CostFunction, Gradient, TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;

use crate::{
    optimization::{
        base::{BaseOptimizer, OptimOutcome, OptimizerOptions},
        errors::{OptError, OptResult},
        loss::{EvalCounter, LossAdapter, LossFunction},
        types::{Features, Grad, Targets, Theta},
    },
    utils::shuffle_data,
};

/// SCD-specific options.
///
/// Fields:
/// - `rho`: curvature estimate, finite and `> 0`; should upper-bound the
///   diagonal of the loss Hessian.
/// - `lambda`: L1 strength, finite and `>= 0`.
///
/// Default:
/// `rho = 1.0`, `lambda = 1e-3`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScdOptions {
    pub rho: f64,
    pub lambda: f64,
}

impl ScdOptions {
    /// # Errors
    /// `InvalidRho` / `InvalidLambda` for out-of-range values.
    pub fn new(rho: f64, lambda: f64) -> OptResult<Self> {
        let opts = Self { rho, lambda };
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> OptResult<()> {
        if !(self.rho.is_finite() && self.rho > 0.0) {
            return Err(OptError::InvalidRho { rho: self.rho });
        }
        if !(self.lambda.is_finite() && self.lambda >= 0.0) {
            return Err(OptError::InvalidLambda { lambda: self.lambda });
        }
        Ok(())
    }
}

impl Default for ScdOptions {
    fn default() -> Self {
        Self { rho: 1.0, lambda: 1e-3 }
    }
}

/// Candidate move for a single coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateStep {
    pub index: usize,
    pub eta: f64,
    pub predicted_descent: f64,
}

/// Proximal step `η` for one coordinate with weight `w_j` and partial
/// derivative `g_j`.
pub fn coordinate_eta(w_j: f64, g_j: f64, rho: f64, lambda: f64) -> f64 {
    let z = w_j - g_j / rho;
    let threshold = lambda / rho;
    if z > threshold {
        -g_j / rho - threshold
    } else if z < -threshold {
        -g_j / rho + threshold
    } else {
        -w_j
    }
}

/// Evaluate every coordinate and return the one with the largest predicted
/// descent. `None` only for an empty parameter vector.
pub fn select_coordinate(w: &Theta, g: &Grad, rho: f64, lambda: f64) -> Option<CoordinateStep> {
    let mut best: Option<CoordinateStep> = None;
    for (index, (&w_j, &g_j)) in w.iter().zip(g.iter()).enumerate() {
        let eta = coordinate_eta(w_j, g_j, rho, lambda);
        let predicted_descent = -eta * g_j - 0.5 * rho * eta * eta - lambda * (w_j + eta).abs()
            + lambda * w_j.abs();
        if best.map_or(true, |b| predicted_descent > b.predicted_descent) {
            best = Some(CoordinateStep { index, eta, predicted_descent });
        }
    }
    best
}

fn l1_norm(w: &Theta) -> f64 {
    w.iter().map(|v| v.abs()).sum()
}

/// Greedy coordinate descent on `f(w) + λ‖w‖₁`.
///
/// Each iteration optionally shuffles `(X, y)`, computes the full gradient,
/// picks the best coordinate (see the module docs) and applies its step. The
/// run converges when the best predicted descent is `<= tol`; the step is
/// not applied in that case.
#[derive(Debug, Clone)]
pub struct Scd<L: LossFunction> {
    pub base: BaseOptimizer<L>,
    pub options: ScdOptions,
}

impl<L: LossFunction> Scd<L> {
    /// # Errors
    /// Configuration errors from [`ScdOptions::validate`].
    pub fn new(x0: Theta, loss: L, opts: OptimizerOptions, options: ScdOptions) -> OptResult<Self> {
        options.validate()?;
        Ok(Self { base: BaseOptimizer::new(x0, loss, opts), options })
    }

    /// Run coordinate descent over `(x, y)` starting from `x0`.
    ///
    /// `trace[0]` is the regularized objective at `x0`; one entry follows
    /// per applied coordinate step.
    ///
    /// # Errors
    /// - `EmptyData` / `DimensionMismatch` for inconsistent shapes.
    /// - Any error raised by the loss.
    pub fn optimize(&self, x: &Features, y: &Targets) -> OptResult<OptimOutcome> {
        self.base.check_problem(x.view(), y.view())?;
        let opts = &self.base.opts;
        let ScdOptions { rho, lambda } = self.options;
        let mut rng = opts.rng();
        let counter = EvalCounter::new();
        let full = LossAdapter::new(&self.base.loss, x.view(), y.view(), &counter);

        let mut w = self.base.x0.clone();
        let mut objective = full.cost(&w)? + lambda * l1_norm(&w);
        let mut trace = vec![objective];
        let mut last_grad: Option<Grad> = None;
        let mut converged = false;
        let mut iterations = 0;

        for iter in 0..opts.max_iter {
            let shuffled;
            let problem = if opts.shuffle {
                shuffled = shuffle_data(x.view(), y.view(), &mut rng)?;
                LossAdapter::new(&self.base.loss, shuffled.0.view(), shuffled.1.view(), &counter)
            } else {
                LossAdapter::new(&self.base.loss, x.view(), y.view(), &counter)
            };
            let grad = problem.gradient(&w)?;
            let Some(best) = select_coordinate(&w, &grad, rho, lambda) else {
                break;
            };
            last_grad = Some(grad);
            if best.predicted_descent <= opts.tol {
                converged = true;
                break;
            }

            w[best.index] += best.eta;
            iterations = iter + 1;
            objective = problem.cost(&w)? + lambda * l1_norm(&w);
            trace.push(objective);

            if opts.verbose && iter % 100 == 0 {
                log::info!(
                    "scd: iter {iter}, objective = {objective:.6e}, |w|_1 = {:.6e}, coord = {}",
                    l1_norm(&w),
                    best.index
                );
            }
        }

        let termination = if converged {
            TerminationStatus::Terminated(TerminationReason::SolverConverged)
        } else {
            TerminationStatus::Terminated(TerminationReason::MaxItersReached)
        };
        if opts.verbose {
            log::info!(
                "scd: finished after {iterations} steps, |g| = {:.6e}",
                last_grad.as_ref().map_or(f64::NAN, |g| g.l2_norm())
            );
        }
        OptimOutcome::new(
            w,
            objective,
            termination,
            iterations,
            counter.to_map(),
            last_grad.as_ref(),
            trace,
        )
    }
}
