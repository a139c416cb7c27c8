//! Mini-batch stochastic gradient descent.
use argmin::core::{CostFunction, Gradient, TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use ndarray::s;

use crate::{
    optimization::{
        base::{BaseOptimizer, OptimOutcome, OptimizerOptions},
        errors::{OptError, OptResult},
        loss::{EvalCounter, LossAdapter, LossFunction},
        sgd::schedule::{DecayPolicy, LearningRate, UpdatePolicy},
        types::{Features, Grad, Targets, Theta},
    },
    utils::shuffle_data,
};

/// SGD-specific options.
///
/// Fields:
/// - `batch_size`: rows per mini-batch, `1..=num_samples` (checked when a
///   run starts, since `num_samples` is only known then).
/// - `alpha`: base learning rate, finite and `> 0`.
/// - `decay`: learning-rate schedule, indexed by epoch.
/// - `update`: parameter update rule.
///
/// Default:
/// `batch_size = 1`, `alpha = 1e-3`, constant rate, vanilla updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdOptions {
    pub batch_size: usize,
    pub alpha: f64,
    pub decay: DecayPolicy,
    pub update: UpdatePolicy,
}

impl SgdOptions {
    /// # Errors
    /// - `InvalidBatchSize` if `batch_size == 0`.
    /// - `InvalidLearningRate` / `InvalidMomentum` for bad rates or policies.
    pub fn new(
        batch_size: usize, alpha: f64, decay: DecayPolicy, update: UpdatePolicy,
    ) -> OptResult<Self> {
        let opts = Self { batch_size, alpha, decay, update };
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> OptResult<()> {
        if self.batch_size == 0 {
            return Err(OptError::InvalidBatchSize {
                batch_size: 0,
                num_samples: 0,
                reason: "Batch size must be greater than zero.",
            });
        }
        self.learning_rate()?;
        self.update.validate()
    }

    /// The validated learning-rate schedule.
    pub fn learning_rate(&self) -> OptResult<LearningRate> {
        LearningRate::new(self.alpha, self.decay)
    }
}

impl Default for SgdOptions {
    fn default() -> Self {
        Self {
            batch_size: 1,
            alpha: 1e-3,
            decay: DecayPolicy::Constant,
            update: UpdatePolicy::Vanilla,
        }
    }
}

/// Mini-batch SGD.
///
/// Each epoch:
/// 1. If `shuffle`, permute the rows of `(X, y)` jointly.
/// 2. Split into `n / batch_size` contiguous batches; trailing rows that do
///    not fill a batch are skipped for that epoch.
/// 3. For each batch: gradient at `w`, update `w`, then add the batch loss
///    at the updated `w`.
/// 4. Stop once `|L̄_t − L̄_{t−1}| < tol`, with `L̄` the average batch loss.
///    The first epoch has no predecessor and never stops the run.
#[derive(Debug, Clone)]
pub struct Sgd<L: LossFunction> {
    pub base: BaseOptimizer<L>,
    pub options: SgdOptions,
}

impl<L: LossFunction> Sgd<L> {
    /// # Errors
    /// Configuration errors from [`SgdOptions::validate`].
    pub fn new(x0: Theta, loss: L, opts: OptimizerOptions, options: SgdOptions) -> OptResult<Self> {
        options.validate()?;
        Ok(Self { base: BaseOptimizer::new(x0, loss, opts), options })
    }

    /// Run SGD over `(x, y)` starting from `x0`.
    ///
    /// # Errors
    /// - `EmptyData` / `DimensionMismatch` for inconsistent shapes.
    /// - `InvalidBatchSize` if `batch_size > x.nrows()`.
    /// - Any error raised by the loss.
    pub fn optimize(&self, x: &Features, y: &Targets) -> OptResult<OptimOutcome> {
        self.base.check_problem(x.view(), y.view())?;
        let num_samples = x.nrows();
        let batch_size = self.options.batch_size;
        if batch_size > num_samples {
            return Err(OptError::InvalidBatchSize {
                batch_size,
                num_samples,
                reason: "Batch size cannot exceed the number of samples.",
            });
        }
        let num_batch = num_samples / batch_size;
        let opts = &self.base.opts;
        let rate = self.options.learning_rate()?;
        let mut updater = self.options.update.updater();
        let mut rng = opts.rng();
        let counter = EvalCounter::new();

        let mut w = self.base.x0.clone();
        let mut last_grad: Option<Grad> = None;
        let mut previous: Option<f64> = None;
        let mut average = f64::NAN;
        let mut trace = Vec::with_capacity(opts.max_iter);
        let mut converged = false;
        let mut epochs = 0;

        for epoch in 0..opts.max_iter {
            let shuffled;
            let (xe, ye) = if opts.shuffle {
                shuffled = shuffle_data(x.view(), y.view(), &mut rng)?;
                (shuffled.0.view(), shuffled.1.view())
            } else {
                (x.view(), y.view())
            };
            let alpha = rate.rate(epoch);

            let mut total = 0.0;
            for batch in 0..num_batch {
                let begin = batch * batch_size;
                let end = begin + batch_size;
                let problem = LossAdapter::new(
                    &self.base.loss,
                    xe.slice(s![begin..end, ..]),
                    ye.slice(s![begin..end]),
                    &counter,
                );
                let grad = problem.gradient(&w)?;
                updater.update(&mut w, &grad, alpha);
                total += problem.cost(&w)?;
                last_grad = Some(grad);
            }
            average = total / num_batch as f64;
            trace.push(average);
            epochs = epoch + 1;

            if opts.verbose && epoch % 20 == 0 {
                log::info!(
                    "sgd: epoch {epoch}, loss = {average:.6e}, |w| = {:.6e}, rate = {alpha:.3e}",
                    w.l2_norm()
                );
            }

            if let Some(prev) = previous {
                if (average - prev).abs() < opts.tol {
                    converged = true;
                    break;
                }
            }
            previous = Some(average);
        }

        let termination = if converged {
            TerminationStatus::Terminated(TerminationReason::SolverConverged)
        } else {
            TerminationStatus::Terminated(TerminationReason::MaxItersReached)
        };
        OptimOutcome::new(
            w,
            average,
            termination,
            epochs,
            counter.to_map(),
            last_grad.as_ref(),
            trace,
        )
    }
}
