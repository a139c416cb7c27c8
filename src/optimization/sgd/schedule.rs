//! Learning-rate schedules and parameter update rules for SGD.
//!
//! - [`DecayPolicy`] / [`LearningRate`]: `rate(step)` for the epoch index
//!   `step`, starting at `alpha` for `step = 0`.
//! - [`UpdatePolicy`] / [`Updater`]: how a gradient moves `w`. An `Updater`
//!   owns the per-run state (the momentum velocity) and is created fresh for
//!   every `optimize` call.
use crate::optimization::{
    errors::{OptError, OptResult},
    types::{Grad, Theta},
};

/// Learning-rate decay schedule.
///
/// Variants:
/// - `Constant`: `α_t = α`.
/// - `Step { drop, epochs_per_drop }`: `α_t = α·drop^⌊t / epochs_per_drop⌋`,
///   with `drop ∈ (0, 1]` and `epochs_per_drop > 0`.
/// - `Exponential { k }`: `α_t = α·exp(−k·t)`, with `k >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DecayPolicy {
    #[default]
    Constant,
    Step { drop: f64, epochs_per_drop: usize },
    Exponential { k: f64 },
}

impl DecayPolicy {
    /// # Errors
    /// `InvalidLearningRate` naming the offending schedule parameter.
    pub fn validate(&self) -> OptResult<()> {
        match *self {
            DecayPolicy::Constant => Ok(()),
            DecayPolicy::Step { drop, epochs_per_drop } => {
                if !(drop > 0.0 && drop <= 1.0) {
                    return Err(OptError::InvalidLearningRate {
                        param: "drop",
                        value: drop,
                        reason: "Step decay factor must lie in (0, 1].",
                    });
                }
                if epochs_per_drop == 0 {
                    return Err(OptError::InvalidLearningRate {
                        param: "epochs_per_drop",
                        value: 0.0,
                        reason: "Step decay period must be at least one epoch.",
                    });
                }
                Ok(())
            }
            DecayPolicy::Exponential { k } => {
                if !(k.is_finite() && k >= 0.0) {
                    return Err(OptError::InvalidLearningRate {
                        param: "k",
                        value: k,
                        reason: "Exponential decay rate must be finite and non-negative.",
                    });
                }
                Ok(())
            }
        }
    }

    /// Multiplier applied to the base rate at `step`.
    pub fn factor(&self, step: usize) -> f64 {
        match *self {
            DecayPolicy::Constant => 1.0,
            DecayPolicy::Step { drop, epochs_per_drop } => {
                drop.powi((step / epochs_per_drop.max(1)) as i32)
            }
            DecayPolicy::Exponential { k } => (-k * step as f64).exp(),
        }
    }
}

/// Base learning rate together with its decay schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningRate {
    pub alpha: f64,
    pub decay: DecayPolicy,
}

impl LearningRate {
    /// # Errors
    /// `InvalidLearningRate` if `alpha` is not finite and `> 0`, or if the
    /// schedule is invalid.
    pub fn new(alpha: f64, decay: DecayPolicy) -> OptResult<Self> {
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(OptError::InvalidLearningRate {
                param: "alpha",
                value: alpha,
                reason: "Learning rate must be finite and positive.",
            });
        }
        decay.validate()?;
        Ok(Self { alpha, decay })
    }

    /// Learning rate at step index `step`.
    pub fn rate(&self, step: usize) -> f64 {
        self.alpha * self.decay.factor(step)
    }
}

/// Rule that turns a gradient into a parameter update.
///
/// Variants:
/// - `Vanilla`: `w ← w − α·g`.
/// - `Momentum { momentum }`: `v ← μ·v + g`, `w ← w − α·v`, with
///   `μ ∈ [0, 1)` and `v₀ = 0`. `μ = 0` is identical to `Vanilla`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum UpdatePolicy {
    #[default]
    Vanilla,
    Momentum { momentum: f64 },
}

impl UpdatePolicy {
    /// # Errors
    /// `InvalidMomentum` if the coefficient is outside `[0, 1)`.
    pub fn validate(&self) -> OptResult<()> {
        match *self {
            UpdatePolicy::Vanilla => Ok(()),
            UpdatePolicy::Momentum { momentum } => {
                if !(0.0..1.0).contains(&momentum) {
                    return Err(OptError::InvalidMomentum { momentum });
                }
                Ok(())
            }
        }
    }

    /// Fresh updater with zeroed state.
    pub fn updater(&self) -> Updater {
        Updater { policy: *self, velocity: None }
    }
}

/// Stateful application of an [`UpdatePolicy`] during one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Updater {
    policy: UpdatePolicy,
    velocity: Option<Grad>,
}

impl Updater {
    pub fn policy(&self) -> UpdatePolicy {
        self.policy
    }

    /// Move `w` in place using `grad` and learning rate `rate`.
    pub fn update(&mut self, w: &mut Theta, grad: &Grad, rate: f64) {
        match self.policy {
            UpdatePolicy::Vanilla => w.scaled_add(-rate, grad),
            UpdatePolicy::Momentum { momentum } => {
                let v = self.velocity.get_or_insert_with(|| Grad::zeros(grad.len()));
                *v *= momentum;
                *v += grad;
                w.scaled_add(-rate, &*v);
            }
        }
    }
}
