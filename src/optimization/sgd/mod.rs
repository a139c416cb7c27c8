//! sgd — first-order stochastic optimizers.
//!
//! Purpose
//! -------
//! Fit parameters by cheap, repeated passes over (possibly shuffled) data
//! instead of line searches over the full objective.
//!
//! Key behaviors
//! -------------
//! - [`Sgd`]: mini-batch stochastic gradient descent with a learning-rate
//!   schedule ([`LearningRate`], [`DecayPolicy`]) and an update rule
//!   ([`UpdatePolicy`]: vanilla or momentum).
//! - [`Scd`]: greedy coordinate descent for `f(w) + λ‖w‖₁`, moving one
//!   coordinate per iteration by its soft-thresholded proximal step.
//!
//! Invariants & assumptions
//! ------------------------
//! - When `shuffle` is set, rows of `X` and entries of `y` are permuted
//!   together through [`crate::utils::shuffle_data`]; the caller's data is
//!   never modified.
//! - SGD visits `⌊n / batch_size⌋` full batches per epoch; the remaining
//!   `n mod batch_size` rows are skipped for that epoch (with shuffling they
//!   differ from epoch to epoch).
//! - SCD never increases the regularized objective when `rho` upper-bounds
//!   the coordinate-wise curvature of the loss.
//!
//! Conventions
//! -----------
//! - Learning-rate schedules are indexed by epoch.
//! - `OptimOutcome::value` is the last average batch loss for SGD and the
//!   regularized objective for SCD.

pub mod minibatch;
pub mod scd;
pub mod schedule;

pub use self::minibatch::{Sgd, SgdOptions};
pub use self::scd::{CoordinateStep, Scd, ScdOptions, coordinate_eta, select_coordinate};
pub use self::schedule::{DecayPolicy, LearningRate, UpdatePolicy, Updater};
