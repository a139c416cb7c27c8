//! errors — unified error surface for the optimizer core.
//!
//! Every fallible entry point in [`crate::optimization`] returns
//! [`OptResult<T>`]. Option validation failures, shape mismatches, numerical
//! breakdowns, line-search failures, and errors raised by user losses are all
//! normalized into [`OptError`]. Errors that cross `argmin`'s boxed
//! `argmin::core::Error` (e.g. from inside the loss adapter) are recovered
//! intact by the `From` conversion at the bottom of this file.
use argmin::core::Error;

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Options ----
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// Convergence tolerance needs to be positive and finite.
    InvalidTolerance {
        tol: f64,
        reason: &'static str,
    },
    /// Unknown line-search policy name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },
    /// Unknown line-search condition name.
    InvalidLineSearchCondition {
        name: String,
        reason: &'static str,
    },
    /// A numeric line-search parameter is out of range.
    InvalidLineSearchParam {
        param: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// The line search was started with a non-positive step.
    InvalidInitialStep {
        step: f64,
    },
    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },
    /// Relative-decrease threshold needs to be finite and non-negative.
    InvalidDelta {
        delta: f64,
        reason: &'static str,
    },
    /// Mini-batch size must lie in `1..=num_samples`.
    InvalidBatchSize {
        batch_size: usize,
        num_samples: usize,
        reason: &'static str,
    },
    /// Learning-rate or schedule parameter is out of range.
    InvalidLearningRate {
        param: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// Momentum coefficient must lie in `[0, 1)`.
    InvalidMomentum {
        momentum: f64,
    },
    /// Coordinate-descent curvature estimate must be positive and finite.
    InvalidRho {
        rho: f64,
    },
    /// L1 strength must be finite and non-negative.
    InvalidLambda {
        lambda: f64,
    },

    // ---- Data ----
    /// Feature matrix has no rows.
    EmptyData,
    /// Shapes of `X`, `y` or the parameter vector disagree.
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    // ---- Loss function ----
    /// Implies that FD should be used
    GradientNotImplemented,
    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },
    /// Gradient elements need to be finite
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },
    /// Loss function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    // ---- Line search ----
    /// The search direction does not decrease the objective.
    NonDescentDirection {
        directional_derivative: f64,
    },
    /// The trial step left `[min_step, max_step]`.
    StepOutOfBounds {
        step: f64,
        min_step: f64,
        max_step: f64,
    },
    /// The trial budget `max_linesearch` was used up.
    LineSearchExhausted {
        trials: usize,
        step: f64,
    },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- Backend ----
    /// Any error raised through argmin that is not an `OptError`.
    BackendError {
        text: String,
    },
}

impl OptError {
    /// `true` for errors caused by invalid options, detected before any
    /// iteration runs.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            OptError::InvalidMaxIter { .. }
                | OptError::InvalidTolerance { .. }
                | OptError::InvalidLineSearch { .. }
                | OptError::InvalidLineSearchCondition { .. }
                | OptError::InvalidLineSearchParam { .. }
                | OptError::InvalidInitialStep { .. }
                | OptError::InvalidLBFGSMem { .. }
                | OptError::InvalidDelta { .. }
                | OptError::InvalidBatchSize { .. }
                | OptError::InvalidLearningRate { .. }
                | OptError::InvalidMomentum { .. }
                | OptError::InvalidRho { .. }
                | OptError::InvalidLambda { .. }
        )
    }

    /// `true` for the terminal line-search failures.
    pub fn is_line_search_failure(&self) -> bool {
        matches!(
            self,
            OptError::NonDescentDirection { .. }
                | OptError::StepOutOfBounds { .. }
                | OptError::LineSearchExhausted { .. }
        )
    }
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Options ----
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::InvalidTolerance { tol, reason } => {
                write!(f, "Invalid convergence tolerance {tol}: {reason}")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line search policy '{name}': {reason}")
            }
            OptError::InvalidLineSearchCondition { name, reason } => {
                write!(f, "Invalid line search condition '{name}': {reason}")
            }
            OptError::InvalidLineSearchParam { param, value, reason } => {
                write!(f, "Invalid line search parameter {param} = {value}: {reason}")
            }
            OptError::InvalidInitialStep { step } => {
                write!(f, "Invalid initial line search step {step}: must be positive")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }
            OptError::InvalidDelta { delta, reason } => {
                write!(f, "Invalid relative decrease threshold {delta}: {reason}")
            }
            OptError::InvalidBatchSize { batch_size, num_samples, reason } => {
                write!(f, "Invalid batch size {batch_size} for {num_samples} samples: {reason}")
            }
            OptError::InvalidLearningRate { param, value, reason } => {
                write!(f, "Invalid learning rate parameter {param} = {value}: {reason}")
            }
            OptError::InvalidMomentum { momentum } => {
                write!(f, "Invalid momentum {momentum}: must lie in [0, 1)")
            }
            OptError::InvalidRho { rho } => {
                write!(f, "Invalid curvature estimate rho = {rho}: must be finite and > 0")
            }
            OptError::InvalidLambda { lambda } => {
                write!(f, "Invalid L1 strength lambda = {lambda}: must be finite and >= 0")
            }

            // ---- Data ----
            OptError::EmptyData => {
                write!(f, "Feature matrix has no samples")
            }
            OptError::DimensionMismatch { what, expected, found } => {
                write!(f, "Dimension mismatch for {what}: expected {expected}, found {found}")
            }

            // ---- Loss function ----
            OptError::GradientNotImplemented => {
                write!(f, "Analytic gradient not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite loss value: {value}")
            }

            // ---- Line search ----
            OptError::NonDescentDirection { directional_derivative } => {
                write!(
                    f,
                    "Search direction is not a descent direction: d·g = {directional_derivative}"
                )
            }
            OptError::StepOutOfBounds { step, min_step, max_step } => {
                write!(f, "Line search step {step} left the allowed range [{min_step}, {max_step}]")
            }
            OptError::LineSearchExhausted { trials, step } => {
                write!(f, "Line search gave up after {trials} trials (last step {step})")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }

            // ---- Backend ----
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        match original_err.downcast::<OptError>() {
            Ok(opt_err) => opt_err,
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}
