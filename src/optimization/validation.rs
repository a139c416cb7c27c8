//! Validation helpers for the optimizer core.
//!
//! This module centralizes common consistency checks used across the
//! optimizers:
//!
//! - **Option checks**: [`verify_max_iter`], [`verify_tol`].
//! - **Shape checks**: [`validate_problem`] ensures `X`, `y` and the
//!   starting point agree before the first iteration.
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries.
//! - **Estimates**: [`validate_theta_hat`] and [`validate_value`] guard the
//!   values returned to the caller.
//!
//! These helpers standardize error reporting by returning domain-specific
//! [`OptError`] variants.
use ndarray::{ArrayView1, ArrayView2};

use crate::optimization::{
    errors::{OptError, OptResult},
    types::{Grad, Theta},
};

/// Validate the iteration budget.
///
/// # Errors
/// Returns [`OptError::InvalidMaxIter`] if `max_iter == 0`.
pub fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate a convergence tolerance.
///
/// The value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidTolerance`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidTolerance { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidTolerance { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Validate the shapes of a problem before optimization starts.
///
/// Checks:
/// - `x` has at least one row,
/// - `y.len() == x.nrows()`,
/// - `theta.len() == x.ncols()`.
///
/// # Errors
/// - [`OptError::EmptyData`] if `x` has no rows.
/// - [`OptError::DimensionMismatch`] naming the offending operand.
pub fn validate_problem(x: ArrayView2<f64>, y: ArrayView1<f64>, theta: &Theta) -> OptResult<()> {
    if x.nrows() == 0 {
        return Err(OptError::EmptyData);
    }
    if y.len() != x.nrows() {
        return Err(OptError::DimensionMismatch {
            what: "targets",
            expected: x.nrows(),
            found: y.len(),
        });
    }
    if theta.len() != x.ncols() {
        return Err(OptError::DimensionMismatch {
            what: "parameters",
            expected: x.ncols(),
            found: theta.len(),
        });
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate an estimated parameter vector (`theta_hat`).
///
/// # Errors
/// Returns [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: &Theta) -> OptResult<()> {
    for (index, &value) in theta_hat.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidThetaHat {
                index,
                value,
                reason: "Parameter estimates must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate that a scalar objective value is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2, array};

    #[test]
    // Purpose
    // -------
    // Tolerances must be finite and strictly positive.
    fn verify_tol_rejects_zero_negative_and_nan() {
        assert!(verify_tol(1e-8).is_ok());
        assert!(matches!(verify_tol(0.0), Err(OptError::InvalidTolerance { .. })));
        assert!(matches!(verify_tol(-1.0), Err(OptError::InvalidTolerance { .. })));
        assert!(matches!(verify_tol(f64::NAN), Err(OptError::InvalidTolerance { .. })));
    }

    #[test]
    // Purpose
    // -------
    // A zero iteration budget is a configuration error.
    fn verify_max_iter_rejects_zero() {
        let err = verify_max_iter(0).expect_err("zero budget must fail");
        assert!(err.is_configuration_error());
        assert!(verify_max_iter(1).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Shape checks report which operand disagrees.
    //
    // Given
    // -----
    // - `X` of shape (3, 2), `y` of length 2, `theta` of length 2.
    // - The same `X` with a length-3 `y` and a length-3 `theta`.
    // - An `X` with zero rows.
    //
    // Expect
    // ------
    // - `DimensionMismatch { what: "targets" }`, then
    //   `DimensionMismatch { what: "parameters" }`, then `EmptyData`.
    fn validate_problem_names_the_mismatched_operand() {
        // Arrange
        let x = Array2::<f64>::zeros((3, 2));
        let empty = Array2::<f64>::zeros((0, 2));
        let short_y = Array1::<f64>::zeros(2);
        let y = Array1::<f64>::zeros(3);
        let theta = Array1::<f64>::zeros(2);
        let wide_theta = Array1::<f64>::zeros(3);

        // Act / Assert
        assert!(matches!(
            validate_problem(x.view(), short_y.view(), &theta),
            Err(OptError::DimensionMismatch { what: "targets", expected: 3, found: 2 })
        ));
        assert!(matches!(
            validate_problem(x.view(), y.view(), &wide_theta),
            Err(OptError::DimensionMismatch { what: "parameters", expected: 2, found: 3 })
        ));
        assert_eq!(
            validate_problem(empty.view(), Array1::<f64>::zeros(0).view(), &theta),
            Err(OptError::EmptyData)
        );
        assert!(validate_problem(x.view(), y.view(), &theta).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Gradients with the wrong length or non-finite entries are rejected.
    fn validate_grad_checks_length_and_finiteness() {
        let good = array![1.0, -2.0];
        let bad = array![1.0, f64::INFINITY];

        assert!(validate_grad(&good, 2).is_ok());
        assert!(matches!(
            validate_grad(&good, 3),
            Err(OptError::GradientDimMismatch { expected: 3, found: 2 })
        ));
        assert!(matches!(validate_grad(&bad, 2), Err(OptError::InvalidGradient { index: 1, .. })));
    }

    #[test]
    // Purpose
    // -------
    // Non-finite estimates and values never reach the caller.
    fn validate_estimates_reject_non_finite() {
        assert!(validate_theta_hat(&array![0.0, 1.0]).is_ok());
        assert!(matches!(
            validate_theta_hat(&array![0.0, f64::NAN]),
            Err(OptError::InvalidThetaHat { index: 1, .. })
        ));
        assert!(validate_value(-3.0).is_ok());
        assert!(matches!(validate_value(f64::NAN), Err(OptError::NonFiniteCost { .. })));
    }
}
