//! Validation helpers for log-likelihood optimization.
//!
//! Consistency checks shared by the L-BFGS path and the bounded scalar
//! solver:
//!
//! - **Tolerance checks**: [`verify_tol_grad`], [`verify_tol_cost`],
//!   [`verify_tol_x`] ensure numeric tolerances are finite and strictly
//!   positive when provided.
//! - **Starting points**: [`validate_theta0`] rejects non-finite initial
//!   guesses before any solver is built.
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries.
//! - **Outcomes**: [`validate_theta_hat`] and [`validate_value`] guard the
//!   values a solver hands back.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Grad, Theta},
};

/// Validate the optional gradient‐norm tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost‐change tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the argument tolerance of the bounded scalar solver.
///
/// # Errors
/// Returns [`OptError::InvalidTolX`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_x(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidTolX { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidTolX { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Validate an initial parameter vector.
///
/// # Errors
/// Returns [`OptError::InvalidThetaInput`] for the first non-finite entry.
pub fn validate_theta0(theta: &Theta) -> OptResult<()> {
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidThetaInput { index, value });
        }
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

/// Validate and unwrap an estimated parameter vector (`theta_hat`).
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Parameter estimates must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// Validate that a scalar log-likelihood value is finite.
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
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Tolerance checks accept `None` and positive finite values and reject
    // zero, negative and non-finite values.
    fn tolerance_checks_accept_positive_and_reject_degenerate_values() {
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(1e-6)).is_ok());
        assert!(matches!(verify_tol_grad(Some(0.0)), Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(
            verify_tol_cost(Some(f64::INFINITY)),
            Err(OptError::InvalidTolCost { .. })
        ));
        assert!(matches!(verify_tol_x(-1e-3), Err(OptError::InvalidTolX { .. })));
        assert!(verify_tol_x(1e-8).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `validate_grad` reports dimension mismatches before finiteness.
    //
    // Given
    // -----
    // - A length-2 gradient checked against `dim = 1`.
    // - A length-1 gradient holding `NaN`.
    //
    // Expect
    // ------
    // - `GradientDimMismatch { expected: 1, found: 2 }` for the first.
    // - `InvalidGradient { index: 0, .. }` for the second.
    fn validate_grad_reports_dimension_then_finiteness() {
        assert_eq!(
            validate_grad(&array![0.0, 1.0], 1),
            Err(OptError::GradientDimMismatch { expected: 1, found: 2 })
        );
        assert!(matches!(
            validate_grad(&array![f64::NAN], 1),
            Err(OptError::InvalidGradient { index: 0, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Missing or non-finite estimates never pass as a fitted parameter.
    fn validate_theta_hat_rejects_missing_and_non_finite() {
        assert_eq!(validate_theta_hat(None), Err(OptError::MissingThetaHat));
        assert!(matches!(
            validate_theta_hat(Some(array![f64::NEG_INFINITY])),
            Err(OptError::InvalidThetaHat { index: 0, .. })
        ));
        assert_eq!(validate_theta_hat(Some(array![0.25])), Ok(array![0.25]));
    }

    #[test]
    // Purpose
    // -------
    // Initial guesses are screened for finiteness, reporting the first bad
    // coordinate.
    fn validate_theta0_reports_first_non_finite_coordinate() {
        assert!(validate_theta0(&array![0.0, -3.0]).is_ok());
        assert!(matches!(
            validate_theta0(&array![0.0, f64::NAN]),
            Err(OptError::InvalidThetaInput { index: 1, .. })
        ));
    }
}
