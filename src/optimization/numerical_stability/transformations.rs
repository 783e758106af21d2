//! Numerical stability utilities.
//!
//! Guarded versions of the logistic map, its inverse and softplus, used to
//! move the rank-citation shape `β ∈ (0, 1)` in and out of the unconstrained
//! optimizer coordinate `θ ∈ ℝ`. Naïve `1 / (1 + exp(-x))` overflows `exp`
//! for large negative `x`; the branches below never exponentiate a large
//! positive number.
//!
//! # Provided items
//! - [`LOGIT_EPS`]: clamp applied before taking a logit so that `0` and `1`
//!   map to large but finite reals.
//! - [`safe_logistic(x)`]: `1 / (1 + exp(-x))`, mapping ℝ → (0, 1).
//! - [`safe_logit(p)`]: `ln(p / (1 - p))`, mapping (0, 1) → ℝ.
//! - [`safe_softplus(x)`]: `ln(1 + exp(x))`; `-safe_softplus(x)` is
//!   `ln(1 - σ(x))` without rounding `1 - σ(x)` to zero.

/// Distance kept from the endpoints of `(0, 1)` before applying a logit.
pub const LOGIT_EPS: f64 = 1e-12;

/// Numerically stable logistic function `σ(x) = 1 / (1 + exp(-x))`.
///
/// Splits on the sign of `x` so the exponent is always non-positive:
///
/// - `x ≥ 0`: `1 / (1 + exp(-x))`.
/// - `x < 0`: `exp(x) / (1 + exp(x))`.
///
/// # Returns
/// - `σ(x)` in `[0, 1]`; strictly inside for moderate `|x|`.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Stable logit `ln(p / (1 - p))`, the inverse of [`safe_logistic`].
///
/// `p` is clamped to `[LOGIT_EPS, 1 - LOGIT_EPS]` first, so boundary inputs
/// produce finite starting points instead of `±∞`.
pub fn safe_logit(p: f64) -> f64 {
    let p = p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    p.ln() - (-p).ln_1p()
}

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// - For `x > 20`, `softplus(x) ≈ x` to `f64` precision.
/// - Otherwise `ln1p(exp(x))`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // `safe_logistic` matches the naïve formula on a moderate grid and stays
    // finite in the tails.
    fn safe_logistic_matches_naive_formula_and_saturates() {
        for &x in &[-10.0, -2.5, -0.1, 0.0, 0.3, 4.0, 15.0] {
            let naive = 1.0 / (1.0 + f64::exp(-x));
            assert_relative_eq!(safe_logistic(x), naive, max_relative = 1e-12);
        }
        assert_eq!(safe_logistic(-1000.0), 0.0);
        assert_eq!(safe_logistic(1000.0), 1.0);
        assert_relative_eq!(safe_logistic(-3.0) + safe_logistic(3.0), 1.0, epsilon = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // `safe_logit` inverts `safe_logistic` and clamps the endpoints.
    //
    // Given
    // -----
    // - Probabilities spread over (0, 1) plus the endpoints 0 and 1.
    //
    // Expect
    // ------
    // - Round trip recovers `p`; endpoints give finite values of opposite sign.
    fn safe_logit_inverts_logistic_and_clamps_endpoints() {
        for &p in &[0.01, 0.25, 0.5, 0.8, 0.99] {
            assert_relative_eq!(safe_logistic(safe_logit(p)), p, max_relative = 1e-12);
        }
        assert!(safe_logit(0.0).is_finite() && safe_logit(0.0) < -20.0);
        assert!(safe_logit(1.0).is_finite() && safe_logit(1.0) > 20.0);
    }

    #[test]
    // Purpose
    // -------
    // `-softplus(x)` is `ln(1 - σ(x))` and stays finite where `1 - σ(x)`
    // rounds to zero.
    fn softplus_gives_finite_log_complement() {
        for &x in &[-8.0, -0.5, 0.0, 2.0, 10.0] {
            assert_relative_eq!(-safe_softplus(x), (1.0 - safe_logistic(x)).ln(), max_relative = 1e-9);
        }
        assert_eq!(safe_softplus(500.0), 500.0);
        assert!(safe_softplus(-800.0) >= 0.0);
    }
}
