//! Configuration of the rank-citation baseline fit.
use crate::{
    baseline::errors::{BaselineError, BaselineResult},
    optimization::{loglik_optimizer::MLEOptions, numerical_stability::safe_logit},
};

/// Options for [`fit_rank_law`](super::rank_law::fit_rank_law).
///
/// Fields
/// ------
/// - `mle_opts`: L-BFGS configuration (tolerances, line search, memory).
/// - `theta0`: starting point in the unconstrained coordinate,
///   `β₀ = logistic(θ₀)`.
///
/// Default: `MLEOptions::default()` and `θ₀ = 0` (`β₀ = 0.5`).
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineOptions {
    pub mle_opts: MLEOptions,
    pub theta0: f64,
}

impl BaselineOptions {
    /// Build options from an initial shape `beta0 ∈ (0, 1)`.
    ///
    /// Errors
    /// ------
    /// - [`BaselineError::InvalidInitialShape`] when `beta0` is not strictly
    ///   inside `(0, 1)`.
    pub fn new(mle_opts: MLEOptions, beta0: f64) -> BaselineResult<Self> {
        if !(beta0 > 0.0 && beta0 < 1.0) {
            return Err(BaselineError::InvalidInitialShape { beta0 });
        }
        Ok(Self { mle_opts, theta0: safe_logit(beta0) })
    }
}

impl Default for BaselineOptions {
    fn default() -> Self {
        Self { mle_opts: MLEOptions::default(), theta0: 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::numerical_stability::safe_logistic;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // The initial shape maps to θ₀ through the logit and must lie in (0, 1).
    fn baseline_options_map_initial_shape_to_theta() {
        let opts = BaselineOptions::new(MLEOptions::default(), 0.2).expect("valid options");

        assert_relative_eq!(safe_logistic(opts.theta0), 0.2, max_relative = 1e-12);
        assert_eq!(
            BaselineOptions::new(MLEOptions::default(), 1.0),
            Err(BaselineError::InvalidInitialShape { beta0: 1.0 })
        );
        assert!(BaselineOptions::new(MLEOptions::default(), f64::NAN).is_err());
    }
}
