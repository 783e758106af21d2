//! bounded — Brent maximization of a scalar log-likelihood on a closed interval.
//!
//! Purpose
//! -------
//! Provide the bounded scalar counterpart of [`maximize`](super::loglik_optimizer::maximize)
//! for one-parameter models whose parameter lives on a fixed interval
//! `[lower, upper]` (the PAR/random mixture weight α lives on `[0.01, 0.99]`).
//! Brent's method needs no gradient and never evaluates the endpoints
//! themselves.
//!
//! Key behaviors
//! -------------
//! - Convert `ℓ(x)` into the Argmin cost `c(x) = -ℓ(x)` through a private
//!   adapter, rejecting non-finite values as [`OptError::NonFiniteCost`].
//! - Run `argmin::solver::brent::BrentOpt` with validated [`BoundedOptions`].
//! - Normalize the result into [`ScalarOutcome`]; non-convergence becomes
//!   [`OptError::NotConverged`] so callers never report an unconverged
//!   estimate.
//!
//! Conventions
//! -----------
//! - The objective is always a log-likelihood to maximize; the outcome's
//!   `value` is `ℓ(x̂)`, not the cost.
//! - This module does no logging; callers decide how to report failures.
use argmin::{
    core::{CostFunction, Error, Executor, State},
    solver::brent::BrentOpt,
};

use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        FnEvalMap,
        traits::termination_summary,
        validation::{validate_value, verify_tol_x},
    },
};

/// Log-likelihood of a single bounded parameter.
pub trait ScalarLogLikelihood {
    type Data;

    /// Evaluate `ℓ(x)`; `x` is always inside the configured bounds.
    fn value(&self, x: f64, data: &Self::Data) -> OptResult<f64>;
}

/// Validated configuration of the bounded scalar solver.
///
/// Fields
/// ------
/// - `lower`, `upper`: search interval, finite with `lower < upper`.
/// - `tol_x`: absolute argument tolerance handed to Brent (`t`); the
///   relative part is `√ε` of `f64`.
/// - `max_iter`: iteration cap; reaching it is a failure, not a result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedOptions {
    pub lower: f64,
    pub upper: f64,
    pub tol_x: f64,
    pub max_iter: usize,
}

impl BoundedOptions {
    /// # Errors
    /// - [`OptError::InvalidBounds`] for non-finite or unordered bounds.
    /// - [`OptError::InvalidTolX`] for a non-positive or non-finite tolerance.
    /// - [`OptError::InvalidMaxIter`] when `max_iter == 0`.
    pub fn new(lower: f64, upper: f64, tol_x: f64, max_iter: usize) -> OptResult<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(OptError::InvalidBounds {
                lower,
                upper,
                reason: "Bounds must be finite.",
            });
        }
        if lower >= upper {
            return Err(OptError::InvalidBounds {
                lower,
                upper,
                reason: "Lower bound must be strictly below the upper bound.",
            });
        }
        verify_tol_x(tol_x)?;
        if max_iter == 0 {
            return Err(OptError::InvalidMaxIter {
                max_iter,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        Ok(Self { lower, upper, tol_x, max_iter })
    }
}

/// Result of [`maximize_bounded`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarOutcome {
    /// Maximizer found inside `[lower, upper]`.
    pub x_hat: f64,
    /// `ℓ(x̂)`.
    pub value: f64,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
}

struct ScalarAdapter<'a, F: ScalarLogLikelihood> {
    f: &'a F,
    data: &'a F::Data,
}

impl<'a, F: ScalarLogLikelihood> CostFunction for ScalarAdapter<'a, F> {
    type Param = f64;
    type Output = f64;

    fn cost(&self, x: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(*x, self.data)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(-output)
    }
}

/// Maximize `ℓ(x)` over `[opts.lower, opts.upper]` with Brent's method.
///
/// # Errors
/// - Any error raised by `f.value` (including non-finite values).
/// - [`OptError::NotConverged`] when the iteration cap is reached first.
/// - Outcome validation errors (missing or non-finite estimate).
pub fn maximize_bounded<F: ScalarLogLikelihood>(
    f: &F, data: &F::Data, opts: &BoundedOptions,
) -> OptResult<ScalarOutcome> {
    let problem = ScalarAdapter { f, data };
    let solver = BrentOpt::new(opts.lower, opts.upper).set_tolerance(f64::EPSILON.sqrt(), opts.tol_x);
    let max_iter = opts.max_iter as u64;
    let result = Executor::new(problem, solver).configure(|state| state.max_iters(max_iter)).run()?;

    let state = result.state();
    let (converged, status) = termination_summary(state.get_termination_status());
    let iterations = state.get_iter() as usize;
    if !converged {
        return Err(OptError::NotConverged { status, iterations });
    }
    let x_hat = match state.get_best_param() {
        Some(&x) if x.is_finite() => x,
        Some(&x) => {
            return Err(OptError::InvalidThetaHat {
                index: 0,
                value: x,
                reason: "Parameter estimates must be finite.",
            });
        }
        None => return Err(OptError::MissingThetaHat),
    };
    let value = -state.get_best_cost();
    validate_value(value)?;
    Ok(ScalarOutcome {
        x_hat,
        value,
        status,
        iterations,
        fn_evals: state.get_func_counts().clone(),
    })
}
