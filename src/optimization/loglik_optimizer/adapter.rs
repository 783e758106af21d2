//! Adapter that exposes a user `LogLikelihood` as an `argmin` problem.
//!
//! Maximizing `ℓ(θ)` becomes minimizing `c(θ) = -ℓ(θ)`. Analytic gradients are
//! negated; when a model has none, the **cost** closure is finite-differenced,
//! so that branch needs no sign flip.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a user `LogLikelihood` to `argmin`'s `CostFunction` and `Gradient`.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

impl<'a, F: LogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate `c(θ) = -ℓ(θ)`, rejecting non-finite log-likelihoods.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta, self.data)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(-output)
    }
}

impl<'a, F: LogLikelihood> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Gradient of the cost at `θ`.
    ///
    /// - Analytic: validate the model's `∇ℓ(θ)` and return `-∇ℓ(θ)`.
    /// - Otherwise: central differences of the cost, retried with forward
    ///   differences if a cost evaluation failed or the central result is
    ///   not finite.
    ///
    /// The FD closure must return `f64`, so evaluation errors are parked in
    /// `closure_err` and surfaced after differencing.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |theta: &Theta| -> f64 {
                    match self.cost(theta) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                let fd_grad = theta.central_diff(&cost_func);
                if closure_err.borrow().is_some() {
                    return run_fd_diff(theta, &cost_func, &closure_err);
                }
                match validate_grad(&fd_grad, dim) {
                    Ok(()) => Ok(fd_grad),
                    Err(_) => run_fd_diff(theta, &cost_func, &closure_err),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Forward-difference gradient of `func` at `theta`, with error capture.
///
/// # Errors
/// Returns any error captured while evaluating `func`, or the validation
/// error of the resulting gradient.
fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use approx::assert_relative_eq;
    use ndarray::array;

    // ℓ(θ) = -(θ - 2)², analytic gradient available.
    struct Parabola;

    impl LogLikelihood for Parabola {
        type Data = ();

        fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
            Ok(-(theta[0] - 2.0).powi(2))
        }

        fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, _: &()) -> OptResult<Grad> {
            Ok(array![-2.0 * (theta[0] - 2.0)])
        }
    }

    // Same objective, gradient left to finite differences.
    struct ParabolaNoGrad;

    impl LogLikelihood for ParabolaNoGrad {
        type Data = ();

        fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
            Ok(-(theta[0] - 2.0).powi(2))
        }

        fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // The adapter negates both the value and the analytic gradient.
    //
    // Given
    // -----
    // - `ℓ(θ) = -(θ - 2)²` evaluated at `θ = 0`.
    //
    // Expect
    // ------
    // - cost = 4, cost gradient = -4.
    fn adapter_negates_value_and_analytic_gradient() {
        let adapter = ArgMinAdapter::new(&Parabola, &());
        let theta = array![0.0];

        assert_relative_eq!(adapter.cost(&theta).expect("finite cost"), 4.0);
        assert_relative_eq!(adapter.gradient(&theta).expect("gradient")[0], -4.0);
    }

    #[test]
    // Purpose
    // -------
    // Without an analytic gradient the finite-difference path reproduces
    // the cost gradient.
    fn adapter_falls_back_to_finite_differences() {
        let adapter = ArgMinAdapter::new(&ParabolaNoGrad, &());
        let theta = array![0.0];

        let g = adapter.gradient(&theta).expect("fd gradient");

        assert_relative_eq!(g[0], -4.0, epsilon = 1e-5);
    }
}
