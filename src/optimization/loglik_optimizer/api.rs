//! High-level entry point for maximizing a user-provided `LogLikelihood`.
//!
//! Selects an L-BFGS solver with either Hager–Zhang or More–Thuente line
//! search, wraps the model in an `ArgMinAdapter` (which *minimizes* `-ℓ(θ)`),
//! and delegates the run to `run_lbfgs`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions},
        validation::validate_theta0,
    },
};

/// Maximize a log-likelihood `ℓ(θ)` using L-BFGS with the chosen line search.
///
/// # Behavior
/// - Rejects non-finite starting points, then runs the model's own
///   `check(theta0, data)`.
/// - Builds an L-BFGS solver per `opts.line_searcher` and runs it through
///   `run_lbfgs`.
///
/// The returned [`OptimOutcome`] may still report `converged == false`;
/// callers that treat non-convergence as fatal use
/// [`OptimOutcome::into_converged`].
///
/// # Errors
/// - Propagates errors from `validate_theta0` and `f.check`.
/// - Propagates builder and runtime errors (line-search failures,
///   non-finite costs, etc.).
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_citations::optimization::{
///     errors::OptResult,
///     loglik_optimizer::{maximize, LogLikelihood, MLEOptions, Theta},
/// };
///
/// struct Concave;
/// impl LogLikelihood for Concave {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Concave, array![0.1, -0.2], &(), &MLEOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), rust_citations::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    validate_theta0(&theta0)?;
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}
