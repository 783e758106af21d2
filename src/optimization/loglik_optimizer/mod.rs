//! loglik_optimizer — argmin-powered L-BFGS maximizer for log-likelihoods.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for **maximizing
//! log-likelihoods** `ℓ(θ)` over an unconstrained parameter vector. Callers
//! implement [`LogLikelihood`] and invoke [`maximize`] to run L-BFGS with a
//! configurable line search, tolerances, and a finite-difference fallback.
//!
//! Key behaviors
//! -------------
//! - Convert `ℓ(θ)` into the Argmin cost `c(θ) = -ℓ(θ)` via
//!   [`adapter::ArgMinAdapter`].
//! - [`maximize`] validates the starting point, calls
//!   [`LogLikelihood::check`], selects a solver through [`builders`] based on
//!   [`LineSearcher`], executes it with [`run::run_lbfgs`] and normalizes the
//!   result into an [`OptimOutcome`].
//! - Configuration ([`Tolerances`], [`MLEOptions`]) is validated on
//!   construction; solver output is validated by [`validation`].
//!
//! Invariants & assumptions
//! ------------------------
//! - User code implements `ℓ(θ)` and `∇ℓ(θ)`, never the cost.
//! - Invalid inputs are recoverable [`OptError`](crate::optimization::errors::OptError)
//!   values, not panics.
//! - [`OptimOutcome::converged`] is `true` only for genuine convergence;
//!   callers that need a usable estimate use
//!   [`OptimOutcome::into_converged`].
//!
//! Testing notes
//! -------------
//! - Submodule tests cover sign conventions in [`adapter`], solver wiring in
//!   [`builders`], tolerance and outcome checks in [`traits`] and
//!   [`validation`], and end-to-end maximization of toy objectives in
//!   [`api`].

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
