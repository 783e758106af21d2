//! optimization — MLE solvers, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide the fitting layer shared by the citation models: an Argmin-backed
//! L-BFGS maximizer for vector parameters, a Brent maximizer for a single
//! bounded parameter, numerically stable transforms, and one error/result
//! surface for all of them.
//!
//! Key behaviors
//! -------------
//! - [`loglik_optimizer`]: maximize `ℓ(θ)` for unconstrained `θ ∈ ℝᵏ`
//!   (used by the rank-citation baseline).
//! - [`bounded`]: maximize `ℓ(x)` for `x ∈ [lower, upper]` (used by the
//!   attachment mixture weight).
//! - [`numerical_stability`]: logistic/logit maps between `(0, 1)` and ℝ.
//! - [`errors`]: configuration issues, numerical failures and backend solver
//!   errors normalized into [`errors::OptError`] / [`errors::OptResult`].
//!
//! Conventions
//! -----------
//! - Every solver maximizes a log-likelihood by minimizing `c = -ℓ`;
//!   reported values are always in terms of `ℓ`.
//! - Hitting an iteration cap is reported as
//!   [`errors::OptError::NotConverged`], never as an estimate.
//! - This module and its submodules avoid I/O and logging; the analysis
//!   layer reports failures.

pub mod bounded;
pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_citations::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::bounded::{BoundedOptions, ScalarLogLikelihood, ScalarOutcome, maximize_bounded};
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
