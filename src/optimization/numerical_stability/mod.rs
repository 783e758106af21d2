//! numerical_stability — guarded transforms between constrained and
//! unconstrained parameter spaces.
//!
//! Purpose
//! -------
//! Keep the small set of scalar transforms used by model layers in one
//! place, so parameters restricted to `(0, 1)` can be optimized in an
//! unconstrained coordinate without overflow at either tail.
//!
//! Key behaviors
//! -------------
//! - `safe_logistic` maps ℝ → (0, 1) without evaluating `exp` of a large
//!   positive number.
//! - `safe_logit` maps (0, 1) → ℝ after clamping by `LOGIT_EPS`.
//! - `safe_softplus` gives `ln(1 + exp(x))` without overflow.
//!
//! Conventions
//! -----------
//! - Pure functions on `f64`; no logging, I/O, or global state.
//! - Domain validation happens upstream; these helpers never return errors.
//!
//! Downstream usage
//! ----------------
//! - The rank-citation baseline parameterizes its shape as
//!   `β = safe_logistic(θ)` and seeds `θ₀ = safe_logit(β₀)`.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{LOGIT_EPS, safe_logistic, safe_logit, safe_softplus};

pub mod prelude {
    pub use super::transformations::{LOGIT_EPS, safe_logistic, safe_logit, safe_softplus};
}
