//! loglik_optimizer::builders — L-BFGS solver construction helpers.
//!
//! Builders hide Argmin's generic wiring and apply the tolerances carried by
//! [`MLEOptions`]. They never set the initial parameter vector or the
//! iteration cap; the runner owns those.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

/// Construct L-BFGS with Hager–Zhang line search.
///
/// Uses `opts.lbfgs_mem` (or [`DEFAULT_LBFGS_MEM`]) and applies any
/// configured tolerances through [`configure_lbfgs`].
///
/// # Errors
/// Returns `OptError` when Argmin rejects a tolerance.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with More–Thuente line search.
///
/// # Errors
/// Returns `OptError` when Argmin rejects a tolerance.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply the optional gradient and cost-change tolerances to any L-BFGS
/// solver, regardless of its line search. Absent tolerances leave Argmin's
/// defaults in place.
///
/// # Errors
/// Returns `OptError` (via `From<argmin::core::Error>`) when Argmin rejects
/// a tolerance.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::traits::{LineSearcher, Tolerances};

    #[test]
    // Purpose
    // -------
    // Both builders succeed with default and explicit L-BFGS memory.
    //
    // Given
    // -----
    // - Valid tolerances, `lbfgs_mem` in `{None, Some(11)}`.
    //
    // Expect
    // ------
    // - Every builder call returns `Ok(_)`.
    fn builders_accept_default_and_explicit_memory() {
        for mem in [None, Some(11)] {
            let tols = Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).expect("tolerances");
            let hz = MLEOptions::new(tols, LineSearcher::HagerZhang, mem).expect("options");
            let mt = MLEOptions::new(tols, LineSearcher::MoreThuente, mem).expect("options");

            assert!(build_optimizer_hager_zhang(&hz).is_ok());
            assert!(build_optimizer_more_thuente(&mt).is_ok());
        }
    }

    #[test]
    // Purpose
    // -------
    // `configure_lbfgs` keeps the solver usable when no tolerance is given.
    fn configure_lbfgs_respects_absent_tolerances() {
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let tols = Tolerances::new(None, None, Some(50)).expect("tolerances");
        let opts = MLEOptions::new(tols, LineSearcher::MoreThuente, None).expect("options");

        assert!(configure_lbfgs(raw, &opts).is_ok());
    }
}
