//! baseline::rank_law — robust fit of the rank-citation (3DSI) law.
//!
//! Purpose
//! -------
//! Provide a comparative baseline for the attachment mixture: a single
//! shape parameter summarizing how concentrated an author's citations are
//! across their articles.
//!
//! Key behaviors
//! -------------
//! - The author's non-zero article citation counts are sorted descending and
//!   assigned ranks `r = 1, 2, …`.
//! - The law `c(r) = N_c (1 − β) N_p^{β−1} r^{−β}` is fitted in log space,
//!   with `N_c` the total citation count and `N_p` the article count held
//!   fixed and `β ∈ (0, 1)` free.
//! - The loss is robust soft-L1, `½ Σ ρ(rᵢ²)` with `ρ(z) = 2(√(1+z) − 1)` on
//!   log residuals `rᵢ = ln cᵢ − ln c(rᵢ)`.
//! - The open interval is enforced by `β = logistic(θ)`; [`RankLawObjective`]
//!   exposes `ℓ(θ) = −loss` and its analytic gradient to the L-BFGS
//!   maximizer.
//!
//! Invariants & assumptions
//! ------------------------
//! - `ln(1 − β)` is evaluated as `−softplus(θ)`, so the objective is finite
//!   for every finite `θ` the line search may probe.
//! - A fit that stops without converging is an error; callers never see an
//!   unconverged shape.
use ndarray::array;

use crate::{
    baseline::{
        errors::{BaselineError, BaselineResult},
        options::BaselineOptions,
    },
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{Grad, LogLikelihood, Theta, maximize},
        numerical_stability::{safe_logistic, safe_softplus},
    },
};

/// Minimum number of cited articles for a shape fit.
pub const MIN_CITED_ARTICLES: usize = 2;

/// Fitted rank-citation law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankCitationLaw {
    /// Total citations `N_c`.
    pub n_citations: f64,
    /// Article count `N_p`.
    pub n_papers: f64,
    /// Shape `β ∈ (0, 1)`.
    pub shape: f64,
}

impl RankCitationLaw {
    /// `ln c(rank)`; `rank` starts at 1.
    pub fn log_predict(&self, rank: usize) -> f64 {
        self.n_citations.ln() + (1.0 - self.shape).ln() + (self.shape - 1.0) * self.n_papers.ln()
            - self.shape * (rank as f64).ln()
    }

    /// Predicted citations of the article at `rank`.
    pub fn predict(&self, rank: usize) -> f64 {
        self.log_predict(rank).exp()
    }
}

/// Log-space observations for one author.
#[derive(Debug, Clone, PartialEq)]
pub struct RankCitationData {
    log_counts: Vec<f64>,
    log_ranks: Vec<f64>,
    n_citations: f64,
    n_papers: f64,
}

impl RankCitationData {
    /// Prepare per-article citation counts for the fit.
    ///
    /// Zero counts are dropped; the rest are ranked in descending order.
    ///
    /// Errors
    /// ------
    /// - [`BaselineError::TooFewCitedArticles`] with fewer than
    ///   [`MIN_CITED_ARTICLES`] non-zero counts.
    /// - [`BaselineError::InvalidPaperCount`] when `n_papers` is below the
    ///   number of cited articles.
    pub fn new(counts: &[u64], n_papers: usize) -> BaselineResult<Self> {
        let mut cited: Vec<u64> = counts.iter().copied().filter(|&c| c > 0).collect();
        if cited.len() < MIN_CITED_ARTICLES {
            return Err(BaselineError::TooFewCitedArticles {
                found: cited.len(),
                required: MIN_CITED_ARTICLES,
            });
        }
        if n_papers < cited.len() {
            return Err(BaselineError::InvalidPaperCount { n_papers, n_cited: cited.len() });
        }
        cited.sort_unstable_by(|a, b| b.cmp(a));

        let n_citations = cited.iter().sum::<u64>() as f64;
        let log_counts = cited.iter().map(|&c| (c as f64).ln()).collect();
        let log_ranks = (1..=cited.len()).map(|r| (r as f64).ln()).collect();
        Ok(Self { log_counts, log_ranks, n_citations, n_papers: n_papers as f64 })
    }

    pub fn len(&self) -> usize {
        self.log_counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log_counts.is_empty()
    }

    /// Log residuals `ln cᵢ − ln c(rᵢ)` at unconstrained `θ`, with the
    /// matching `∂ ln c(rᵢ) / ∂θ`.
    fn residuals(&self, theta: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
        let beta = safe_logistic(theta);
        let dbeta = beta * safe_logistic(-theta);
        let log_one_minus_beta = -safe_softplus(theta);
        let (ln_nc, ln_np) = (self.n_citations.ln(), self.n_papers.ln());
        self.log_counts.iter().zip(&self.log_ranks).map(move |(&lc, &lr)| {
            let model = ln_nc + log_one_minus_beta + (beta - 1.0) * ln_np - beta * lr;
            let dmodel = -beta + dbeta * (ln_np - lr);
            (lc - model, dmodel)
        })
    }
}

/// Soft-L1 loss `ρ(z) = 2(√(1+z) − 1)`.
fn soft_l1(z: f64) -> f64 {
    2.0 * ((1.0 + z).sqrt() - 1.0)
}

/// `ρ'(z) = 1 / √(1+z)`.
fn soft_l1_deriv(z: f64) -> f64 {
    1.0 / (1.0 + z).sqrt()
}

/// Negated robust loss of the rank-citation law as a function of `θ`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankLawObjective;

impl LogLikelihood for RankLawObjective {
    type Data = RankCitationData;

    fn value(&self, theta: &Theta, data: &RankCitationData) -> OptResult<f64> {
        let loss: f64 = data.residuals(theta[0]).map(|(r, _)| soft_l1(r * r)).sum();
        Ok(-0.5 * loss)
    }

    fn check(&self, theta: &Theta, _data: &RankCitationData) -> OptResult<()> {
        if theta.len() != 1 {
            return Err(OptError::ThetaDimMismatch { expected: 1, found: theta.len() });
        }
        Ok(())
    }

    fn grad(&self, theta: &Theta, data: &RankCitationData) -> OptResult<Grad> {
        let g: f64 = data.residuals(theta[0]).map(|(r, dm)| soft_l1_deriv(r * r) * r * dm).sum();
        Ok(array![g])
    }
}

/// Converged baseline fit.
#[derive(Debug, Clone, PartialEq)]
pub struct RankLawFit {
    pub law: RankCitationLaw,
    /// Robust loss `½ Σ ρ(rᵢ²)` at the optimum.
    pub loss: f64,
    pub n_points: usize,
    pub iterations: usize,
}

/// Fit the rank-citation shape to per-article citation counts.
///
/// Parameters
/// ----------
/// - `counts`: citations received by each of the author's articles; zeros
///   allowed and ignored.
/// - `n_papers`: the author's article count `N_p`.
///
/// Errors
/// ------
/// - Data errors from [`RankCitationData::new`].
/// - [`BaselineError::Optimization`] for solver failures, including
///   [`OptError::NotConverged`] and a shape saturated at 0 or 1.
pub fn fit_rank_law(
    counts: &[u64], n_papers: usize, opts: &BaselineOptions,
) -> BaselineResult<RankLawFit> {
    let data = RankCitationData::new(counts, n_papers)?;
    let outcome =
        maximize(&RankLawObjective, array![opts.theta0], &data, &opts.mle_opts)?.into_converged()?;

    let theta_hat = outcome.theta_hat[0];
    let shape = safe_logistic(theta_hat);
    if !(shape > 0.0 && shape < 1.0) {
        return Err(OptError::InvalidThetaHat {
            index: 0,
            value: theta_hat,
            reason: "Rank-citation shape saturated at the boundary of (0, 1).",
        }
        .into());
    }
    Ok(RankLawFit {
        law: RankCitationLaw { n_citations: data.n_citations, n_papers: data.n_papers, shape },
        loss: -outcome.value,
        n_points: data.len(),
        iterations: outcome.iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{loglik_optimizer::MLEOptions, numerical_stability::safe_logit};
    use approx::assert_relative_eq;

    // Counts drawn exactly from the law with a large nominal N_c.
    fn law_counts(beta: f64, n_papers: usize) -> Vec<u64> {
        let law = RankCitationLaw { n_citations: 1e6, n_papers: n_papers as f64, shape: beta };
        (1..=n_papers).map(|r| law.predict(r).round() as u64).collect()
    }

    #[test]
    // Purpose
    // -------
    // The analytic gradient agrees with central differences of the value.
    //
    // Given
    // -----
    // - Counts from a β = 0.4 law, evaluated at several θ.
    //
    // Expect
    // ------
    // - Relative agreement to 1e-5.
    fn analytic_gradient_matches_finite_differences() {
        let data = RankCitationData::new(&law_counts(0.4, 40), 40).expect("valid data");
        let h = 1e-6;

        for &t in &[-2.0, -0.3, 0.0, 0.8, 3.0] {
            let g = RankLawObjective.grad(&array![t], &data).expect("gradient")[0];
            let up = RankLawObjective.value(&array![t + h], &data).expect("value");
            let down = RankLawObjective.value(&array![t - h], &data).expect("value");
            assert_relative_eq!(g, (up - down) / (2.0 * h), max_relative = 1e-5, epsilon = 1e-7);
        }
    }

    #[test]
    // Purpose
    // -------
    // Data generated by the law recovers its shape.
    //
    // Given
    // -----
    // - 200 articles with counts from a β = 0.3 law; N_c taken as the
    //   observed total, which differs slightly from the nominal one.
    //
    // Expect
    // ------
    // - β̂ within 0.02 of 0.3.
    fn fit_recovers_shape_of_generated_counts() {
        let counts = law_counts(0.3, 200);

        let fit = fit_rank_law(&counts, 200, &BaselineOptions::default()).expect("fit converges");

        assert_relative_eq!(fit.law.shape, 0.3, epsilon = 0.02);
        assert_eq!(fit.n_points, 200);
        assert!(fit.loss >= 0.0);
        assert!(fit.law.predict(1) > fit.law.predict(200));
    }

    #[test]
    // Purpose
    // -------
    // Steeper citation profiles produce larger shapes.
    fn steeper_profiles_fit_larger_shapes() {
        let opts = BaselineOptions::default();

        let flat = fit_rank_law(&law_counts(0.2, 100), 100, &opts).expect("fit converges");
        let steep = fit_rank_law(&law_counts(0.7, 100), 100, &opts).expect("fit converges");

        assert!(steep.law.shape > flat.law.shape + 0.2);
    }

    #[test]
    // Purpose
    // -------
    // Zero counts are dropped, ranking is descending, and degenerate inputs
    // are rejected before optimization.
    fn data_preparation_ranks_and_validates_counts() {
        let data = RankCitationData::new(&[0, 3, 9, 0, 1], 5).expect("valid data");

        assert_eq!(data.len(), 3);
        assert_eq!(data.n_citations, 13.0);
        assert_relative_eq!(data.log_counts[0], 9.0_f64.ln());
        assert_eq!(
            RankCitationData::new(&[0, 4], 2),
            Err(BaselineError::TooFewCitedArticles { found: 1, required: 2 })
        );
        assert_eq!(
            RankCitationData::new(&[2, 4, 1], 2),
            Err(BaselineError::InvalidPaperCount { n_papers: 2, n_cited: 3 })
        );
    }

    #[test]
    // Purpose
    // -------
    // An exhausted iteration budget is reported, not returned as a shape.
    fn iteration_cap_is_reported_as_not_converged() {
        let mut mle_opts = MLEOptions::default();
        mle_opts.tols.max_iter = Some(1);
        mle_opts.tols.tol_grad = Some(1e-300);
        mle_opts.tols.tol_cost = None;
        let opts = BaselineOptions { mle_opts, theta0: safe_logit(0.95) };

        let err = fit_rank_law(&law_counts(0.3, 50), 50, &opts).unwrap_err();

        assert!(matches!(err, BaselineError::Optimization(OptError::NotConverged { .. })));
    }
}
