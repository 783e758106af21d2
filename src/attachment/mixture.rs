//! attachment::mixture — bounded MLE of the random/preferential weight.
//!
//! Purpose
//! -------
//! Fit the mixture weight α of
//! `P(event) = α·random + (1 − α)·preferential`
//! to one author's citation history under one [`EventFilter`]. A low α̂ means
//! the author's citations are better explained by preferential attachment.
//!
//! Key behaviors
//! -------------
//! - [`MixtureLikelihood`] sums `ln(α·random + (1 − α)·preferential)` over a
//!   [`LikelihoodCache`].
//! - [`fit_mixture`] maximizes it with Brent's method on
//!   `MixtureOptions::bounds` (default `[0.01, 0.99]`).
//! - [`fit_author_mixture`] rebuilds the cache for the requested filter and
//!   fits it.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every cached event has `random > 0`, so the objective is finite on any
//!   interval bounded away from 0.
//! - An empty cache or a solver failure is an error for that author/filter;
//!   no estimate is produced.
use crate::{
    attachment::{
        errors::{AttachmentError, AttachmentResult},
        options::MixtureOptions,
        tracker::LikelihoodCache,
    },
    network::{Author, CitationGraph, EventFilter},
    optimization::{
        bounded::{ScalarLogLikelihood, maximize_bounded},
        errors::OptResult,
    },
};

/// Log-likelihood of the mixture weight over a cache of event partials.
#[derive(Debug, Clone, Copy, Default)]
pub struct MixtureLikelihood;

impl ScalarLogLikelihood for MixtureLikelihood {
    type Data = LikelihoodCache;

    fn value(&self, alpha: f64, cache: &LikelihoodCache) -> OptResult<f64> {
        Ok(cache.partials().iter().map(|p| p.mixture(alpha).ln()).sum())
    }
}

/// Fitted mixture weight for one author and filter.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureFit {
    pub filter: EventFilter,
    pub alpha_hat: f64,
    pub log_likelihood: f64,
    pub n_events: usize,
    pub iterations: usize,
}

/// Maximize the mixture log-likelihood over `opts.bounds`.
///
/// Errors
/// ------
/// - [`AttachmentError::NoScoredEvents`] for an empty cache.
/// - [`AttachmentError::MixtureFailed`] when the solver does not converge or
///   meets a non-finite value.
pub fn fit_mixture(cache: &LikelihoodCache, opts: &MixtureOptions) -> AttachmentResult<MixtureFit> {
    if cache.is_empty() {
        return Err(AttachmentError::NoScoredEvents {
            author_id: cache.author_id(),
            filter: cache.filter(),
        });
    }
    let outcome = maximize_bounded(&MixtureLikelihood, cache, &opts.bounded()?).map_err(|error| {
        AttachmentError::MixtureFailed { author_id: cache.author_id(), filter: cache.filter(), error }
    })?;
    Ok(MixtureFit {
        filter: cache.filter(),
        alpha_hat: outcome.x_hat,
        log_likelihood: outcome.value,
        n_events: cache.len(),
        iterations: outcome.iterations,
    })
}

/// Build a fresh cache for `author` under `filter` and fit it.
pub fn fit_author_mixture(
    graph: &CitationGraph, author: &Author, filter: EventFilter, opts: &MixtureOptions,
) -> AttachmentResult<MixtureFit> {
    let cache = LikelihoodCache::build(graph, author, filter)?;
    fit_mixture(&cache, opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        attachment::models::ModelPartials,
        network::{ArticleId, RawRecord},
    };
    use approx::assert_relative_eq;
    use rand::{
        Rng, SeedableRng,
        distributions::{Distribution, WeightedIndex},
        rngs::StdRng,
    };

    const N_OWNED: u64 = 12;
    const N_CITES: u64 = 300;

    // Author 1 owns articles 1..=12 (year 2000). Author 2 writes one citing
    // article per year from 2001 on; `pick` chooses its target from the
    // citation counts so far.
    fn growth_graph(mut pick: impl FnMut(&[u64]) -> usize) -> CitationGraph {
        let mut records: Vec<RawRecord> =
            (1..=N_OWNED).map(|id| RawRecord::new(id, vec![1], 2000, vec![], 0)).collect();
        let mut counts = vec![0u64; N_OWNED as usize];
        for k in 0..N_CITES {
            let target = pick(&counts);
            counts[target] += 1;
            let cited: ArticleId = target as u64 + 1;
            records.push(RawRecord::new(1000 + k, vec![2], 2001 + k as i32, vec![cited], 0));
        }
        CitationGraph::build(records).expect("valid graph")
    }

    // Target drawn with probability proportional to its prior citations;
    // uniform while nothing has been cited yet.
    fn proportional_pick(rng: &mut StdRng) -> impl FnMut(&[u64]) -> usize + '_ {
        move |counts| {
            if counts.iter().all(|&c| c == 0) {
                rng.gen_range(0..counts.len())
            } else {
                WeightedIndex::new(counts).expect("positive total").sample(&mut *rng)
            }
        }
    }

    fn uniform_pick(rng: &mut StdRng) -> impl FnMut(&[u64]) -> usize + '_ {
        move |counts| rng.gen_range(0..counts.len())
    }

    #[test]
    // Purpose
    // -------
    // With no prior citations anywhere the likelihood is `Σ ln(α/N)`.
    fn likelihood_without_prior_citations_is_log_alpha_over_n() {
        let partials = vec![ModelPartials { random: 0.25, preferential: 0.0 }; 3];
        let cache = LikelihoodCache::from_partials(7, EventFilter::All, partials);

        let value = MixtureLikelihood.value(0.4, &cache).expect("finite");

        assert_relative_eq!(value, 3.0 * (0.4_f64 / 4.0).ln(), max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Growth strictly proportional to prior citations is explained by the
    // preferential model alone.
    //
    // Given
    // -----
    // - Seeded draws with probability `c / S` (uniform while `S = 0`).
    //
    // Expect
    // ------
    // - α̂ within 0.01 of the lower bound for every seed.
    fn proportional_growth_drives_alpha_to_lower_bound() {
        for seed in [3, 11, 42] {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = growth_graph(proportional_pick(&mut rng));
            let author = graph.author(1).expect("author present");

            let opts = MixtureOptions::default();
            let fit = fit_author_mixture(&graph, author, EventFilter::All, &opts)
                .expect("fit converges");

            assert_eq!(fit.n_events, N_CITES as usize);
            assert!(fit.alpha_hat < 0.02, "seed {seed}: alpha_hat = {}", fit.alpha_hat);
            assert!(fit.alpha_hat >= 0.01);
        }
    }

    #[test]
    // Purpose
    // -------
    // Targets chosen uniformly at random are explained by the random model.
    //
    // Given
    // -----
    // - Seeded uniform draws among the 12 articles.
    //
    // Expect
    // ------
    // - α̂ within 0.01 of the upper bound for every seed.
    fn uniform_growth_drives_alpha_to_upper_bound() {
        for seed in [3, 11, 42] {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = growth_graph(uniform_pick(&mut rng));
            let author = graph.author(1).expect("author present");

            let opts = MixtureOptions::default();
            let fit = fit_author_mixture(&graph, author, EventFilter::ExternalOnly, &opts)
                .expect("fit converges");

            assert!(fit.alpha_hat > 0.98, "seed {seed}: alpha_hat = {}", fit.alpha_hat);
            assert!(fit.alpha_hat <= 0.99);
            assert!(fit.log_likelihood.is_finite());
        }
    }

    #[test]
    // Purpose
    // -------
    // A filter with nothing to score fails instead of returning an estimate.
    fn empty_filter_is_reported_as_no_scored_events() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = growth_graph(uniform_pick(&mut rng));
        let author = graph.author(1).expect("author present");

        let opts = MixtureOptions::default();
        let err = fit_author_mixture(&graph, author, EventFilter::SelfOnly, &opts).unwrap_err();

        assert_eq!(err, AttachmentError::NoScoredEvents { author_id: 1, filter: EventFilter::SelfOnly });
    }

    #[test]
    // Purpose
    // -------
    // Interior optimum on a hand-checkable cache.
    //
    // Given
    // -----
    // - One event with `(random, preferential) = (0.5, 0)` and two with
    //   `(0.5, 1)`: `ℓ(α) = ln(α/2) + 2·ln(1 − α/2)`.
    //
    // Expect
    // ------
    // - `ℓ'(α) = 1/α − 2/(2 − α) = 0` at α = 2/3.
    fn interior_optimum_matches_closed_form() {
        let partials = vec![
            ModelPartials { random: 0.5, preferential: 0.0 },
            ModelPartials { random: 0.5, preferential: 1.0 },
            ModelPartials { random: 0.5, preferential: 1.0 },
        ];
        let cache = LikelihoodCache::from_partials(3, EventFilter::All, partials);

        let fit = fit_mixture(&cache, &MixtureOptions::default()).expect("fit converges");

        assert_relative_eq!(fit.alpha_hat, 2.0 / 3.0, epsilon = 1e-6);
        assert_eq!(fit.n_events, 3);
    }
}
