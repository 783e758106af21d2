//! analysis::pipeline — per-author orchestration of every fit.
//!
//! Purpose
//! -------
//! Drive the whole analysis: build the graph, and for every author check
//! eligibility, fit the attachment mixture under each [`EventFilter`], fit
//! the rank-citation baseline, and collect one [`AuthorRow`] per author for
//! whom all four fits succeed. Authors whose mixtures converged but whose
//! baseline did not keep their estimates in [`AnalysisReport::mixture_only`].
//!
//! Key behaviors
//! -------------
//! - Authors are independent; with `AnalysisOptions::parallel` they are
//!   fanned out over the rayon pool and results merged afterwards. Rows are
//!   in ascending author id either way.
//! - Every excluded author is counted once in [`ExclusionTally`] under the
//!   first failing step; ineligible authors are logged at `debug`, fit
//!   failures at `warn`.
//! - Only a graph that cannot be built halts the run.
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    analysis::{
        errors::{AnalysisError, AnalysisResult},
        options::AnalysisOptions,
    },
    attachment::{errors::AttachmentError, mixture::fit_author_mixture, tracker::ensure_eligible},
    baseline::{errors::BaselineError, rank_law::fit_rank_law},
    network::{Author, AuthorId, CitationGraph, EventFilter, GraphStats, RawRecord},
};

/// One output row: an author with every fit converged.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorRow {
    pub author_id: AuthorId,
    pub n_articles: usize,
    pub n_events: usize,
    pub n_external: usize,
    pub n_self: usize,
    pub alpha_all: f64,
    pub alpha_external: f64,
    pub alpha_self: f64,
    pub baseline_shape: f64,
}

/// Estimates for one eligible author whose three mixture fits converged.
///
/// The baseline is fitted independently; its failure leaves the mixture
/// weights intact.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorFit {
    pub author_id: AuthorId,
    pub n_articles: usize,
    pub n_events: usize,
    pub n_external: usize,
    pub n_self: usize,
    pub alpha_all: f64,
    pub alpha_external: f64,
    pub alpha_self: f64,
    pub baseline: Result<f64, BaselineError>,
}

impl AuthorFit {
    /// Full row, or `None` when the baseline failed.
    pub fn to_row(&self) -> Option<AuthorRow> {
        let baseline_shape = *self.baseline.as_ref().ok()?;
        Some(AuthorRow {
            author_id: self.author_id,
            n_articles: self.n_articles,
            n_events: self.n_events,
            n_external: self.n_external,
            n_self: self.n_self,
            alpha_all: self.alpha_all,
            alpha_external: self.alpha_external,
            alpha_self: self.alpha_self,
            baseline_shape,
        })
    }
}

/// Excluded authors by first failing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExclusionTally {
    pub insufficient_articles: usize,
    pub no_citations: usize,
    pub mixture_all: usize,
    pub mixture_external: usize,
    pub mixture_self: usize,
    pub baseline: usize,
    /// Graph lookups or configuration errors raised while handling an author.
    pub other: usize,
}

impl ExclusionTally {
    pub fn record(&mut self, err: &AnalysisError) {
        match err {
            AnalysisError::Ineligible(AttachmentError::InsufficientArticles { .. }) => {
                self.insufficient_articles += 1
            }
            AnalysisError::Ineligible(_) => self.no_citations += 1,
            AnalysisError::MixtureFailed { filter: EventFilter::All, .. } => self.mixture_all += 1,
            AnalysisError::MixtureFailed { filter: EventFilter::ExternalOnly, .. } => {
                self.mixture_external += 1
            }
            AnalysisError::MixtureFailed { filter: EventFilter::SelfOnly, .. } => {
                self.mixture_self += 1
            }
            AnalysisError::BaselineFailed { .. } => self.baseline += 1,
            AnalysisError::Graph(_) | AnalysisError::InvalidMinArticles { .. } => self.other += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.insufficient_articles
            + self.no_citations
            + self.mixture_all
            + self.mixture_external
            + self.mixture_self
            + self.baseline
            + self.other
    }
}

/// Result of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Rows in ascending author id.
    pub rows: Vec<AuthorRow>,
    /// Authors with converged mixtures but a failed baseline, ascending id.
    /// They are tallied under `exclusions.baseline` and never appear in `rows`.
    pub mixture_only: Vec<AuthorFit>,
    pub exclusions: ExclusionTally,
    pub graph_stats: GraphStats,
}

/// Build the graph from `records` and analyze every author.
///
/// Errors
/// ------
/// - [`AnalysisError::Graph`] when no record is usable.
pub fn analyze<I>(records: I, opts: &AnalysisOptions) -> AnalysisResult<AnalysisReport>
where
    I: IntoIterator<Item = RawRecord>,
{
    let graph = CitationGraph::build(records)?;
    Ok(analyze_graph(&graph, opts))
}

/// Analyze every author of an already built graph.
pub fn analyze_graph(graph: &CitationGraph, opts: &AnalysisOptions) -> AnalysisReport {
    let authors: Vec<&Author> = graph.authors().collect();
    let results: Vec<AnalysisResult<AuthorFit>> = if opts.parallel {
        authors.par_iter().map(|author| analyze_author(graph, author, opts)).collect()
    } else {
        authors.iter().map(|author| analyze_author(graph, author, opts)).collect()
    };

    let mut rows = Vec::with_capacity(results.len());
    let mut mixture_only = Vec::new();
    let mut exclusions = ExclusionTally::default();
    for (author, result) in authors.iter().zip(results) {
        match result {
            Ok(fit) => match fit.to_row() {
                Some(row) => rows.push(row),
                None => {
                    if let Err(error) = &fit.baseline {
                        let err = AnalysisError::BaselineFailed {
                            author_id: author.id,
                            error: error.clone(),
                        };
                        warn!(author = author.id, "{err}");
                        exclusions.record(&err);
                    }
                    mixture_only.push(fit);
                }
            },
            Err(err) => {
                match &err {
                    AnalysisError::Ineligible(_) => debug!(author = author.id, "{err}"),
                    _ => warn!(author = author.id, "{err}"),
                }
                exclusions.record(&err);
            }
        }
    }

    info!(
        authors = authors.len(),
        rows = rows.len(),
        mixture_only = mixture_only.len(),
        excluded = exclusions.total(),
        "citation analysis finished"
    );
    AnalysisReport { rows, mixture_only, exclusions, graph_stats: *graph.stats() }
}

/// Run every fit for one author.
///
/// A failed baseline is carried in [`AuthorFit::baseline`] rather than
/// returned as an error.
///
/// Errors
/// ------
/// - [`AnalysisError::Ineligible`] when the author fails the eligibility gate.
/// - [`AnalysisError::MixtureFailed`] for the first filter whose fit fails.
/// - [`AnalysisError::Graph`] when the author's articles cannot be looked up.
pub fn analyze_author(
    graph: &CitationGraph, author: &Author, opts: &AnalysisOptions,
) -> AnalysisResult<AuthorFit> {
    ensure_eligible(author, opts.min_articles).map_err(AnalysisError::Ineligible)?;

    let mut alphas = [0.0; 3];
    for (slot, filter) in alphas.iter_mut().zip(EventFilter::EVERY) {
        let fit = fit_author_mixture(graph, author, filter, &opts.mixture)
            .map_err(|error| AnalysisError::MixtureFailed { filter, error })?;
        *slot = fit.alpha_hat;
    }

    let counts = graph.article_citation_counts(author.id)?;
    let baseline =
        fit_rank_law(&counts, author.n_articles(), &opts.baseline).map(|fit| fit.law.shape);

    let [alpha_all, alpha_external, alpha_self] = alphas;
    Ok(AuthorFit {
        author_id: author.id,
        n_articles: author.n_articles(),
        n_events: author.n_events(),
        n_external: author.external_citations,
        n_self: author.self_citations,
        alpha_all,
        alpha_external,
        alpha_self,
        baseline,
    })
}
