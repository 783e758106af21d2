//! attachment::tracker — chronological replay of an author's citations.
//!
//! Purpose
//! -------
//! Reconstruct, at the instant of every citation event, which of the author's
//! articles were already published and how many citations each had received,
//! then hand the resulting candidate pool to the competing models.
//!
//! Key behaviors
//! -------------
//! - [`PublicationState`] admits owned articles as the processing year
//!   reaches their publication year, and buffers citations made during the
//!   current year so they only count from the next year on. Two citations in
//!   the same year never see each other.
//! - [`replay`] walks the author's events in order, skipping events outside
//!   the filter (neither scored nor counted) and events citing an article
//!   published after the citing article (logged at `debug`).
//! - [`LikelihoodCache`] stores the per-event [`ModelPartials`] of one
//!   author under one filter. It is rebuilt per filter, never shared.
//!
//! Invariants & assumptions
//! ------------------------
//! - An article is a candidate at year `y` iff it is owned by the author and
//!   published in or before `y`; the citing article itself is excluded from
//!   its own pool.
//! - `published_articles` counts citations strictly before the current year.
//! - Events arrive sorted by citing year; a step back in time is an error.
use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    attachment::{
        errors::{AttachmentError, AttachmentResult},
        models::{CandidatePool, ModelPartials, event_probabilities},
    },
    network::{ArticleId, Author, AuthorId, CitationEvent, CitationGraph, EventFilter, Year},
};

/// Authors with fewer owned articles are excluded from fitting by default.
pub const DEFAULT_MIN_ARTICLES: usize = 10;

/// Reject authors too small to fit.
///
/// Errors
/// ------
/// - [`AttachmentError::InsufficientArticles`] when the author owns fewer
///   than `min_articles` articles.
/// - [`AttachmentError::NoCitationEvents`] when the author was never cited.
pub fn ensure_eligible(author: &Author, min_articles: usize) -> AttachmentResult<()> {
    if author.n_articles() < min_articles {
        return Err(AttachmentError::InsufficientArticles {
            author_id: author.id,
            n_articles: author.n_articles(),
            min_articles,
        });
    }
    if author.n_events() == 0 {
        return Err(AttachmentError::NoCitationEvents { author_id: author.id });
    }
    Ok(())
}

/// Publication state of one author at the current processing year.
#[derive(Debug, Clone)]
pub struct PublicationState {
    /// Owned articles as `(year, id)`, ascending; admitted in order.
    owned: Vec<(Year, ArticleId)>,
    cursor: usize,
    current_year: Option<Year>,
    published_articles: BTreeMap<ArticleId, u64>,
    same_year: BTreeMap<ArticleId, u64>,
    total: u64,
}

impl PublicationState {
    /// Empty state for `author`; nothing is published until [`advance_to`](Self::advance_to).
    pub fn new(graph: &CitationGraph, author: &Author) -> Self {
        let owned = author
            .articles
            .iter()
            .filter_map(|&id| graph.article(id).map(|a| (a.year, id)))
            .collect();
        Self {
            owned,
            cursor: 0,
            current_year: None,
            published_articles: BTreeMap::new(),
            same_year: BTreeMap::new(),
            total: 0,
        }
    }

    /// Move the processing clock to `year`.
    ///
    /// On a year change, admits every owned article published in or before
    /// `year` with zero citations, then folds the previous year's buffered
    /// citations into `published_articles`. Staying in the same year is a
    /// no-op.
    ///
    /// Errors
    /// ------
    /// - [`AttachmentError::OutOfOrderEvent`] when `year` precedes the
    ///   current year.
    pub fn advance_to(&mut self, year: Year) -> AttachmentResult<()> {
        match self.current_year {
            Some(previous) if year < previous => {
                return Err(AttachmentError::OutOfOrderEvent { previous, year });
            }
            Some(previous) if year == previous => return Ok(()),
            _ => {}
        }

        while let Some(&(published, id)) = self.owned.get(self.cursor) {
            if published > year {
                break;
            }
            self.published_articles.entry(id).or_insert(0);
            self.cursor += 1;
        }
        for (id, count) in std::mem::take(&mut self.same_year) {
            *self.published_articles.entry(id).or_insert(0) += count;
            self.total += count;
        }
        self.current_year = Some(year);
        Ok(())
    }

    /// Buffer a citation of `cited` made during the current year.
    pub fn record_citation(&mut self, cited: ArticleId) {
        *self.same_year.entry(cited).or_insert(0) += 1;
    }

    /// Candidate pool for an event citing `cited` from `citing`.
    ///
    /// Errors
    /// ------
    /// - [`AttachmentError::CitedNotAdmitted`] when `cited` is not published.
    /// - [`AttachmentError::EmptyCandidatePool`] when excluding `citing`
    ///   leaves nothing.
    pub fn eligible_pool(&self, cited: ArticleId, citing: ArticleId) -> AttachmentResult<CandidatePool> {
        let year = self.current_year.unwrap_or(Year::MIN);
        let cited_prior = *self
            .published_articles
            .get(&cited)
            .ok_or(AttachmentError::CitedNotAdmitted { cited, year })?;

        let (mut n, mut total) = (self.published_articles.len(), self.total);
        if let Some(&own) = self.published_articles.get(&citing) {
            n -= 1;
            total -= own;
        }
        if n == 0 {
            return Err(AttachmentError::EmptyCandidatePool { citing, year });
        }
        Ok(CandidatePool { n, total, cited_prior })
    }

    /// Citations of `id` counted before the current year, if published.
    pub fn prior_citations(&self, id: ArticleId) -> Option<u64> {
        self.published_articles.get(&id).copied()
    }

    /// Number of published articles, citing article not excluded.
    pub fn n_published(&self) -> usize {
        self.published_articles.len()
    }

    pub fn total_prior_citations(&self) -> u64 {
        self.total
    }
}

/// Event accounting of one replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    pub scored: usize,
    pub skipped_filter: usize,
    pub skipped_inconsistent: usize,
}

/// Replay `author`'s events under `filter`, calling `on_event` for every
/// scored event with its candidate pool and model probabilities.
///
/// The event is added to the same-year buffer after `on_event` returns.
///
/// Errors
/// ------
/// - Any [`PublicationState`] error; the replay stops at the first one.
pub fn replay<F>(
    graph: &CitationGraph, author: &Author, filter: EventFilter, mut on_event: F,
) -> AttachmentResult<ReplaySummary>
where
    F: FnMut(&CitationEvent, &CandidatePool, &ModelPartials),
{
    let mut state = PublicationState::new(graph, author);
    let mut summary = ReplaySummary::default();

    for event in &author.events {
        if !filter.matches(event.kind) {
            summary.skipped_filter += 1;
            continue;
        }
        if event.is_temporally_inconsistent() {
            debug!(
                author = author.id,
                cited = event.cited,
                citing = event.citing,
                cited_year = event.cited_year,
                citing_year = event.citing_year,
                "skipping citation of a later article"
            );
            summary.skipped_inconsistent += 1;
            continue;
        }
        state.advance_to(event.citing_year)?;
        let pool = state.eligible_pool(event.cited, event.citing)?;
        on_event(event, &pool, &event_probabilities(&pool));
        state.record_citation(event.cited);
        summary.scored += 1;
    }
    Ok(summary)
}

/// Model probabilities of every scored event of one author under one filter.
#[derive(Debug, Clone, PartialEq)]
pub struct LikelihoodCache {
    author_id: AuthorId,
    filter: EventFilter,
    partials: Vec<ModelPartials>,
    summary: ReplaySummary,
}

impl LikelihoodCache {
    /// Replay `author` under `filter` and collect the partials.
    pub fn build(graph: &CitationGraph, author: &Author, filter: EventFilter) -> AttachmentResult<Self> {
        let mut partials = Vec::with_capacity(author.n_events_matching(filter));
        let summary = replay(graph, author, filter, |_, _, p| partials.push(*p))?;
        Ok(Self { author_id: author.id, filter, partials, summary })
    }

    /// Cache over externally computed partials.
    pub fn from_partials(author_id: AuthorId, filter: EventFilter, partials: Vec<ModelPartials>) -> Self {
        let summary = ReplaySummary { scored: partials.len(), ..ReplaySummary::default() };
        Self { author_id, filter, partials, summary }
    }

    pub fn author_id(&self) -> AuthorId {
        self.author_id
    }

    pub fn filter(&self) -> EventFilter {
        self.filter
    }

    pub fn partials(&self) -> &[ModelPartials] {
        &self.partials
    }

    pub fn summary(&self) -> &ReplaySummary {
        &self.summary
    }

    pub fn len(&self) -> usize {
        self.partials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partials.is_empty()
    }
}
