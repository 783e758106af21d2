//! network::records — citation-network entities.
//!
//! Purpose
//! -------
//! Define the value types the graph builder produces and every downstream
//! component reads: raw input records, validated articles, authors with their
//! ordered citation histories, and the per-author citation events.
//!
//! Invariants & assumptions
//! ------------------------
//! - An [`Article`] only exists for a record carrying all four optional
//!   fields; references are deduplicated in first-seen order.
//! - An [`Author`]'s `articles` are sorted by `(year, id)` and its `events`
//!   by `(citing_year, citing, cited)` once the graph is built.
//! - `external_citations + self_citations == events.len()`.
//!
//! Conventions
//! -----------
//! - Ids are plain integers ([`ArticleId`], [`AuthorId`]); years are
//!   calendar years ([`Year`]).
//! - Sets use `BTreeSet` so iteration order is deterministic.
use std::collections::BTreeSet;

/// Article identifier as carried by the input records.
pub type ArticleId = u64;

/// Author identifier as carried by the input records.
pub type AuthorId = u64;

/// Publication year.
pub type Year = i32;

/// One input record, as handed over by the dataset parser.
///
/// Every field but `id` is optional; [`Article::from_record`] drops records
/// missing any of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRecord {
    pub id: ArticleId,
    pub authors: Option<Vec<AuthorId>>,
    pub year: Option<Year>,
    pub references: Option<Vec<ArticleId>>,
    pub citation_count: Option<u64>,
}

impl RawRecord {
    /// Construct a record with every field present.
    pub fn new(
        id: ArticleId, authors: Vec<AuthorId>, year: Year, references: Vec<ArticleId>,
        citation_count: u64,
    ) -> Self {
        Self {
            id,
            authors: Some(authors),
            year: Some(year),
            references: Some(references),
            citation_count: Some(citation_count),
        }
    }
}

/// Validated article.
///
/// Fields
/// ------
/// - `id`, `year`: identity and publication year.
/// - `authors`: author ids; order is irrelevant.
/// - `references`: referenced article ids, deduplicated in input order.
///   May name articles absent from the graph.
/// - `reported_citations`: citation count from source metadata. Informational
///   only; the analysis counts citations from the reconstructed events.
///
/// Citing articles are not stored here; the graph keeps a derived citer index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub year: Year,
    pub authors: BTreeSet<AuthorId>,
    pub references: Vec<ArticleId>,
    pub reported_citations: u64,
}

impl Article {
    /// Validate a raw record, returning `None` when any field is missing.
    pub fn from_record(record: RawRecord) -> Option<Self> {
        let RawRecord { id, authors, year, references, citation_count } = record;
        let (authors, year, references, reported_citations) =
            (authors?, year?, references?, citation_count?);

        let mut seen = BTreeSet::new();
        let references = references.into_iter().filter(|r| seen.insert(*r)).collect();

        Some(Self { id, year, authors: authors.into_iter().collect(), references, reported_citations })
    }

    pub fn is_authored_by(&self, author: AuthorId) -> bool {
        self.authors.contains(&author)
    }
}

/// Whether a citation comes from someone else or from the author themself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CitationKind {
    External,
    SelfCitation,
}

/// One citation received by one author.
///
/// The same reference edge yields one event per author of the cited article.
/// The event is a self-citation iff the author is also an author of the
/// citing article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CitationEvent {
    pub cited: ArticleId,
    pub citing: ArticleId,
    pub cited_year: Year,
    pub citing_year: Year,
    pub kind: CitationKind,
}

impl CitationEvent {
    /// Chronological replay order: citing year, then ids for ties.
    pub fn order_key(&self) -> (Year, ArticleId, ArticleId) {
        (self.citing_year, self.citing, self.cited)
    }

    /// A citation of an article published after the citing article.
    pub fn is_temporally_inconsistent(&self) -> bool {
        self.cited_year > self.citing_year
    }
}

/// Which citation events a replay scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventFilter {
    All,
    ExternalOnly,
    SelfOnly,
}

impl EventFilter {
    /// Every filter, in reporting order.
    pub const EVERY: [EventFilter; 3] =
        [EventFilter::All, EventFilter::ExternalOnly, EventFilter::SelfOnly];

    pub fn matches(self, kind: CitationKind) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::ExternalOnly => kind == CitationKind::External,
            EventFilter::SelfOnly => kind == CitationKind::SelfCitation,
        }
    }
}

impl std::fmt::Display for EventFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventFilter::All => write!(f, "all"),
            EventFilter::ExternalOnly => write!(f, "external"),
            EventFilter::SelfOnly => write!(f, "self"),
        }
    }
}

/// Author with owned articles and received citation events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: AuthorId,
    /// Owned articles, sorted by `(year, id)`.
    pub articles: Vec<ArticleId>,
    /// Received citation events, sorted by [`CitationEvent::order_key`].
    pub events: Vec<CitationEvent>,
    pub external_citations: usize,
    pub self_citations: usize,
}

impl Author {
    pub fn new(id: AuthorId) -> Self {
        Self { id, articles: Vec::new(), events: Vec::new(), external_citations: 0, self_citations: 0 }
    }

    /// Append an event and bump the counter matching its kind.
    pub fn record_event(&mut self, event: CitationEvent) {
        match event.kind {
            CitationKind::External => self.external_citations += 1,
            CitationKind::SelfCitation => self.self_citations += 1,
        }
        self.events.push(event);
    }

    pub fn n_articles(&self) -> usize {
        self.articles.len()
    }

    pub fn n_events(&self) -> usize {
        self.events.len()
    }

    /// Number of events a replay under `filter` would consider.
    pub fn n_events_matching(&self, filter: EventFilter) -> usize {
        match filter {
            EventFilter::All => self.events.len(),
            EventFilter::ExternalOnly => self.external_citations,
            EventFilter::SelfOnly => self.self_citations,
        }
    }
}
