//! network::graph — build the citation graph and per-author event lists.
//!
//! Purpose
//! -------
//! Turn a stream of [`RawRecord`]s into an immutable [`CitationGraph`]: the
//! validated articles, a derived citer index, one [`Author`] per distinct
//! author id, and every author's chronologically ordered citation events.
//!
//! Key behaviors
//! -------------
//! - Incomplete records are dropped, duplicate ids keep their first
//!   occurrence, self-references are not linked, and references to articles
//!   outside the graph are left unresolved. All four are counted in
//!   [`GraphStats`].
//! - Each resolved reference edge produces one [`CitationEvent`] per author
//!   of the cited article, classified by whether that author also wrote the
//!   citing article.
//! - Articles, authors and events live in `BTreeMap`s / sorted `Vec`s, so two
//!   builds from the same records are identical.
//!
//! Invariants & assumptions
//! ------------------------
//! - `citers(x)` holds exactly the graph articles whose reference list
//!   contains `x` (excluding `x` itself), in ascending id order.
//! - Every event's `cited` is owned by its author and every `citing` is an
//!   article of the graph.
//! - The graph is read-only after [`CitationGraph::build`]; `&CitationGraph`
//!   is shared across worker threads.
use std::collections::{BTreeMap, btree_map::Entry};

use tracing::{debug, info};

use crate::network::{
    errors::{GraphError, GraphResult},
    records::{Article, ArticleId, Author, AuthorId, CitationEvent, CitationKind, RawRecord},
};

/// Ingestion statistics reported alongside the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphStats {
    /// Records seen on input.
    pub total_records: usize,
    /// Records missing authors, year, references or citation count.
    pub dropped_records: usize,
    /// Complete records whose id was already taken.
    pub duplicate_records: usize,
    /// References of an article to its own id.
    pub self_references: usize,
    /// References linked to an article of the graph.
    pub resolved_references: usize,
    /// References to ids absent from the graph.
    pub unresolved_references: usize,
    /// Per-author citation events emitted.
    pub citation_events: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationGraph {
    articles: BTreeMap<ArticleId, Article>,
    citers: BTreeMap<ArticleId, Vec<ArticleId>>,
    authors: BTreeMap<AuthorId, Author>,
    stats: GraphStats,
}

impl CitationGraph {
    /// Build the graph from raw records.
    ///
    /// Errors
    /// ------
    /// - [`GraphError::NoValidRecords`] when no record survives validation.
    pub fn build<I>(records: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut stats = GraphStats::default();
        let articles = collect_articles(records, &mut stats);
        if articles.is_empty() {
            return Err(GraphError::NoValidRecords { total: stats.total_records });
        }

        let citers = link_references(&articles, &mut stats);
        let mut authors = assign_authors(&articles);
        for author in authors.values_mut() {
            emit_events(author, &articles, &citers);
            stats.citation_events += author.events.len();
        }

        info!(
            articles = articles.len(),
            authors = authors.len(),
            events = stats.citation_events,
            dropped = stats.dropped_records,
            duplicates = stats.duplicate_records,
            unresolved = stats.unresolved_references,
            "citation graph built"
        );
        Ok(Self { articles, citers, authors, stats })
    }

    pub fn article(&self, id: ArticleId) -> Option<&Article> {
        self.articles.get(&id)
    }

    pub fn author(&self, id: AuthorId) -> Option<&Author> {
        self.authors.get(&id)
    }

    /// Authors in ascending id order.
    pub fn authors(&self) -> impl Iterator<Item = &Author> {
        self.authors.values()
    }

    /// Ids of the graph articles citing `id`, ascending.
    pub fn citers(&self, id: ArticleId) -> &[ArticleId] {
        self.citers.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn stats(&self) -> &GraphStats {
        &self.stats
    }

    pub fn n_articles(&self) -> usize {
        self.articles.len()
    }

    pub fn n_authors(&self) -> usize {
        self.authors.len()
    }

    /// Citation events received by each of the author's articles, in the
    /// author's article order. Articles never cited report zero.
    ///
    /// Errors
    /// ------
    /// - [`GraphError::UnknownAuthor`] for an id absent from the graph.
    pub fn article_citation_counts(&self, author_id: AuthorId) -> GraphResult<Vec<u64>> {
        let author = self.author(author_id).ok_or(GraphError::UnknownAuthor { author_id })?;
        let mut counts: BTreeMap<ArticleId, u64> =
            author.articles.iter().map(|&id| (id, 0)).collect();
        for event in &author.events {
            if let Some(count) = counts.get_mut(&event.cited) {
                *count += 1;
            }
        }
        Ok(author.articles.iter().map(|id| counts.get(id).copied().unwrap_or(0)).collect())
    }
}

fn collect_articles<I>(records: I, stats: &mut GraphStats) -> BTreeMap<ArticleId, Article>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut articles = BTreeMap::new();
    for record in records {
        stats.total_records += 1;
        let Some(article) = Article::from_record(record) else {
            stats.dropped_records += 1;
            continue;
        };
        match articles.entry(article.id) {
            Entry::Vacant(slot) => {
                slot.insert(article);
            }
            Entry::Occupied(_) => {
                debug!(article = article.id, "duplicate record id, keeping first occurrence");
                stats.duplicate_records += 1;
            }
        }
    }
    articles
}

fn link_references(
    articles: &BTreeMap<ArticleId, Article>, stats: &mut GraphStats,
) -> BTreeMap<ArticleId, Vec<ArticleId>> {
    let mut citers: BTreeMap<ArticleId, Vec<ArticleId>> = BTreeMap::new();
    for article in articles.values() {
        for &reference in &article.references {
            if reference == article.id {
                stats.self_references += 1;
            } else if articles.contains_key(&reference) {
                citers.entry(reference).or_default().push(article.id);
                stats.resolved_references += 1;
            } else {
                stats.unresolved_references += 1;
            }
        }
    }
    citers
}

fn assign_authors(articles: &BTreeMap<ArticleId, Article>) -> BTreeMap<AuthorId, Author> {
    let mut authors: BTreeMap<AuthorId, Author> = BTreeMap::new();
    // Articles iterate in id order, so a stable sort on year gives (year, id).
    for article in articles.values() {
        for &author_id in &article.authors {
            authors.entry(author_id).or_insert_with(|| Author::new(author_id)).articles.push(article.id);
        }
    }
    for author in authors.values_mut() {
        author.articles.sort_by_key(|id| articles.get(id).map(|a| a.year));
    }
    authors
}

fn emit_events(
    author: &mut Author, articles: &BTreeMap<ArticleId, Article>,
    citers: &BTreeMap<ArticleId, Vec<ArticleId>>,
) {
    let mut events = Vec::new();
    for owned in &author.articles {
        let (Some(cited), Some(citing_ids)) = (articles.get(owned), citers.get(owned)) else {
            continue;
        };
        for citing_id in citing_ids {
            let Some(citing) = articles.get(citing_id) else { continue };
            let kind = if citing.is_authored_by(author.id) {
                CitationKind::SelfCitation
            } else {
                CitationKind::External
            };
            events.push(CitationEvent {
                cited: cited.id,
                citing: citing.id,
                cited_year: cited.year,
                citing_year: citing.year,
                kind,
            });
        }
    }
    events.sort_by_key(CitationEvent::order_key);
    for event in events {
        author.record_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::records::EventFilter;

    // Two authors (1, 2) sharing article 10; article 13 is by author 1 only.
    fn records() -> Vec<RawRecord> {
        vec![
            RawRecord::new(10, vec![1, 2], 2000, vec![], 0),
            RawRecord::new(11, vec![3], 2001, vec![10, 99], 0),
            RawRecord::new(12, vec![3], 2001, vec![10, 12], 0),
            RawRecord::new(13, vec![1], 2002, vec![10, 11, 10], 0),
            RawRecord::new(10, vec![4], 1990, vec![], 0),
            RawRecord { id: 14, year: Some(2003), ..RawRecord::default() },
        ]
    }

    #[test]
    // Purpose
    // -------
    // Ingestion counts every soft-filtered condition without failing.
    //
    // Given
    // -----
    // - One duplicate id, one incomplete record, one self-reference, one
    //   unresolved reference and a repeated reference.
    //
    // Expect
    // ------
    // - Counters reflect each condition; repeated references link once.
    fn build_counts_soft_filtered_input() {
        let graph = CitationGraph::build(records()).expect("valid graph");
        let stats = graph.stats();

        assert_eq!(stats.total_records, 6);
        assert_eq!(stats.dropped_records, 1);
        assert_eq!(stats.duplicate_records, 1);
        assert_eq!(stats.self_references, 1);
        assert_eq!(stats.unresolved_references, 1);
        assert_eq!(stats.resolved_references, 4);
        assert_eq!(graph.n_articles(), 4);
        assert_eq!(graph.article(10).map(|a| a.year), Some(2000));
        assert!(graph.author(4).is_none());
    }

    #[test]
    // Purpose
    // -------
    // The citer index holds exactly the referencing graph articles.
    fn citers_match_reference_lists() {
        let graph = CitationGraph::build(records()).expect("valid graph");

        assert_eq!(graph.citers(10), &[11, 12, 13]);
        assert_eq!(graph.citers(11), &[13]);
        assert!(graph.citers(12).is_empty());
        assert!(graph.citers(99).is_empty());
    }

    #[test]
    // Purpose
    // -------
    // One event per co-author of the cited article, classified by authorship
    // of the citing article and sorted chronologically.
    //
    // Expect
    // ------
    // - Author 1: cites of 10 by 11, 12 (external) and 13 (self).
    // - Author 2: the same three edges, all external.
    fn events_are_per_author_classified_and_ordered() {
        let graph = CitationGraph::build(records()).expect("valid graph");
        let a1 = graph.author(1).expect("author 1");
        let a2 = graph.author(2).expect("author 2");

        let a1_edges: Vec<_> = a1.events.iter().map(|e| (e.cited, e.citing, e.kind)).collect();
        assert_eq!(
            a1_edges,
            vec![
                (10, 11, CitationKind::External),
                (10, 12, CitationKind::External),
                (10, 13, CitationKind::SelfCitation),
            ]
        );
        assert_eq!(a1.articles, vec![10, 13]);
        assert_eq!((a1.external_citations, a1.self_citations), (2, 1));
        assert_eq!(a2.n_events_matching(EventFilter::SelfOnly), 0);
        assert_eq!(a2.external_citations, 3);
        assert_eq!(graph.stats().citation_events, 3 + 3 + 1);
    }

    #[test]
    // Purpose
    // -------
    // Per-article counts come from the reconstructed events, zeros included.
    fn article_citation_counts_follow_events() {
        let graph = CitationGraph::build(records()).expect("valid graph");

        assert_eq!(graph.article_citation_counts(1), Ok(vec![3, 0]));
        assert_eq!(graph.article_citation_counts(3), Ok(vec![1, 0]));
        assert_eq!(
            graph.article_citation_counts(42),
            Err(GraphError::UnknownAuthor { author_id: 42 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Only an input without any usable record halts the build.
    fn build_rejects_input_without_valid_records() {
        let only_incomplete = vec![RawRecord { id: 1, ..RawRecord::default() }];

        assert_eq!(
            CitationGraph::build(only_incomplete),
            Err(GraphError::NoValidRecords { total: 1 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Rebuilding from the same records, in any input order, yields the same
    // graph.
    fn rebuild_is_deterministic() {
        let forward = CitationGraph::build(records()).expect("valid graph");
        let again = CitationGraph::build(records()).expect("valid graph");
        let mut shuffled: Vec<_> =
            records().into_iter().filter(|r| !(r.id == 10 && r.year == Some(1990))).collect();
        shuffled.reverse();
        let reversed = CitationGraph::build(shuffled).expect("valid graph");

        assert_eq!(forward, again);
        assert_eq!(forward.authors().collect::<Vec<_>>(), reversed.authors().collect::<Vec<_>>());
    }
}
