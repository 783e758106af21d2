//! network — citation graph construction.
//!
//! Builds the article/author/citation-event structures every other module
//! reads. See [`graph::CitationGraph::build`] for the ingestion rules and
//! [`records`] for the entity types.

pub mod errors;
pub mod graph;
pub mod records;

pub use self::errors::{GraphError, GraphResult};
pub use self::graph::{CitationGraph, GraphStats};
pub use self::records::{
    Article, ArticleId, Author, AuthorId, CitationEvent, CitationKind, EventFilter, RawRecord, Year,
};

pub mod prelude {
    pub use super::errors::{GraphError, GraphResult};
    pub use super::graph::{CitationGraph, GraphStats};
    pub use super::records::{CitationEvent, CitationKind, EventFilter, RawRecord};
}
