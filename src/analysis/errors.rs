//! Errors surfaced by the analysis pipeline.
//!
//! Only [`AnalysisError::Graph`] and [`AnalysisError::InvalidMinArticles`]
//! stop a run. The remaining variants describe why a single author was
//! excluded and are tallied in the report.
use crate::{
    attachment::errors::AttachmentError,
    baseline::errors::BaselineError,
    network::{AuthorId, EventFilter, errors::GraphError},
};

/// Result alias for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    // ---- Run-level ----
    /// Graph could not be built or queried.
    Graph(GraphError),

    /// The article threshold must be at least one.
    InvalidMinArticles { min_articles: usize },

    // ---- Per-author ----
    /// Author failed the eligibility gate.
    Ineligible(AttachmentError),

    /// Mixture fit failed under one filter.
    MixtureFailed { filter: EventFilter, error: AttachmentError },

    /// Rank-citation baseline failed.
    BaselineFailed { author_id: AuthorId, error: BaselineError },
}

impl std::error::Error for AnalysisError {}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::Graph(err) => write!(f, "Citation graph error: {err}"),
            AnalysisError::InvalidMinArticles { min_articles } => {
                write!(f, "Minimum article count must be positive; got: {min_articles}")
            }
            AnalysisError::Ineligible(err) => write!(f, "Author excluded: {err}"),
            AnalysisError::MixtureFailed { filter, error } => {
                write!(f, "Mixture fit under filter '{filter}' failed: {error}")
            }
            AnalysisError::BaselineFailed { author_id, error } => {
                write!(f, "Baseline fit for author {author_id} failed: {error}")
            }
        }
    }
}

impl From<GraphError> for AnalysisError {
    fn from(err: GraphError) -> Self {
        AnalysisError::Graph(err)
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<AnalysisError> for pyo3::PyErr {
    fn from(err: AnalysisError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
