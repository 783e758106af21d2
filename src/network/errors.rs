//! Errors raised while building or querying the citation graph.
//!
//! Malformed records, duplicate ids and unresolved references are not errors;
//! they are counted in [`GraphStats`](super::graph::GraphStats). The only
//! run-halting condition is an input with no usable record at all.

/// Result alias for graph construction and queries.
pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// No record survived validation.
    NoValidRecords { total: usize },

    /// Author id not present in the graph.
    UnknownAuthor { author_id: u64 },
}

impl std::error::Error for GraphError {}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::NoValidRecords { total } => {
                write!(f, "None of the {total} input records has authors, year, references and citation count.")
            }
            GraphError::UnknownAuthor { author_id } => {
                write!(f, "Author {author_id} does not appear in the citation graph.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<GraphError> for pyo3::PyErr {
    fn from(err: GraphError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
