//! Errors for the rank-citation baseline fit.
use crate::optimization::errors::OptError;

/// Result alias for baseline operations.
pub type BaselineResult<T> = Result<T, BaselineError>;

#[derive(Debug, Clone, PartialEq)]
pub enum BaselineError {
    /// Fewer cited articles than the fit needs.
    TooFewCitedArticles { found: usize, required: usize },

    /// Article count cannot be below the number of cited articles.
    InvalidPaperCount { n_papers: usize, n_cited: usize },

    /// Initial shape must lie strictly inside (0, 1).
    InvalidInitialShape { beta0: f64 },

    /// Optimizer configuration or run failed (including non-convergence).
    Optimization(OptError),
}

impl std::error::Error for BaselineError {}

impl std::fmt::Display for BaselineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BaselineError::TooFewCitedArticles { found, required } => {
                write!(f, "Rank-citation fit needs {required} cited articles; found {found}.")
            }
            BaselineError::InvalidPaperCount { n_papers, n_cited } => {
                write!(f, "Article count {n_papers} is below the number of cited articles {n_cited}.")
            }
            BaselineError::InvalidInitialShape { beta0 } => {
                write!(f, "Initial shape must lie strictly inside (0, 1); got: {beta0}")
            }
            BaselineError::Optimization(err) => {
                write!(f, "Rank-citation optimization failed: {err}")
            }
        }
    }
}

impl From<OptError> for BaselineError {
    fn from(err: OptError) -> Self {
        BaselineError::Optimization(err)
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<BaselineError> for pyo3::PyErr {
    fn from(err: BaselineError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
