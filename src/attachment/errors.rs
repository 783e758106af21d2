//! Errors for the temporal replay and the attachment mixture fit.
//!
//! Eligibility failures (`InsufficientArticles`, `NoCitationEvents`) exclude
//! an author from every fit. Replay and fit failures are fatal only for the
//! author/filter result they occur in.
use crate::{
    network::{ArticleId, AuthorId, EventFilter, Year},
    optimization::errors::OptError,
};

/// Result alias for tracker and mixture operations.
pub type AttachmentResult<T> = Result<T, AttachmentError>;

#[derive(Debug, Clone, PartialEq)]
pub enum AttachmentError {
    // ---- Eligibility ----
    /// Author owns fewer articles than required.
    InsufficientArticles { author_id: AuthorId, n_articles: usize, min_articles: usize },

    /// Author never received a citation.
    NoCitationEvents { author_id: AuthorId },

    // ---- Replay ----
    /// Events must be replayed in non-decreasing citing year.
    OutOfOrderEvent { previous: Year, year: Year },

    /// Cited article is not among the published articles at event time.
    CitedNotAdmitted { cited: ArticleId, year: Year },

    /// No candidate article remains once the citing article is excluded.
    EmptyCandidatePool { citing: ArticleId, year: Year },

    // ---- Mixture fit ----
    /// The filter left no event to score.
    NoScoredEvents { author_id: AuthorId, filter: EventFilter },

    /// Mixture bounds must satisfy 0 < lower < upper < 1.
    InvalidMixtureBounds { lower: f64, upper: f64, reason: &'static str },

    /// Solver configuration was rejected.
    InvalidOptions(OptError),

    /// Bounded maximization failed for the given filter.
    MixtureFailed { author_id: AuthorId, filter: EventFilter, error: OptError },
}

impl std::error::Error for AttachmentError {}

impl std::fmt::Display for AttachmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Eligibility ----
            AttachmentError::InsufficientArticles { author_id, n_articles, min_articles } => {
                write!(
                    f,
                    "Author {author_id} owns {n_articles} articles; at least {min_articles} are required."
                )
            }
            AttachmentError::NoCitationEvents { author_id } => {
                write!(f, "Author {author_id} has no citation events.")
            }
            // ---- Replay ----
            AttachmentError::OutOfOrderEvent { previous, year } => {
                write!(f, "Event year {year} precedes the current processing year {previous}.")
            }
            AttachmentError::CitedNotAdmitted { cited, year } => {
                write!(f, "Cited article {cited} is not published as of {year}.")
            }
            AttachmentError::EmptyCandidatePool { citing, year } => {
                write!(f, "No candidate articles remain for citing article {citing} in {year}.")
            }
            // ---- Mixture fit ----
            AttachmentError::NoScoredEvents { author_id, filter } => {
                write!(f, "Author {author_id} has no scored events under filter '{filter}'.")
            }
            AttachmentError::InvalidMixtureBounds { lower, upper, reason } => {
                write!(f, "Invalid mixture bounds [{lower}, {upper}]: {reason}")
            }
            AttachmentError::InvalidOptions(err) => {
                write!(f, "Invalid mixture options: {err}")
            }
            AttachmentError::MixtureFailed { author_id, filter, error } => {
                write!(f, "Mixture fit for author {author_id} under filter '{filter}' failed: {error}")
            }
        }
    }
}

impl From<OptError> for AttachmentError {
    fn from(err: OptError) -> Self {
        AttachmentError::InvalidOptions(err)
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<AttachmentError> for pyo3::PyErr {
    fn from(err: AttachmentError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
