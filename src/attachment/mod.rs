//! attachment — preferential-attachment vs. random decomposition.
//!
//! Purpose
//! -------
//! Estimate, per author and per citation filter, how much of the citation
//! process the author receives is explained by preferential attachment
//! rather than by uniform choice among their published articles.
//!
//! Key behaviors
//! -------------
//! - [`tracker`]: chronological replay with same-year simultaneity and the
//!   eligibility gate.
//! - [`models`]: random `1/N` and preferential `c/S` event probabilities.
//! - [`mixture`]: Brent maximization of the mixture weight α.
//! - [`options`]: validated [`MixtureOptions`].
//!
//! Downstream usage
//! ----------------
//! - The analysis pipeline calls [`ensure_eligible`] then
//!   [`fit_author_mixture`] once per [`EventFilter`](crate::network::EventFilter).

pub mod errors;
pub mod mixture;
pub mod models;
pub mod options;
pub mod tracker;

pub use self::errors::{AttachmentError, AttachmentResult};
pub use self::mixture::{MixtureFit, MixtureLikelihood, fit_author_mixture, fit_mixture};
pub use self::models::{CandidatePool, ModelPartials, event_probabilities};
pub use self::options::{DEFAULT_MIXTURE_BOUNDS, MixtureOptions};
pub use self::tracker::{
    DEFAULT_MIN_ARTICLES, LikelihoodCache, PublicationState, ReplaySummary, ensure_eligible, replay,
};

pub mod prelude {
    pub use super::errors::{AttachmentError, AttachmentResult};
    pub use super::mixture::{MixtureFit, fit_author_mixture};
    pub use super::options::MixtureOptions;
    pub use super::tracker::LikelihoodCache;
}
