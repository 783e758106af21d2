//! baseline — comparative rank-citation law fit.
//!
//! Fits the shape `β` of `c(r) = N_c (1 − β) N_p^{β−1} r^{−β}` to an
//! author's ranked article citation counts with a robust log-space loss.
//! The analysis reports `β̂` next to the attachment mixture weights.

pub mod errors;
pub mod options;
pub mod rank_law;

pub use self::errors::{BaselineError, BaselineResult};
pub use self::options::BaselineOptions;
pub use self::rank_law::{
    MIN_CITED_ARTICLES, RankCitationData, RankCitationLaw, RankLawFit, RankLawObjective, fit_rank_law,
};
