//! attachment::models — the two competing citation mechanisms.
//!
//! Given the candidate pool seen by one citation event, each model assigns a
//! probability to the article that was actually cited:
//!
//! - random: every candidate is equally likely, `1 / N`;
//! - preferential (PAR): candidates are weighted by prior citations,
//!   `c / S`, and `0` while no candidate has been cited yet.
//!
//! Both are pure functions of the pool; no state, no logging.

/// Snapshot of the candidate set at one event.
///
/// - `n`: number of eligible articles (citing article excluded).
/// - `total`: citations accumulated by the eligible articles before the
///   current year (`S`).
/// - `cited_prior`: the cited article's share of `total` (`c`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidatePool {
    pub n: usize,
    pub total: u64,
    pub cited_prior: u64,
}

/// Per-event probabilities under each mechanism.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPartials {
    pub random: f64,
    pub preferential: f64,
}

impl ModelPartials {
    /// Mixture probability `α·random + (1 − α)·preferential`.
    pub fn mixture(&self, alpha: f64) -> f64 {
        alpha * self.random + (1.0 - alpha) * self.preferential
    }
}

/// Probabilities of the observed citation under both mechanisms.
///
/// `pool.n` is non-zero for every pool handed out by the tracker.
pub fn event_probabilities(pool: &CandidatePool) -> ModelPartials {
    let random = 1.0 / pool.n as f64;
    let preferential =
        if pool.total > 0 { pool.cited_prior as f64 / pool.total as f64 } else { 0.0 };
    ModelPartials { random, preferential }
}
