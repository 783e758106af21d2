//! Run configuration for the analysis pipeline.
use crate::{
    analysis::errors::{AnalysisError, AnalysisResult},
    attachment::{options::MixtureOptions, tracker::DEFAULT_MIN_ARTICLES},
    baseline::options::BaselineOptions,
};

/// Options shared by every author of a run.
///
/// Fields
/// ------
/// - `min_articles`: eligibility threshold on owned articles (default 10).
/// - `mixture`: Brent settings for the three mixture fits.
/// - `baseline`: L-BFGS settings for the rank-citation fit.
/// - `parallel`: fan authors out over the rayon pool (default `true`).
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    pub min_articles: usize,
    pub mixture: MixtureOptions,
    pub baseline: BaselineOptions,
    pub parallel: bool,
}

impl AnalysisOptions {
    /// Errors
    /// ------
    /// - [`AnalysisError::InvalidMinArticles`] when `min_articles == 0`.
    pub fn new(
        min_articles: usize, mixture: MixtureOptions, baseline: BaselineOptions, parallel: bool,
    ) -> AnalysisResult<Self> {
        if min_articles == 0 {
            return Err(AnalysisError::InvalidMinArticles { min_articles });
        }
        Ok(Self { min_articles, mixture, baseline, parallel })
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            min_articles: DEFAULT_MIN_ARTICLES,
            mixture: MixtureOptions::default(),
            baseline: BaselineOptions::default(),
            parallel: true,
        }
    }
}
