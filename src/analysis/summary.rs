//! analysis::summary — cross-author statistics of a report.
//!
//! Purpose
//! -------
//! Condense the per-author rows into the figures a reader compares first:
//! location and spread of α̂ under each filter, the average baseline shape,
//! how α̂(all) co-moves with the baseline shape, and how often self-citations
//! look more preferential than external ones.
//!
//! Conventions
//! -----------
//! - Standard deviations and the covariance are sample statistics
//!   (`n − 1`), as computed by `statrs::statistics::Statistics`.
//! - Statistics needing more rows than available are `NaN` (moments) or
//!   `None` (correlation and its p-value).
use statrs::{
    distribution::{ContinuousCDF, StudentsT},
    statistics::{Data, Median, Statistics},
};

use crate::analysis::pipeline::{AnalysisReport, AuthorRow};

/// Mean, sample standard deviation and median of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub median: f64,
}

impl ColumnSummary {
    fn of(values: Vec<f64>) -> Self {
        let mean = values.iter().mean();
        let std_dev = values.iter().std_dev();
        let median = if values.is_empty() { f64::NAN } else { Data::new(values).median() };
        Self { mean, std_dev, median }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub n_authors: usize,
    pub alpha_all: ColumnSummary,
    pub alpha_external: ColumnSummary,
    pub alpha_self: ColumnSummary,
    pub mean_baseline_shape: f64,
    /// Pearson correlation of α̂(all) and the baseline shape.
    pub alpha_baseline_correlation: Option<f64>,
    /// Two-sided p-value of the correlation under `t(n − 2)`.
    pub correlation_p_value: Option<f64>,
    /// Share of authors with α̂(self) < α̂(external).
    pub share_self_more_preferential: f64,
}

/// Summarize the rows of a report.
pub fn summarize(report: &AnalysisReport) -> ReportSummary {
    let rows = &report.rows;
    let column = |f: fn(&AuthorRow) -> f64| rows.iter().map(f).collect::<Vec<f64>>();

    let alpha_all = column(|r| r.alpha_all);
    let shapes = column(|r| r.baseline_shape);
    let correlation = pearson(&alpha_all, &shapes);
    let correlation_p_value = correlation.and_then(|r| correlation_p_value(r, rows.len()));
    let self_lower = rows.iter().filter(|r| r.alpha_self < r.alpha_external).count();

    ReportSummary {
        n_authors: rows.len(),
        alpha_all: ColumnSummary::of(alpha_all),
        alpha_external: ColumnSummary::of(column(|r| r.alpha_external)),
        alpha_self: ColumnSummary::of(column(|r| r.alpha_self)),
        mean_baseline_shape: shapes.iter().mean(),
        alpha_baseline_correlation: correlation,
        correlation_p_value,
        share_self_more_preferential: if rows.is_empty() {
            f64::NAN
        } else {
            self_lower as f64 / rows.len() as f64
        },
    }
}

fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() < 3 || x.len() != y.len() {
        return None;
    }
    let denom = x.iter().std_dev() * y.iter().std_dev();
    if denom <= 0.0 || !denom.is_finite() {
        return None;
    }
    Some((x.iter().covariance(y.iter()) / denom).clamp(-1.0, 1.0))
}

fn correlation_p_value(r: f64, n: usize) -> Option<f64> {
    let df = (n - 2) as f64;
    if r.abs() >= 1.0 {
        return Some(0.0);
    }
    let t = r * (df / (1.0 - r * r)).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    Some((2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0))
}
