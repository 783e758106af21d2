//! rust_citations — preferential-attachment analysis of author citation
//! histories, with optional Python bindings.
//!
//! Purpose
//! -------
//! For every author of a citation network, estimate how much of the citation
//! process they receive is explained by rich-get-richer preferential
//! attachment versus uniform choice among their published articles,
//! separately for external citations and self-citations, and report a
//! rank-citation baseline next to it.
//!
//! Key behaviors
//! -------------
//! - [`network`] builds the article/author graph and per-author citation
//!   events from raw records.
//! - [`attachment`] replays each author's events chronologically, scores
//!   them under the random and preferential models, and fits the mixture
//!   weight by bounded maximum likelihood.
//! - [`baseline`] fits the rank-citation law shape with a robust loss.
//! - [`analysis`] runs everything per author, in parallel, and summarizes.
//! - [`optimization`] hosts the Argmin-backed solvers shared by the fits.
//! - With `python-bindings`, this file defines the `_rust_citations`
//!   extension module and its `citation_analysis` submodule.
//!
//! Invariants & assumptions
//! ------------------------
//! - Heavy lifting lives in the inner modules; the PyO3 items below only
//!   convert arguments, release the GIL and map errors.
//!
//! Downstream usage
//! ----------------
//! - Rust callers use [`analysis::analyze`] (or the module preludes).
//! - Python callers use `rust_citations.citation_analysis.analyze(records, ...)`,
//!   which returns the `AuthorRow` objects with two run-level figures.

pub mod analysis;
pub mod attachment;
pub mod baseline;
pub mod network;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    analysis::{pipeline::AuthorRow, summary::summarize},
    utils::{extract_analysis_options, extract_records},
};

/// AuthorRow — Python view of one analyzed author.
///
/// Read-only properties mirror [`AuthorRow`]: counts of articles and
/// citation events, the three mixture weights and the baseline shape.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "AuthorRow", module = "rust_citations.citation_analysis", frozen)]
pub struct PyAuthorRow {
    inner: AuthorRow,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyAuthorRow {
    #[getter]
    pub fn author_id(&self) -> u64 {
        self.inner.author_id
    }

    #[getter]
    pub fn n_articles(&self) -> usize {
        self.inner.n_articles
    }

    #[getter]
    pub fn n_events(&self) -> usize {
        self.inner.n_events
    }

    #[getter]
    pub fn n_external(&self) -> usize {
        self.inner.n_external
    }

    #[getter]
    pub fn n_self(&self) -> usize {
        self.inner.n_self
    }

    /// Mixture weight over all citations; low values mean preferential.
    #[getter]
    pub fn alpha_all(&self) -> f64 {
        self.inner.alpha_all
    }

    #[getter]
    pub fn alpha_external(&self) -> f64 {
        self.inner.alpha_external
    }

    #[getter]
    pub fn alpha_self(&self) -> f64 {
        self.inner.alpha_self
    }

    /// Fitted rank-citation shape β̂.
    #[getter]
    pub fn baseline_shape(&self) -> f64 {
        self.inner.baseline_shape
    }

    fn __repr__(&self) -> String {
        format!(
            "AuthorRow(author_id={}, alpha_all={:.4}, alpha_external={:.4}, alpha_self={:.4}, baseline_shape={:.4})",
            self.inner.author_id,
            self.inner.alpha_all,
            self.inner.alpha_external,
            self.inner.alpha_self,
            self.inner.baseline_shape
        )
    }
}

/// Run the citation analysis on a sequence of record dicts.
///
/// Returns `(rows, correlation, excluded)`: the author rows, the Pearson
/// correlation of α̂(all) with the baseline shape (`None` below three rows),
/// and the number of excluded authors.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (
    records, min_articles = 10, lower = 0.01, upper = 0.99, tol = 1e-8, max_iter = 500,
    tol_grad = None, line_searcher = None, beta0 = 0.5, parallel = true
))]
#[allow(clippy::too_many_arguments)]
fn analyze<'py>(
    py: Python<'py>, records: &Bound<'py, PyAny>, min_articles: usize, lower: f64, upper: f64,
    tol: f64, max_iter: usize, tol_grad: Option<f64>, line_searcher: Option<&str>, beta0: f64,
    parallel: bool,
) -> PyResult<(Vec<PyAuthorRow>, Option<f64>, usize)> {
    let records = extract_records(records)?;
    let opts = extract_analysis_options(
        min_articles,
        (lower, upper),
        tol,
        max_iter,
        tol_grad,
        line_searcher,
        beta0,
        parallel,
    )?;
    let report = py.allow_threads(|| analysis::analyze(records, &opts))?;
    let correlation = summarize(&report).alpha_baseline_correlation;
    let excluded = report.exclusions.total();
    let rows = report.rows.into_iter().map(|inner| PyAuthorRow { inner }).collect();
    Ok((rows, correlation, excluded))
}

/// Module initializer for `_rust_citations`.
///
/// Creates the `citation_analysis` submodule and registers it in
/// `sys.modules` so that dotted imports work.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_citations<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let citation_analysis_mod = PyModule::new(py, "citation_analysis")?;
    citation_analysis_mod.add_class::<PyAuthorRow>()?;
    citation_analysis_mod.add_function(wrap_pyfunction!(analyze, &citation_analysis_mod)?)?;
    m.add_submodule(&citation_analysis_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    py.import("sys")?
        .getattr("modules")?
        .set_item("rust_citations.citation_analysis", citation_analysis_mod)?;
    Ok(())
}
