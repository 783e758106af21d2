//! Python-side argument extraction for the `python-bindings` feature.
//!
//! Converts loosely typed Python inputs (a sequence of record dicts, scalar
//! keyword arguments) into the validated Rust types the analysis expects.
//! Validation errors surface as `ValueError` through the crate error types.

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::PyValueError,
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::{
    analysis::options::AnalysisOptions,
    attachment::options::MixtureOptions,
    baseline::{errors::BaselineError, options::BaselineOptions},
    network::RawRecord,
    optimization::loglik_optimizer::traits::{LineSearcher, MLEOptions, Tolerances},
};

/// Read a sequence of dicts with keys `id`, `authors`, `year`,
/// `references` and `citation_count`.
///
/// Only `id` is required; absent or `None` fields are left empty so the graph
/// builder can drop and count the record.
#[cfg(feature = "python-bindings")]
pub fn extract_records<'py>(records: &Bound<'py, PyAny>) -> PyResult<Vec<RawRecord>> {
    let mut out = Vec::new();
    for item in records.try_iter()? {
        let item = item?;
        let dict = item.downcast::<PyDict>()?;
        let id = optional_field::<u64>(dict, "id")?
            .ok_or_else(|| PyValueError::new_err("every record needs an integer 'id'"))?;
        out.push(RawRecord {
            id,
            authors: optional_field(dict, "authors")?,
            year: optional_field(dict, "year")?,
            references: optional_field(dict, "references")?,
            citation_count: optional_field(dict, "citation_count")?,
        });
    }
    Ok(out)
}

#[cfg(feature = "python-bindings")]
fn optional_field<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: for<'a> FromPyObject<'a>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(value.extract()?)),
        _ => Ok(None),
    }
}

/// Assemble validated [`AnalysisOptions`] from keyword arguments.
#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
pub fn extract_analysis_options(
    min_articles: usize, bounds: (f64, f64), tol: f64, max_iter: usize,
    tol_grad: Option<f64>, line_searcher: Option<&str>, beta0: f64, parallel: bool,
) -> PyResult<AnalysisOptions> {
    use std::str::FromStr;

    let mixture = MixtureOptions::new(bounds, tol, max_iter)?;

    // Tolerances / LineSearcher / MLEOptions -> OptError -> BaselineError -> PyErr
    let tols = Tolerances::new(tol_grad.or(Some(1e-8)), Some(1e-12), Some(200))
        .map_err(BaselineError::from)?;
    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name).map_err(BaselineError::from)?,
        None => LineSearcher::MoreThuente,
    };
    let mle_opts = MLEOptions::new(tols, ls, None).map_err(BaselineError::from)?;
    let baseline = BaselineOptions::new(mle_opts, beta0)?;

    let opts = AnalysisOptions::new(min_articles, mixture, baseline, parallel)?;
    Ok(opts)
}
