//! analysis — run the citation analysis end to end.
//!
//! Purpose
//! -------
//! Tie the graph builder, the attachment mixture and the rank-citation
//! baseline together into one run over every author, producing an
//! [`AnalysisReport`] and, on demand, a cross-author [`ReportSummary`].
//!
//! Key behaviors
//! -------------
//! - [`analyze`] builds the graph and processes authors, in parallel by
//!   default.
//! - [`analyze_author`] runs the eligibility gate, the three mixture fits and
//!   the baseline for one author.
//! - [`summarize`] computes per-filter moments, the α̂/baseline correlation
//!   and the self-vs-external comparison.
//!
//! Invariants & assumptions
//! ------------------------
//! - A row exists only for authors whose four fits all converged; authors
//!   whose baseline alone failed keep their mixture weights in
//!   [`AnalysisReport::mixture_only`].
//! - Rows are sorted by author id and identical between serial and parallel
//!   runs.
//!
//! Downstream usage
//! ----------------
//! - Rust callers use `analysis::prelude::*`; the Python bridge wraps
//!   [`analyze`] and [`AuthorRow`].

pub mod errors;
pub mod options;
pub mod pipeline;
pub mod summary;

pub use self::errors::{AnalysisError, AnalysisResult};
pub use self::options::AnalysisOptions;
pub use self::pipeline::{
    AnalysisReport, AuthorFit, AuthorRow, ExclusionTally, analyze, analyze_author, analyze_graph,
};
pub use self::summary::{ColumnSummary, ReportSummary, summarize};

pub mod prelude {
    pub use super::errors::{AnalysisError, AnalysisResult};
    pub use super::options::AnalysisOptions;
    pub use super::pipeline::{AnalysisReport, AuthorRow, analyze};
    pub use super::summary::{ReportSummary, summarize};
}
