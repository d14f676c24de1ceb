//! Reading cost matrices and delivering results.
//!
//! - [`parse_matrix`] / [`load_matrix`]: comma-separated cost matrices
//! - [`SearchReport`]: the three-line result summary
//! - [`ResultSink`]: where reports go ([`WriterSink`], [`FileSink`])

mod reader;
mod report;

pub use reader::{load_matrix, parse_matrix};
pub use report::{FileSink, ResultSink, SearchReport, WriterSink};
