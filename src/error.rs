//! Error type shared by the loaders, sinks, and runners.

use thiserror::Error;

/// Errors raised before or around a search.
///
/// Exhausting the search space without a tour is *not* an error; it is
/// reported through [`SearchStatus::NoTourFound`](crate::model::SearchStatus).
#[derive(Debug, Error)]
pub enum TspError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The cost matrix is empty, not square, or holds an unusable cost.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    #[error("origin city {origin} out of range for {cities} cities")]
    InvalidOrigin { origin: usize, cities: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A cost-matrix source line could not be parsed. `line` is 1-based.
    #[error("parse error at line {line}: {cause}")]
    Parse { line: usize, cause: String },
}

pub type TspResult<T> = std::result::Result<T, TspError>;

impl TspError {
    pub fn invalid_graph(message: impl Into<String>) -> Self {
        Self::InvalidGraph(message.into())
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    pub fn parse(line: usize, cause: impl Into<String>) -> Self {
        Self::Parse {
            line,
            cause: cause.into(),
        }
    }
}
