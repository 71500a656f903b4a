//! Error types for marga.

use thiserror::Error;

/// Errors reported by the search engine and cost functions.
///
/// All variants are configuration errors detected before a search loop
/// starts. A search that terminates early (time budget, unreachable
/// targets) is a normal outcome, not an error.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("no start cell configured")]
    MissingStart,

    #[error("no target cells configured and compute_all_distances is disabled")]
    NoTargets,

    #[error("grid has zero cells")]
    EmptyGrid,

    #[error("cell index {index} is outside the grid extent")]
    IndexOutOfBounds { index: String },

    #[error("image data length {data_len} does not match extent product {extent_len}")]
    ImageShapeMismatch { data_len: usize, extent_len: usize },

    #[error("cost function has not been initialized for this image")]
    CostFunctionNotInitialized,

    #[error("no completed search run to extract results from")]
    NoSearchRun,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
