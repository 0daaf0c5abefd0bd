//! Search error types

use thiserror::Error;

/// Result type alias for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Reasons a search request is rejected
///
/// The messages are returned to HTTP clients verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("missing `query` parameter")]
    MissingQuery,

    #[error("GET /search does not accept a body")]
    BodyNotAllowed,

    #[error("GET /search only accepts `query` parameter")]
    UnexpectedParameters,

    #[error("`query` parameter is too long (max {max} chars)")]
    QueryTooLong { len: usize, max: usize },

    #[error("`query` parameter contains invalid characters")]
    InvalidCharacters,
}
