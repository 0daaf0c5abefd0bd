//! Error types for Snipbox Core

use thiserror::Error;

use crate::limits::ValidationError;

/// Result type alias using Snipbox's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Snipbox error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(#[from] ValidationError),
}
