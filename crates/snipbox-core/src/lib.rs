//! Snipbox Core - Snippet data model
//!
//! This crate provides the data types shared by the storage, search
//! and server crates of the Snipbox snippet service.

pub mod error;
pub mod limits;
pub mod snippet;

pub use error::{Error, Result};
pub use limits::{validate_namespace, ValidationError, DEFAULT_NAMESPACE, MAX_QUERY_LEN};
pub use snippet::{format_timestamp, NewSnippet, Snippet, SnippetId, SnippetView};
