//! Snipbox Server - HTTP API for snippets
//!
//! Handlers are plain functions from [`ApiRequest`] to [`ApiResponse`];
//! the axum layer in [`http`] only moves bytes in and out of them.

pub mod error;
pub mod http;
pub mod request;
pub mod service;

pub use error::ApiError;
pub use http::{create_router, run_http_server};
pub use request::{ApiRequest, ApiResponse};
pub use service::SnippetService;
