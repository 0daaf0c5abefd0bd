//! Transport-neutral request and response types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::ApiError;

/// Everything a handler may look at
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    /// `:id` path segment, for routes that have one
    pub id: Option<String>,
    /// Query parameters in the order they were sent
    pub query: Vec<(String, String)>,
    /// Raw request body; `None` when the request carried none
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Attach a raw body. An empty body counts as no body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        self.body = (!body.is_empty()).then_some(body);
        self
    }

    pub fn with_json<T: Serialize>(self, value: &T) -> Result<Self, ApiError> {
        Ok(self.with_body(serde_json::to_vec(value)?))
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

/// Status plus optional JSON payload
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Option<serde_json::Value>,
}

impl ApiResponse {
    pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Result<Self, ApiError> {
        Ok(Self {
            status,
            body: Some(serde_json::to_value(value)?),
        })
    }

    pub fn ok<T: Serialize>(value: &T) -> Result<Self, ApiError> {
        Self::json(StatusCode::OK, value)
    }

    pub fn empty(status: StatusCode) -> Self {
        Self { status, body: None }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}
