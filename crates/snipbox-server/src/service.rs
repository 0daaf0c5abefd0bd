//! Snippet service: validation and orchestration over a store

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::Value;
use snipbox_core::{format_timestamp, NewSnippet, Snippet, SnippetView};
use snipbox_search::{SearchEngine, SearchHit, SearchQuery, TitleMatchEngine};
use snipbox_storage::SnippetStore;

use crate::error::ApiError;
use crate::request::{ApiRequest, ApiResponse};

const MISSING_BODY: &str = "missing request body";
const INVALID_BODY: &str = "invalid JSON body";
const MISSING_ID: &str = "missing snippet id";

/// Snippet service
///
/// Owns nothing but a handle to the store it was given; every component
/// that needs persistence gets it through here.
pub struct SnippetService<S: SnippetStore> {
    store: Arc<S>,
    engine: TitleMatchEngine,
}

fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("no snippet by id {} exists ", id))
}

impl<S: SnippetStore + 'static> SnippetService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            engine: TitleMatchEngine::new(),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Typed operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Validate and persist a new snippet
    pub async fn create_snippet(&self, new: NewSnippet) -> Result<Snippet, ApiError> {
        let snippet = new.into_snippet()?;
        self.store.put(&snippet).await?;
        tracing::info!("Created snippet {}", snippet.id);
        Ok(snippet)
    }

    pub async fn get_snippet(&self, id: &str) -> Result<Snippet, ApiError> {
        self.store.get(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn delete_snippet(&self, id: &str) -> Result<(), ApiError> {
        if !self.store.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!("Deleted snippet {}", id);
        Ok(())
    }

    pub async fn snippets(&self) -> Result<Vec<Snippet>, ApiError> {
        Ok(self.store.list_all().await?)
    }

    /// Scan every stored snippet and rank it against the query
    pub async fn search_snippets(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, ApiError> {
        let snippets = self.store.list_all().await?;
        Ok(self.engine.search(query, &snippets).await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Request handlers
    // ─────────────────────────────────────────────────────────────────────────

    /// `POST /add`
    pub async fn create(&self, req: ApiRequest) -> Result<ApiResponse, ApiError> {
        let body = req
            .body
            .ok_or_else(|| ApiError::BadRequest(MISSING_BODY.to_string()))?;
        let payload: Value = serde_json::from_slice(&body).map_err(|e| {
            tracing::debug!("Rejected snippet body: {}", e);
            ApiError::BadRequest(INVALID_BODY.to_string())
        })?;

        // Anything other than string fields counts as missing
        let field = |name: &str| payload.get(name).and_then(Value::as_str).map(str::to_string);
        let new = NewSnippet {
            title: field("title"),
            content: field("content"),
        };

        let snippet = self.create_snippet(new).await?;
        ApiResponse::json(StatusCode::CREATED, &SnippetView::from(&snippet))
    }

    /// `GET /snippet/:id`
    pub async fn get_by_id(&self, req: ApiRequest) -> Result<ApiResponse, ApiError> {
        let id = req
            .id
            .ok_or_else(|| ApiError::BadRequest(MISSING_ID.to_string()))?;
        let snippet = self.get_snippet(&id).await?;
        ApiResponse::ok(&SnippetView::from(&snippet))
    }

    /// `DELETE /delete/:id`
    pub async fn delete_by_id(&self, req: ApiRequest) -> Result<ApiResponse, ApiError> {
        let id = req
            .id
            .ok_or_else(|| ApiError::BadRequest(MISSING_ID.to_string()))?;
        self.delete_snippet(&id).await?;
        Ok(ApiResponse::empty(StatusCode::OK))
    }

    /// `GET /snippets`
    pub async fn list_all(&self, req: ApiRequest) -> Result<ApiResponse, ApiError> {
        if !req.query.is_empty() {
            return Err(ApiError::BadRequest(
                "GET /snippets does not accept query parameters".to_string(),
            ));
        }
        let views: Vec<SnippetView> = self.snippets().await?.iter().map(SnippetView::from).collect();
        ApiResponse::ok(&views)
    }

    /// `GET /search?query=...`
    pub async fn search(&self, req: ApiRequest) -> Result<ApiResponse, ApiError> {
        let query = SearchQuery::from_request(&req.query, req.has_body())?;
        let hits = self.search_snippets(&query).await?;
        ApiResponse::ok(&hits)
    }

    /// `GET /health`
    pub async fn health(&self, _req: ApiRequest) -> Result<ApiResponse, ApiError> {
        ApiResponse::ok(&serde_json::json!({
            "status": "ok",
            "timestamp": format_timestamp(&Utc::now()),
        }))
    }
}
