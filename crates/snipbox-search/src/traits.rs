//! Search engine traits

use async_trait::async_trait;
use serde::Serialize;
use snipbox_core::Snippet;

use crate::query::SearchQuery;

pub use crate::error::{SearchError, SearchResult as Result};

/// A snippet that matched a query, with its relevance score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub score: u32,
}

/// Trait for search engines
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Rank snippets against a query, best first. Non-matching snippets
    /// are left out.
    async fn search(&self, query: &SearchQuery, snippets: &[Snippet]) -> Result<Vec<SearchHit>>;
}
