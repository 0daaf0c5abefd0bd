//! Storage backend trait definitions

use crate::error::StorageResult;
use async_trait::async_trait;
use snipbox_core::Snippet;

/// Trait for snippet store implementations
///
/// A store maps snippet ids to snippet records under a single namespace.
/// Every operation is durable before it returns; there are no
/// cross-key transactions.
#[async_trait]
pub trait SnippetStore: Send + Sync {
    /// Namespace this store reads and writes under
    fn namespace(&self) -> &str;

    /// Close the storage connection
    async fn close(&self) -> StorageResult<()>;

    /// Health check
    async fn health_check(&self) -> StorageResult<bool>;

    /// Write a snippet, replacing any record with the same id
    async fn put(&self, snippet: &Snippet) -> StorageResult<()>;

    /// Look up a snippet by id; `None` means it does not exist
    async fn get(&self, id: &str) -> StorageResult<Option<Snippet>>;

    /// Remove a snippet. Returns whether a record was removed; deleting a
    /// missing id is not an error.
    async fn delete(&self, id: &str) -> StorageResult<bool>;

    /// Scan every snippet in the namespace
    async fn list_all(&self) -> StorageResult<Vec<Snippet>>;

    /// Remove every snippet in the namespace
    async fn reset(&self) -> StorageResult<()>;

    /// Number of stored snippets
    async fn count(&self) -> StorageResult<usize> {
        Ok(self.list_all().await?.len())
    }
}
