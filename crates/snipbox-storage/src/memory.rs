//! In-memory storage backend for testing

use crate::error::{StorageError, StorageResult};
use crate::traits::SnippetStore;
use async_trait::async_trait;
use snipbox_core::{validate_namespace, Snippet, DEFAULT_NAMESPACE};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// In-memory storage backend
///
/// Useful for testing and temporary storage. Nothing survives the process.
pub struct MemoryStorage {
    snippets: RwLock<BTreeMap<String, Snippet>>,
    namespace: String,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            snippets: RwLock::new(BTreeMap::new()),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    pub fn with_namespace(namespace: &str) -> StorageResult<Self> {
        validate_namespace(namespace)?;
        Ok(Self {
            snippets: RwLock::new(BTreeMap::new()),
            namespace: namespace.to_string(),
        })
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnippetStore for MemoryStorage {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn close(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<bool> {
        Ok(true)
    }

    async fn put(&self, snippet: &Snippet) -> StorageResult<()> {
        let mut snippets = self
            .snippets
            .write()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?;
        snippets.insert(snippet.id.to_string(), snippet.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> StorageResult<Option<Snippet>> {
        let snippets = self
            .snippets
            .read()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?;
        Ok(snippets.get(id).cloned())
    }

    async fn delete(&self, id: &str) -> StorageResult<bool> {
        let mut snippets = self
            .snippets
            .write()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?;
        Ok(snippets.remove(id).is_some())
    }

    async fn list_all(&self) -> StorageResult<Vec<Snippet>> {
        let snippets = self
            .snippets
            .read()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?;
        Ok(snippets.values().cloned().collect())
    }

    async fn reset(&self) -> StorageResult<()> {
        let mut snippets = self
            .snippets
            .write()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?;
        snippets.clear();
        Ok(())
    }

    async fn count(&self) -> StorageResult<usize> {
        let snippets = self
            .snippets
            .read()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?;
        Ok(snippets.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.namespace(), DEFAULT_NAMESPACE);

        // Create a snippet
        let snippet = Snippet::new("Find me", "I am here");
        let id = snippet.id.to_string();
        storage.put(&snippet).await.unwrap();

        // Retrieve the snippet
        let retrieved = storage.get(&id).await.unwrap();
        assert_eq!(retrieved.map(|s| s.title), Some("Find me".to_string()));

        // Delete the snippet
        assert!(storage.delete(&id).await.unwrap());
        assert!(storage.get(&id).await.unwrap().is_none());
        assert!(!storage.delete(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let storage = MemoryStorage::with_namespace("unit").unwrap();
        storage.put(&Snippet::new("a", "1")).await.unwrap();
        storage.put(&Snippet::new("b", "2")).await.unwrap();
        assert_eq!(storage.count().await.unwrap(), 2);

        storage.reset().await.unwrap();
        assert!(storage.list_all().await.unwrap().is_empty());
    }
}
