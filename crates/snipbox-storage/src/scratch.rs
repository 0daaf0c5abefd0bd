//! Throwaway stores for tests and local experiments

use crate::error::StorageResult;
use crate::redb::RedbStorage;
use crate::traits::SnippetStore;
use async_trait::async_trait;
use snipbox_core::Snippet;
use std::path::Path;
use tempfile::TempDir;

/// A file-backed store living in its own temporary directory
///
/// Each instance gets a fresh database file, so concurrent test runs never
/// observe each other's data. Dropping the store releases the database and
/// removes the directory; [`ScratchStore::teardown`] does the same but reports
/// cleanup errors.
pub struct ScratchStore {
    // Declared before `dir` so the database is released before the directory goes away
    storage: RedbStorage,
    dir: TempDir,
}

impl ScratchStore {
    pub fn new() -> StorageResult<Self> {
        let dir = tempfile::Builder::new().prefix("snipbox_test_").tempdir()?;
        let storage = RedbStorage::open(dir.path().join("snipbox.redb"))?;
        tracing::debug!("Created scratch store in {:?}", dir.path());
        Ok(Self { storage, dir })
    }

    /// Directory holding the backing database file
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Release the database and delete its directory
    pub fn teardown(self) -> StorageResult<()> {
        let Self { storage, dir } = self;
        drop(storage);
        dir.close()?;
        Ok(())
    }
}

#[async_trait]
impl SnippetStore for ScratchStore {
    fn namespace(&self) -> &str {
        self.storage.namespace()
    }

    async fn close(&self) -> StorageResult<()> {
        self.storage.close().await
    }

    async fn health_check(&self) -> StorageResult<bool> {
        self.storage.health_check().await
    }

    async fn put(&self, snippet: &Snippet) -> StorageResult<()> {
        self.storage.put(snippet).await
    }

    async fn get(&self, id: &str) -> StorageResult<Option<Snippet>> {
        self.storage.get(id).await
    }

    async fn delete(&self, id: &str) -> StorageResult<bool> {
        self.storage.delete(id).await
    }

    async fn list_all(&self) -> StorageResult<Vec<Snippet>> {
        self.storage.list_all().await
    }

    async fn reset(&self) -> StorageResult<()> {
        self.storage.reset().await
    }
}
