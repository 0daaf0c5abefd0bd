//! ReDB storage backend

use crate::error::{StorageError, StorageResult};
use crate::traits::SnippetStore;
use ::redb::{Database, ReadableTable, TableDefinition};
use async_trait::async_trait;
use snipbox_core::{validate_namespace, Snippet, DEFAULT_NAMESPACE};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

// Table definitions
const KV: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

/// ReDB storage backend
///
/// Records live in a single `kv` table under `<namespace>:<id>` keys, so
/// several namespaces can share one database file without seeing each
/// other's data.
pub struct RedbStorage {
    db: Mutex<Database>,
    namespace: String,
}

impl RedbStorage {
    /// Open or create a ReDB database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::open_with_namespace(path, DEFAULT_NAMESPACE)
    }

    /// Open or create a ReDB database, scoping all records to `namespace`
    pub fn open_with_namespace(path: impl AsRef<Path>, namespace: &str) -> StorageResult<Self> {
        validate_namespace(namespace)?;

        let path = path.as_ref();
        let db = Database::create(path).map_err(|e| StorageError::Database(e.to_string()))?;

        // Initialize tables
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| StorageError::Database(e.to_string()))?;
            {
                let _ = write_txn.open_table(KV)?;
            }
            write_txn
                .commit()
                .map_err(|e| StorageError::Database(e.to_string()))?;
        }

        tracing::debug!("Opened snippet store at {:?} (namespace: {})", path, namespace);

        Ok(Self {
            db: Mutex::new(db),
            namespace: namespace.to_string(),
        })
    }

    fn db(&self) -> StorageResult<MutexGuard<'_, Database>> {
        self.db
            .lock()
            .map_err(|e| StorageError::Database(e.to_string()))
    }

    fn prefix(&self) -> String {
        format!("{}:", self.namespace)
    }

    fn make_key(&self, id: &str) -> String {
        format!("{}:{}", self.namespace, id)
    }
}

#[async_trait]
impl SnippetStore for RedbStorage {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn close(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<bool> {
        let db = self.db()?;
        let read_txn = db.begin_read()?;
        read_txn.open_table(KV)?;
        Ok(true)
    }

    async fn put(&self, snippet: &Snippet) -> StorageResult<()> {
        let key = self.make_key(&snippet.id.to_string());
        let value = serde_json::to_vec(snippet)?;

        let db = self.db()?;
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV)?;
            table.insert(key.as_str(), value.as_slice())?;
        }
        write_txn.commit()?;

        Ok(())
    }

    async fn get(&self, id: &str) -> StorageResult<Option<Snippet>> {
        let key = self.make_key(id);

        let db = self.db()?;
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(KV)?;

        if let Some(value) = table.get(key.as_str())? {
            let snippet: Snippet = serde_json::from_slice(value.value())?;
            Ok(Some(snippet))
        } else {
            Ok(None)
        }
    }

    async fn delete(&self, id: &str) -> StorageResult<bool> {
        let key = self.make_key(id);

        let db = self.db()?;
        let write_txn = db.begin_write()?;
        let removed;
        {
            let mut table = write_txn.open_table(KV)?;
            removed = table.remove(key.as_str())?.is_some();
        }
        write_txn.commit()?;

        Ok(removed)
    }

    async fn list_all(&self) -> StorageResult<Vec<Snippet>> {
        let prefix = self.prefix();

        let db = self.db()?;
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(KV)?;

        let mut snippets = Vec::new();
        for entry in table.range(prefix.as_str()..)? {
            let (key, value) = entry?;
            if !key.value().starts_with(&prefix) {
                break;
            }
            let snippet: Snippet = serde_json::from_slice(value.value())?;
            snippets.push(snippet);
        }

        Ok(snippets)
    }

    async fn reset(&self) -> StorageResult<()> {
        let prefix = self.prefix();

        let db = self.db()?;
        let write_txn = db.begin_write()?;

        let keys_to_delete: Vec<String> = {
            let table = write_txn.open_table(KV)?;
            let mut keys = Vec::new();
            for entry in table.range(prefix.as_str()..)? {
                let (key, _) = entry?;
                if !key.value().starts_with(&prefix) {
                    break;
                }
                keys.push(key.value().to_string());
            }
            keys
        };

        {
            let mut table = write_txn.open_table(KV)?;
            for key in &keys_to_delete {
                table.remove(key.as_str())?;
            }
        }
        write_txn.commit()?;
        tracing::debug!(
            "Reset namespace {}: removed {} snippets",
            self.namespace,
            keys_to_delete.len()
        );

        Ok(())
    }
}
