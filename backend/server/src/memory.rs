use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::store::{Backend, StoreError};

/// Process-local tables, used when no Redis URL is configured.
#[derive(Default)]
pub struct MemoryBackend {
    tables: RwLock<HashMap<String, HashMap<String, String>>>,
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn fetch(&self, table: &str, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .tables
            .read()
            .get(table)
            .and_then(|rows| rows.get(key).cloned()))
    }

    async fn fetch_all(&self, table: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .tables
            .read()
            .get(table)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn save(&self, table: &str, key: &str, value: String) -> Result<(), StoreError> {
        self.tables
            .write()
            .entry(table.to_string())
            .or_default()
            .insert(key.to_string(), value);

        Ok(())
    }

    async fn remove(&self, table: &str, key: &str) -> Result<bool, StoreError> {
        Ok(self
            .tables
            .write()
            .get_mut(table)
            .is_some_and(|rows| rows.remove(key).is_some()))
    }
}
