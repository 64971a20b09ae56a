//! # Storage
//!
//! One hash per table, JSON values keyed by record id.
//!
//! - `Backend` moves raw JSON in and out of a table
//! - `Store` adds typing on top with serde_json
//! - Listing loads the whole table, ordering is by creation time then key
//!
//! Referential cleanup (cascading deletes) is done by the routes, not here.
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use models::{Ingredient, PantryItem, Recipe, RecipeIngredient, User};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use uuid::Uuid;

use crate::memory::MemoryBackend;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Corrupt record in {table}: {source}")]
    Corrupt {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

#[async_trait]
pub trait Backend: Send + Sync {
    async fn fetch(&self, table: &str, key: &str) -> Result<Option<String>, StoreError>;

    async fn fetch_all(&self, table: &str) -> Result<Vec<String>, StoreError>;

    async fn save(&self, table: &str, key: &str, value: String) -> Result<(), StoreError>;

    /// Returns whether the key existed.
    async fn remove(&self, table: &str, key: &str) -> Result<bool, StoreError>;
}

pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    const TABLE: &'static str;

    fn key(&self) -> String;

    fn created_at(&self) -> DateTime<Utc>;
}

macro_rules! uuid_record {
    ($type:ty, $table:literal) => {
        impl Record for $type {
            const TABLE: &'static str = $table;

            fn key(&self) -> String {
                self.id.to_string()
            }

            fn created_at(&self) -> DateTime<Utc> {
                self.created_at
            }
        }
    };
}

uuid_record!(Ingredient, "ingredients");
uuid_record!(Recipe, "recipes");
uuid_record!(RecipeIngredient, "recipe_ingredients");
uuid_record!(PantryItem, "user_ingredients");
uuid_record!(User, "users");

#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn Backend>,
}

impl Store {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryBackend::default()))
    }

    pub async fn get<T: Record>(&self, key: &str) -> Result<Option<T>, StoreError> {
        self.backend
            .fetch(T::TABLE, key)
            .await?
            .map(|json| decode::<T>(&json))
            .transpose()
    }

    pub async fn find<T: Record>(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        self.get(&id.to_string()).await
    }

    pub async fn all<T: Record>(&self) -> Result<Vec<T>, StoreError> {
        let mut records = self
            .backend
            .fetch_all(T::TABLE)
            .await?
            .iter()
            .map(|json| decode::<T>(json))
            .collect::<Result<Vec<T>, _>>()?;

        records.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.key().cmp(&b.key()))
        });

        Ok(records)
    }

    pub async fn put<T: Record>(&self, record: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(record)?;

        self.backend.save(T::TABLE, &record.key(), json).await
    }

    pub async fn delete<T: Record>(&self, key: &str) -> Result<bool, StoreError> {
        self.backend.remove(T::TABLE, key).await
    }

    pub async fn remove<T: Record>(&self, id: Uuid) -> Result<bool, StoreError> {
        self.delete::<T>(&id.to_string()).await
    }
}

fn decode<T: Record>(json: &str) -> Result<T, StoreError> {
    serde_json::from_str(json).map_err(|source| StoreError::Corrupt {
        table: T::TABLE,
        source,
    })
}
