//! # Redis
//!
//! Persistent tables for the service.
//!
//! ## Layout
//!
//! - One Redis hash per table: `pantry:ingredients`, `pantry:recipes`,
//!   `pantry:recipe_ingredients`, `pantry:user_ingredients`, `pantry:users`,
//!   `pantry:credentials`, `pantry:user_emails`
//! - Field is the record key (a UUID, or a token digest for credentials), value is JSON
//! - Single-field operations are atomic, multi-record cascades are not
//!
//! ## Sizing
//!
//! Listing and suggestions read whole tables with `HVALS`. A household catalog
//! of a few thousand ingredients and recipes stays well under a megabyte.
use std::time::Duration;

use async_trait::async_trait;
use redis::{
    AsyncCommands, Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use tracing::debug;

use crate::store::{Backend, StoreError};

const KEY_PREFIX: &str = "pantry";

pub struct RedisBackend {
    connection: ConnectionManager,
}

pub async fn init_redis(redis_url: &str) -> Result<RedisBackend, StoreError> {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(100));

    let client = Client::open(redis_url)?;
    let connection = client.get_connection_manager_with_config(config).await?;

    Ok(RedisBackend { connection })
}

fn hash_key(table: &str) -> String {
    format!("{KEY_PREFIX}:{table}")
}

#[async_trait]
impl Backend for RedisBackend {
    async fn fetch(&self, table: &str, key: &str) -> Result<Option<String>, StoreError> {
        let mut connection = self.connection.clone();

        Ok(connection.hget(hash_key(table), key).await?)
    }

    async fn fetch_all(&self, table: &str) -> Result<Vec<String>, StoreError> {
        let mut connection = self.connection.clone();
        let rows: Vec<String> = connection.hvals(hash_key(table)).await?;

        debug!(table, rows = rows.len(), "Loaded table");
        Ok(rows)
    }

    async fn save(&self, table: &str, key: &str, value: String) -> Result<(), StoreError> {
        let mut connection = self.connection.clone();
        let _: () = connection.hset(hash_key(table), key, value).await?;

        Ok(())
    }

    async fn remove(&self, table: &str, key: &str) -> Result<bool, StoreError> {
        let mut connection = self.connection.clone();
        let removed: usize = connection.hdel(hash_key(table), key).await?;

        Ok(removed > 0)
    }
}
