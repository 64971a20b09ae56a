use std::sync::Arc;

use tracing::{info, warn};

use super::{
    auth::bootstrap_admin, config::Config, database::init_redis, error::StartupError,
    store::Store,
};

pub struct State {
    pub config: Config,
    pub store: Store,
}

impl State {
    pub async fn new(config: Config) -> Result<Arc<Self>, StartupError> {
        let store = match &config.redis_url {
            Some(redis_url) => {
                info!("Connecting to Redis...");
                Store::new(Arc::new(init_redis(redis_url).await?))
            }
            None => {
                warn!("REDIS_URL not set, records are kept in memory only");
                Store::memory()
            }
        };

        Self::with_store(config, store).await
    }

    pub async fn with_store(config: Config, store: Store) -> Result<Arc<Self>, StartupError> {
        match &config.admin_token {
            Some(token) => {
                bootstrap_admin(&store, &config.admin_email, token).await?;
            }
            None => warn!("ADMIN_TOKEN not set, no admin account is available"),
        }

        Ok(Arc::new(Self { config, store }))
    }
}
