use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Unset keeps every record in process memory.
    pub redis_url: Option<String>,
    pub admin_email: String,
    /// Bootstrap token for the admin account; no admin is created without it.
    pub admin_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 1111,
            redis_url: None,
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_token: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            port: try_load("RUST_PORT", "1111")?,
            redis_url: var("REDIS_URL"),
            admin_email: try_load("ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL)?,
            admin_token: read_secret("ADMIN_TOKEN"),
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key,
                reason: e.to_string(),
            }
        })
}

/// Docker secret first, then the environment.
fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    match read_to_string(&path) {
        Ok(secret) => Some(secret.trim().to_string()).filter(|s| !s.is_empty()),
        Err(e) => {
            info!("Failed to read {secret_name} from file: {e}, trying environment");
            let secret = var(secret_name);
            if secret.is_none() {
                warn!("{secret_name} not found");
            }
            secret
        }
    }
}
