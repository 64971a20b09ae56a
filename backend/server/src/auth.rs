//! # Authentication
//!
//! Bearer tokens, issued when a user is created.
//!
//! - Token: 64 random hex characters, shown to the caller once
//! - Stored: SHA-256 digest of the token, mapped to a user id
//! - The admin account and its token come from configuration and are
//!   bootstrapped on every start, promoting an existing account if needed
//! - Emails are indexed in their own table for lookups
use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{DateTime, Utc};
use models::{User, UserCreate};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    error::AppError,
    state::State,
    store::{Record, Store},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub token_hash: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Record for Credential {
    const TABLE: &'static str = "credentials";

    fn key(&self) -> String {
        self.token_hash.clone()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Lowercased email to user id, so lookups skip the `users` scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailIndex {
    pub email: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Record for EmailIndex {
    const TABLE: &'static str = "user_emails";

    fn key(&self) -> String {
        self.email.clone()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

pub fn issue_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Stores a credential for `token`, replacing whatever it pointed at.
pub async fn grant(store: &Store, user_id: Uuid, token: &str) -> Result<(), AppError> {
    let credential = Credential {
        token_hash: hash_token(token),
        user_id,
        created_at: Utc::now(),
    };

    store.put(&credential).await?;
    Ok(())
}

pub async fn find_user_by_email(store: &Store, email: &str) -> Result<Option<User>, AppError> {
    let Some(entry) = store.get::<EmailIndex>(&email.to_lowercase()).await? else {
        return Ok(None);
    };

    Ok(store
        .find::<User>(entry.user_id)
        .await?
        .filter(|user| user.email == entry.email))
}

/// Writes `user` and its email index entry, dropping `previous_email` if it changed.
pub async fn save_user(store: &Store, user: &User, previous_email: Option<&str>) -> Result<(), AppError> {
    store.put(user).await?;
    store
        .put(&EmailIndex {
            email: user.email.clone(),
            user_id: user.id,
            created_at: user.created_at,
        })
        .await?;

    if let Some(previous) = previous_email.filter(|previous| *previous != user.email) {
        store.delete::<EmailIndex>(previous).await?;
    }

    Ok(())
}

/// Revokes every token of a user. Returns how many were removed.
pub async fn revoke_all(store: &Store, user_id: Uuid) -> Result<usize, AppError> {
    let mut revoked = 0;

    for credential in store.all::<Credential>().await? {
        if credential.user_id == user_id {
            store.delete::<Credential>(&credential.token_hash).await?;
            revoked += 1;
        }
    }

    Ok(revoked)
}

/// Makes sure the configured admin exists, is an active superuser, and that
/// `token` logs in as them.
pub async fn bootstrap_admin(store: &Store, email: &str, token: &str) -> Result<User, AppError> {
    let admin = match find_user_by_email(store, email).await? {
        Some(mut user) => {
            if !user.is_superuser || !user.is_active {
                user.is_superuser = true;
                user.is_active = true;
                save_user(store, &user, None).await?;
                warn!(email = %user.email, "Promoted existing user to admin");
            }
            user
        }
        None => {
            let create = UserCreate {
                email: email.to_string(),
                full_name: None,
                is_superuser: true,
            };
            create.validate()?;

            let user = create.into_user(Uuid::new_v4(), Utc::now());
            save_user(store, &user, None).await?;
            info!(email = %user.email, "Created admin user");
            user
        }
    };

    let existing = store.get::<Credential>(&hash_token(token)).await?;
    if existing.map(|credential| credential.user_id) != Some(admin.id) {
        grant(store, admin.id, token).await?;
        info!(email = %admin.email, "Granted admin token");
    }

    Ok(admin)
}

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    /// Owners and superusers may touch a record.
    pub fn ensure_owner(&self, owner_id: Uuid) -> Result<(), AppError> {
        if self.0.is_superuser || self.0.id == owner_id {
            Ok(())
        } else {
            Err(AppError::NotOwner)
        }
    }

    pub fn ensure_superuser(&self) -> Result<(), AppError> {
        if self.0.is_superuser {
            Ok(())
        } else {
            Err(AppError::NotSuperuser)
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if scheme.eq_ignore_ascii_case("bearer") {
        Some(token.trim()).filter(|token| !token.is_empty())
    } else {
        None
    }
}

#[async_trait]
impl FromRequestParts<Arc<State>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<State>) -> Result<Self, AppError> {
        let token = bearer_token(parts).ok_or(AppError::Unauthenticated)?;

        let credential = state
            .store
            .get::<Credential>(&hash_token(token))
            .await?
            .ok_or(AppError::InvalidToken)?;

        let user = state
            .store
            .find::<User>(credential.user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if !user.is_active {
            return Err(AppError::InactiveUser);
        }

        debug!(user = %user.id, "Authenticated request");
        Ok(CurrentUser(user))
    }
}
