use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ValidationError, check_len, check_optional_len};

fn check_email(email: &str) -> Result<(), ValidationError> {
    check_len("email", email, 3, 255)?;

    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
    });
    if !valid || email.chars().any(char::is_whitespace) {
        return Err(ValidationError::new("email", "not a valid email address"));
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_superuser: bool,
}

impl UserCreate {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            full_name: None,
            is_superuser: false,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_email(&self.email)?;
        check_optional_len("full_name", self.full_name.as_deref(), 255)
    }

    pub fn into_user(self, id: Uuid, created_at: DateTime<Utc>) -> User {
        User {
            id,
            email: self.email.to_lowercase(),
            full_name: self.full_name,
            is_active: true,
            is_superuser: self.is_superuser,
            created_at,
        }
    }
}

/// Returned once on user creation; the token is not stored in clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreated {
    pub user: User,
    pub token: String,
}

/// Changes a user may make to their own account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdateMe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub full_name: Option<Option<String>>,
}

impl UserUpdateMe {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(email) = &self.email {
            check_email(email)?;
        }
        if let Some(full_name) = &self.full_name {
            check_optional_len("full_name", full_name.as_deref(), 255)?;
        }

        Ok(())
    }

    pub fn apply(self, user: &mut User) {
        if let Some(email) = self.email {
            user.email = email.to_lowercase();
        }
        if let Some(full_name) = self.full_name {
            user.full_name = full_name;
        }
    }
}

/// Superuser changes to any account, including its flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub full_name: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,
}

impl UserUpdate {
    fn profile(&self) -> UserUpdateMe {
        UserUpdateMe {
            email: self.email.clone(),
            full_name: self.full_name.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.profile().validate()
    }

    pub fn apply(self, user: &mut User) {
        self.profile().apply(user);

        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
        if let Some(is_superuser) = self.is_superuser {
            user.is_superuser = is_superuser;
        }
    }
}
