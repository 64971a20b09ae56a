use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use models::ValidationError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{config::ConfigError, store::StoreError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Not enough permissions")]
    NotOwner,

    #[error("The user doesn't have enough privileges")]
    NotSuperuser,

    #[error("Super users are not allowed to delete themselves")]
    SelfDelete,

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Inactive user")]
    InactiveUser,

    #[error("The user with this email already exists in the system.")]
    EmailTaken,

    #[error("Internal error: {0}")]
    InternalError(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedPayload(_) | AppError::Invalid(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::NotOwner | AppError::InactiveUser | AppError::EmailTaken => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotSuperuser | AppError::SelfDelete | AppError::InvalidToken => {
                StatusCode::FORBIDDEN
            }
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let detail = match &self {
            AppError::InternalError(e) => {
                error!(error = %e, "Request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let mut response = (status, Json(json!({ "detail": detail }))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedPayload(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::MalformedPayload(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::MalformedPayload(rejection.body_text())
    }
}

/// Failures before the server accepts connections.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to bootstrap admin: {0}")]
    Bootstrap(#[from] AppError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
