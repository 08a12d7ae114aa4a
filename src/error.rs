use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::collections::HashMap;
use thiserror::Error;
use tracing::error;

use crate::response::{messages, WebResponse};

/// Failures surfaced by the entity stores. Mapped from `sqlx::Error` in one
/// place so the service layer only ever sees this taxonomy.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) => match db.kind() {
                sqlx::error::ErrorKind::UniqueViolation
                | sqlx::error::ErrorKind::ForeignKeyViolation => {
                    StoreError::ConstraintViolation(db.to_string())
                }
                _ => StoreError::Query(db.to_string()),
            },
            sqlx::Error::Io(e) => StoreError::Connection(e.to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Connection(err.to_string())
            }
            other => StoreError::Query(other.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or missing request fields; carries a field -> message map
    /// for the response envelope.
    #[error("validation failed")]
    Validation(HashMap<String, String>),

    /// Malformed query parameters (page/size and friends).
    #[error("invalid parameters")]
    InvalidParams(HashMap<String, String>),

    /// Login failure. Unknown username and wrong password both collapse
    /// into this variant so the client cannot tell them apart.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Bearer token missing, malformed, expired, or unresolvable. Always
    /// presented to the client as a single generic "Invalid token".
    #[error("unauthorized")]
    Unauthorized,

    #[error("resource not found")]
    NotFound,

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal server error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

// Encoding only fails on a misconfigured signing setup; decode failures are
// mapped to Unauthorized explicitly at the verification site.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Internal(format!("token signing failed: {}", err))
    }
}

impl AppError {
    /// Stable client-facing message for each taxonomy member. Internal
    /// detail stays in the server-side logs.
    pub fn client_message(&self) -> &'static str {
        match self {
            AppError::Validation(_) => messages::INVALID_REQUEST,
            AppError::InvalidParams(_) => messages::INVALID_PARAMS,
            AppError::InvalidCredentials => messages::INVALID_CREDENTIALS,
            AppError::Unauthorized => messages::INVALID_TOKEN,
            AppError::NotFound | AppError::Store(StoreError::NotFound) => {
                messages::FAILED_FIND_DATA
            }
            AppError::Store(StoreError::ConstraintViolation(_)) => messages::DUPLICATE_DATA,
            _ => messages::INTERNAL_ERROR,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidParams(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound | AppError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("request failed: {}", self);
        }

        let errors = match self {
            AppError::Validation(fields) | AppError::InvalidParams(fields) => {
                Some(fields.clone())
            }
            _ => None,
        };

        let body = WebResponse::<()>::error(status, self.client_message(), errors);
        HttpResponse::build(status).json(body)
    }
}
