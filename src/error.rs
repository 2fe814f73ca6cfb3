use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Result alias used by handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced to clients as JSON `{error, message}` bodies.
///
/// Unauthenticated access is deliberately absent: the session extractor
/// answers it with a redirect to `/login` instead of an error body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("username or email already exists")]
    DuplicateCredential,

    /// Uniform login failure; never reveals whether the username exists.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("invalid date, expected YYYY-MM-DD")]
    InvalidDate,

    #[error("invalid amount")]
    InvalidAmount,

    #[error("{0}")]
    Validation(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_)
            | Self::InvalidDate
            | Self::InvalidAmount
            | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::DuplicateCredential => StatusCode::CONFLICT,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::DuplicateCredential => "duplicate_credential",
            Self::InvalidCredentials => "invalid_credentials",
            Self::InvalidDate => "invalid_date",
            Self::InvalidAmount => "invalid_amount",
            Self::Validation(_) => "validation_error",
            Self::Database(_) => "database_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            match &self {
                ApiError::Database(e) => error!(error = %e, "database error"),
                ApiError::Internal(e) => error!(error = %e, "internal error"),
                _ => {}
            }
        }
        let body = ErrorBody {
            error: self.code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
