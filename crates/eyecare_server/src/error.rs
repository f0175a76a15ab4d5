//! HTTP error mapping.
//!
//! Every failure leaves the server as `{"error": "<message>"}`. Store
//! failures are logged in full and answered with a generic message.

use crate::state::StoreAccessError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use eyecare_core::RepoError;
use log::error;
use serde::Serialize;

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::BadRequest(err.to_string()),
            err @ RepoError::NotFound { .. } => Self::NotFound(err.to_string()),
            RepoError::Conflict(message) => Self::Conflict(message),
            err @ (RepoError::Db(_) | RepoError::InvalidData(_) | RepoError::Credential(_)) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<StoreAccessError> for ApiError {
    fn from(value: StoreAccessError) -> Self {
        match value {
            StoreAccessError::Repo(err) => err.into(),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Internal(detail) => {
                error!("event=api_error module=http status=error detail={detail}");
                INTERNAL_MESSAGE
            }
            Self::BadRequest(message)
            | Self::Unauthorized(message)
            | Self::NotFound(message)
            | Self::Conflict(message) => message.as_str(),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
