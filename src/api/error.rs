use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::types::MessageResponse;
use crate::db::DbError;
use crate::recommend::RecommendError;

/// Every failure a handler can report. Converted to a status code and a
/// `{"message": ...}` body here and nowhere else.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid emotion: {0}")]
    InvalidEmotion(String),
    #[error("user already exists: {0}")]
    DuplicateEmail(String),
    #[error("invalid credentials for {0}")]
    InvalidCredentials(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("no route for {0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidEmotion(_) | ApiError::DuplicateEmail(_) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::InvalidEmotion(_) => "Invalid emotion",
            ApiError::DuplicateEmail(_) => "User already exists",
            ApiError::InvalidCredentials(_) => "Invalid email or password",
            ApiError::BadRequest(_) => "Invalid request body",
            ApiError::NotFound(_) => "Not found",
            ApiError::Internal(_) => "Internal Server Error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref detail) = self {
            error!("Request failed: {}", detail);
        }
        (self.status(), Json(MessageResponse::new(self.message()))).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::DuplicateEmail(email) => ApiError::DuplicateEmail(email),
            DbError::InvalidCredentials(email) => ApiError::InvalidCredentials(email),
            DbError::Sqlx(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<RecommendError> for ApiError {
    fn from(e: RecommendError) -> Self {
        match e {
            RecommendError::InvalidEmotion(emotion) => ApiError::InvalidEmotion(emotion),
        }
    }
}
