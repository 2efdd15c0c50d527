//! Error handling - maps domain outcomes onto HTTP responses.
//!
//! Busy is a 503 with a retry hint, not a fault; archived drafts answer
//! 410 so clients can tell them apart from 404.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use manuscript_shared::StatusResponse;
use std::fmt;

/// Application-level error type that converts to enveloped responses.
#[derive(Debug)]
pub enum AppError {
    Busy,
    NotFound(String),
    Archived(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Busy => write!(f, "Store busy"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Archived(msg) => write!(f, "Archived: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Busy => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Archived(_) => StatusCode::GONE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Busy => StatusResponse::error(
                "The draft store is currently busy, please try again in a moment",
            ),
            AppError::NotFound(detail) => StatusResponse::error(detail),
            AppError::Archived(detail) => StatusResponse::error(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                StatusResponse::error("Something went wrong, please try again later")
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

// Conversion from domain errors
impl From<manuscript_core::DraftError> for AppError {
    fn from(err: manuscript_core::DraftError) -> Self {
        use manuscript_core::DraftError;
        match err {
            DraftError::Busy => AppError::Busy,
            DraftError::NotFound(id) => AppError::NotFound(format!("No draft exists with id {id}")),
            DraftError::Archived(id) => {
                AppError::Archived(format!("Draft {id} has been archived"))
            }
            DraftError::Backend(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
