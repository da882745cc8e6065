//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. Route handlers that can fail return
//! `Result<T, AppError>`.

use artisan_market_core::IdError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::media::MediaError;
use crate::profiles::ProfileApiError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Profile API operation failed.
    #[error("Profile API error: {0}")]
    Profiles(ProfileApiError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<ProfileApiError> for AppError {
    fn from(err: ProfileApiError) -> Self {
        match err {
            ProfileApiError::NotFound(what) => Self::NotFound(what),
            other => Self::Profiles(other),
        }
    }
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<IdError> for AppError {
    fn from(err: IdError) -> Self {
        Self::BadRequest(format!("invalid artisan id: {err}"))
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Profiles(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Profiles(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Profiles(_) => "Artisan directory is unavailable".to_string(),
            _ => self.to_string(),
        };

        (self.status(), message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
