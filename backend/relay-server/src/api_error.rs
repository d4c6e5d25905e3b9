//! JSON error responses for the HTTP listener.

use relay_hub::HubError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "MESSAGE_TOO_LARGE")
    pub code: String,
    pub message: String,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Payload could not be used (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// Payload over the configured limit (413)
    #[error("Payload too large: {message} {location}")]
    PayloadTooLarge {
        message: String,
        location: ErrorLocation,
    },

    /// Hub is not accepting work (503)
    #[error("Service unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<HubError> for ApiError {
    #[track_caller]
    fn from(err: HubError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        let message = err.to_string();
        match err {
            HubError::MessageTooLarge { .. } => Self::PayloadTooLarge { message, location },
            HubError::InvalidMessage { .. } => Self::BadRequest { message, location },
            HubError::HubClosed { .. } => Self::Unavailable { message, location },
            _ => Self::Internal { message, location },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest { message, .. } => {
                log::debug!("Rejected request: {message}");
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
            }
            ApiError::PayloadTooLarge { message, .. } => {
                log::debug!("Rejected request: {message}");
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", message)
            }
            ApiError::Unavailable { message, .. } => {
                log::warn!("Service unavailable: {message}");
                (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", message)
            }
            ApiError::Internal { message, location } => {
                log::error!("Internal error: {message} {location}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
            }
        };

        let body = ApiErrorResponse {
            error: ApiErrorBody {
                code: code.into(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
