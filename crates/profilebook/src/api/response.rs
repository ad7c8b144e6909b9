//! HTTP mapping of [`Error`].

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};

use crate::error::Error;
use crate::validation::ValidationErrors;

/// Message returned for every unknown id.
pub const NOT_FOUND_MESSAGE: &str = "Profile not found";

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable summary.
    pub message: String,
    /// Per-field detail, present for validation failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl ErrorBody {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }
}

impl Error {
    /// The status code this error is reported with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::InvalidId(_) => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert a rejected JSON body into an error.
    #[must_use]
    pub fn from_json_rejection(rejection: &JsonRejection, limit: usize) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge { limit }
        } else {
            Self::InvalidBody(rejection.body_text())
        }
    }

    /// Convert a rejected path segment into an error.
    ///
    /// A segment that can't be decoded names no profile.
    #[must_use]
    pub fn from_path_rejection(rejection: &PathRejection) -> Self {
        if rejection.status().is_server_error() {
            Self::internal(rejection.body_text())
        } else {
            Self::InvalidId(rejection.body_text())
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::Validation(errors) => ErrorBody {
                message: errors.to_string(),
                errors: Some(errors),
            },
            Self::NotFound { .. } | Self::InvalidId(_) => {
                debug!(error = %self, "Profile lookup missed");
                ErrorBody::message(NOT_FOUND_MESSAGE)
            }
            Self::InvalidBody(_) | Self::PayloadTooLarge { .. } => {
                ErrorBody::message(self.to_string())
            }
            other => {
                error!(error = %other, "Request failed");
                ErrorBody::message("Internal server error")
            }
        };
        (status, Json(body)).into_response()
    }
}
