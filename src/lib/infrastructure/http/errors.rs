//! API error-handling module

use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use css_inline::InlineError;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::communication::{mailer::DeliveryError, message::ValidationError};

/// An error response
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// The error message
    #[schema(example = "An error occurred")]
    pub error: String,
}

/// An error raised in the API
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApiError {
    /// The status code
    #[schema(example = 500, value_type = u16)]
    #[serde(with = "http_serde::status_code")]
    pub status: StatusCode,

    /// The error message
    #[schema(example = "An error occurred")]
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    /// Create a new unauthorized error
    pub fn new_401(message: &str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Create a new unsupported media type error
    pub fn new_415(message: &str) -> Self {
        Self::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, message)
    }

    /// Create a new unprocessable entity error
    pub fn new_422(message: &str) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    /// Create new internal server error
    pub fn new_500(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Create a new bad gateway error
    pub fn new_502(message: &str) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingRecipient => {
                ApiError::new_422("Please provide at least one recipient")
            }
            ValidationError::MissingSender => ApiError::new_422("Please provide a sender"),
            ValidationError::MissingSubject => ApiError::new_422("Please provide a subject"),
            ValidationError::MissingContent => {
                ApiError::new_422("Please provide either text or html content")
            }
            ValidationError::EmptyEmailAddress => {
                ApiError::new_422("Email addresses must not be empty")
            }
        }
    }
}

impl From<DeliveryError> for ApiError {
    fn from(err: DeliveryError) -> Self {
        error!(error = %err, "failed to send email");

        ApiError::new_502("Failed to send email")
    }
}

impl From<InlineError> for ApiError {
    fn from(err: InlineError) -> Self {
        error!(error = %err, "failed to inline CSS");

        unknown_error()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected request body");

        match rejection {
            JsonRejection::MissingJsonContentType(_) => ApiError::new_415("Unsupported content-type"),
            other => ApiError::new(other.status(), "Invalid request body"),
        }
    }
}

fn unknown_error() -> ApiError {
    ApiError::new_500("An error occurred")
}
