// ABOUTME: API error type and its mapping to HTTP status codes and JSON bodies
// ABOUTME: Every error response is `{ error, details? }` and is logged with a request id

use axum::{
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use guilted_core::{ResponseFormatError, ValidationError};
use guilted_gifts::GiftError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

/// Header carrying the id that error responses are logged under
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Which endpoint an error came from; selects the public error message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Ideas,
    Recipe,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Ideas => "Failed to generate gift ideas",
            Operation::Recipe => "Failed to generate gift recipe",
        }
    }

    pub fn format_message(self) -> &'static str {
        match self {
            Operation::Ideas => "Invalid gift ideas format received from AI",
            Operation::Recipe => "Invalid gift recipe format received from AI",
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{}: {source}", .operation.failure_message())]
    Generation {
        operation: Operation,
        source: GiftError,
    },

    #[error("{}: {source}", .operation.format_message())]
    MalformedResponse {
        operation: Operation,
        source: ResponseFormatError,
    },
}

/// Error body returned by every endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Classify a gift service failure for the given endpoint
    pub fn generation(operation: Operation, err: GiftError) -> Self {
        match err {
            GiftError::InvalidInput(e) => ApiError::Validation(e),
            GiftError::MalformedResponse(source) => ApiError::MalformedResponse { operation, source },
            source => ApiError::Generation { operation, source },
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Generation { .. } | ApiError::MalformedResponse { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Public body; upstream causes are never exposed
    fn to_body(&self) -> ErrorResponse {
        let (error, details) = match self {
            ApiError::InvalidBody(msg) => ("Invalid request body".to_string(), Some(msg.clone())),
            ApiError::Validation(ValidationError::MissingFields(fields)) => (
                "Missing required fields".to_string(),
                Some(fields.join(", ")),
            ),
            ApiError::Validation(e @ ValidationError::InvalidGiftType(_)) => {
                ("Invalid gift type".to_string(), Some(e.to_string()))
            }
            ApiError::Generation { operation, .. } => {
                (operation.failure_message().to_string(), None)
            }
            ApiError::MalformedResponse { operation, source } => (
                operation.format_message().to_string(),
                Some(source.to_string()),
            ),
        };
        ErrorResponse { error, details }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let status = self.status();

        if status.is_server_error() {
            error!(
                request_id = %request_id,
                status = status.as_u16(),
                error = %self,
                "Gift generation failed"
            );
        } else {
            info!(
                request_id = %request_id,
                status = status.as_u16(),
                error = %self,
                "Rejected gift request"
            );
        }

        let mut response = (status, Json(self.to_body())).into_response();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
