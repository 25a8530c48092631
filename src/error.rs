//! HTTP error type and domain error mapping.
//!
//! Every failed API request returns the same JSON envelope:
//!
//! ```json
//! {
//!   "error": {
//!     "code": "conflict",
//!     "message": "Short code already exists",
//!     "details": { "reason": "duplicate_code" }
//!   }
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::domain::errors::{AdmissionError, StoreError, ValidationError};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Application-level error rendered as a JSON response.
#[derive(Debug, Error)]
pub enum AppError {
    /// 400 Bad Request
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// 404 Not Found
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// 409 Conflict
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// 503 Service Unavailable
    #[error("{message}")]
    Unavailable { message: String, details: Value },

    /// 500, the generator ran out of attempts.
    #[error("{message}")]
    Exhausted { message: String, details: Value },

    /// 500 Internal Server Error
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Exhausted { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converts into the serializable payload without the HTTP envelope.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Unavailable { message, details } => ("service_unavailable", message, details),
            AppError::Exhausted { message, details } => ("code_space_exhausted", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateCode => AppError::conflict(
                "Short code already exists",
                json!({ "reason": "duplicate_code" }),
            ),
            StoreError::NotFound => AppError::not_found("Short link not found", json!({})),
            StoreError::Unavailable(_) => {
                AppError::unavailable("Storage is temporarily unavailable", json!({}))
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::DuplicateLongUrl => AppError::conflict(
                "The long URL already exists in the registry",
                json!({ "reason": "duplicate_long_url" }),
            ),
            ValidationError::ReservedCode => AppError::conflict(
                "The short code conflicts with an existing path",
                json!({ "reason": "reserved_code" }),
            ),
            ValidationError::InvalidCode(reason) => AppError::bad_request(
                "Invalid short code",
                json!({ "field": "short_code", "reason": reason }),
            ),
            ValidationError::InvalidUrl(reason) => AppError::bad_request(
                "Invalid long URL",
                json!({ "field": "long_url", "reason": reason }),
            ),
        }
    }
}

impl From<AdmissionError> for AppError {
    fn from(err: AdmissionError) -> Self {
        match err {
            AdmissionError::Validation(e) => e.into(),
            AdmissionError::Store(e) => e.into(),
            AdmissionError::CodeSpaceExhausted { attempts } => AppError::Exhausted {
                message: "Could not generate a unique short code".to_string(),
                details: json!({ "attempts": attempts }),
            },
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}
