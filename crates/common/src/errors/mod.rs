//! Error types for Literatus services
//!
//! Provides:
//! - Distinct error types for different failure modes
//! - HTTP status code mapping
//! - Structured error responses
//! - Error codes for client handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    MissingField,
    InsufficientPapers,

    // Resource errors (4xxx)
    NotFound,
    PaperNotFound,

    // Import errors (5xxx)
    PdfParseError,
    EmptyDocument,

    // External service errors (8xxx)
    AssistantError,
    AssistantTimeout,
    MalformedAssistantReply,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            // Validation (1xxx)
            ErrorCode::ValidationError => 1001,
            ErrorCode::MissingField => 1002,
            ErrorCode::InsufficientPapers => 1003,

            // Resources (4xxx)
            ErrorCode::NotFound => 4001,
            ErrorCode::PaperNotFound => 4002,

            // Import (5xxx)
            ErrorCode::PdfParseError => 5001,
            ErrorCode::EmptyDocument => 5002,

            // External (8xxx)
            ErrorCode::AssistantError => 8001,
            ErrorCode::AssistantTimeout => 8002,
            ErrorCode::MalformedAssistantReply => 8003,

            // Internal (9xxx)
            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Required field missing: {field}")]
    MissingField { field: String },

    #[error("Need at least two papers to build a relation graph, got {count}")]
    InsufficientPapers { count: usize },

    // Resource errors
    #[error("Paper not found: {id}")]
    PaperNotFound { id: String },

    // Import errors
    #[error("PDF parse error: {message}")]
    PdfParse { message: String },

    #[error("No text content could be extracted from the document")]
    EmptyDocument,

    // External service errors
    #[error("Assistant error: {message}")]
    Assistant { message: String },

    #[error("Assistant timed out after {timeout_ms}ms")]
    AssistantTimeout { timeout_ms: u64 },

    #[error("Assistant reply was not the expected JSON: {message}")]
    MalformedAssistantReply { message: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    // Internal errors
    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::MissingField { .. } => ErrorCode::MissingField,
            AppError::InsufficientPapers { .. } => ErrorCode::InsufficientPapers,
            AppError::PaperNotFound { .. } => ErrorCode::PaperNotFound,
            AppError::PdfParse { .. } => ErrorCode::PdfParseError,
            AppError::EmptyDocument => ErrorCode::EmptyDocument,
            AppError::Assistant { .. } => ErrorCode::AssistantError,
            AppError::AssistantTimeout { .. } => ErrorCode::AssistantTimeout,
            AppError::MalformedAssistantReply { .. } => ErrorCode::MalformedAssistantReply,
            AppError::HttpClient(_) => ErrorCode::AssistantError,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
            AppError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation { .. } | AppError::MissingField { .. } => {
                StatusCode::BAD_REQUEST
            }

            // 404 Not Found
            AppError::PaperNotFound { .. } => StatusCode::NOT_FOUND,

            // 422 Unprocessable Entity
            AppError::InsufficientPapers { .. }
            | AppError::PdfParse { .. }
            | AppError::EmptyDocument => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            AppError::Internal { .. }
            | AppError::Configuration { .. }
            | AppError::Serialization(_)
            | AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // 502 Bad Gateway
            AppError::Assistant { .. }
            | AppError::MalformedAssistantReply { .. }
            | AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,

            // 504 Gateway Timeout
            AppError::AssistantTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Check if this error is a client error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Structured error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        if self.is_server_error() {
            tracing::error!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Server error"
            );
        } else if self.is_client_error() {
            tracing::warn!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Client error"
            );
        }

        let body = ErrorResponse {
            error: ErrorDetails {
                code,
                message,
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}
