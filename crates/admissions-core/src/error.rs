//! Error types module
//!
//! This module provides the error type shared by the Store Service and the Submission
//! Gateway. Every failure is funnelled into `AppError`, which knows how it should be
//! presented over HTTP through the `ErrorMetadata` trait.
//!
//! The `Database` variant carries a `sqlx::Error` only when the `sqlx` feature is on.
//! Without it (e.g. in the API client) the variant keeps the rendered message instead.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

use crate::constants::{
    METHOD_NOT_ALLOWED_MESSAGE, PROCESSING_FAILED_PREFIX, SUBMISSION_FAILED_MESSAGE,
};

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for failures caused by the peer (client or downstream service)
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DATABASE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether resubmitting the same request could succeed
    fn is_recoverable(&self) -> bool;

    /// Client-facing message, rendered as the `message` field of the response body
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Error {action}: {source}")]
    Database {
        action: &'static str,
        #[source]
        source: SqlxError,
    },

    #[cfg(not(feature = "sqlx"))]
    #[error("Error {action}: {message}")]
    Database {
        action: &'static str,
        message: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Store service responded with status {status}")]
    Upstream {
        status: u16,
        message: Option<String>,
    },

    #[error("Internal error: {message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Label a database failure with the operation that was running, e.g.
    /// `AppError::database("saving application", err)`.
    #[cfg(feature = "sqlx")]
    pub fn database(action: &'static str, source: SqlxError) -> Self {
        AppError::Database { action, source }
    }
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database {
            action: "accessing database",
            source: err,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::Database { .. } => (500, "DATABASE_ERROR", true, LogLevel::Error),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", false, LogLevel::Debug),
        AppError::Validation(_) => (400, "VALIDATION_FAILED", false, LogLevel::Debug),
        AppError::MethodNotAllowed => (405, "METHOD_NOT_ALLOWED", false, LogLevel::Debug),
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", false, LogLevel::Debug),
        AppError::Processing(_) => (500, "PROCESSING_ERROR", true, LogLevel::Error),
        AppError::Upstream { .. } => (500, "UPSTREAM_REJECTED", false, LogLevel::Warn),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for logs
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Database { .. } => "Database",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Validation(_) => "Validation",
            AppError::MethodNotAllowed => "MethodNotAllowed",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Processing(_) => "Processing",
            AppError::Upstream { .. } => "Upstream",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            // The Store Service reports the underlying failure to its only caller, the gateway.
            AppError::Database { .. } => self.to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::Validation(_) => "Validation failed".to_string(),
            AppError::MethodNotAllowed => METHOD_NOT_ALLOWED_MESSAGE.to_string(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::Processing(ref msg) => format!("{}{}", PROCESSING_FAILED_PREFIX, msg),
            AppError::Upstream { ref message, .. } => message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| SUBMISSION_FAILED_MESSAGE.to_string()),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
