//! Error types for answer resolution
//!
//! This module provides the error taxonomy shared by the registry, the
//! arithmetic evaluator, the unit converter and every plugin:
//! - Structured error variants with descriptive messages
//! - Stable error codes for programmatic handling
//! - HTTP status code mapping for server integrations
//! - Error categories for grouping and filtering
//! - JSON serialization for API responses
//!
//! Expected failures (a bad expression, an unknown unit pair) are returned
//! as values. Built-in plugins render them into `Answer.content`; only
//! conditions an embedding service should treat as server faults escape
//! through `Err`.
//!
//! # Example
//!
//! ```rust
//! use answer_core::error::{AnswerError, ErrorCategory};
//!
//! fn report(err: AnswerError) {
//!     match err.category() {
//!         ErrorCategory::Validation => println!("could not parse input"),
//!         ErrorCategory::Internal => println!("plugin bug"),
//!         _ => println!("other error"),
//!     }
//!
//!     let status = err.http_status_code();
//!     println!("{} -> {}", err.error_code(), status);
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for answer operations
pub type Result<T> = std::result::Result<T, AnswerError>;

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Input could not be understood (400)
    Validation,
    /// Input was understood but has no defined result (422)
    Arithmetic,
    /// Request was cancelled or timed out (499-style, mapped to 408)
    Cancelled,
    /// Configuration could not be loaded (500)
    Configuration,
    /// Internal invariant violated (500)
    Internal,
    /// External collaborator failed (502)
    External,
}

/// Errors that can occur while resolving a query
#[derive(Error, Debug)]
pub enum AnswerError {
    // ═══════════════════════════════════════════════════════════════════════
    // Arithmetic evaluator
    // ═══════════════════════════════════════════════════════════════════════

    /// The expression is not well-formed arithmetic
    #[error("Invalid expression: '{expression}'")]
    InvalidExpression { expression: String },

    /// Division or modulo with a zero right operand
    #[error("Division by zero")]
    DivisionByZero,

    /// Evaluation produced an infinite or NaN value
    #[error("Numeric overflow evaluating '{expression}'")]
    NumericOverflow { expression: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Unit converter
    // ═══════════════════════════════════════════════════════════════════════

    /// No category table contains both units
    #[error("Cannot convert from '{from}' to '{to}'")]
    UnknownConversion { from: String, to: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Plugin contract
    // ═══════════════════════════════════════════════════════════════════════

    /// A plugin produced an answer field that cannot be serialized
    #[error("Malformed answer field '{field}': {reason}. This is a plugin bug; please report it.")]
    MalformedAnswer { field: String, reason: String },

    /// A plugin pattern failed to compile
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A collaborator plugin failed in a way it could not render
    #[error("Plugin '{plugin}' failed: {reason}")]
    PluginFailed { plugin: String, reason: String },

    /// The query context was cancelled or its deadline passed
    #[error("Query cancelled before an answer was produced")]
    Cancelled,

    // ═══════════════════════════════════════════════════════════════════════
    // Infrastructure errors (configuration, serialization, I/O)
    // ═══════════════════════════════════════════════════════════════════════

    /// Configuration value is invalid
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    /// JSON serialization or deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O operation failed
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error that shouldn't happen
    #[error("Internal error: {reason}. This is a bug; please report it.")]
    Internal { reason: String },
}

impl AnswerError {
    /// Shorthand for an [`AnswerError::InvalidExpression`]
    pub fn invalid_expression(expression: impl Into<String>) -> Self {
        AnswerError::InvalidExpression {
            expression: expression.into(),
        }
    }

    /// Shorthand for an [`AnswerError::UnknownConversion`]
    pub fn unknown_conversion(from: impl Into<String>, to: impl Into<String>) -> Self {
        AnswerError::UnknownConversion {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Returns true if this error describes the user's input rather than a fault
    ///
    /// Plugins render these into `Answer.content` instead of propagating them.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::Arithmetic
        )
    }

    /// Returns true if this error is a client error (4xx equivalent)
    pub fn is_client_error(&self) -> bool {
        matches!(self.http_status_code(), 400..=499)
    }

    /// Returns true if this error is a server error (5xx equivalent)
    pub fn is_server_error(&self) -> bool {
        matches!(self.http_status_code(), 500..=599)
    }

    /// Returns the error category for grouping
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnswerError::InvalidExpression { .. }
            | AnswerError::UnknownConversion { .. } => ErrorCategory::Validation,

            AnswerError::DivisionByZero
            | AnswerError::NumericOverflow { .. } => ErrorCategory::Arithmetic,

            AnswerError::Cancelled => ErrorCategory::Cancelled,

            AnswerError::Config { .. }
            | AnswerError::Io { .. }
            | AnswerError::Json(_) => ErrorCategory::Configuration,

            AnswerError::MalformedAnswer { .. }
            | AnswerError::InvalidPattern { .. }
            | AnswerError::Internal { .. } => ErrorCategory::Internal,

            AnswerError::PluginFailed { .. } => ErrorCategory::External,
        }
    }

    /// Returns the stable error code for this error
    ///
    /// Codes are uppercase, underscore-separated identifiers that remain
    /// stable across versions. Built-in plugins copy them into
    /// `data.error` when rendering a failure.
    pub fn error_code(&self) -> &'static str {
        match self {
            AnswerError::InvalidExpression { .. } => "INVALID_EXPRESSION",
            AnswerError::DivisionByZero => "DIVISION_BY_ZERO",
            AnswerError::NumericOverflow { .. } => "NUMERIC_OVERFLOW",
            AnswerError::UnknownConversion { .. } => "UNKNOWN_CONVERSION",
            AnswerError::MalformedAnswer { .. } => "MALFORMED_ANSWER",
            AnswerError::InvalidPattern { .. } => "INVALID_PATTERN",
            AnswerError::PluginFailed { .. } => "PLUGIN_FAILED",
            AnswerError::Cancelled => "CANCELLED",
            AnswerError::Config { .. } => "CONFIG_ERROR",
            AnswerError::Json(_) => "JSON_ERROR",
            AnswerError::Io { .. } => "IO_ERROR",
            AnswerError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - unparseable input
            AnswerError::InvalidExpression { .. }
            | AnswerError::UnknownConversion { .. } => 400,

            // 408 Request Timeout - caller gave up
            AnswerError::Cancelled => 408,

            // 422 Unprocessable Entity - well-formed but undefined
            AnswerError::DivisionByZero
            | AnswerError::NumericOverflow { .. } => 422,

            // 500 Internal Server Error - our fault
            AnswerError::MalformedAnswer { .. }
            | AnswerError::InvalidPattern { .. }
            | AnswerError::Config { .. }
            | AnswerError::Json(_)
            | AnswerError::Io { .. }
            | AnswerError::Internal { .. } => 500,

            // 502 Bad Gateway - collaborator failed
            AnswerError::PluginFailed { .. } => 502,
        }
    }

    /// Converts this error to a JSON-serializable response object
    ///
    /// ```json
    /// {
    ///   "error": {
    ///     "code": "DIVISION_BY_ZERO",
    ///     "message": "Division by zero",
    ///     "category": "arithmetic"
    ///   }
    /// }
    /// ```
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                category: self.category(),
            },
        }
    }
}

impl From<std::io::Error> for AnswerError {
    fn from(err: std::io::Error) -> Self {
        AnswerError::Io {
            message: err.to_string(),
        }
    }
}

/// JSON-serializable error response for APIs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetail,
}

/// Error detail for JSON responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Stable error code (e.g., "DIVISION_BY_ZERO")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Error category
    pub category: ErrorCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AnswerError::DivisionByZero.error_code(), "DIVISION_BY_ZERO");
        assert_eq!(
            AnswerError::unknown_conversion("meters", "grams").error_code(),
            "UNKNOWN_CONVERSION"
        );
        assert_eq!(
            AnswerError::invalid_expression("2 +").error_code(),
            "INVALID_EXPRESSION"
        );
    }

    #[test]
    fn test_user_facing_errors() {
        assert!(AnswerError::DivisionByZero.is_user_facing());
        assert!(AnswerError::invalid_expression("(").is_user_facing());
        assert!(!AnswerError::Cancelled.is_user_facing());
        assert!(!AnswerError::MalformedAnswer {
            field: "result".to_string(),
            reason: "NaN".to_string(),
        }
        .is_user_facing());
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(AnswerError::invalid_expression("x").http_status_code(), 400);
        assert_eq!(AnswerError::DivisionByZero.http_status_code(), 422);
        assert_eq!(AnswerError::Cancelled.http_status_code(), 408);
        assert_eq!(
            AnswerError::PluginFailed {
                plugin: "dictionary".to_string(),
                reason: "timeout".to_string(),
            }
            .http_status_code(),
            502
        );
    }

    #[test]
    fn test_is_client_server_error() {
        let client_err = AnswerError::unknown_conversion("meters", "grams");
        assert!(client_err.is_client_error());
        assert!(!client_err.is_server_error());

        let server_err = AnswerError::Internal {
            reason: "poisoned".to_string(),
        };
        assert!(!server_err.is_client_error());
        assert!(server_err.is_server_error());
    }

    #[test]
    fn test_error_response_serialization() {
        let err = AnswerError::invalid_expression("2 + * 3");
        let response = err.to_error_response();

        let json = serde_json::to_string_pretty(&response).unwrap();
        assert!(json.contains("INVALID_EXPRESSION"));
        assert!(json.contains("2 + * 3"));
        assert!(json.contains("validation"));

        let parsed: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.error.code, "INVALID_EXPRESSION");
        assert_eq!(parsed.error.category, ErrorCategory::Validation);
    }

    #[test]
    fn test_messages_carry_offending_input() {
        let msg = AnswerError::unknown_conversion("meters", "celsius").to_string();
        assert!(msg.contains("meters"));
        assert!(msg.contains("celsius"));
    }
}
