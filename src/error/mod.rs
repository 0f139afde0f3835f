//!
//! # Custom Error Handling
//!
//! Two tiers of failure flow through this crate. Validators, narrowers and
//! the password hashing primitives report recoverable failures as plain
//! `Result`s. At the call sites that want fail-fast behaviour those failures
//! become a [`WrappedError`], which keeps the full cause chain.
//!
//! `AppError` sits at the outermost boundary. It classifies a failure for
//! whoever consumes this library (an HTTP layer, the `shepherd` binary) and
//! renders it as a JSON body. `From` conversions allow the `?` operator from
//! every failure type the crate produces.

mod wrapped;

pub use wrapped::{BoxError, WrappedError};

use serde_json::{json, Value};
use std::fmt;
use validator::ValidationErrors;

use crate::auth::HashError;
use crate::time::TimeoutError;

/// Represents all failure categories surfaced to callers of the library.
#[derive(Debug)]
pub enum AppError {
    /// The caller sent something malformed (HTTP 400).
    BadRequest(String),
    /// Input was well-formed but failed validation (HTTP 422).
    /// Messages are already scrubbed of secret values.
    ValidationError(String),
    /// An unexpected failure inside the service (HTTP 500).
    InternalServerError(String),
    /// The process environment is misconfigured (HTTP 500).
    ConfigError(String),
    /// A deadline passed before the work finished (HTTP 504).
    Timeout(String),
}

impl AppError {
    /// HTTP status code matching the error category.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::BadRequest(_) => 400,
            AppError::ValidationError(_) => 422,
            AppError::InternalServerError(_) | AppError::ConfigError(_) => 500,
            AppError::Timeout(_) => 504,
        }
    }

    /// The message carried by the error, without its category prefix.
    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest(msg)
            | AppError::ValidationError(msg)
            | AppError::InternalServerError(msg)
            | AppError::ConfigError(msg)
            | AppError::Timeout(msg) => msg,
        }
    }

    /// JSON error body, `{"error": "<message>"}`.
    pub fn to_json(&self) -> Value {
        json!({
            "error": self.message()
        })
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration Error: {}", msg),
            AppError::Timeout(msg) => write!(f, "Timeout: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// Password fields are validated through `Password::audit`, so the messages
/// preserved here never echo a plaintext password.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<HashError> for AppError {
    fn from(error: HashError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

/// Converts a fatal `WrappedError` into `AppError::InternalServerError`.
///
/// Only the outermost message reaches the client; the whole span trail is
/// logged so the root cause stays traceable.
impl From<WrappedError> for AppError {
    fn from(error: WrappedError) -> AppError {
        log::error!("{}", error.spans().join(": "));
        AppError::InternalServerError(error.message().to_string())
    }
}

impl From<TimeoutError> for AppError {
    fn from(error: TimeoutError) -> AppError {
        AppError::Timeout(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::BadRequest("Invalid input".into()).status_code(), 400);
        assert_eq!(AppError::ValidationError("too short".into()).status_code(), 422);
        assert_eq!(AppError::InternalServerError("Server error".into()).status_code(), 500);
        assert_eq!(AppError::ConfigError("bad env".into()).status_code(), 500);
        assert_eq!(AppError::Timeout("slow".into()).status_code(), 504);
    }

    #[test]
    fn test_json_body_carries_bare_message() {
        let error = AppError::ValidationError("the length must be at least 8".into());
        assert_eq!(
            error.to_json(),
            json!({ "error": "the length must be at least 8" })
        );
        assert_eq!(
            error.to_string(),
            "Validation Error: the length must be at least 8"
        );
    }

    #[test]
    fn test_wrapped_error_keeps_only_outer_message() {
        let wrapped = WrappedError::with_cause("failed to hash password", "invalid cost");
        let error = AppError::from(wrapped);
        match error {
            AppError::InternalServerError(msg) => assert_eq!(msg, "failed to hash password"),
            other => panic!("Unexpected error type: {:?}", other),
        }
    }

    #[test]
    fn test_timeout_conversion() {
        let error = AppError::from(TimeoutError::new("hashing took too long", Duration::from_millis(1500)));
        assert_eq!(error.status_code(), 504);
        assert_eq!(error.message(), "hashing took too long: 1.50sec");
    }
}
