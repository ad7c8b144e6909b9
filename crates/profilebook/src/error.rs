//! Error types for profilebook.
//!
//! This module defines all error types used throughout the profilebook crate.
//! The HTTP mapping of each variant lives in [`crate::api`].

use std::net::SocketAddr;

use thiserror::Error;

use crate::validation::ValidationErrors;

/// The main error type for profilebook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Profile Errors ===
    /// A submitted payload violated one or more field rules.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// No profile is stored under the given id.
    #[error("profile {id} not found")]
    NotFound {
        /// The id that was looked up.
        id: u64,
    },

    /// A path segment that should name a profile is not a valid id.
    ///
    /// No profile can live under such an id, so this is reported the same
    /// way as [`Error::NotFound`].
    #[error("'{0}' is not a profile id")]
    InvalidId(String),

    /// The request body could not be read as JSON.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The request body exceeded the configured limit.
    #[error("request body larger than {limit} bytes")]
    PayloadTooLarge {
        /// The configured limit in bytes.
        limit: usize,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Server Errors ===
    /// Failed to bind the listening socket.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that couldn't be bound.
        addr: SocketAddr,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === I/O Errors ===
    /// File system or socket operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for profilebook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl Error {
    /// Create a not-found error for the given id.
    #[must_use]
    pub fn not_found(id: u64) -> Self {
        Self::NotFound { id }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create an invalid body error.
    #[must_use]
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::InvalidBody(message.into())
    }

    /// Check if this error means the profile does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidId(_))
    }

    /// Check if this error was caused by the client's input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::NotFound { .. }
                | Self::InvalidId(_)
                | Self::InvalidBody(_)
                | Self::PayloadTooLarge { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldError;

    #[test]
    fn test_error_display() {
        let err = Error::not_found(42);
        assert_eq!(err.to_string(), "profile 42 not found");

        let err = Error::internal("lock poisoned");
        assert_eq!(err.to_string(), "internal error: lock poisoned");
    }

    #[test]
    fn test_error_is_not_found() {
        assert!(Error::not_found(1).is_not_found());
        assert!(Error::InvalidId("abc".to_string()).is_not_found());
        assert!(!Error::internal("test").is_not_found());
    }

    #[test]
    fn test_error_is_client_error() {
        assert!(Error::not_found(1).is_client_error());
        assert!(Error::invalid_body("eof").is_client_error());
        assert!(Error::PayloadTooLarge { limit: 10 }.is_client_error());
        assert!(!Error::internal("boom").is_client_error());
    }

    #[test]
    fn test_validation_error_display() {
        let errors = ValidationErrors::from(vec![
            FieldError::new("name", "Name must be at least 2 characters"),
            FieldError::new("age", "Must be at least 13 years old"),
        ]);
        let err: Error = errors.into();
        let msg = err.to_string();
        assert!(msg.contains("name: Name must be at least 2 characters"));
        assert!(msg.contains("age: Must be at least 13 years old"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "max_body_bytes must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("max_body_bytes"));
    }

    #[test]
    fn test_bind_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err = Error::Bind {
            addr: "127.0.0.1:5000".parse().unwrap(),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("127.0.0.1:5000"));
        assert!(msg.contains("address in use"));
    }
}
