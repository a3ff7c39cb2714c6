//! Error types for the Vent site engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for storage, configuration and wiring failures.
///
/// Form validation problems are not errors in this sense: they are returned
/// as [`crate::form::FieldErrors`] values and shown next to the inputs.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum VentError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Backend storage error (lock poisoned, access denied, ...)
    #[error("Storage error: {0}")]
    Storage(String),

    /// The storage backend refused a write because it would exceed its quota.
    #[error("Storage quota exceeded for '{key}': {needed} bytes needed, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    /// Storage key that cannot be mapped onto the backend
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VentError {
    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Serialization error for `format` ("JSON", "TOML", ...)
    pub fn serialization(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a quota error
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}

impl From<std::io::Error> for VentError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for VentError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization("JSON", err.to_string())
    }
}

impl From<toml::de::Error> for VentError {
    fn from(err: toml::de::Error) -> Self {
        Self::serialization("TOML", err.to_string())
    }
}

impl From<toml::ser::Error> for VentError {
    fn from(err: toml::ser::Error) -> Self {
        Self::serialization("TOML", err.to_string())
    }
}

/// A type alias for `Result<T, VentError>`.
pub type Result<T> = std::result::Result<T, VentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let err: VentError = serde_json::from_str::<u32>("{").unwrap_err().into();
        assert!(err.is_serialization());
        assert!(err.to_string().starts_with("Serialization error: JSON"));
    }

    #[test]
    fn test_io_error_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: VentError = io.into();
        match err {
            VentError::Io { message } => assert!(message.contains("PermissionDenied")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_serialization_constructor() {
        let err = VentError::serialization("JSON", "patch must be a JSON object");
        assert!(err.is_serialization());
        assert_eq!(
            err.to_string(),
            "Serialization error: JSON - patch must be a JSON object"
        );
    }

    #[test]
    fn test_quota_message() {
        let err = VentError::QuotaExceeded {
            key: "comparison-list".to_string(),
            needed: 120,
            quota: 64,
        };
        assert!(err.is_quota_exceeded());
        assert_eq!(
            err.to_string(),
            "Storage quota exceeded for 'comparison-list': 120 bytes needed, quota is 64"
        );
    }
}
