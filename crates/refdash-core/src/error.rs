//! Error types for the refdash client.

use crate::configuration::ConfigurationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire refdash client.
///
/// Variants follow the three failure families the dashboard distinguishes:
/// transport failures, failures reported by the backend (including
/// authentication), and validation failures on user-entered configuration.
/// The remaining variants cover local storage and configuration files.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum RefdashError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// The backend rejected the credentials, or no session is established.
    #[error("Not authenticated: {0}")]
    Unauthorized(String),

    /// A payload from the backend could not be parsed into a domain record.
    #[error("Invalid {entity} payload: {message}")]
    InvalidPayload { entity: String, message: String },

    /// User-entered configuration failed validation.
    #[error("Validation failed: {0}")]
    Validation(ConfigurationError),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local storage error (session file, locks)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RefdashError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Backend error.
    ///
    /// 401 and 403 are folded into [`RefdashError::Unauthorized`].
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        match status {
            401 | 403 => Self::Unauthorized(message.into()),
            _ => Self::Backend {
                status,
                message: message.into(),
            },
        }
    }

    /// Creates an Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates an InvalidPayload error
    pub fn invalid_payload(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a transport failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if the backend rejected the session
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Check if this is a backend-reported failure (including auth failures)
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. } | Self::Unauthorized(_))
    }

    /// Check if this is a validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a malformed backend payload
    pub fn is_invalid_payload(&self) -> bool {
        matches!(self, Self::InvalidPayload { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<ConfigurationError> for RefdashError {
    fn from(err: ConfigurationError) -> Self {
        Self::Validation(err)
    }
}

impl From<std::io::Error> for RefdashError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RefdashError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RefdashError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for RefdashError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (used at the CLI boundary)
impl From<anyhow::Error> for RefdashError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, RefdashError>`.
pub type Result<T> = std::result::Result<T, RefdashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_auth_statuses_become_unauthorized() {
        assert!(RefdashError::backend(401, "expired").is_unauthorized());
        assert!(RefdashError::backend(403, "CSRF Failed").is_unauthorized());

        let err = RefdashError::backend(500, "boom");
        assert!(err.is_backend());
        assert!(!err.is_unauthorized());
        assert_eq!(err.to_string(), "Backend error (500): boom");
    }

    #[test]
    fn test_validation_conversion() {
        let err: RefdashError = ConfigurationError::MissingRepository.into();
        assert!(err.is_validation());
        assert!(!err.is_backend());
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: RefdashError = io.into();
        match err {
            RefdashError::Io { message } => assert!(message.contains("PermissionDenied")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
