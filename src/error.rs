//! Error types and handling for the `WanderLens` application

use thiserror::Error;

/// Main error type for the `WanderLens` application
#[derive(Error, Debug)]
pub enum WanderLensError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A referenced record does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// A record collides with an existing one
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Hosted model or third-party service failures
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl WanderLensError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new conflict error
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WanderLensError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            WanderLensError::Validation { message } => message.clone(),
            WanderLensError::NotFound { message } => message.clone(),
            WanderLensError::Conflict { message } => message.clone(),
            WanderLensError::Upstream { .. } => {
                "An external service failed to respond. Please try again later.".to_string()
            }
            WanderLensError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            WanderLensError::General { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = WanderLensError::config("missing API key");
        assert!(matches!(config_err, WanderLensError::Config { .. }));

        let validation_err = WanderLensError::validation("caption is required");
        assert!(matches!(validation_err, WanderLensError::Validation { .. }));

        let conflict_err = WanderLensError::conflict("email taken");
        assert!(matches!(conflict_err, WanderLensError::Conflict { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = WanderLensError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let upstream_err = WanderLensError::upstream("connection reset");
        assert!(upstream_err.user_message().contains("external service"));
        assert!(!upstream_err.user_message().contains("connection reset"));

        let validation_err = WanderLensError::validation("Please add a caption.");
        assert_eq!(validation_err.user_message(), "Please add a caption.");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: WanderLensError = io_err.into();
        assert!(matches!(err, WanderLensError::Io { .. }));
    }
}
