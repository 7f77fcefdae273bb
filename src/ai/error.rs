use thiserror::Error;

use crate::WanderLensError;

/// Why a flow produced no result
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    /// The input failed its schema before anything was sent
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The model could not be reached or answered with an error status
    #[error("Network error: {0}")]
    Network(String),

    /// The model answered, but not with output matching the schema
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),
}

impl FlowError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Message safe to show in the UI
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            FlowError::Validation(message) => message.clone(),
            FlowError::Network(_) => {
                "Could not reach the AI service. Please check your connection and try again."
                    .to_string()
            }
            FlowError::InvalidResponse(_) => {
                "The AI service did not return a valid response. Please try again.".to_string()
            }
        }
    }
}

impl From<FlowError> for WanderLensError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::Validation(message) => WanderLensError::validation(message),
            other => WanderLensError::upstream(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_differ_by_kind() {
        let validation = FlowError::validation("Please enter a destination.");
        assert_eq!(validation.user_message(), "Please enter a destination.");

        let network = FlowError::network("connection refused");
        assert!(network.user_message().contains("Could not reach"));
        assert!(!network.user_message().contains("refused"));

        let invalid = FlowError::invalid_response("no valid response");
        assert!(invalid.user_message().contains("valid response"));
    }

    #[test]
    fn test_conversion_into_app_error() {
        let err: WanderLensError = FlowError::validation("bad").into();
        assert!(matches!(err, WanderLensError::Validation { .. }));

        let err: WanderLensError = FlowError::network("down").into();
        assert!(matches!(err, WanderLensError::Upstream { .. }));
    }
}
