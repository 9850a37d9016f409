use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("completion credential is missing")]
    ConfigurationMissing,

    #[error("Completion request failed: {0}")]
    CompletionRequestFailed(String),

    #[error("File decode failed: {0}")]
    FileDecodeFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn completion(msg: impl Into<String>) -> Self {
        Self::CompletionRequestFailed(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::FileDecodeFailed(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_configuration_missing(&self) -> bool {
        matches!(self, Self::ConfigurationMissing)
    }

    pub fn is_completion_failure(&self) -> bool {
        matches!(self, Self::CompletionRequestFailed(_))
    }

    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::FileDecodeFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_detail() {
        let err = DomainError::completion("HTTP 401 Unauthorized");
        assert_eq!(err.to_string(), "Completion request failed: HTTP 401 Unauthorized");
        assert!(err.is_completion_failure());
        assert!(!err.is_decode_failure());
    }
}
