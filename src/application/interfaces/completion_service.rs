use async_trait::async_trait;

use crate::domain::{CompletionSettings, DomainError, Message};

/// An interface for sending role-tagged messages to a hosted LLM and
/// receiving one text completion.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. Use cases stay decoupled from any particular provider or HTTP
/// client library.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Return the text of the first completion, untrimmed.
    ///
    /// Every failure (transport, HTTP status, malformed payload) is reported
    /// as [`DomainError::CompletionRequestFailed`].
    async fn complete(
        &self,
        messages: &[Message],
        settings: &CompletionSettings,
    ) -> Result<String, DomainError>;
}
