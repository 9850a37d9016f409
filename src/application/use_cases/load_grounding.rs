use tracing::{info, warn};

use crate::domain::{DomainError, SessionState};

/// Installs an uploaded file as the session's grounding document.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoadGroundingUseCase;

impl LoadGroundingUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Decodes `bytes` as UTF-8 and replaces the grounding text wholesale.
    ///
    /// On a decode error the previous grounding text is left in place.
    pub fn execute<'s>(
        &self,
        state: &'s mut SessionState,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<&'s str, DomainError> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            warn!("Could not decode {} as UTF-8: {}", file_name, e);
            DomainError::decode(e.to_string())
        })?;

        info!("Loaded grounding document {} ({} bytes)", file_name, bytes.len());
        state.set_grounding_text(text);
        Ok(state.grounding_text())
    }
}
