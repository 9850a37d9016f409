use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, warn};

use crate::application::{ChatSessionHandler, CompletionService, SessionRepository};
use crate::connector::adapter::DEFAULT_SESSION_TTL;
use crate::connector::{InMemorySessionRepository, MockCompletion, OpenAiClient};
use crate::domain::DomainError;

use super::view::PageView;

pub struct ContainerConfig {
    /// Answer with the local echo service instead of calling the hosted API.
    /// No credential is required in this mode.
    pub mock_completions: bool,
    /// Idle time after which a browser session is discarded.
    pub session_ttl: Duration,
}


/// Wires the completion service, the session store and the page view.
///
/// `handler` is `None` when the credential is missing; the router then serves
/// only the configuration error page.
pub struct Container {
    handler: Option<ChatSessionHandler>,
    sessions: Arc<dyn SessionRepository>,
    page: PageView,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let completion_service: Option<Arc<dyn CompletionService>> = if config.mock_completions {
            debug!("Using mock completion service");
            Some(Arc::new(MockCompletion::echo()))
        } else {
            match OpenAiClient::from_env() {
                Ok(client) => {
                    debug!("Using OpenAI completion endpoint {}", client.url());
                    Some(Arc::new(client))
                }
                Err(DomainError::ConfigurationMissing) => {
                    warn!("OPENAI_API_KEY is not set; serving the configuration error page only");
                    None
                }
                Err(e) => return Err(e.into()),
            }
        };

        Self::build(completion_service, config.session_ttl)
    }

    pub fn with_completion_service(completion_service: Arc<dyn CompletionService>) -> Result<Self> {
        Self::build(Some(completion_service), DEFAULT_SESSION_TTL)
    }

    /// A container with no credential configured.
    pub fn disabled() -> Result<Self> {
        Self::build(None, DEFAULT_SESSION_TTL)
    }

    fn build(
        completion_service: Option<Arc<dyn CompletionService>>,
        session_ttl: Duration,
    ) -> Result<Self> {
        Ok(Self {
            handler: completion_service.map(ChatSessionHandler::new),
            sessions: Arc::new(InMemorySessionRepository::with_ttl(session_ttl)),
            page: PageView::new()?,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.handler.is_some()
    }

    pub fn handler(&self) -> Option<&ChatSessionHandler> {
        self.handler.as_ref()
    }

    pub fn sessions(&self) -> &Arc<dyn SessionRepository> {
        &self.sessions
    }

    pub fn page(&self) -> &PageView {
        &self.page
    }
}
