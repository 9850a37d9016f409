use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::CompletionService;
use crate::domain::{CompletionSettings, DomainError, Message};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    n: u32,
    stop: Option<&'a [String]>,
    temperature: f32,
}

/// Minimal subset of the chat completions response we care about.
/// `finish_reason` and `usage` are deliberately not read.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for the OpenAI chat completions API (and compatible servers).
///
/// ```text
/// OPENAI_API_KEY=sk-...                      # required
/// OPENAI_BASE_URL=https://api.openai.com     # optional
/// ```
///
/// No request timeout and no retry: a call blocks until the transport
/// returns or fails.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            url,
        }
    }

    /// Construct from already-resolved configuration values.
    ///
    /// A missing or empty key is [`DomainError::ConfigurationMissing`].
    pub fn from_values(
        api_key: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self, DomainError> {
        let key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(DomainError::ConfigurationMissing)?;
        let base = base_url
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self::new(key, base))
    }

    /// Construct from `OPENAI_API_KEY` and `OPENAI_BASE_URL`.
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_values(
            std::env::var(API_KEY_VAR).ok(),
            std::env::var(BASE_URL_VAR).ok(),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Extract the first completion's text from a response body.
    fn parse_response(body: &str) -> Result<String, DomainError> {
        let api_response: ApiResponse = serde_json::from_str(body)
            .map_err(|e| DomainError::completion(format!("failed to parse response: {e}")))?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::completion("response contained no choices"))?;

        choice
            .message
            .content
            .ok_or_else(|| DomainError::completion("completion has no text content"))
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(
        &self,
        messages: &[Message],
        settings: &CompletionSettings,
    ) -> Result<String, DomainError> {
        let request = ApiRequest {
            model: settings.model(),
            messages,
            max_tokens: settings.max_output_tokens(),
            n: settings.num_completions(),
            stop: settings.stop_sequences(),
            temperature: settings.temperature(),
        };

        debug!("POST {} (model={})", self.url, settings.model());

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::completion(format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::completion(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            warn!("OpenAiClient: API returned {status}: {body}");
            return Err(DomainError::completion(format!("API returned {status}")));
        }

        Self::parse_response(&body)
    }
}
