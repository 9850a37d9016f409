use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::application::CompletionService;
use crate::domain::{CompletionSettings, DomainError, Message, Role};

/// Local stand-in for the hosted completion API.
///
/// Replays scripted results in order; once the script is exhausted it echoes
/// the last user message. Every request is recorded for inspection.
pub struct MockCompletion {
    script: Mutex<VecDeque<Result<String, DomainError>>>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl MockCompletion {
    pub fn echo() -> Self {
        Self::scripted(Vec::new())
    }

    pub fn scripted(results: Vec<Result<String, DomainError>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Vec<Message>> {
        lock(&self.requests).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    fn echo_reply(messages: &[Message]) -> String {
        let question = messages
            .iter()
            .rev()
            .find(|m| m.role() == Role::User)
            .map(Message::content)
            .unwrap_or_default();
        format!("(mock) {question}")
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::echo()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl CompletionService for MockCompletion {
    async fn complete(
        &self,
        messages: &[Message],
        settings: &CompletionSettings,
    ) -> Result<String, DomainError> {
        lock(&self.requests).push(messages.to_vec());
        debug!(
            "Mock completion for {} messages (model={})",
            messages.len(),
            settings.model()
        );

        match lock(&self.script).pop_front() {
            Some(result) => result,
            None => Ok(Self::echo_reply(messages)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn script_then_echo() {
        let mock = MockCompletion::scripted(vec![Ok("first".to_string())]);
        let settings = CompletionSettings::default();
        let messages = vec![Message::system("ctx"), Message::user("ping")];

        assert_eq!(mock.complete(&messages, &settings).await.unwrap(), "first");
        assert_eq!(
            mock.complete(&messages, &settings).await.unwrap(),
            "(mock) ping"
        );
        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.requests()[0], messages);
    }
}
