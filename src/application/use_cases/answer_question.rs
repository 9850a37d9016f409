use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::CompletionService;
use crate::domain::{CompletionSettings, DomainError, Message, SessionState};

/// Prefix of the system message that carries the uploaded document.
pub const GROUNDING_PREFIX: &str = "Use as informações do seguinte arquivo para responder: ";

/// Turns one question into one answer with a single completion call.
pub struct AnswerQuestionUseCase {
    completion_service: Arc<dyn CompletionService>,
    settings: CompletionSettings,
}

impl AnswerQuestionUseCase {
    pub fn new(completion_service: Arc<dyn CompletionService>) -> Self {
        Self {
            completion_service,
            settings: CompletionSettings::default(),
        }
    }

    /// Builds the prompt: an optional grounding system message followed by
    /// the user question. The grounding text is interpolated as-is.
    pub fn build_messages(grounding_text: &str, question: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(2);
        if !grounding_text.is_empty() {
            messages.push(Message::system(format!("{GROUNDING_PREFIX}{grounding_text}")));
        }
        messages.push(Message::user(question));
        messages
    }

    /// Returns the trimmed completion. Does not touch `state.history`; the
    /// caller appends the exchange when the answer is non-empty.
    pub async fn execute(
        &self,
        state: &SessionState,
        question: &str,
    ) -> Result<String, DomainError> {
        let messages = Self::build_messages(state.grounding_text(), question);
        info!(
            "Requesting completion ({} messages, grounded={})",
            messages.len(),
            state.has_grounding()
        );

        match self
            .completion_service
            .complete(&messages, &self.settings)
            .await
        {
            Ok(text) => {
                let answer = text.trim().to_string();
                debug!("Completion returned {} chars", answer.len());
                Ok(answer)
            }
            Err(e) => {
                warn!("Completion failed: {}", e);
                Err(match e {
                    DomainError::CompletionRequestFailed(_) => e,
                    other => DomainError::completion(other.to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::MockCompletion;
    use crate::domain::Role;

    #[test]
    fn build_messages_without_grounding_has_only_user() {
        let messages = AnswerQuestionUseCase::build_messages("", "hi");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role(), Role::User);
        assert_eq!(messages[0].content(), "hi");
    }

    #[test]
    fn build_messages_prepends_grounding_verbatim() {
        let grounding = "name,role\n<Ana>,\"dev\"\n";
        let messages = AnswerQuestionUseCase::build_messages(grounding, "who?");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role(), Role::System);
        assert_eq!(
            messages[0].content(),
            format!("Use as informações do seguinte arquivo para responder: {grounding}")
        );
        assert_eq!(messages[1].role(), Role::User);
        assert_eq!(messages[1].content(), "who?");
    }

    #[tokio::test]
    async fn execute_trims_and_calls_once() {
        let mock = Arc::new(MockCompletion::scripted(vec![Ok("  4 \n".to_string())]));
        let use_case = AnswerQuestionUseCase::new(mock.clone());

        let answer = use_case
            .execute(&SessionState::new(), "What is 2+2?")
            .await
            .unwrap();

        assert_eq!(answer, "4");
        assert_eq!(mock.call_count(), 1);
        let requests = mock.requests();
        assert_eq!(requests[0].len(), 1);
    }

    #[tokio::test]
    async fn execute_sends_grounding_system_message() {
        let mock = Arc::new(MockCompletion::scripted(vec![Ok("ok".to_string())]));
        let use_case = AnswerQuestionUseCase::new(mock.clone());
        let mut state = SessionState::new();
        state.set_grounding_text("Company policy: X");

        use_case.execute(&state, "policy?").await.unwrap();

        let sent = &mock.requests()[0];
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].role(), Role::System);
        assert!(sent[0].content().contains("Company policy: X"));
    }

    #[tokio::test]
    async fn execute_reports_failure_without_retry() {
        let mock = Arc::new(MockCompletion::scripted(vec![Err(DomainError::completion(
            "quota exceeded",
        ))]));
        let use_case = AnswerQuestionUseCase::new(mock.clone());

        let err = use_case
            .execute(&SessionState::new(), "hello")
            .await
            .unwrap_err();

        assert!(err.is_completion_failure());
        assert_eq!(mock.call_count(), 1);
    }
}
