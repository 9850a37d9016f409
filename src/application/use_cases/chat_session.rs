use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::{AnswerQuestionUseCase, CompletionService, LoadGroundingUseCase};
use crate::domain::{DomainError, Exchange, SessionState};

/// A single user action on the chat page.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Plain page load, no mutation.
    Render,
    Submit { question: String },
    Upload { file_name: String, bytes: Vec<u8> },
}

/// What the page needs after an event has been applied to the session.
#[derive(Debug, Default)]
pub struct EventOutcome {
    /// Recovered error to show in the banner.
    pub notice: Option<DomainError>,
    /// Value the question input should be rendered with.
    pub draft: String,
}

impl EventOutcome {
    fn clean() -> Self {
        Self::default()
    }

    fn keep_draft(draft: String) -> Self {
        Self {
            notice: None,
            draft,
        }
    }

    fn failed(notice: DomainError, draft: String) -> Self {
        Self {
            notice: Some(notice),
            draft,
        }
    }
}

/// Applies one [`UiEvent`] to a session.
///
/// The caller holds the session lock for the duration of `handle`, so each
/// session moves `Idle -> AwaitingCompletion -> Idle` one event at a time.
pub struct ChatSessionHandler {
    answer: AnswerQuestionUseCase,
    loader: LoadGroundingUseCase,
}

impl ChatSessionHandler {
    pub fn new(completion_service: Arc<dyn CompletionService>) -> Self {
        Self {
            answer: AnswerQuestionUseCase::new(completion_service),
            loader: LoadGroundingUseCase::new(),
        }
    }

    pub async fn handle(&self, state: &mut SessionState, event: UiEvent) -> EventOutcome {
        match event {
            UiEvent::Render => EventOutcome::clean(),
            UiEvent::Submit { question } => self.submit(state, question).await,
            UiEvent::Upload { file_name, bytes } => {
                match self.loader.execute(state, &file_name, &bytes) {
                    Ok(_) => EventOutcome::clean(),
                    Err(e) => EventOutcome::failed(e, String::new()),
                }
            }
        }
    }

    async fn submit(&self, state: &mut SessionState, question: String) -> EventOutcome {
        if question.is_empty() {
            debug!("Ignoring empty question");
            return EventOutcome::clean();
        }

        let answer = match self.answer.execute(state, &question).await {
            Ok(answer) => answer,
            Err(e) => return EventOutcome::failed(e, question),
        };

        match Exchange::new(question.as_str(), answer) {
            Ok(exchange) => {
                state.push_exchange(exchange);
                debug!("History now holds {} exchanges", state.history().len());
                EventOutcome::clean()
            }
            Err(_) => {
                warn!("Completion was empty after trimming; history unchanged");
                EventOutcome::keep_draft(question)
            }
        }
    }
}
