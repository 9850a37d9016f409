pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    AnswerQuestionUseCase, ChatSessionHandler, CompletionService, EventOutcome,
    LoadGroundingUseCase, RenderHistoryUseCase, RenderedLine, SessionRepository, UiEvent,
};

pub use connector::{
    Container, ContainerConfig, InMemorySessionRepository, MockCompletion, OpenAiClient, Router,
};

pub use domain::{CompletionSettings, DomainError, Exchange, Message, Role, SessionId, SessionState};
