use std::fmt;

use uuid::Uuid;

use super::Exchange;

/// Identifies one UI session (one browser cookie).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State owned by a single UI session.
///
/// `history` is append-only. `document` holds the decoded contents of the
/// most recently uploaded file; `None` until an upload succeeds. An empty
/// document means no grounding.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    history: Vec<Exchange>,
    document: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[Exchange] {
        &self.history
    }

    pub fn push_exchange(&mut self, exchange: Exchange) {
        self.history.push(exchange);
    }

    pub fn grounding_text(&self) -> &str {
        self.document.as_deref().unwrap_or_default()
    }

    pub fn has_grounding(&self) -> bool {
        !self.grounding_text().is_empty()
    }

    /// True once any upload has decoded, even an empty file.
    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    /// Replaces the active grounding document wholesale.
    pub fn set_grounding_text(&mut self, text: impl Into<String>) {
        self.document = Some(text.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_round_trips_through_text() {
        let id = SessionId::generate();
        assert_eq!(SessionId::parse(&id.to_string()), Some(id));
        assert_eq!(SessionId::parse("not-a-uuid"), None);
    }

    #[test]
    fn new_session_is_empty() {
        let state = SessionState::new();
        assert!(state.history().is_empty());
        assert!(!state.has_grounding());
        assert!(!state.has_document());
    }

    #[test]
    fn empty_document_is_loaded_but_not_grounding() {
        let mut state = SessionState::new();
        state.set_grounding_text("");
        assert!(state.has_document());
        assert!(!state.has_grounding());
        assert_eq!(state.grounding_text(), "");
    }

    #[test]
    fn grounding_is_replaced_not_accumulated() {
        let mut state = SessionState::new();
        state.set_grounding_text("first");
        state.set_grounding_text("second");
        assert_eq!(state.grounding_text(), "second");
    }

    #[test]
    fn history_keeps_insertion_order() {
        let mut state = SessionState::new();
        state.push_exchange(Exchange::new("a", "1").unwrap());
        state.push_exchange(Exchange::new("b", "2").unwrap());
        let users: Vec<_> = state.history().iter().map(|e| e.user_text()).collect();
        assert_eq!(users, vec!["a", "b"]);
    }
}
