use std::fmt;

use serde::Serialize;

use crate::domain::Exchange;

pub const USER_LABEL: &str = "Você";
pub const BOT_LABEL: &str = "ChatBot";

/// One labelled line of the displayed conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedLine {
    pub label: &'static str,
    pub text: String,
}

impl fmt::Display for RenderedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.text)
    }
}

/// Read-only projection of the history into display lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct RenderHistoryUseCase;

impl RenderHistoryUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, history: &[Exchange]) -> Vec<RenderedLine> {
        history
            .iter()
            .flat_map(|exchange| {
                [
                    RenderedLine {
                        label: USER_LABEL,
                        text: exchange.user_text().to_string(),
                    },
                    RenderedLine {
                        label: BOT_LABEL,
                        text: exchange.bot_text().to_string(),
                    },
                ]
            })
            .collect()
    }

    pub fn to_text(&self, history: &[Exchange]) -> String {
        self.execute(history)
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_user_then_bot() {
        let history = vec![Exchange::new("What is 2+2?", "4").unwrap()];
        let text = RenderHistoryUseCase::new().to_text(&history);
        assert_eq!(text, "Você: What is 2+2?\nChatBot: 4");
    }

    #[test]
    fn empty_history_renders_nothing() {
        assert!(RenderHistoryUseCase::new().execute(&[]).is_empty());
    }

    #[test]
    fn rendering_is_repeatable() {
        let history = vec![
            Exchange::new("a", "1").unwrap(),
            Exchange::new("b", "2").unwrap(),
        ];
        let renderer = RenderHistoryUseCase::new();
        let first = renderer.execute(&history);
        let second = renderer.execute(&history);
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }
}
