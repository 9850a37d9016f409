use crate::domain::DomainError;

/// One question/answer pair shown in the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    user_text: String,
    bot_text: String,
}

impl Exchange {
    /// Builds an exchange; an empty `bot_text` is rejected so that history
    /// never holds an unanswered question.
    pub fn new(
        user_text: impl Into<String>,
        bot_text: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let bot_text = bot_text.into();
        if bot_text.is_empty() {
            return Err(DomainError::invalid_input("exchange answer cannot be empty"));
        }

        Ok(Self {
            user_text: user_text.into(),
            bot_text,
        })
    }

    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    pub fn bot_text(&self) -> &str {
        &self.bot_text
    }
}
