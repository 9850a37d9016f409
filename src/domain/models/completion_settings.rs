pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const MAX_OUTPUT_TOKENS: u32 = 150;
pub const NUM_COMPLETIONS: u32 = 1;
pub const TEMPERATURE: f32 = 0.7;

/// Fixed generation parameters sent with every completion request.
///
/// Output is capped at [`MAX_OUTPUT_TOKENS`]; a reply that hits the cap is
/// cut off without any indication to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    model: String,
    max_output_tokens: u32,
    num_completions: u32,
    stop_sequences: Option<Vec<String>>,
    temperature: f32,
}

impl CompletionSettings {
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    pub fn num_completions(&self) -> u32 {
        self.num_completions
    }

    pub fn stop_sequences(&self) -> Option<&[String]> {
        self.stop_sequences.as_deref()
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_output_tokens: MAX_OUTPUT_TOKENS,
            num_completions: NUM_COMPLETIONS,
            stop_sequences: None,
            temperature: TEMPERATURE,
        }
    }
}
