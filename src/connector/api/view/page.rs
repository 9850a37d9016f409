use minijinja::Environment;
use serde::Serialize;

use crate::application::{EventOutcome, RenderHistoryUseCase, RenderedLine};
use crate::domain::{DomainError, SessionState};

pub const TITLE: &str = "Chatbot Union IT";
pub const MISSING_KEY_MESSAGE: &str =
    "Erro: A chave da API OpenAI não foi encontrada. Verifique seu arquivo .env.";

const TEMPLATE_NAME: &str = "page.html";
const TEMPLATE: &str = include_str!("page.html");

#[derive(Serialize)]
struct PageContext<'a> {
    title: &'a str,
    enabled: bool,
    error: Option<String>,
    document_loaded: bool,
    grounding_text: &'a str,
    draft: &'a str,
    history: Vec<RenderedLine>,
}

/// Text shown in the error banner for a recovered failure.
pub fn banner_message(error: &DomainError) -> String {
    match error {
        DomainError::ConfigurationMissing => MISSING_KEY_MESSAGE.to_string(),
        DomainError::CompletionRequestFailed(detail) => {
            format!("Erro ao obter resposta da API: {detail}")
        }
        DomainError::FileDecodeFailed(detail) => format!("Erro ao ler o arquivo: {detail}"),
        other => format!("Erro: {other}"),
    }
}

/// Renders the chat page. The template is HTML auto-escaped by file name.
pub struct PageView {
    env: Environment<'static>,
    renderer: RenderHistoryUseCase,
}

impl PageView {
    pub fn new() -> Result<Self, DomainError> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, TEMPLATE)
            .map_err(|e| DomainError::internal(format!("invalid page template: {e}")))?;
        Ok(Self {
            env,
            renderer: RenderHistoryUseCase::new(),
        })
    }

    pub fn render(&self, state: &SessionState, outcome: &EventOutcome) -> Result<String, DomainError> {
        self.render_context(PageContext {
            title: TITLE,
            enabled: true,
            error: outcome.notice.as_ref().map(banner_message),
            document_loaded: state.has_document(),
            grounding_text: state.grounding_text(),
            draft: &outcome.draft,
            history: self.renderer.execute(state.history()),
        })
    }

    /// The page shown when no credential is configured: the error alone.
    pub fn render_disabled(&self) -> Result<String, DomainError> {
        self.render_context(PageContext {
            title: TITLE,
            enabled: false,
            error: Some(MISSING_KEY_MESSAGE.to_string()),
            document_loaded: false,
            grounding_text: "",
            draft: "",
            history: Vec::new(),
        })
    }

    fn render_context(&self, context: PageContext<'_>) -> Result<String, DomainError> {
        let template = self
            .env
            .get_template(TEMPLATE_NAME)
            .map_err(|e| DomainError::internal(e.to_string()))?;
        template
            .render(context)
            .map_err(|e| DomainError::internal(format!("failed to render page: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Exchange;

    #[test]
    fn disabled_page_has_no_widgets() {
        let html = PageView::new().unwrap().render_disabled().unwrap();
        assert!(html.contains("A chave da API OpenAI não foi encontrada"));
        assert!(!html.contains("<form"));
        assert!(!html.contains("<input"));
        assert!(!html.contains("<h1>"));
    }

    #[test]
    fn history_and_grounding_are_rendered() {
        let mut state = SessionState::new();
        state.set_grounding_text("Company policy: X");
        state.push_exchange(Exchange::new("What is 2+2?", "4").unwrap());

        let html = PageView::new()
            .unwrap()
            .render(&state, &EventOutcome::default())
            .unwrap();

        assert!(html.contains("<h1>Chatbot Union IT</h1>"));
        assert!(html.contains("Conteúdo do arquivo:"));
        assert!(html.contains("Company policy: X"));
        let user = html.find("<strong>Você:</strong> What is 2+2?").unwrap();
        let bot = html.find("<strong>ChatBot:</strong> 4").unwrap();
        assert!(user < bot);
        assert!(!html.contains("role=\"alert\""));
    }

    #[test]
    fn leading_newline_of_document_survives_textarea_parsing() {
        let mut state = SessionState::new();
        state.set_grounding_text("\nsecond line");

        let html = PageView::new()
            .unwrap()
            .render(&state, &EventOutcome::default())
            .unwrap();

        // The parser drops one newline after the start tag; the real one follows.
        assert!(html.contains("readonly>\n\nsecond line</textarea>"));
    }

    #[test]
    fn empty_document_still_shows_text_area() {
        let mut state = SessionState::new();
        state.set_grounding_text("");

        let html = PageView::new()
            .unwrap()
            .render(&state, &EventOutcome::default())
            .unwrap();

        assert!(html.contains("Conteúdo do arquivo:"));
        assert!(html.contains("readonly>\n</textarea>"));
    }

    #[test]
    fn no_upload_hides_text_area() {
        let html = PageView::new()
            .unwrap()
            .render(&SessionState::new(), &EventOutcome::default())
            .unwrap();

        assert!(!html.contains("<textarea"));
    }

    #[test]
    fn user_text_is_escaped() {
        let mut state = SessionState::new();
        state.push_exchange(Exchange::new("<script>x</script>", "ok").unwrap());

        let html = PageView::new()
            .unwrap()
            .render(&state, &EventOutcome::default())
            .unwrap();

        assert!(!html.contains("<script>x"));
        assert!(html.contains("&lt;script&gt;x"));
    }

    #[test]
    fn banner_uses_original_wording() {
        assert_eq!(
            banner_message(&DomainError::completion("timeout")),
            "Erro ao obter resposta da API: timeout"
        );
        assert_eq!(
            banner_message(&DomainError::decode("invalid utf-8")),
            "Erro ao ler o arquivo: invalid utf-8"
        );
    }
}
