use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::application::UiEvent;
use crate::connector::api::Container;
use crate::domain::DomainError;

use super::dispatch;

#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub question: String,
}

pub async fn index(
    State(container): State<Arc<Container>>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), DomainError> {
    dispatch(&container, jar, UiEvent::Render).await
}

pub async fn ask(
    State(container): State<Arc<Container>>,
    jar: CookieJar,
    Form(form): Form<AskForm>,
) -> Result<(CookieJar, Html<String>), DomainError> {
    dispatch(
        &container,
        jar,
        UiEvent::Submit {
            question: form.question,
        },
    )
    .await
}

/// Served on every route while no credential is configured.
pub async fn disabled(State(container): State<Arc<Container>>) -> Response {
    match container.page().render_disabled() {
        Ok(html) => (DomainError::ConfigurationMissing.status(), Html(html)).into_response(),
        Err(e) => e.into_response(),
    }
}
