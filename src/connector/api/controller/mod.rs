pub mod chat_controller;
pub mod health_controller;
pub mod upload_controller;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::error;

use crate::application::{EventOutcome, UiEvent};
use crate::domain::{DomainError, SessionId};

use super::Container;

pub const SESSION_COOKIE: &str = "chatbot_session";

impl DomainError {
    pub(crate) fn status(&self) -> StatusCode {
        match self {
            DomainError::ConfigurationMissing => StatusCode::SERVICE_UNAVAILABLE,
            DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}

/// Resolves the cookie's session, applies `event` while holding the session
/// lock, and renders the resulting page.
pub(crate) async fn dispatch(
    container: &Arc<Container>,
    jar: CookieJar,
    event: UiEvent,
) -> Result<(CookieJar, Html<String>), DomainError> {
    let handler = container
        .handler()
        .ok_or(DomainError::ConfigurationMissing)?;

    let (id, session) = container.sessions().get_or_create(session_id(&jar)).await;
    let mut state = session.lock().await;
    let outcome = handler.handle(&mut state, event).await;
    let html = container.page().render(&state, &outcome)?;
    drop(state);

    Ok((remember(jar, id, container.sessions().ttl()), Html(html)))
}

/// Renders the page for an outcome produced outside the handler (e.g. an
/// unreadable upload body), without mutating the session.
pub(crate) async fn render_outcome(
    container: &Arc<Container>,
    jar: CookieJar,
    outcome: EventOutcome,
) -> Result<(CookieJar, Html<String>), DomainError> {
    let (id, session) = container.sessions().get_or_create(session_id(&jar)).await;
    let state = session.lock().await;
    let html = container.page().render(&state, &outcome)?;
    drop(state);

    Ok((remember(jar, id, container.sessions().ttl()), Html(html)))
}

fn session_id(jar: &CookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| SessionId::parse(cookie.value()))
}

/// Re-issued on every response so the browser's expiry tracks the server's
/// idle timer.
fn remember(jar: CookieJar, id: SessionId, ttl: Duration) -> CookieJar {
    let max_age = time::Duration::seconds(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX));
    jar.add(
        Cookie::build((SESSION_COOKIE, id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(max_age),
    )
}
