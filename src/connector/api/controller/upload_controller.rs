use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};

use crate::application::{EventOutcome, UiEvent};
use crate::connector::api::Container;
use crate::domain::DomainError;

use super::{dispatch, render_outcome};

pub const FILE_FIELD: &str = "file";

/// Accepts the `file` field of a multipart form and installs it as the
/// grounding document. Extension filtering is left to the page's file input.
pub async fn upload(
    State(container): State<Arc<Container>>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<(CookieJar, Html<String>), DomainError> {
    let mut event = UiEvent::Render;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return read_failed(&container, jar, e.to_string()).await,
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return read_failed(&container, jar, e.to_string()).await,
        };

        // A file input submitted with nothing selected.
        if file_name.is_empty() && bytes.is_empty() {
            debug!("Upload form submitted without a file");
            continue;
        }

        event = UiEvent::Upload {
            file_name,
            bytes: bytes.to_vec(),
        };
    }

    dispatch(&container, jar, event).await
}

async fn read_failed(
    container: &Arc<Container>,
    jar: CookieJar,
    detail: String,
) -> Result<(CookieJar, Html<String>), DomainError> {
    warn!("Could not read uploaded file: {}", detail);
    render_outcome(
        container,
        jar,
        EventOutcome {
            notice: Some(DomainError::decode(detail)),
            draft: String::new(),
        },
    )
    .await
}
