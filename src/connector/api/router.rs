use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

use super::container::Container;
use super::controller::{chat_controller, health_controller, upload_controller};

pub struct Router;

impl Router {
    /// Builds the HTTP surface for `container`.
    ///
    /// Without a credential only `/healthz` is live; everything else answers
    /// with the configuration error page.
    pub fn build(container: Arc<Container>) -> axum::Router {
        let routes = axum::Router::new().route("/healthz", get(health_controller::healthz));

        let routes = if container.is_enabled() {
            routes
                .route("/", get(chat_controller::index))
                .route("/ask", post(chat_controller::ask))
                .route(
                    "/upload",
                    post(upload_controller::upload).layer(DefaultBodyLimit::disable()),
                )
        } else {
            routes.fallback(chat_controller::disabled)
        };

        routes.with_state(container)
    }
}
