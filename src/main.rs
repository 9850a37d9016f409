use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use chatbot::cli::Cli;
use chatbot::{Container, ContainerConfig, Router};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::init();
    cli.init_tracing();
    cli.load_env_file()?;

    let container = Arc::new(Container::new(ContainerConfig {
        mock_completions: cli.mock_completions,
        session_ttl: cli.session_ttl(),
    })?);
    let enabled = container.is_enabled();
    let app = Router::build(container);

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    info!(
        "Chat UI listening on http://{} (enabled={})",
        listener.local_addr()?,
        enabled
    );
    axum::serve(listener, app).await?;

    Ok(())
}
