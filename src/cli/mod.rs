//! Command-line and environment configuration.
//!
//! ```bash
//! # Hosted API, key taken from ./.env or the environment
//! OPENAI_API_KEY=sk-... chatbot --bind 0.0.0.0:8501
//!
//! # Local echo service, no key needed
//! chatbot --mock-completions
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "chatbot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long)]
    pub verbose: bool,

    /// Address the web UI listens on
    #[arg(long, env = "CHATBOT_BIND", default_value = "127.0.0.1:8501")]
    pub bind: SocketAddr,

    /// Answer with a local echo service instead of the hosted API
    #[arg(long)]
    pub mock_completions: bool,

    /// Extra env file loaded after ./.env (values already set are kept)
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Seconds of inactivity after which a browser session is discarded
    #[arg(long, env = "CHATBOT_SESSION_TTL_SECS", default_value_t = 1800,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub session_ttl_secs: u64,

    /// Why ./.env could not be loaded; reported once logging is up.
    #[arg(skip)]
    dotenv_error: Option<String>,
}

impl Cli {
    /// Loads `./.env` (if present) and then parses arguments, so that values
    /// from the file can act as defaults for `env`-backed flags.
    pub fn init() -> Self {
        let dotenv_error = dotenv_problem(dotenvy::dotenv());
        Self {
            dotenv_error,
            ..Self::parse()
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Loads the file given with `--env-file`, if any.
    pub fn load_env_file(&self) -> Result<()> {
        if let Some(path) = &self.env_file {
            dotenvy::from_path(path)
                .with_context(|| format!("failed to load env file {}", path.display()))?;
        }
        Ok(())
    }

    /// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
    pub fn init_tracing(&self) {
        let default = if self.verbose { "debug" } else { "info" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();

        if let Some(err) = &self.dotenv_error {
            warn!("Failed to load .env file: {}", err);
        }
    }
}

/// A missing `./.env` is normal; anything else is worth reporting.
fn dotenv_problem(result: dotenvy::Result<PathBuf>) -> Option<String> {
    match result {
        Ok(_) => None,
        Err(err) if err.not_found() => None,
        Err(err) => Some(err.to_string()),
    }
}
