use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{SessionId, SessionState};

/// Handle to one session's state. Holding the lock serializes every event of
/// that session.
pub type SharedSession = Arc<Mutex<SessionState>>;

/// Stores session-scoped conversation state until the session ends.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Look up the session for `id`, creating a fresh one when the id is
    /// missing or unknown. Returns the id actually in use.
    async fn get_or_create(&self, id: Option<SessionId>) -> (SessionId, SharedSession);

    async fn len(&self) -> usize;

    /// Idle time after which a session ends.
    fn ttl(&self) -> Duration;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
