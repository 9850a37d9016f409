use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::debug;

use crate::application::{SessionRepository, SharedSession};
use crate::domain::{SessionId, SessionState};

/// Idle time after which a session is discarded.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

struct Entry {
    session: SharedSession,
    last_access: Instant,
}

/// Process-lifetime session store. A session ends once it has been idle for
/// longer than the TTL; expired entries are swept on every lookup.
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<SessionId, Entry>>,
    ttl: Duration,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn get_or_create(&self, id: Option<SessionId>) -> (SessionId, SharedSession) {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_access) < self.ttl);
        if sessions.len() < before {
            debug!(
                "Evicted {} idle session(s) ({} live)",
                before - sessions.len(),
                sessions.len()
            );
        }

        if let Some(id) = id {
            if let Some(entry) = sessions.get_mut(&id) {
                entry.last_access = now;
                return (id, Arc::clone(&entry.session));
            }
        }

        let id = SessionId::generate();
        let session = Arc::new(Mutex::new(SessionState::new()));
        sessions.insert(
            id,
            Entry {
                session: Arc::clone(&session),
                last_access: now,
            },
        );
        debug!("Created session {} ({} live)", id, sessions.len());
        (id, session)
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Exchange;

    #[tokio::test]
    async fn missing_id_creates_session() {
        let repo = InMemorySessionRepository::new();
        assert!(repo.is_empty().await);

        let (id, _) = repo.get_or_create(None).await;
        let (same, _) = repo.get_or_create(Some(id)).await;

        assert_eq!(id, same);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_id_gets_fresh_session() {
        let repo = InMemorySessionRepository::new();
        let stale = SessionId::generate();

        let (id, _) = repo.get_or_create(Some(stale)).await;

        assert_ne!(id, stale);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let repo = InMemorySessionRepository::new();
        let (a, session_a) = repo.get_or_create(None).await;
        let (_, session_b) = repo.get_or_create(None).await;

        session_a
            .lock()
            .await
            .push_exchange(Exchange::new("q", "a").unwrap());

        assert!(session_b.lock().await.history().is_empty());
        let (_, again) = repo.get_or_create(Some(a)).await;
        assert_eq!(again.lock().await.history().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_session_expires_after_ttl() {
        let repo = InMemorySessionRepository::with_ttl(Duration::from_secs(60));
        let (old, session) = repo.get_or_create(None).await;
        session
            .lock()
            .await
            .push_exchange(Exchange::new("q", "a").unwrap());
        repo.get_or_create(None).await;
        assert_eq!(repo.len().await, 2);

        tokio::time::advance(Duration::from_secs(61)).await;

        let (fresh, state) = repo.get_or_create(Some(old)).await;
        assert_ne!(fresh, old);
        assert!(state.lock().await.history().is_empty());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn access_refreshes_idle_timer() {
        let repo = InMemorySessionRepository::with_ttl(Duration::from_secs(60));
        let (id, _) = repo.get_or_create(None).await;

        tokio::time::advance(Duration::from_secs(45)).await;
        let (same, _) = repo.get_or_create(Some(id)).await;
        tokio::time::advance(Duration::from_secs(45)).await;
        let (still, _) = repo.get_or_create(Some(id)).await;

        assert_eq!(same, id);
        assert_eq!(still, id);
        assert_eq!(repo.len().await, 1);
    }
}
