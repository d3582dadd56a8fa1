//! In-memory session store.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use inkpost_core::ports::{SessionError, SessionStore};

struct SessionEntry {
    user_id: Uuid,
    expires_at: Instant,
}

/// Session store backed by a HashMap behind an async RwLock.
///
/// Sessions are lost on process restart, which logs every user out - fine
/// for this application's scope.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, user_id: Uuid) -> Result<String, SessionError> {
        let token = Uuid::new_v4().simple().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            token.clone(),
            SessionEntry {
                user_id,
                expires_at: Instant::now() + self.ttl,
            },
        );
        Ok(token)
    }

    async fn user_id(&self, token: &str) -> Option<Uuid> {
        {
            let sessions = self.sessions.read().await;
            let entry = sessions.get(token)?;
            if entry.expires_at > Instant::now() {
                return Some(entry.user_id);
            }
        }
        // Expired: drop the entry under a write lock.
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
        None
    }

    async fn destroy(&self, token: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trip_and_destroy() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let user_id = Uuid::new_v4();

        let token = store.create(user_id).await.unwrap();
        assert_eq!(store.user_id(&token).await, Some(user_id));

        store.destroy(&token).await.unwrap();
        assert_eq!(store.user_id(&token).await, None);
    }

    #[tokio::test]
    async fn expired_session_is_gone() {
        let store = InMemorySessionStore::new(Duration::ZERO);
        let token = store.create(Uuid::new_v4()).await.unwrap();
        assert_eq!(store.user_id(&token).await, None);
    }

    #[tokio::test]
    async fn unknown_token_resolves_to_nothing() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        assert_eq!(store.user_id("bogus").await, None);
    }
}
