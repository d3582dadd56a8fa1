//! Session store port - the injected "session context" the handlers use.

use async_trait::async_trait;
use uuid::Uuid;

/// Session store - maps opaque session tokens to user ids.
///
/// The web layer keeps only the token (in a cookie); everything else lives
/// here, so handlers stay stateless across requests.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Start a session for a user, returning the opaque token.
    async fn create(&self, user_id: Uuid) -> Result<String, SessionError>;

    /// Resolve a token to a user id. Expired or unknown tokens yield `None`.
    async fn user_id(&self, token: &str) -> Option<Uuid>;

    /// Terminate a session. Destroying an unknown token is not an error.
    async fn destroy(&self, token: &str) -> Result<(), SessionError>;
}

/// Session store operation errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session backend failed: {0}")]
    Backend(String),
}
