//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use inkpost_core::ports::{SessionStore, UserRepository};
use inkpost_core::services::{ContentService, IdentityService};
use inkpost_infra::auth::Argon2PasswordService;
use inkpost_infra::memory::MemoryStore;
use inkpost_infra::session::InMemorySessionStore;

#[cfg(feature = "postgres")]
use inkpost_infra::database::{
    DatabaseConnections, PostgresCategoryRepository, PostgresCommentRepository,
    PostgresPostRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state: the two service objects, plus the session store
/// and user repository the authentication extractors need directly.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub content: Arc<ContentService>,
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    /// Build the application state with the appropriate backends.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            match DatabaseConnections::init(db_config).await {
                Ok(connections) => return Self::with_postgres(connections, config.session_ttl),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory store");

        Self::in_memory(config.session_ttl)
    }

    #[cfg(feature = "postgres")]
    fn with_postgres(connections: DatabaseConnections, session_ttl: Duration) -> Self {
        let db = Arc::new(connections.main);
        let users = Arc::new(PostgresUserRepository::new(db.clone()));
        let posts = Arc::new(PostgresPostRepository::new(db.clone()));
        let comments = Arc::new(PostgresCommentRepository::new(db.clone()));
        let categories = Arc::new(PostgresCategoryRepository::new(db));

        Self::assemble(users, posts, comments, categories, session_ttl)
    }

    /// State backed entirely by the in-memory store. Also used by tests.
    pub fn in_memory(session_ttl: Duration) -> Self {
        let store = MemoryStore::new();
        Self::assemble(
            Arc::new(store.users()),
            Arc::new(store.posts()),
            Arc::new(store.comments()),
            Arc::new(store.categories()),
            session_ttl,
        )
    }

    fn assemble(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn inkpost_core::ports::PostRepository>,
        comments: Arc<dyn inkpost_core::ports::CommentRepository>,
        categories: Arc<dyn inkpost_core::ports::CategoryRepository>,
        session_ttl: Duration,
    ) -> Self {
        let passwords = Arc::new(Argon2PasswordService::new());
        let identity = Arc::new(IdentityService::new(users.clone(), passwords));
        let content = Arc::new(ContentService::new(posts, comments, categories));
        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(session_ttl));

        tracing::info!("Application state initialized");

        Self {
            identity,
            content,
            users,
            sessions,
        }
    }
}
