//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{
    GroupRepository, PasswordService, PostRepository, SessionService, UserRepository,
};
use scribe_infra::{
    Argon2PasswordService, InMemoryGroupRepository, InMemoryPostRepository, InMemoryStore,
    InMemoryUserRepository, JwtSessionService, PostgresGroupRepository, PostgresPostRepository,
    PostgresUserRepository, SessionConfig, connect,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub sessions: Arc<dyn SessionService>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        if let Some(db_config) = &config.database {
            match connect(db_config).await {
                Ok(conn) => {
                    tracing::info!("Application state initialized (postgres)");
                    return Self {
                        users: Arc::new(PostgresUserRepository::new(conn.clone())),
                        groups: Arc::new(PostgresGroupRepository::new(conn.clone())),
                        posts: Arc::new(PostgresPostRepository::new(conn)),
                        sessions: Arc::new(JwtSessionService::new(config.session.clone())),
                        passwords: Arc::new(Argon2PasswordService::new()),
                    };
                }
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

        Self::in_memory(config.session.clone())
    }

    /// State backed entirely by the in-memory store. Also what the handler
    /// tests run against.
    pub fn in_memory(session: SessionConfig) -> Self {
        let store = InMemoryStore::new();

        Self {
            users: Arc::new(InMemoryUserRepository::new(store.clone())),
            groups: Arc::new(InMemoryGroupRepository::new(store.clone())),
            posts: Arc::new(InMemoryPostRepository::new(store)),
            sessions: Arc::new(JwtSessionService::new(session)),
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }
}
