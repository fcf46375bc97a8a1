//! Application state - shared across all handlers.

use std::sync::Arc;

use blogly_core::DomainError;
use blogly_core::domain::{Post, Tag, User};
use blogly_core::ports::{PostRepository, TagRepository, UserRepository};
use blogly_infra::{DatabaseConfig, InMemoryBlogStore};

#[cfg(feature = "postgres")]
use blogly_infra::database::{
    PostgresPostRepository, PostgresTagRepository, PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub tags: Arc<dyn TagRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let state = match db_config {
            Some(config) => match Self::postgres(config).await {
                Ok(state) => state,
                Err(e) => {
                    tracing::error!(
                        "Failed to prepare database: {:#}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Self::in_memory()
        };

        tracing::info!("Application state initialized");
        state
    }

    /// Repositories backed by a single in-memory store.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryBlogStore::new());
        Self {
            users: store.clone(),
            posts: store.clone(),
            tags: store,
        }
    }

    /// Connect, bring the schema up to date, and build the SeaORM repositories.
    #[cfg(feature = "postgres")]
    async fn postgres(config: &DatabaseConfig) -> anyhow::Result<Self> {
        use migration::{Migrator, MigratorTrait};

        let conn = blogly_infra::database::connect(config).await?;

        if config.reset_on_start {
            tracing::warn!("DB_RESET_ON_START set - dropping and recreating all tables");
            Migrator::fresh(&conn).await?;
        } else {
            Migrator::up(&conn, None).await?;
        }

        Ok(Self {
            users: Arc::new(PostgresUserRepository::new(conn.clone())),
            posts: Arc::new(PostgresPostRepository::new(conn.clone())),
            tags: Arc::new(PostgresTagRepository::new(conn)),
        })
    }

    pub async fn user_or_404(&self, id: i32) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    pub async fn post_or_404(&self, id: i32) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))
    }

    pub async fn tag_or_404(&self, id: i32) -> Result<Tag, DomainError> {
        self.tags
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Tag", id))
    }
}
