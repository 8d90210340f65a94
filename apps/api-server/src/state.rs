//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::PostRepository;
use blog_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use blog_infra::DatabaseConnections;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    /// Name of the backing store, reported by the health check.
    pub store: &'static str,
    #[cfg(feature = "postgres")]
    db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state, connecting to the database if one is configured.
    ///
    /// A configured database that cannot be reached is an error: the server
    /// must not start listening without its store.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> anyhow::Result<Self> {
        let Some(config) = db_config else {
            tracing::warn!("No database URL set. Running on the in-memory store.");
            return Ok(Self::in_memory());
        };

        Self::connect(config).await
    }

    #[cfg(feature = "postgres")]
    async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let connections = Arc::new(DatabaseConnections::init(config).await?);
        tracing::info!("Application state initialized");

        Ok(Self {
            posts: Arc::new(connections.post_repository()),
            store: "postgres",
            db: Some(connections),
        })
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect(_config: &DatabaseConfig) -> anyhow::Result<Self> {
        tracing::warn!(
            "Built without the postgres feature - ignoring database URL, using in-memory store"
        );
        Ok(Self::in_memory())
    }

    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()), "memory")
    }

    pub fn with_repository(posts: Arc<dyn PostRepository>, store: &'static str) -> Self {
        Self {
            posts,
            store,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Release the store connection. Call once the HTTP server has stopped.
    pub async fn shutdown(&self) {
        self.close_database().await;
        tracing::info!(store = self.store, "Store released");
    }

    #[cfg(feature = "postgres")]
    async fn close_database(&self) {
        if let Some(db) = &self.db {
            db.close().await;
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn close_database(&self) {}
}
