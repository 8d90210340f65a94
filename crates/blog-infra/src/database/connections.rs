use std::time::Duration;

#[cfg(feature = "postgres")]
use std::sync::Arc;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbConn, DbErr};

#[cfg(feature = "postgres")]
use super::PostgresPostRepository;

/// Configuration for the posts database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Upper bound for connecting and for acquiring a pooled connection.
    pub timeout: Duration,
}

/// Owner of the database pool for the lifetime of the server.
///
/// `init` only returns once the database answers, and `close` is called after
/// the HTTP listener has stopped.
#[cfg(feature = "postgres")]
pub struct DatabaseConnections {
    pub main: Arc<DbConn>,
}

#[cfg(feature = "postgres")]
impl DatabaseConnections {
    /// Connect and verify the database is reachable.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(config.timeout)
            .acquire_timeout(config.timeout)
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let main = Database::connect(opts).await?;
        main.ping().await?;
        tracing::info!("Database connected (pool: {})", config.max_connections);

        Ok(Self {
            main: Arc::new(main),
        })
    }

    /// A repository sharing this pool.
    pub fn post_repository(&self) -> PostgresPostRepository {
        PostgresPostRepository::shared(Arc::clone(&self.main))
    }

    /// Close the pool. Repositories share it, so they stop working as well.
    pub async fn close(&self) {
        if let DatabaseConnection::SqlxPostgresPoolConnection(_) = self.main.as_ref() {
            self.main.get_postgres_connection_pool().close().await;
        }
        tracing::info!("Database connection closed");
    }
}
