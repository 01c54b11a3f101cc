use std::sync::Arc;

use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::post::PostgresPostRepository;
use super::product::PostgresProductRepository;
use super::user::PostgresUserRepository;
use crate::config::DatabaseConfig;

/// Storage facade: the three repositories over one bounded connection pool.
///
/// Built once at startup and handed to the services; nothing here is global.
pub struct PostgresStore {
    pool: PgPool,
    pub users: Arc<PostgresUserRepository>,
    pub posts: Arc<PostgresPostRepository>,
    pub products: Arc<PostgresProductRepository>,
}

impl PostgresStore {
    /// Open the pool described by `config` and wrap it.
    ///
    /// Connections are capped at `max_connections`; a caller waiting longer than
    /// the acquire timeout gets `PoolTimedOut` instead of queueing forever.
    /// Every pooled session runs with the configured `statement_timeout`.
    ///
    /// # Errors
    /// * `sqlx::Error` - URL is invalid or the first connection failed
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let options = config
            .url
            .parse::<PgConnectOptions>()?
            .options([("statement_timeout", config.statement_timeout_ms.to_string())]);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_with(options)
            .await?;

        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            posts: Arc::new(PostgresPostRepository::new(pool.clone())),
            products: Arc::new(PostgresProductRepository::new(pool.clone())),
            pool,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close every pooled connection. Consumes the store, so it runs at most once.
    pub async fn close(self) {
        self.pool.close().await;
        tracing::info!(database = "postgresql", "Database connection pool closed");
    }
}
