use std::time::Duration;

use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    ConnectOptions, PgPool,
};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the profile database
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Unknown column '{column}' on table '{table}'")]
    UnknownColumn { table: &'static str, column: String },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Owns the connection pool for the profile database.
pub struct DatabaseManager;

impl DatabaseManager {
    /// Build the pool without connecting; the first query opens a connection.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let mut options: PgConnectOptions = config.url.parse()?;
        if !config.enable_query_logging {
            options = options.disable_statement_logging();
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy_with(options);

        info!(
            "Created profile database pool (max_connections={})",
            config.max_connections
        );
        Ok(pool)
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(pool: &PgPool) {
        pool.close().await;
        info!("Closed profile database pool");
    }
}
