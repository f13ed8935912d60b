use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config::ProjectDatabaseConfig;
use crate::project_management::ProjectDbError;

/// Pool for the project-management database.
pub struct ProjectDatabase;

impl ProjectDatabase {
    pub fn connect_lazy(config: &ProjectDatabaseConfig) -> Result<PgPool, ProjectDbError> {
        let url = config.connection_url()?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy(&url)?;

        info!(
            "Created project-management database pool for {}:{}/{}",
            config.host, config.port, config.name
        );
        Ok(pool)
    }

    pub async fn health_check(pool: &PgPool) -> Result<(), ProjectDbError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
