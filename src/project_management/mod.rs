//! Read-only access to the external project-management database.
//!
//! Kept apart from [`crate::database`]: separate configuration, separate
//! pool, no shared transactions or queries.

pub mod database;
pub mod models;
pub mod repository;

use thiserror::Error;

pub use database::ProjectDatabase;
pub use models::{Project, ProjectMember, TeamMember};
pub use repository::{PgProjectDirectory, ProjectDirectory};

#[derive(Debug, Error)]
pub enum ProjectDbError {
    #[error("Invalid project database URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Parse a comma-separated id list such as `1, 2,3`. A blank input is an
/// empty list; any entry that is not an integer is an error.
pub fn parse_project_ids(raw: &str) -> Result<Vec<i32>, std::num::ParseIntError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',').map(|id| id.trim().parse::<i32>()).collect()
}
