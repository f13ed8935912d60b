use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::project_management::models::{Project, ProjectMember};
use crate::project_management::ProjectDbError;

#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    /// Projects with at least one member whose name contains `member_name`,
    /// ordered by project id. Each row lists the whole team.
    async fn team_members_by_name(&self, member_name: &str) -> Result<Vec<ProjectMember>, ProjectDbError>;

    /// Projects whose id is in `project_ids`. An empty list returns
    /// immediately without a query.
    async fn projects_by_ids(&self, project_ids: &[i32]) -> Result<Vec<Project>, ProjectDbError>;
}

pub struct PgProjectDirectory {
    pool: PgPool,
}

impl PgProjectDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectDirectory for PgProjectDirectory {
    async fn team_members_by_name(&self, member_name: &str) -> Result<Vec<ProjectMember>, ProjectDbError> {
        debug!(member_name, "searching team members");

        let rows = sqlx::query_as::<_, ProjectMember>(
            "SELECT tm.project_id, STRING_AGG(tm.member_name, ',' ORDER BY tm.id) AS member_names
             FROM team_members tm
             WHERE tm.project_id IN (
                 SELECT DISTINCT project_id
                 FROM team_members
                 WHERE member_name LIKE $1
             )
             GROUP BY tm.project_id
             ORDER BY tm.project_id",
        )
        .bind(format!("%{}%", member_name))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn projects_by_ids(&self, project_ids: &[i32]) -> Result<Vec<Project>, ProjectDbError> {
        if project_ids.is_empty() {
            return Ok(vec![]);
        }
        debug!(count = project_ids.len(), "fetching projects by id");

        let rows = sqlx::query_as::<_, Project>(
            "SELECT id, name, start_date, end_date, industry_categories, type_categories
             FROM projects
             WHERE id = ANY($1)
             ORDER BY id",
        )
        .bind(project_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
