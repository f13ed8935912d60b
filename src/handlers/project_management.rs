use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::project_management::{parse_project_ids, Project, ProjectDirectory, ProjectMember};

#[derive(Debug, Deserialize)]
pub struct ProjectIdsQuery {
    /// Comma-separated project ids, e.g. `1,2,3`
    #[serde(default)]
    pub project_ids: String,
}

pub fn routes(directory: Arc<dyn ProjectDirectory>) -> Router {
    Router::new()
        .route(
            "/project-management/team-members/:member_name",
            get(team_members_by_member_name),
        )
        .route("/project-management/projects", get(projects_by_project_ids))
        .with_state(directory)
}

/// GET /project-management/team-members/:member_name
pub async fn team_members_by_member_name(
    State(directory): State<Arc<dyn ProjectDirectory>>,
    Path(member_name): Path<String>,
) -> Result<Json<Vec<ProjectMember>>, ApiError> {
    let rows = directory.team_members_by_name(&member_name).await?;
    Ok(Json(rows))
}

/// GET /project-management/projects?project_ids=1,2,3
pub async fn projects_by_project_ids(
    State(directory): State<Arc<dyn ProjectDirectory>>,
    Query(query): Query<ProjectIdsQuery>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let ids = parse_project_ids(&query.project_ids).map_err(|_| {
        ApiError::bad_request("Invalid project_ids format. Use comma-separated integers.")
    })?;
    let projects = directory.projects_by_ids(&ids).await?;
    Ok(Json(projects))
}
