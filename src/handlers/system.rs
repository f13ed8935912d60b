use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::DatabaseManager;
use crate::project_management::ProjectDatabase;

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state.clone())
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Employee Profile API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "profile": "/{employees,employment_history,project_info,insight_info,skill_info,private_info,related_info,operation_logs}[/:id]",
            "reset": "/reset_image/:id, /reset_profile_thumbnail/:id, /reset_seminar_thumbnail/:id",
            "storage": "/generate-sas-token",
            "project_management": "/project-management/team-members/:member_name, /project-management/projects?project_ids=",
            "health": "/health",
        }
    }))
}

/// Pings both databases. 503 when either one is unreachable.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let Some(pools) = &state.pools else {
        return (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "databases": "not configured" })),
        );
    };

    let profile = DatabaseManager::health_check(&pools.profile)
        .await
        .map_err(|e| e.to_string());
    let project = ProjectDatabase::health_check(&pools.project)
        .await
        .map_err(|e| e.to_string());

    let healthy = profile.is_ok() && project.is_ok();
    let describe = |result: &Result<(), String>| match result {
        Ok(()) => json!("ok"),
        Err(e) => json!({ "error": e }),
    };
    let body = json!({
        "status": if healthy { "ok" } else { "degraded" },
        "timestamp": now,
        "databases": {
            "profile": describe(&profile),
            "project_management": describe(&project),
        }
    });

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}
