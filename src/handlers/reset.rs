//! Endpoints that clear a stored media reference.

use axum::{
    extract::State,
    response::Json,
    routing::put,
    Router,
};
use tracing::info;

use crate::app::AppState;
use crate::database::models::{Employee, EmployeeUpdate, RelatedInfo, RelatedInfoUpdate};
use crate::database::{Entity, FieldValue};
use crate::error::ApiError;
use crate::extract::PathParam;

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/reset_image/:id", put(reset_image))
        .route("/reset_profile_thumbnail/:id", put(reset_profile_thumbnail))
        .route("/reset_seminar_thumbnail/:id", put(reset_seminar_thumbnail))
        .with_state(state.clone())
}

/// PUT /reset_image/:id - null the employee's photo
pub async fn reset_image(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<Employee>, ApiError> {
    let update = EmployeeUpdate {
        photo_url: Some(None),
        ..Default::default()
    };
    let employee = state
        .stores
        .employees
        .update("id", FieldValue::from(id), Employee::update_fields(update))
        .await?
        .ok_or_else(|| ApiError::not_found("Image not found"))?;

    info!("Reset photo of employee record {}", id);
    Ok(Json(employee))
}

/// PUT /reset_profile_thumbnail/:id
pub async fn reset_profile_thumbnail(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<RelatedInfo>, ApiError> {
    let update = RelatedInfoUpdate {
        profile_thumbnail_url: Some(None),
        ..Default::default()
    };
    clear_related(&state, id, update).await
}

/// PUT /reset_seminar_thumbnail/:id
pub async fn reset_seminar_thumbnail(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<RelatedInfo>, ApiError> {
    let update = RelatedInfoUpdate {
        seminar_thumbnail_url: Some(None),
        ..Default::default()
    };
    clear_related(&state, id, update).await
}

async fn clear_related(
    state: &AppState,
    id: i32,
    update: RelatedInfoUpdate,
) -> Result<Json<RelatedInfo>, ApiError> {
    let info = state
        .stores
        .related_info
        .update("id", FieldValue::from(id), RelatedInfo::update_fields(update))
        .await?
        .ok_or_else(|| ApiError::not_found("Related_info not found"))?;

    info!("Cleared thumbnail on related_info record {}", id);
    Ok(Json(info))
}
