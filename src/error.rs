// HTTP API Error Types
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::database::DatabaseError;
use crate::project_management::ProjectDbError;
use crate::storage::StorageError;

/// HTTP API error. Every variant renders as `{"detail": "<message>"}`.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 422 Unprocessable Entity (well-formed JSON that fails the schema)
    UnprocessableEntity(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::UnprocessableEntity(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "detail": self.message() })
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        ApiError::UnprocessableEntity(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::UnknownColumn { .. } => {
                tracing::error!("Lookup on unknown column: {}", err);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            DatabaseError::Sqlx(sqlx::Error::PoolTimedOut)
            | DatabaseError::Sqlx(sqlx::Error::Io(_)) => {
                tracing::error!("Profile database unreachable: {}", err);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error; only development builds echo it back
                tracing::error!("SQLx error: {}", sqlx_err);
                if crate::is_development!() {
                    ApiError::internal_server_error(format!("Database error: {}", sqlx_err))
                } else {
                    ApiError::internal_server_error("Database error occurred")
                }
            }
        }
    }
}

impl From<ProjectDbError> for ApiError {
    fn from(err: ProjectDbError) -> Self {
        tracing::error!("Project-management query failed: {}", err);
        ApiError::internal_server_error(err.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        tracing::error!("SAS token generation failed: {}", err);
        ApiError::internal_server_error(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => ApiError::unprocessable_entity(e.body_text()),
            JsonRejection::MissingJsonContentType(e) => ApiError::unprocessable_entity(e.body_text()),
            other => ApiError::bad_request(other.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(e) => ApiError::bad_request(e.body_text()),
            other => {
                tracing::error!("Path extraction failed: {}", other.body_text());
                ApiError::internal_server_error(other.body_text())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
