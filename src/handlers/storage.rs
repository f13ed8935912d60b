use std::sync::Arc;

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::storage::{BlobSigner, UploadSas};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SasTokenRequest {
    pub file_name: String,
}

pub fn routes(signer: Arc<BlobSigner>) -> Router {
    Router::new()
        .route("/generate-sas-token", post(generate_sas_token))
        .with_state(signer)
}

/// POST /generate-sas-token - upload URL plus the permanent URL to store
pub async fn generate_sas_token(
    State(signer): State<Arc<BlobSigner>>,
    JsonBody(request): JsonBody<SasTokenRequest>,
) -> Result<Json<UploadSas>, ApiError> {
    if request.file_name.is_empty() {
        return Err(ApiError::bad_request("fileName is required"));
    }
    Ok(Json(signer.upload_sas(&request.file_name)?))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::testing::{send, test_app};

    #[tokio::test]
    async fn issues_upload_url_and_storage_url() {
        let (status, body) = send(
            &test_app(),
            Method::POST,
            "/generate-sas-token",
            Some(json!({ "fileName": "photos/new face.png" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let storage_url = body["storageUrl"].as_str().unwrap();
        assert_eq!(
            storage_url,
            "https://profilestore.blob.core.windows.net/media/photos/new%20face.png"
        );
        let sas_url = body["sasUrl"].as_str().unwrap();
        assert!(sas_url.starts_with(&format!("{}?", storage_url)));
        assert!(sas_url.contains("sp=cw&"));
    }

    #[tokio::test]
    async fn empty_file_name_is_rejected() {
        let (status, body) = send(
            &test_app(),
            Method::POST,
            "/generate-sas-token",
            Some(json!({ "fileName": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": "fileName is required" }));
    }

    #[tokio::test]
    async fn missing_file_name_is_unprocessable() {
        let (status, _) = send(&test_app(), Method::POST, "/generate-sas-token", Some(json!({}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
