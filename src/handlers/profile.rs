//! The eight profile entities wired through the CRUD router factory.

use axum::Router;

use crate::app::AppState;
use crate::database::models::{Employee, RelatedInfo};
use crate::error::ApiError;
use crate::handlers::crud::CrudResource;
use crate::storage::BlobSigner;

pub fn routes(state: &AppState) -> Router {
    let stores = &state.stores;

    let photo_signer = state.signer.clone();
    let media_signer = state.signer.clone();

    Router::new()
        .merge(
            CrudResource::new("/employees", stores.employees.clone())
                .with_create()
                .with_read_transform(move |employee| sign_employee_photo(&photo_signer, employee))
                .into_router(),
        )
        .merge(
            CrudResource::new("/employment_history", stores.employment_history.clone())
                .with_create()
                .into_router(),
        )
        .merge(
            CrudResource::new("/project_info", stores.project_info.clone())
                .with_create()
                .into_router(),
        )
        .merge(
            CrudResource::new("/insight_info", stores.insight_info.clone())
                .with_create()
                .into_router(),
        )
        .merge(
            CrudResource::new("/skill_info", stores.skill_info.clone())
                .with_create()
                .into_router(),
        )
        .merge(
            CrudResource::new("/private_info", stores.private_info.clone())
                .with_create()
                .into_router(),
        )
        .merge(
            CrudResource::new("/related_info", stores.related_info.clone())
                .with_create()
                .with_read_transform(move |info| sign_related_media(&media_signer, info))
                .into_router(),
        )
        .merge(
            CrudResource::new("/operation_logs", stores.operation_logs.clone())
                .with_create()
                .into_router(),
        )
}

/// Replace the stored photo reference with a read URL.
pub fn sign_employee_photo(signer: &BlobSigner, mut employee: Employee) -> Result<Employee, ApiError> {
    if let Some(photo) = employee.photo_url.take() {
        employee.photo_url = Some(signer.resign_reference(&photo)?);
    }
    Ok(employee)
}

/// Replace both thumbnail references with read URLs. The seminar field is
/// a comma-separated list.
pub fn sign_related_media(signer: &BlobSigner, mut info: RelatedInfo) -> Result<RelatedInfo, ApiError> {
    if let Some(thumbnail) = info.profile_thumbnail_url.take() {
        info.profile_thumbnail_url = Some(signer.resign_reference(&thumbnail)?);
    }
    if let Some(thumbnails) = info.seminar_thumbnail_url.take() {
        info.seminar_thumbnail_url = Some(signer.resign_reference_list(&thumbnails)?);
    }
    Ok(info)
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::testing::{send, test_app};

    const CONTAINER_URL: &str = "https://profilestore.blob.core.windows.net/media";

    #[tokio::test]
    async fn create_then_read_back() {
        let app = test_app();

        let (status, created) = send(
            &app,
            Method::POST,
            "/employment_history/",
            Some(json!({
                "employee_id": 7,
                "company_name": "Acme",
                "start_date": "2020-04-01",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["id"], 1);
        assert_eq!(created["start_date"], "2020-04-01");

        let (status, fetched) = send(&app, Method::GET, "/employment_history/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn collection_route_answers_with_and_without_slash() {
        let app = test_app();
        send(&app, Method::POST, "/skill_info", Some(json!({ "employee_id": 1 }))).await;
        send(&app, Method::POST, "/skill_info/", Some(json!({ "employee_id": 2 }))).await;

        let (status, with_slash) = send(&app, Method::GET, "/skill_info/", None).await;
        assert_eq!(status, StatusCode::OK);
        let (_, without_slash) = send(&app, Method::GET, "/skill_info", None).await;
        assert_eq!(with_slash, without_slash);
        assert_eq!(with_slash.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let app = test_app();

        let (status, body) = send(&app, Method::GET, "/insight_info/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Insight_info not found" }));

        let (status, _) = send(
            &app,
            Method::PUT,
            "/insight_info/99",
            Some(json!({ "insight": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::DELETE, "/insight_info/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Insight_info not found");
    }

    #[tokio::test]
    async fn non_integer_id_answers_with_detail_body() {
        let app = test_app();
        let requests = [
            (Method::GET, None),
            (Method::PUT, Some(json!({ "skill": "Rust" }))),
            (Method::DELETE, None),
        ];
        for (method, body) in requests {
            let (status, body) = send(&app, method, "/skill_info/abc", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["detail"].as_str().unwrap().contains("abc"));
        }
    }

    #[tokio::test]
    async fn partial_update_keeps_omitted_fields() {
        let app = test_app();
        send(
            &app,
            Method::POST,
            "/employees/",
            Some(json!({ "employee_id": 3, "name": "Sato", "hometown": "Osaka", "major": "Physics" })),
        )
        .await;

        let (status, updated) = send(
            &app,
            Method::PUT,
            "/employees/1",
            Some(json!({ "hometown": "Kyoto", "major": null })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Sato");
        assert_eq!(updated["hometown"], "Kyoto");
        assert_eq!(updated["major"], serde_json::Value::Null);
        assert_eq!(updated["employee_id"], 3);
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let app = test_app();
        send(&app, Method::POST, "/employees/", Some(json!({ "employee_id": 1, "name": "Ito" }))).await;

        let (status, body) = send(&app, Method::DELETE, "/employees/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "detail": "Employees deleted" }));

        let (status, _) = send(&app, Method::GET, "/employees/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_rejects_missing_required_fields() {
        let app = test_app();

        let (status, body) = send(&app, Method::POST, "/employees/", Some(json!({ "employee_id": 1 }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());

        let (status, _) = send(&app, Method::POST, "/operation_logs/", Some(json!({ "operation_type": "edit" }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn employee_photo_is_signed_on_read_only() {
        let app = test_app();
        let stored = format!("{}/photos/ito.png", CONTAINER_URL);

        let (_, created) = send(
            &app,
            Method::POST,
            "/employees/",
            Some(json!({ "employee_id": 1, "name": "Ito", "photo_url": stored })),
        )
        .await;
        assert_eq!(created["photo_url"], stored.as_str());

        let (_, fetched) = send(&app, Method::GET, "/employees/1", None).await;
        let signed = fetched["photo_url"].as_str().unwrap();
        assert!(signed.starts_with(&format!("{}/photos/ito.png?", CONTAINER_URL)));
        assert!(signed.contains("sp=r&"));
        assert!(signed.contains("sig="));

        let (_, listed) = send(&app, Method::GET, "/employees/", None).await;
        assert!(listed[0]["photo_url"].as_str().unwrap().contains("sig="));
    }

    #[tokio::test]
    async fn seminar_thumbnails_are_signed_as_a_list() {
        let app = test_app();
        send(
            &app,
            Method::POST,
            "/related_info/",
            Some(json!({
                "employee_id": 1,
                "profile_thumbnail_url": "https://elsewhere.example/thumb.png",
                "seminar_thumbnail_url": "a.png,,b.png",
                "seminar_videos": "v1.mp4,v2.mp4",
            })),
        )
        .await;

        let (status, fetched) = send(&app, Method::GET, "/related_info/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["profile_thumbnail_url"], "https://elsewhere.example/thumb.png");
        assert_eq!(fetched["seminar_videos"], "v1.mp4,v2.mp4");

        let thumbnails: Vec<&str> = fetched["seminar_thumbnail_url"].as_str().unwrap().split(',').collect();
        assert_eq!(thumbnails.len(), 2);
        assert!(thumbnails[0].starts_with(&format!("{}/a.png?", CONTAINER_URL)));
        assert!(thumbnails[1].starts_with(&format!("{}/b.png?", CONTAINER_URL)));
    }
}
