//! Router factory producing the standard five endpoints for one entity.
//!
//! | Method & path        | Handler   |
//! |----------------------|-----------|
//! | GET    {prefix}/     | [`list`]  |
//! | GET    {prefix}/:id  | [`get_one`] |
//! | POST   {prefix}/     | [`create`] (only when enabled) |
//! | PUT    {prefix}/:id  | [`update`] |
//! | DELETE {prefix}/:id  | [`delete`] |

use std::sync::Arc;

use axum::{
    extract::State,
    response::Json,
    routing::{get, MethodRouter},
    Router,
};
use serde_json::{json, Value};
use tracing::info;

use crate::database::{CrudStore, Entity, FieldValue};
use crate::error::ApiError;
use crate::extract::{JsonBody, PathParam};

/// Post-read hook applied to list and single-get responses only.
pub type ReadTransform<E> = Arc<dyn Fn(E) -> Result<E, ApiError> + Send + Sync>;

/// Builder describing one entity's REST surface.
pub struct CrudResource<E: Entity> {
    prefix: String,
    store: Arc<dyn CrudStore<E>>,
    creatable: bool,
    read_transform: Option<ReadTransform<E>>,
}

impl<E: Entity> CrudResource<E> {
    pub fn new(prefix: impl Into<String>, store: Arc<dyn CrudStore<E>>) -> Self {
        Self {
            prefix: prefix.into(),
            store,
            creatable: false,
            read_transform: None,
        }
    }

    /// Register `POST {prefix}/`, validated against `E::Create`.
    pub fn with_create(mut self) -> Self {
        self.creatable = true;
        self
    }

    pub fn with_read_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(E) -> Result<E, ApiError> + Send + Sync + 'static,
    {
        self.read_transform = Some(Arc::new(transform));
        self
    }

    pub fn into_router(self) -> Router {
        let state = ResourceState {
            label: Arc::from(resource_label(&self.prefix)),
            store: self.store,
            read_transform: self.read_transform,
        };

        let collection: MethodRouter<ResourceState<E>> = if self.creatable {
            get(list::<E>).post(create::<E>)
        } else {
            get(list::<E>)
        };

        let prefix = self.prefix.trim_end_matches('/');
        info!("Registering CRUD routes under {}", prefix);

        Router::new()
            .route(prefix, collection.clone())
            .route(&format!("{}/", prefix), collection)
            .route(
                &format!("{}/:id", prefix),
                get(get_one::<E>).put(update::<E>).delete(delete::<E>),
            )
            .with_state(state)
    }
}

/// Human-readable entity name used in response messages: the prefix
/// without slashes, first letter upper-case, the rest lower-case.
pub fn resource_label(prefix: &str) -> String {
    let name = prefix.trim_matches('/');
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub struct ResourceState<E: Entity> {
    label: Arc<str>,
    store: Arc<dyn CrudStore<E>>,
    read_transform: Option<ReadTransform<E>>,
}

impl<E: Entity> Clone for ResourceState<E> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            store: self.store.clone(),
            read_transform: self.read_transform.clone(),
        }
    }
}

impl<E: Entity> ResourceState<E> {
    fn not_found(&self) -> ApiError {
        ApiError::not_found(format!("{} not found", self.label))
    }

    fn present(&self, item: E) -> Result<E, ApiError> {
        match &self.read_transform {
            Some(transform) => transform(item),
            None => Ok(item),
        }
    }
}

/// GET {prefix}/ - every record
pub async fn list<E: Entity>(State(state): State<ResourceState<E>>) -> Result<Json<Vec<E>>, ApiError> {
    let items = state.store.get_all().await?;
    let items = items
        .into_iter()
        .map(|item| state.present(item))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(items))
}

/// GET {prefix}/:id
pub async fn get_one<E: Entity>(
    State(state): State<ResourceState<E>>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<E>, ApiError> {
    let item = state
        .store
        .get("id", FieldValue::from(id))
        .await?
        .ok_or_else(|| state.not_found())?;
    Ok(Json(state.present(item)?))
}

/// POST {prefix}/
pub async fn create<E: Entity>(
    State(state): State<ResourceState<E>>,
    JsonBody(input): JsonBody<E::Create>,
) -> Result<Json<E>, ApiError> {
    let created = state.store.create(E::create_fields(input)).await?;
    info!("Created {} {}", state.label, created.id());
    Ok(Json(created))
}

/// PUT {prefix}/:id - applies only the fields present in the body
pub async fn update<E: Entity>(
    State(state): State<ResourceState<E>>,
    PathParam(id): PathParam<i32>,
    JsonBody(input): JsonBody<E::Update>,
) -> Result<Json<E>, ApiError> {
    let updated = state
        .store
        .update("id", FieldValue::from(id), E::update_fields(input))
        .await?
        .ok_or_else(|| state.not_found())?;
    Ok(Json(updated))
}

/// DELETE {prefix}/:id
pub async fn delete<E: Entity>(
    State(state): State<ResourceState<E>>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<Value>, ApiError> {
    if !state.store.delete("id", FieldValue::from(id)).await? {
        return Err(state.not_found());
    }
    info!("Deleted {} {}", state.label, id);
    Ok(Json(json!({ "detail": format!("{} deleted", state.label) })))
}
