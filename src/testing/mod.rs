//! In-memory stand-ins for the two databases, and request helpers for
//! driving the router in unit tests.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{Map, Value};
use tower::ServiceExt;

use crate::app::{AppState, ProfileStores};
use crate::config::StorageConfig;
use crate::database::{CrudStore, DatabaseError, Entity, FieldValue, Fields};
use crate::project_management::{Project, ProjectDbError, ProjectDirectory, ProjectMember, TeamMember};
use crate::storage::BlobSigner;

type Row = BTreeMap<&'static str, FieldValue>;

/// [`CrudStore`] over a vector of rows. Rows stay in insertion (= id)
/// order, so first-match lookups behave like the Postgres store.
pub struct MemoryStore<E> {
    rows: Mutex<Vec<Row>>,
    next_id: Mutex<i32>,
    _phantom: PhantomData<E>,
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
            _phantom: PhantomData,
        }
    }

    fn check_column(key_field: &str) -> Result<(), DatabaseError> {
        if E::has_column(key_field) {
            Ok(())
        } else {
            Err(DatabaseError::UnknownColumn {
                table: E::TABLE,
                column: key_field.to_string(),
            })
        }
    }

    fn to_entity(row: &Row) -> Result<E, DatabaseError> {
        let object: Map<String, Value> = row
            .iter()
            .map(|(column, value)| (column.to_string(), value.to_json()))
            .collect();
        serde_json::from_value(Value::Object(object))
            .map_err(|e| DatabaseError::Sqlx(sqlx::Error::Decode(Box::new(e))))
    }

    fn position(rows: &[Row], key_field: &str, value: &FieldValue) -> Option<usize> {
        rows.iter().position(|row| row.get(key_field) == Some(value))
    }
}

#[async_trait]
impl<E: Entity> CrudStore<E> for MemoryStore<E> {
    async fn get(&self, key_field: &str, value: FieldValue) -> Result<Option<E>, DatabaseError> {
        Self::check_column(key_field)?;
        let rows = self.rows.lock().unwrap();
        Self::position(&rows, key_field, &value)
            .map(|i| Self::to_entity(&rows[i]))
            .transpose()
    }

    async fn get_all(&self) -> Result<Vec<E>, DatabaseError> {
        let rows = self.rows.lock().unwrap();
        rows.iter().map(Self::to_entity).collect()
    }

    async fn create(&self, fields: Fields) -> Result<E, DatabaseError> {
        let id = {
            let mut next = self.next_id.lock().unwrap();
            let id = *next;
            *next += 1;
            id
        };
        let mut row: Row = fields.into_iter().collect();
        row.insert("id", FieldValue::Int(Some(id)));

        let entity = Self::to_entity(&row)?;
        self.rows.lock().unwrap().push(row);
        Ok(entity)
    }

    async fn update(
        &self,
        key_field: &str,
        value: FieldValue,
        fields: Fields,
    ) -> Result<Option<E>, DatabaseError> {
        Self::check_column(key_field)?;
        let mut rows = self.rows.lock().unwrap();
        let Some(i) = Self::position(&rows, key_field, &value) else {
            return Ok(None);
        };
        for (column, v) in fields {
            rows[i].insert(column, v);
        }
        Self::to_entity(&rows[i]).map(Some)
    }

    async fn delete(&self, key_field: &str, value: FieldValue) -> Result<bool, DatabaseError> {
        Self::check_column(key_field)?;
        let mut rows = self.rows.lock().unwrap();
        match Self::position(&rows, key_field, &value) {
            Some(i) => {
                rows.remove(i);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// [`ProjectDirectory`] over fixed project and member lists. Counts the
/// queries it answers so tests can assert short-circuits.
#[derive(Default)]
pub struct MemoryProjectDirectory {
    pub projects: Vec<Project>,
    pub members: Vec<TeamMember>,
    pub queries: Mutex<usize>,
    pub fail_with: Option<String>,
}

impl MemoryProjectDirectory {
    pub fn query_count(&self) -> usize {
        *self.queries.lock().unwrap()
    }

    fn record_query(&self) -> Result<(), ProjectDbError> {
        *self.queries.lock().unwrap() += 1;
        match &self.fail_with {
            Some(msg) => Err(ProjectDbError::Sqlx(sqlx::Error::Protocol(msg.clone()))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProjectDirectory for MemoryProjectDirectory {
    async fn team_members_by_name(&self, member_name: &str) -> Result<Vec<ProjectMember>, ProjectDbError> {
        self.record_query()?;

        let mut project_ids: Vec<i32> = self
            .members
            .iter()
            .filter(|m| m.member_name.contains(member_name))
            .map(|m| m.project_id)
            .collect();
        project_ids.sort_unstable();
        project_ids.dedup();

        Ok(project_ids
            .into_iter()
            .map(|project_id| ProjectMember {
                project_id,
                member_names: self
                    .members
                    .iter()
                    .filter(|m| m.project_id == project_id)
                    .map(|m| m.member_name.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            })
            .collect())
    }

    async fn projects_by_ids(&self, project_ids: &[i32]) -> Result<Vec<Project>, ProjectDbError> {
        if project_ids.is_empty() {
            return Ok(vec![]);
        }
        self.record_query()?;
        Ok(self
            .projects
            .iter()
            .filter(|p| project_ids.contains(&p.id))
            .cloned()
            .collect())
    }
}

pub const TEST_ACCOUNT: &str = "profilestore";
pub const TEST_CONTAINER: &str = "media";

pub fn test_signer() -> BlobSigner {
    BlobSigner::from_config(&StorageConfig {
        connection_string: format!(
            "DefaultEndpointsProtocol=https;AccountName={};AccountKey=dGVzdC1hY2NvdW50LWtleQ==;EndpointSuffix=core.windows.net",
            TEST_ACCOUNT
        ),
        container_name: TEST_CONTAINER.to_string(),
        read_sas_ttl_secs: 3600,
        upload_sas_ttl_secs: 900,
    })
    .unwrap()
}

pub fn memory_stores() -> ProfileStores {
    ProfileStores {
        employees: Arc::new(MemoryStore::new()),
        employment_history: Arc::new(MemoryStore::new()),
        project_info: Arc::new(MemoryStore::new()),
        insight_info: Arc::new(MemoryStore::new()),
        skill_info: Arc::new(MemoryStore::new()),
        private_info: Arc::new(MemoryStore::new()),
        related_info: Arc::new(MemoryStore::new()),
        operation_logs: Arc::new(MemoryStore::new()),
    }
}

pub fn test_state(directory: Arc<MemoryProjectDirectory>) -> AppState {
    AppState {
        stores: memory_stores(),
        projects: directory,
        signer: Arc::new(test_signer()),
        pools: None,
    }
}

pub fn test_app() -> Router {
    crate::app::routes(&test_state(Arc::new(MemoryProjectDirectory::default())))
}

/// Send one request and return the status and JSON body (`Null` when empty
/// or not JSON).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
