use std::sync::Arc;

use axum::{http::header::HeaderValue, Router};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::SecurityConfig;
use crate::database::models::{
    Employee, EmploymentHistory, InsightInfo, OperationLog, PrivateInfo, ProjectInfo, RelatedInfo,
    SkillInfo,
};
use crate::database::{CrudBase, CrudStore};
use crate::handlers;
use crate::project_management::{PgProjectDirectory, ProjectDirectory};
use crate::storage::BlobSigner;

/// One data-access object per profile table.
#[derive(Clone)]
pub struct ProfileStores {
    pub employees: Arc<dyn CrudStore<Employee>>,
    pub employment_history: Arc<dyn CrudStore<EmploymentHistory>>,
    pub project_info: Arc<dyn CrudStore<ProjectInfo>>,
    pub insight_info: Arc<dyn CrudStore<InsightInfo>>,
    pub skill_info: Arc<dyn CrudStore<SkillInfo>>,
    pub private_info: Arc<dyn CrudStore<PrivateInfo>>,
    pub related_info: Arc<dyn CrudStore<RelatedInfo>>,
    pub operation_logs: Arc<dyn CrudStore<OperationLog>>,
}

impl ProfileStores {
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            employees: Arc::new(CrudBase::<Employee>::new(pool.clone())),
            employment_history: Arc::new(CrudBase::<EmploymentHistory>::new(pool.clone())),
            project_info: Arc::new(CrudBase::<ProjectInfo>::new(pool.clone())),
            insight_info: Arc::new(CrudBase::<InsightInfo>::new(pool.clone())),
            skill_info: Arc::new(CrudBase::<SkillInfo>::new(pool.clone())),
            private_info: Arc::new(CrudBase::<PrivateInfo>::new(pool.clone())),
            related_info: Arc::new(CrudBase::<RelatedInfo>::new(pool.clone())),
            operation_logs: Arc::new(CrudBase::<OperationLog>::new(pool.clone())),
        }
    }
}

/// The two independent pools, kept only for health reporting.
#[derive(Clone)]
pub struct HealthPools {
    pub profile: PgPool,
    pub project: PgPool,
}

#[derive(Clone)]
pub struct AppState {
    pub stores: ProfileStores,
    pub projects: Arc<dyn ProjectDirectory>,
    pub signer: Arc<BlobSigner>,
    pub pools: Option<HealthPools>,
}

impl AppState {
    pub fn postgres(profile_pool: PgPool, project_pool: PgPool, signer: BlobSigner) -> Self {
        Self {
            stores: ProfileStores::postgres(&profile_pool),
            projects: Arc::new(PgProjectDirectory::new(project_pool.clone())),
            signer: Arc::new(signer),
            pools: Some(HealthPools {
                profile: profile_pool,
                project: project_pool,
            }),
        }
    }
}

pub fn app(state: AppState, security: &SecurityConfig) -> Router {
    routes(&state)
        // Global middleware
        .layer(cors_layer(security))
        .layer(TraceLayer::new_for_http())
}

/// Every route, without middleware.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(handlers::system::routes(state))
        .merge(handlers::profile::routes(state))
        .merge(handlers::reset::routes(state))
        .merge(handlers::storage::routes(state.signer.clone()))
        .merge(handlers::project_management::routes(state.projects.clone()))
}

/// Configured origins with credentials; methods and headers mirror the
/// request. A `*` entry mirrors the request origin, since a literal wildcard
/// cannot be combined with credentials.
pub fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let allow_origin = if security.cors_origins.iter().any(|origin| origin == "*") {
        warn!("CORS origin '*' configured; mirroring the request origin");
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = security
            .cors_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
