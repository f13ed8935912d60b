// handlers/mod.rs - HTTP surface
//
// crud                → generic five-endpoint router factory
// profile             → the eight profile entities built from the factory
// reset               → PUT /reset_* media-clearing endpoints
// storage             → POST /generate-sas-token
// project_management  → read-only lookups against the project-management database
// system              → GET / and GET /health
pub mod crud;
pub mod profile;
pub mod project_management;
pub mod reset;
pub mod storage;
pub mod system;

pub use crud::{CrudResource, ReadTransform};
