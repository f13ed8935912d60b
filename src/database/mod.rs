//! Profile database: entity tables and the generic CRUD object over them.

pub mod crud;
pub mod entity;
pub mod field;
pub mod manager;
pub mod models;

pub use crud::{CrudBase, CrudStore};
pub use entity::Entity;
pub use field::{FieldValue, Fields};
pub use manager::{DatabaseError, DatabaseManager};
