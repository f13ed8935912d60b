use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Project as exposed to profile clients. Dates are free-form text in the
/// source system; the category columns are JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub industry_categories: Option<Value>,
    pub type_categories: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TeamMember {
    pub id: i32,
    pub project_id: i32,
    pub member_name: String,
    pub role_title: Option<String>,
}

/// One project that has a matching member, with every member name of that
/// project comma-joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProjectMember {
    pub project_id: i32,
    pub member_names: String,
}
