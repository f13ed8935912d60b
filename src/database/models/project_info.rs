use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::entity::Entity;
use crate::database::field::{present, push_present, FieldValue, Fields};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProjectInfo {
    pub id: i32,
    pub employee_id: i32,
    pub project: Option<String>,
    pub skill: Option<String>,
    pub comment: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInfoCreate {
    pub employee_id: i32,
    pub project: Option<String>,
    pub skill: Option<String>,
    pub comment: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectInfoUpdate {
    #[serde(default, deserialize_with = "present")]
    pub project: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub skill: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub comment: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "present")]
    pub end_date: Option<Option<NaiveDate>>,
}

impl Entity for ProjectInfo {
    type Create = ProjectInfoCreate;
    type Update = ProjectInfoUpdate;

    const TABLE: &'static str = "project_info";

    const COLUMNS: &'static [&'static str] =
        &["employee_id", "project", "skill", "comment", "start_date", "end_date"];

    fn id(&self) -> i32 {
        self.id
    }

    fn create_fields(input: ProjectInfoCreate) -> Fields {
        vec![
            ("employee_id", FieldValue::from(input.employee_id)),
            ("project", input.project.into()),
            ("skill", input.skill.into()),
            ("comment", input.comment.into()),
            ("start_date", input.start_date.into()),
            ("end_date", input.end_date.into()),
        ]
    }

    fn update_fields(input: ProjectInfoUpdate) -> Fields {
        let mut fields = Fields::new();
        push_present(&mut fields, "project", input.project);
        push_present(&mut fields, "skill", input.skill);
        push_present(&mut fields, "comment", input.comment);
        push_present(&mut fields, "start_date", input.start_date);
        push_present(&mut fields, "end_date", input.end_date);
        fields
    }
}
