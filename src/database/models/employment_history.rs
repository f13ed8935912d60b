use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::entity::Entity;
use crate::database::field::{present, push_present, FieldValue, Fields};

/// A previous position; many rows per employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EmploymentHistory {
    pub id: i32,
    pub employee_id: i32,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub knowledge: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmploymentHistoryCreate {
    pub employee_id: i32,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub knowledge: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmploymentHistoryUpdate {
    #[serde(default, deserialize_with = "present")]
    pub company_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub job_title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "present")]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub knowledge: Option<Option<String>>,
}

impl Entity for EmploymentHistory {
    type Create = EmploymentHistoryCreate;
    type Update = EmploymentHistoryUpdate;

    const TABLE: &'static str = "employment_history";

    const COLUMNS: &'static [&'static str] = &[
        "employee_id",
        "company_name",
        "job_title",
        "start_date",
        "end_date",
        "description",
        "knowledge",
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn create_fields(input: EmploymentHistoryCreate) -> Fields {
        vec![
            ("employee_id", FieldValue::from(input.employee_id)),
            ("company_name", input.company_name.into()),
            ("job_title", input.job_title.into()),
            ("start_date", input.start_date.into()),
            ("end_date", input.end_date.into()),
            ("description", input.description.into()),
            ("knowledge", input.knowledge.into()),
        ]
    }

    fn update_fields(input: EmploymentHistoryUpdate) -> Fields {
        let mut fields = Fields::new();
        push_present(&mut fields, "company_name", input.company_name);
        push_present(&mut fields, "job_title", input.job_title);
        push_present(&mut fields, "start_date", input.start_date);
        push_present(&mut fields, "end_date", input.end_date);
        push_present(&mut fields, "description", input.description);
        push_present(&mut fields, "knowledge", input.knowledge);
        fields
    }
}
