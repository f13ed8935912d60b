use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::entity::Entity;
use crate::database::field::{present, push_present, FieldValue, Fields};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InsightInfo {
    pub id: i32,
    pub employee_id: i32,
    pub insight: Option<String>,
    pub skill: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightInfoCreate {
    pub employee_id: i32,
    pub insight: Option<String>,
    pub skill: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsightInfoUpdate {
    #[serde(default, deserialize_with = "present")]
    pub insight: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub skill: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub comment: Option<Option<String>>,
}

impl Entity for InsightInfo {
    type Create = InsightInfoCreate;
    type Update = InsightInfoUpdate;

    const TABLE: &'static str = "insight_info";

    const COLUMNS: &'static [&'static str] = &["employee_id", "insight", "skill", "comment"];

    fn id(&self) -> i32 {
        self.id
    }

    fn create_fields(input: InsightInfoCreate) -> Fields {
        vec![
            ("employee_id", FieldValue::from(input.employee_id)),
            ("insight", input.insight.into()),
            ("skill", input.skill.into()),
            ("comment", input.comment.into()),
        ]
    }

    fn update_fields(input: InsightInfoUpdate) -> Fields {
        let mut fields = Fields::new();
        push_present(&mut fields, "insight", input.insight);
        push_present(&mut fields, "skill", input.skill);
        push_present(&mut fields, "comment", input.comment);
        fields
    }
}
