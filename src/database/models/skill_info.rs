use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::entity::Entity;
use crate::database::field::{present, push_present, FieldValue, Fields};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SkillInfo {
    pub id: i32,
    pub employee_id: i32,
    pub skill: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillInfoCreate {
    pub employee_id: i32,
    pub skill: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillInfoUpdate {
    #[serde(default, deserialize_with = "present")]
    pub skill: Option<Option<String>>,
}

impl Entity for SkillInfo {
    type Create = SkillInfoCreate;
    type Update = SkillInfoUpdate;

    const TABLE: &'static str = "skill_info";

    const COLUMNS: &'static [&'static str] = &["employee_id", "skill"];

    fn id(&self) -> i32 {
        self.id
    }

    fn create_fields(input: SkillInfoCreate) -> Fields {
        vec![
            ("employee_id", FieldValue::from(input.employee_id)),
            ("skill", input.skill.into()),
        ]
    }

    fn update_fields(input: SkillInfoUpdate) -> Fields {
        let mut fields = Fields::new();
        push_present(&mut fields, "skill", input.skill);
        fields
    }
}
