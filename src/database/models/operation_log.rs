use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::entity::Entity;
use crate::database::field::{present, push_present, FieldValue, Fields};

/// Manually recorded operation entry. Nothing writes these automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OperationLog {
    pub id: i32,
    pub employee_id: i32,
    pub target_table: Option<String>,
    pub target_id: Option<i32>,
    pub operation_type: Option<String>,
    pub operation_user: Option<String>,
    pub operation_datetime: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OperationLogCreate {
    pub employee_id: i32,
    pub target_table: Option<String>,
    pub target_id: Option<i32>,
    pub operation_type: Option<String>,
    pub operation_user: Option<String>,
    pub operation_datetime: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperationLogUpdate {
    #[serde(default, deserialize_with = "present")]
    pub target_table: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub target_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub operation_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub operation_user: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub operation_datetime: Option<Option<NaiveDateTime>>,
}

impl Entity for OperationLog {
    type Create = OperationLogCreate;
    type Update = OperationLogUpdate;

    const TABLE: &'static str = "operation_logs";

    const COLUMNS: &'static [&'static str] = &[
        "employee_id",
        "target_table",
        "target_id",
        "operation_type",
        "operation_user",
        "operation_datetime",
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn create_fields(input: OperationLogCreate) -> Fields {
        vec![
            ("employee_id", FieldValue::from(input.employee_id)),
            ("target_table", input.target_table.into()),
            ("target_id", input.target_id.into()),
            ("operation_type", input.operation_type.into()),
            ("operation_user", input.operation_user.into()),
            ("operation_datetime", input.operation_datetime.into()),
        ]
    }

    fn update_fields(input: OperationLogUpdate) -> Fields {
        let mut fields = Fields::new();
        push_present(&mut fields, "target_table", input.target_table);
        push_present(&mut fields, "target_id", input.target_id);
        push_present(&mut fields, "operation_type", input.operation_type);
        push_present(&mut fields, "operation_user", input.operation_user);
        push_present(&mut fields, "operation_datetime", input.operation_datetime);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_naive_timestamp() {
        let create: OperationLogCreate = serde_json::from_str(
            r#"{"employee_id": 1, "operation_type": "update", "operation_datetime": "2024-05-01T09:30:00"}"#,
        )
        .unwrap();
        let fields = OperationLog::create_fields(create);
        let (_, when) = &fields[5];
        assert_eq!(when.to_json(), serde_json::json!("2024-05-01T09:30:00"));
    }
}
