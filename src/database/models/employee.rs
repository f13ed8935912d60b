use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::entity::Entity;
use crate::database::field::{present, push_present, FieldValue, Fields};

/// Basic personal record; one row per person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: i32,
    pub employee_id: i32,
    pub name: Option<String>,
    pub kana: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub hometown: Option<String>,
    pub elementary_school: Option<String>,
    pub junior_high_school: Option<String>,
    pub high_school: Option<String>,
    pub university: Option<String>,
    pub faculty: Option<String>,
    pub graduate_school: Option<String>,
    pub major: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeCreate {
    pub employee_id: i32,
    pub name: String,
    pub kana: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub hometown: Option<String>,
    pub elementary_school: Option<String>,
    pub junior_high_school: Option<String>,
    pub high_school: Option<String>,
    pub university: Option<String>,
    pub faculty: Option<String>,
    pub graduate_school: Option<String>,
    pub major: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub kana: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub birthdate: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "present")]
    pub hometown: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub elementary_school: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub junior_high_school: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub high_school: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub university: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub faculty: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub graduate_school: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub major: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub photo_url: Option<Option<String>>,
}

impl Entity for Employee {
    type Create = EmployeeCreate;
    type Update = EmployeeUpdate;

    const TABLE: &'static str = "employees";

    const COLUMNS: &'static [&'static str] = &[
        "employee_id",
        "name",
        "kana",
        "birthdate",
        "hometown",
        "elementary_school",
        "junior_high_school",
        "high_school",
        "university",
        "faculty",
        "graduate_school",
        "major",
        "photo_url",
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn create_fields(input: EmployeeCreate) -> Fields {
        vec![
            ("employee_id", FieldValue::from(input.employee_id)),
            ("name", FieldValue::from(input.name)),
            ("kana", input.kana.into()),
            ("birthdate", input.birthdate.into()),
            ("hometown", input.hometown.into()),
            ("elementary_school", input.elementary_school.into()),
            ("junior_high_school", input.junior_high_school.into()),
            ("high_school", input.high_school.into()),
            ("university", input.university.into()),
            ("faculty", input.faculty.into()),
            ("graduate_school", input.graduate_school.into()),
            ("major", input.major.into()),
            ("photo_url", input.photo_url.into()),
        ]
    }

    fn update_fields(input: EmployeeUpdate) -> Fields {
        let mut fields = Fields::new();
        push_present(&mut fields, "name", input.name);
        push_present(&mut fields, "kana", input.kana);
        push_present(&mut fields, "birthdate", input.birthdate);
        push_present(&mut fields, "hometown", input.hometown);
        push_present(&mut fields, "elementary_school", input.elementary_school);
        push_present(&mut fields, "junior_high_school", input.junior_high_school);
        push_present(&mut fields, "high_school", input.high_school);
        push_present(&mut fields, "university", input.university);
        push_present(&mut fields, "faculty", input.faculty);
        push_present(&mut fields, "graduate_school", input.graduate_school);
        push_present(&mut fields, "major", input.major);
        push_present(&mut fields, "photo_url", input.photo_url);
        fields
    }
}
