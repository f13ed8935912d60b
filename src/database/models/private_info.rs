use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::entity::Entity;
use crate::database::field::{present, push_present, FieldValue, Fields};

/// Personal background and preferences. Several attributes (nickname,
/// hobbies, ...) hold comma-separated lists as plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PrivateInfo {
    pub id: i32,
    pub employee_id: i32,
    pub blood_type: Option<String>,
    pub nickname: Option<String>,
    pub mbti: Option<String>,
    pub family_structure: Option<String>,
    pub father_job: Option<String>,
    pub mother_job: Option<String>,
    pub lessons: Option<String>,
    pub club_activities: Option<String>,
    pub jobs: Option<String>,
    pub circles: Option<String>,
    pub hobbies: Option<String>,
    pub favorite_foods: Option<String>,
    pub disliked_foods: Option<String>,
    pub holiday_activities: Option<String>,
    pub favorite_celebrities: Option<String>,
    pub favorite_characters: Option<String>,
    pub favorite_artists: Option<String>,
    pub favorite_comedians: Option<String>,
    pub activities_free: Option<String>,
    pub favorite_things_free: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrivateInfoCreate {
    pub employee_id: i32,
    pub blood_type: Option<String>,
    pub nickname: Option<String>,
    pub mbti: Option<String>,
    pub family_structure: Option<String>,
    pub father_job: Option<String>,
    pub mother_job: Option<String>,
    pub lessons: Option<String>,
    pub club_activities: Option<String>,
    pub jobs: Option<String>,
    pub circles: Option<String>,
    pub hobbies: Option<String>,
    pub favorite_foods: Option<String>,
    pub disliked_foods: Option<String>,
    pub holiday_activities: Option<String>,
    pub favorite_celebrities: Option<String>,
    pub favorite_characters: Option<String>,
    pub favorite_artists: Option<String>,
    pub favorite_comedians: Option<String>,
    pub activities_free: Option<String>,
    pub favorite_things_free: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrivateInfoUpdate {
    #[serde(default, deserialize_with = "present")]
    pub blood_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub nickname: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub mbti: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub family_structure: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub father_job: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub mother_job: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub lessons: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub club_activities: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub jobs: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub circles: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub hobbies: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub favorite_foods: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub disliked_foods: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub holiday_activities: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub favorite_celebrities: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub favorite_characters: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub favorite_artists: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub favorite_comedians: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub activities_free: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub favorite_things_free: Option<Option<String>>,
}

impl Entity for PrivateInfo {
    type Create = PrivateInfoCreate;
    type Update = PrivateInfoUpdate;

    const TABLE: &'static str = "private_info";

    const COLUMNS: &'static [&'static str] = &[
        "employee_id",
        "blood_type",
        "nickname",
        "mbti",
        "family_structure",
        "father_job",
        "mother_job",
        "lessons",
        "club_activities",
        "jobs",
        "circles",
        "hobbies",
        "favorite_foods",
        "disliked_foods",
        "holiday_activities",
        "favorite_celebrities",
        "favorite_characters",
        "favorite_artists",
        "favorite_comedians",
        "activities_free",
        "favorite_things_free",
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn create_fields(input: PrivateInfoCreate) -> Fields {
        vec![
            ("employee_id", FieldValue::from(input.employee_id)),
            ("blood_type", input.blood_type.into()),
            ("nickname", input.nickname.into()),
            ("mbti", input.mbti.into()),
            ("family_structure", input.family_structure.into()),
            ("father_job", input.father_job.into()),
            ("mother_job", input.mother_job.into()),
            ("lessons", input.lessons.into()),
            ("club_activities", input.club_activities.into()),
            ("jobs", input.jobs.into()),
            ("circles", input.circles.into()),
            ("hobbies", input.hobbies.into()),
            ("favorite_foods", input.favorite_foods.into()),
            ("disliked_foods", input.disliked_foods.into()),
            ("holiday_activities", input.holiday_activities.into()),
            ("favorite_celebrities", input.favorite_celebrities.into()),
            ("favorite_characters", input.favorite_characters.into()),
            ("favorite_artists", input.favorite_artists.into()),
            ("favorite_comedians", input.favorite_comedians.into()),
            ("activities_free", input.activities_free.into()),
            ("favorite_things_free", input.favorite_things_free.into()),
        ]
    }

    fn update_fields(input: PrivateInfoUpdate) -> Fields {
        let mut fields = Fields::new();
        push_present(&mut fields, "blood_type", input.blood_type);
        push_present(&mut fields, "nickname", input.nickname);
        push_present(&mut fields, "mbti", input.mbti);
        push_present(&mut fields, "family_structure", input.family_structure);
        push_present(&mut fields, "father_job", input.father_job);
        push_present(&mut fields, "mother_job", input.mother_job);
        push_present(&mut fields, "lessons", input.lessons);
        push_present(&mut fields, "club_activities", input.club_activities);
        push_present(&mut fields, "jobs", input.jobs);
        push_present(&mut fields, "circles", input.circles);
        push_present(&mut fields, "hobbies", input.hobbies);
        push_present(&mut fields, "favorite_foods", input.favorite_foods);
        push_present(&mut fields, "disliked_foods", input.disliked_foods);
        push_present(&mut fields, "holiday_activities", input.holiday_activities);
        push_present(&mut fields, "favorite_celebrities", input.favorite_celebrities);
        push_present(&mut fields, "favorite_characters", input.favorite_characters);
        push_present(&mut fields, "favorite_artists", input.favorite_artists);
        push_present(&mut fields, "favorite_comedians", input.favorite_comedians);
        push_present(&mut fields, "activities_free", input.activities_free);
        push_present(&mut fields, "favorite_things_free", input.favorite_things_free);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_column_is_written_on_create() {
        let create: PrivateInfoCreate =
            serde_json::from_str(r#"{"employee_id": 3, "mbti": "INTJ"}"#).unwrap();
        let fields = PrivateInfo::create_fields(create);
        let columns: Vec<&str> = fields.iter().map(|(c, _)| *c).collect();
        assert_eq!(columns, PrivateInfo::COLUMNS);
    }
}
