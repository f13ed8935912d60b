use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::entity::Entity;
use crate::database::field::{present, push_present, FieldValue, Fields};

/// Media links for a profile. `seminar_videos` and `seminar_thumbnail_url`
/// hold comma-separated lists; the thumbnail fields reference blobs in the
/// profile storage container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RelatedInfo {
    pub id: i32,
    pub employee_id: i32,
    pub profile_video: Option<String>,
    pub profile_thumbnail_url: Option<String>,
    pub seminar_videos: Option<String>,
    pub seminar_thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelatedInfoCreate {
    pub employee_id: i32,
    pub profile_video: Option<String>,
    pub profile_thumbnail_url: Option<String>,
    pub seminar_videos: Option<String>,
    pub seminar_thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelatedInfoUpdate {
    #[serde(default, deserialize_with = "present")]
    pub profile_video: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub profile_thumbnail_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub seminar_videos: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub seminar_thumbnail_url: Option<Option<String>>,
}

impl Entity for RelatedInfo {
    type Create = RelatedInfoCreate;
    type Update = RelatedInfoUpdate;

    const TABLE: &'static str = "related_info";

    const COLUMNS: &'static [&'static str] = &[
        "employee_id",
        "profile_video",
        "profile_thumbnail_url",
        "seminar_videos",
        "seminar_thumbnail_url",
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn create_fields(input: RelatedInfoCreate) -> Fields {
        vec![
            ("employee_id", FieldValue::from(input.employee_id)),
            ("profile_video", input.profile_video.into()),
            ("profile_thumbnail_url", input.profile_thumbnail_url.into()),
            ("seminar_videos", input.seminar_videos.into()),
            ("seminar_thumbnail_url", input.seminar_thumbnail_url.into()),
        ]
    }

    fn update_fields(input: RelatedInfoUpdate) -> Fields {
        let mut fields = Fields::new();
        push_present(&mut fields, "profile_video", input.profile_video);
        push_present(&mut fields, "profile_thumbnail_url", input.profile_thumbnail_url);
        push_present(&mut fields, "seminar_videos", input.seminar_videos);
        push_present(&mut fields, "seminar_thumbnail_url", input.seminar_thumbnail_url);
        fields
    }
}
