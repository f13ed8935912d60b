//! Typed column values passed between entity schemas and the CRUD layer.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A single column value. `None` inside a variant is SQL NULL; the variant
/// still carries the column type so Postgres receives a correctly typed bind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(Option<i32>),
    Text(Option<String>),
    Date(Option<NaiveDate>),
    Timestamp(Option<NaiveDateTime>),
}

/// Ordered (column, value) pairs for inserts and partial updates.
pub type Fields = Vec<(&'static str, FieldValue)>;

impl FieldValue {
    /// JSON form matching what the entity's serde representation expects.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Int(Some(i)) => Value::from(*i),
            FieldValue::Text(Some(s)) => Value::String(s.clone()),
            FieldValue::Date(Some(d)) => serde_json::to_value(d).unwrap_or(Value::Null),
            FieldValue::Timestamp(Some(t)) => serde_json::to_value(t).unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(Some(v))
    }
}

impl From<Option<i32>> for FieldValue {
    fn from(v: Option<i32>) -> Self {
        FieldValue::Int(v)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(v: Option<String>) -> Self {
        FieldValue::Text(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(Some(v))
    }
}

impl From<Option<NaiveDate>> for FieldValue {
    fn from(v: Option<NaiveDate>) -> Self {
        FieldValue::Date(v)
    }
}

impl From<Option<NaiveDateTime>> for FieldValue {
    fn from(v: Option<NaiveDateTime>) -> Self {
        FieldValue::Timestamp(v)
    }
}

/// Deserializer for `Option<Option<T>>` update fields: an absent key stays
/// `None` (via `#[serde(default)]`), an explicit `null` becomes `Some(None)`.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Push `column` onto `fields` only when the update supplied it.
pub fn push_present<T>(fields: &mut Fields, column: &'static str, value: Option<Option<T>>)
where
    FieldValue: From<Option<T>>,
{
    if let Some(v) = value {
        fields.push((column, FieldValue::from(v)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "present")]
        name: Option<Option<String>>,
        #[serde(default, deserialize_with = "present")]
        kana: Option<Option<String>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let patch: Patch = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(patch.name, Some(None));
        assert_eq!(patch.kana, None);

        let patch: Patch = serde_json::from_str(r#"{"kana": "やまだ"}"#).unwrap();
        assert_eq!(patch.kana, Some(Some("やまだ".to_string())));
    }

    #[test]
    fn push_present_skips_omitted_fields() {
        let mut fields = Fields::new();
        push_present::<String>(&mut fields, "name", None);
        push_present(&mut fields, "kana", Some(None::<String>));
        assert_eq!(fields, vec![("kana", FieldValue::Text(None))]);
    }

    #[test]
    fn dates_serialize_as_iso() {
        let d = NaiveDate::from_ymd_opt(1990, 4, 1);
        assert_eq!(FieldValue::Date(d).to_json(), Value::String("1990-04-01".into()));
        assert_eq!(FieldValue::Date(None).to_json(), Value::Null);
    }
}
