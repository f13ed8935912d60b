use serde::{de::DeserializeOwned, Serialize};
use sqlx::{postgres::PgRow, FromRow};

use crate::database::field::Fields;

/// A profile table and its three schema shapes.
///
/// The row type itself is the output schema. `Create` and `Update` are the
/// request bodies; each entity converts them to column/value pairs
/// explicitly so the CRUD layer never inspects attributes by name.
pub trait Entity:
    for<'r> FromRow<'r, PgRow> + Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static
{
    type Create: DeserializeOwned + Send + 'static;
    type Update: DeserializeOwned + Send + 'static;

    const TABLE: &'static str;

    /// Every column except `id`, in insert order.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> i32;

    fn create_fields(input: Self::Create) -> Fields;

    /// Only the attributes present in the request.
    fn update_fields(input: Self::Update) -> Fields;

    fn has_column(name: &str) -> bool {
        name == "id" || Self::COLUMNS.contains(&name)
    }
}
