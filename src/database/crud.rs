use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{
    postgres::{PgArguments, PgRow},
    FromRow, PgPool, Postgres,
};
use tracing::debug;

use crate::database::entity::Entity;
use crate::database::field::{FieldValue, Fields};
use crate::database::manager::DatabaseError;

/// Data-access contract for one entity type. Every lookup takes the name of
/// the column to match on; when several rows match, the lowest `id` wins.
#[async_trait]
pub trait CrudStore<E: Entity>: Send + Sync {
    async fn get(&self, key_field: &str, value: FieldValue) -> Result<Option<E>, DatabaseError>;

    async fn get_all(&self) -> Result<Vec<E>, DatabaseError>;

    async fn create(&self, fields: Fields) -> Result<E, DatabaseError>;

    /// `Ok(None)` when no row matches.
    async fn update(
        &self,
        key_field: &str,
        value: FieldValue,
        fields: Fields,
    ) -> Result<Option<E>, DatabaseError>;

    /// `Ok(false)` when no row matches.
    async fn delete(&self, key_field: &str, value: FieldValue) -> Result<bool, DatabaseError>;
}

/// Postgres-backed [`CrudStore`]. Each call is one statement, committed
/// immediately.
pub struct CrudBase<E> {
    pool: PgPool,
    _phantom: PhantomData<E>,
}

impl<E: Entity> CrudBase<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: PhantomData,
        }
    }

    fn check_key(key_field: &str) -> Result<(), DatabaseError> {
        if E::has_column(key_field) {
            Ok(())
        } else {
            Err(DatabaseError::UnknownColumn {
                table: E::TABLE,
                column: key_field.to_string(),
            })
        }
    }
}

#[async_trait]
impl<E: Entity> CrudStore<E> for CrudBase<E> {
    async fn get(&self, key_field: &str, value: FieldValue) -> Result<Option<E>, DatabaseError> {
        Self::check_key(key_field)?;
        let sql = select_sql(E::TABLE, key_field);
        debug!(table = E::TABLE, key_field, "crud get");

        let row = bind_value(sqlx::query_as::<_, E>(&sql), value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_all(&self) -> Result<Vec<E>, DatabaseError> {
        let sql = format!("SELECT * FROM {} ORDER BY \"id\"", quote_identifier(E::TABLE));
        debug!(table = E::TABLE, "crud get_all");

        let rows = sqlx::query_as::<_, E>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn create(&self, fields: Fields) -> Result<E, DatabaseError> {
        let sql = insert_sql(E::TABLE, &fields);
        debug!(table = E::TABLE, columns = fields.len(), "crud create");

        let mut q = sqlx::query_as::<_, E>(&sql);
        for (_, value) in fields {
            q = bind_value(q, value);
        }
        let row = q.fetch_one(&self.pool).await?;
        Ok(row)
    }

    async fn update(
        &self,
        key_field: &str,
        value: FieldValue,
        fields: Fields,
    ) -> Result<Option<E>, DatabaseError> {
        if fields.is_empty() {
            return self.get(key_field, value).await;
        }

        Self::check_key(key_field)?;
        let sql = update_sql(E::TABLE, &fields, key_field);
        debug!(table = E::TABLE, key_field, columns = fields.len(), "crud update");

        let mut q = sqlx::query_as::<_, E>(&sql);
        for (_, v) in fields {
            q = bind_value(q, v);
        }
        let row = bind_value(q, value).fetch_optional(&self.pool).await?;
        Ok(row)
    }

    async fn delete(&self, key_field: &str, value: FieldValue) -> Result<bool, DatabaseError> {
        Self::check_key(key_field)?;
        let sql = delete_sql(E::TABLE, key_field);
        debug!(table = E::TABLE, key_field, "crud delete");

        let result = bind_value_query(sqlx::query(&sql), value)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Subquery selecting the id of the first row where `key_field = $placeholder`.
fn first_match(table: &str, key_field: &str, placeholder: usize) -> String {
    format!(
        "SELECT \"id\" FROM {} WHERE {} = ${} ORDER BY \"id\" LIMIT 1",
        quote_identifier(table),
        quote_identifier(key_field),
        placeholder
    )
}

fn select_sql(table: &str, key_field: &str) -> String {
    format!(
        "SELECT * FROM {} WHERE {} = $1 ORDER BY \"id\" LIMIT 1",
        quote_identifier(table),
        quote_identifier(key_field)
    )
}

/// `$1..$n` are the assignments in field order; the key binds last as `$n+1`.
fn update_sql(table: &str, fields: &Fields, key_field: &str) -> String {
    let assignments = fields
        .iter()
        .enumerate()
        .map(|(i, (column, _))| format!("{} = ${}", quote_identifier(column), i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {} WHERE \"id\" = ({}) RETURNING *",
        quote_identifier(table),
        assignments,
        first_match(table, key_field, fields.len() + 1)
    )
}

fn delete_sql(table: &str, key_field: &str) -> String {
    format!(
        "DELETE FROM {} WHERE \"id\" = ({})",
        quote_identifier(table),
        first_match(table, key_field, 1)
    )
}

fn insert_sql(table: &str, fields: &Fields) -> String {
    if fields.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES RETURNING *", quote_identifier(table));
    }
    let columns = fields
        .iter()
        .map(|(column, _)| quote_identifier(column))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=fields.len())
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        quote_identifier(table),
        columns,
        placeholders
    )
}

/// Quote SQL identifier to prevent injection
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn bind_value<'q, O>(
    q: sqlx::query::QueryAs<'q, Postgres, O, PgArguments>,
    v: FieldValue,
) -> sqlx::query::QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match v {
        FieldValue::Int(i) => q.bind(i),
        FieldValue::Text(s) => q.bind(s),
        FieldValue::Date(d) => q.bind(d),
        FieldValue::Timestamp(t) => q.bind(t),
    }
}

fn bind_value_query<'q>(
    q: sqlx::query::Query<'q, Postgres, PgArguments>,
    v: FieldValue,
) -> sqlx::query::Query<'q, Postgres, PgArguments> {
    match v {
        FieldValue::Int(i) => q.bind(i),
        FieldValue::Text(s) => q.bind(s),
        FieldValue::Date(d) => q.bind(d),
        FieldValue::Timestamp(t) => q.bind(t),
    }
}
