//! CRUD execution against one SQLite connection.

use crate::config::ResolvedTable;
use crate::sql::{bind_all, delete, insert, select_by_id, select_rows, update, QueryBuf, SqlValue};
use crate::store::table_columns;
use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteConnection, SqliteQueryResult, SqliteRow};

/// One listing: column names from the table definition and up to the row cap of positional cells.
#[derive(Debug)]
pub struct TablePage {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

pub struct CrudService;

impl CrudService {
    /// List any table found by introspection; not limited to configured tables.
    pub async fn list_rows(conn: &mut SqliteConnection, table_name: &str) -> Result<TablePage, sqlx::Error> {
        let columns = table_columns(conn, table_name).await?;
        let q = select_rows(table_name);
        tracing::debug!(sql = %q.sql, "query");
        let rows = sqlx::query(&q.sql).fetch_all(&mut *conn).await?;
        Ok(TablePage {
            columns,
            rows: rows.iter().map(row_to_cells).collect(),
        })
    }

    /// Fetch one row by primary key. Returns column name to value, or None.
    pub async fn read(
        conn: &mut SqliteConnection,
        table: &ResolvedTable,
        id: i64,
    ) -> Result<Option<Map<String, Value>>, sqlx::Error> {
        let q = select_by_id(table, id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(sqlx::query(&q.sql), &q.params)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.map(|r| row_to_map(&r)))
    }

    /// Insert one row. Returns the new row id.
    pub async fn create(
        conn: &mut SqliteConnection,
        table: &ResolvedTable,
        values: &[(String, SqlValue)],
    ) -> Result<i64, sqlx::Error> {
        let q = insert(table, values);
        let result = Self::execute(conn, &q).await?;
        Ok(result.last_insert_rowid())
    }

    /// Update one row by id. Returns rows affected (0 when the row is gone).
    pub async fn update(
        conn: &mut SqliteConnection,
        table: &ResolvedTable,
        id: i64,
        values: &[(String, SqlValue)],
    ) -> Result<u64, sqlx::Error> {
        let q = update(table, id, values);
        let result = Self::execute(conn, &q).await?;
        Ok(result.rows_affected())
    }

    /// Delete one row by id. Returns rows affected. Rows referencing it are not touched.
    pub async fn delete(conn: &mut SqliteConnection, table: &ResolvedTable, id: i64) -> Result<u64, sqlx::Error> {
        let q = delete(table, id);
        let result = Self::execute(conn, &q).await?;
        Ok(result.rows_affected())
    }

    async fn execute(conn: &mut SqliteConnection, q: &QueryBuf) -> Result<SqliteQueryResult, sqlx::Error> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        bind_all(sqlx::query(&q.sql), &q.params).execute(&mut *conn).await
    }
}

fn row_to_cells(row: &SqliteRow) -> Vec<Value> {
    use sqlx::Row;
    (0..row.len()).map(|i| cell_to_value(row, i)).collect()
}

fn row_to_map(row: &SqliteRow) -> Map<String, Value> {
    use sqlx::{Column, Row};
    row.columns()
        .iter()
        .map(|c| (c.name().to_string(), cell_to_value(row, c.ordinal())))
        .collect()
}

/// SQLite is dynamically typed; decode by the stored value's storage class.
fn cell_to_value(row: &SqliteRow, idx: usize) -> Value {
    use sqlx::{Row, ValueRef};
    match row.try_get_raw(idx) {
        Ok(raw) if !raw.is_null() => {}
        _ => return Value::Null,
    }
    if let Ok(n) = row.try_get::<i64, _>(idx) {
        return Value::Number(n.into());
    }
    if let Ok(f) = row.try_get::<f64, _>(idx) {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
        return Value::String(f.to_string());
    }
    if let Ok(s) = row.try_get::<String, _>(idx) {
        return Value::String(s);
    }
    if let Ok(b) = row.try_get::<Vec<u8>, _>(idx) {
        return Value::String(String::from_utf8_lossy(&b).into_owned());
    }
    Value::Null
}
