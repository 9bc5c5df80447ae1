//! Per-request SQLite connections and schema introspection.

use crate::config::TableRegistry;
use crate::sql::{create_table, table_info};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection, Row};
use std::path::{Path, PathBuf};

/// Handle to the database file. Holds connect options only; each request opens its own connection.
#[derive(Clone, Debug)]
pub struct Database {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        Database { path, options }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name shown to users (e.g. "prodynamic.db").
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub async fn connect(&self) -> Result<SqliteConnection, sqlx::Error> {
        self.options.connect().await
    }
}

/// Close a connection before the response is returned. A close failure is logged, not propagated.
pub async fn close(conn: SqliteConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "closing connection failed");
    }
}

/// User tables, ordered by name.
pub async fn list_tables(conn: &mut SqliteConnection) -> Result<Vec<String>, sqlx::Error> {
    let sql = "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name";
    tracing::debug!(sql = %sql, "query");
    sqlx::query_scalar::<_, String>(sql).fetch_all(&mut *conn).await
}

/// Column names of one table in declaration order.
pub async fn table_columns(conn: &mut SqliteConnection, table_name: &str) -> Result<Vec<String>, sqlx::Error> {
    let sql = table_info(table_name);
    tracing::debug!(sql = %sql, "query");
    let rows = sqlx::query(&sql).fetch_all(&mut *conn).await?;
    rows.iter().map(|r| r.try_get::<String, _>("name")).collect()
}

pub async fn ping(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").fetch_optional(&mut *conn).await?;
    Ok(())
}

/// Create every configured table that does not exist yet. Existing tables are left untouched.
pub async fn ensure_schema(conn: &mut SqliteConnection, registry: &TableRegistry) -> Result<(), sqlx::Error> {
    for table in &registry.tables {
        let ddl = create_table(table);
        tracing::debug!(sql = %ddl, "ddl");
        sqlx::query(&ddl).execute(&mut *conn).await?;
    }
    Ok(())
}
