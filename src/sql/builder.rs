//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from a resolved table.

use crate::config::ResolvedTable;
use crate::sql::SqlValue;

/// Fixed cap on rows returned by a table listing.
pub const ROW_LIMIT: u32 = 500;

/// Quote identifier for SQLite (safe: only from config or introspection).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }
}

/// SELECT * with the listing row cap. Works for any table name found by introspection.
pub fn select_rows(table_name: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT * FROM {} LIMIT {}", quoted(table_name), ROW_LIMIT);
    q
}

/// PRAGMA table_info for one table.
pub fn table_info(table_name: &str) -> String {
    format!("PRAGMA table_info({})", quoted(table_name))
}

fn select_column_list(table: &ResolvedTable) -> String {
    std::iter::once(&table.primary_key)
        .chain(table.columns.iter().map(|c| &c.name))
        .map(|c| quoted(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT primary key and configured columns by primary key.
pub fn select_by_id(table: &ResolvedTable, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ?",
        select_column_list(table),
        quoted(&table.name),
        quoted(&table.primary_key)
    );
    q.params.push(SqlValue::Integer(id));
    q
}

/// INSERT the given (column, value) pairs; columns not in the table config are skipped.
pub fn insert(table: &ResolvedTable, values: &[(String, SqlValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    for (name, val) in values {
        if !table.has_column(name) {
            continue;
        }
        cols.push(quoted(name));
        q.params.push(val.clone());
    }
    let sql_table = quoted(&table.name);
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES", sql_table)
    } else {
        let placeholders = vec!["?"; cols.len()].join(", ");
        format!("INSERT INTO {} ({}) VALUES ({})", sql_table, cols.join(", "), placeholders)
    };
    q
}

/// UPDATE by primary key: SET only configured columns present in `values`.
/// With nothing to set, degrades to a no-op UPDATE that still reports whether the row exists.
pub fn update(table: &ResolvedTable, id: i64, values: &[(String, SqlValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let pk = quoted(&table.primary_key);
    let mut sets = Vec::new();
    for (name, val) in values {
        if !table.has_column(name) {
            continue;
        }
        sets.push(format!("{} = ?", quoted(name)));
        q.params.push(val.clone());
    }
    if sets.is_empty() {
        sets.push(format!("{} = {}", pk, pk));
    }
    q.params.push(SqlValue::Integer(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quoted(&table.name),
        sets.join(", "),
        pk
    );
    q
}

/// DELETE by primary key.
pub fn delete(table: &ResolvedTable, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ?",
        quoted(&table.name),
        quoted(&table.primary_key)
    );
    q.params.push(SqlValue::Integer(id));
    q
}

/// CREATE TABLE IF NOT EXISTS with an integer primary key and one affinity per configured column.
pub fn create_table(table: &ResolvedTable) -> String {
    let mut defs = vec![format!("{} INTEGER PRIMARY KEY", quoted(&table.primary_key))];
    for c in &table.columns {
        defs.push(format!("{} {}", quoted(&c.name), c.kind.affinity()));
    }
    format!("CREATE TABLE IF NOT EXISTS {} ({})", quoted(&table.name), defs.join(", "))
}
