//! Load table config from the built-in allow-list or a JSON file, and resolve it.

use crate::config::resolved::{ColumnInfo, ResolvedTable, TableRegistry};
use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::path::Path;

/// Build the registry from table configs (validates first).
pub fn resolve(tables: &[TableConfig]) -> Result<TableRegistry, ConfigError> {
    validate(tables)?;
    let resolved = tables
        .iter()
        .map(|t| ResolvedTable {
            name: t.name.clone(),
            primary_key: t.primary_key.clone(),
            columns: t
                .columns
                .iter()
                .map(|c| ColumnInfo {
                    name: c.name.clone(),
                    kind: c.kind,
                })
                .collect(),
        })
        .collect();
    Ok(TableRegistry::new(resolved))
}

/// Read a JSON array of table configs, replacing the built-in list.
pub async fn load_tables_from_path(path: &Path) -> Result<Vec<TableConfig>, ConfigError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    parse_tables(&text)
}

pub fn parse_tables(text: &str) -> Result<Vec<TableConfig>, ConfigError> {
    serde_json::from_str(text).map_err(|e| ConfigError::Load(e.to_string()))
}

/// Override file when one is configured, otherwise the built-in allow-list.
pub async fn load_tables(path: Option<&Path>) -> Result<Vec<TableConfig>, ConfigError> {
    match path {
        Some(p) => {
            tracing::info!(path = %p.display(), "loading table config");
            load_tables_from_path(p).await
        }
        None => Ok(builtin_tables()),
    }
}
