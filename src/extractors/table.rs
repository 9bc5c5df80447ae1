//! Resolve the configured table and record id a CRUD route operates on.

use crate::coerce::is_whole_number;
use crate::config::ResolvedTable;
use crate::error::AppError;
use crate::response::crud_path;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts, Path},
    http::request::Parts,
};
use std::collections::HashMap;

/// Binds a nested router to one table (e.g. `/employee/...` to Employee).
#[derive(Clone, Copy, Debug)]
pub struct RouteFamily {
    pub table: &'static str,
    pub base_path: &'static str,
}

/// Tables served under their own prefix as well as `/crud/<T>`.
pub const FAMILIES: &[RouteFamily] = &[
    RouteFamily { table: "Salary", base_path: "/salary" },
    RouteFamily { table: "Employee", base_path: "/employee" },
    RouteFamily { table: "Department", base_path: "/department" },
    RouteFamily { table: "Job", base_path: "/job" },
];

/// Prefix for a configured table's add/edit/delete links: its family if it has one, else `/crud/<T>`.
pub fn base_path_for(table_name: &str) -> String {
    FAMILIES
        .iter()
        .find(|f| f.table == table_name)
        .map(|f| f.base_path.to_string())
        .unwrap_or_else(|| crud_path(table_name))
}

/// The configured table for this request, from a [`RouteFamily`] extension or the `:table_name` segment.
#[derive(Clone, Debug)]
pub struct ConfiguredTable {
    pub table: ResolvedTable,
    /// Prefix of the add/edit/delete routes serving this table.
    pub base_path: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for ConfiguredTable
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let (name, base_path) = match parts.extensions.get::<RouteFamily>() {
            Some(family) => (family.table.to_string(), family.base_path.to_string()),
            None => {
                let name = path_param(parts, state, "table_name")
                    .await
                    .ok_or_else(|| AppError::TableNotFound(String::new()))?;
                let base_path = crud_path(&name);
                (name, base_path)
            }
        };
        let app = AppState::from_ref(state);
        let table = app
            .registry
            .get(&name)
            .cloned()
            .ok_or(AppError::TableNotFound(name))?;
        Ok(ConfiguredTable { table, base_path })
    }
}

/// Integer primary key from the `:record_id` segment. Only plain digits are accepted; anything else is a 404.
#[derive(Clone, Copy, Debug)]
pub struct RecordId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = path_param(parts, state, "record_id")
            .await
            .ok_or_else(|| AppError::NotFound("record id".into()))?;
        if !is_whole_number(&raw) {
            return Err(AppError::NotFound(raw));
        }
        raw.parse()
            .map(RecordId)
            .map_err(|_| AppError::NotFound(raw))
    }
}

async fn path_param<S: Send + Sync>(parts: &mut Parts, state: &S, key: &str) -> Option<String> {
    let Path(mut params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .ok()?;
    params.remove(key)
}
