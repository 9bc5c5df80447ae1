//! Typed errors and HTTP mapping.

use crate::coerce::ValueKind;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no tables configured")]
    Empty,
    #[error("invalid identifier: '{0}'")]
    InvalidIdentifier(String),
    #[error("duplicate table: {0}")]
    DuplicateTable(String),
    #[error("duplicate column: table {table} column {column}")]
    DuplicateColumn { table: String, column: String },
    #[error("primary key listed as editable column: table {table} column {column}")]
    PrimaryKeyEditable { table: String, column: String },
    #[error("table {0} has no editable columns")]
    NoColumns(String),
    #[error("config load: {0}")]
    Load(String),
    #[error("settings: {0}")]
    Settings(String),
}

/// A submitted value that does not parse under its column's type tag.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoerceError {
    #[error("'{value}' is not a valid {kind}")]
    Invalid { kind: ValueKind, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("table not found: {0}")]
    TableNotFound(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::TableNotFound(_) => (StatusCode::NOT_FOUND, "Table not found").into_response(),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Record not found").into_response(),
            AppError::Config(_) | AppError::Db(_) => {
                tracing::warn!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}
