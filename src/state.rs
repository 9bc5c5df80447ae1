//! Shared application state for all routes.

use crate::config::{Settings, TableRegistry};
use crate::store::Database;
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub registry: Arc<TableRegistry>,
    /// Signs the flash cookie.
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(settings: &Settings, registry: TableRegistry) -> Self {
        AppState {
            db: Database::new(&settings.db_path),
            registry: Arc::new(registry),
            cookie_key: Key::derive_from(settings.secret_key.as_bytes()),
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
