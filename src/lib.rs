//! Prodynamic admin: browse a SQLite database and edit rows of allow-listed tables.

pub mod coerce;
pub mod config;
pub mod error;
pub mod extractors;
pub mod flash;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod views;

pub use config::{builtin_tables, load_tables, resolve, ResolvedTable, Settings, TableConfig, TableRegistry};
pub use error::{AppError, CoerceError, ConfigError};
pub use routes::{browse_routes, common_routes, crud_routes};
pub use service::CrudService;
pub use state::AppState;
pub use store::{ensure_schema, Database};

use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Form posts are small; anything larger is rejected before parsing.
pub const BODY_LIMIT: usize = 64 * 1024;

/// All routes with request tracing and the body size cap.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(browse_routes(state.clone()))
        .merge(crud_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
}

/// Create missing configured tables in the database file.
pub async fn bootstrap(state: &AppState) -> Result<(), AppError> {
    let mut conn = state.db.connect().await?;
    let result = ensure_schema(&mut conn, &state.registry).await;
    store::close(conn).await;
    result?;
    Ok(())
}
