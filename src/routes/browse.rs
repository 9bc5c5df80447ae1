//! Home redirect and table listings.

use crate::handlers::{home, table_view};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn browse_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/table/:table_name", get(table_view))
        .with_state(state)
}
