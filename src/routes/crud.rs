//! Add/edit/delete routes per table family.
//! `/crud/:table_name/...` serves any configured table; `/salary`, `/employee`, `/department`, `/job`
//! are nested copies bound to one table each through a [`RouteFamily`] extension.

use crate::extractors::FAMILIES;
use crate::handlers::crud;
use crate::state::AppState;
use axum::{routing::get, routing::post, Extension, Router};

fn table_routes() -> Router<AppState> {
    Router::new()
        .route("/add", get(crud::add_form).post(crud::add_submit))
        .route("/edit/:record_id", get(crud::edit_form).post(crud::edit_submit))
        .route("/delete/:record_id", post(crud::delete))
}

pub fn crud_routes(state: AppState) -> Router {
    let mut router = Router::new().nest("/crud/:table_name", table_routes());
    for family in FAMILIES {
        router = router.nest(family.base_path, table_routes().layer(Extension(*family)));
    }
    router.with_state(state)
}
