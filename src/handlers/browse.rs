//! Home redirect and table listing.

use crate::error::AppError;
use crate::extractors::base_path_for;
use crate::flash;
use crate::response::redirect_to_listing;
use crate::service::{CrudService, TablePage};
use crate::state::AppState;
use crate::store::{close, list_tables};
use crate::views::{render_table, TableView};
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use sqlx::sqlite::SqliteConnection;

/// Preferred landing table when it exists.
pub const HOME_TABLE: &str = "Salary";

pub async fn home(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut conn = state.db.connect().await?;
    let tables = list_tables(&mut conn).await;
    close(conn).await;
    let tables = tables?;

    if tables.iter().any(|t| t == HOME_TABLE) {
        return Ok(redirect_to_listing(HOME_TABLE).into_response());
    }
    match tables.first() {
        Some(first) => Ok(redirect_to_listing(first).into_response()),
        None => Ok(format!("No tables found in {}", state.db.file_name()).into_response()),
    }
}

async fn load_listing(
    conn: &mut SqliteConnection,
    table_name: &str,
) -> Result<Option<(Vec<String>, TablePage)>, sqlx::Error> {
    let tables = list_tables(conn).await?;
    if !tables.iter().any(|t| t == table_name) {
        return Ok(None);
    }
    let page = CrudService::list_rows(conn, table_name).await?;
    Ok(Some((tables, page)))
}

/// Any discovered table can be browsed; edit controls appear only for configured ones.
pub async fn table_view(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(table_name): Path<String>,
) -> Result<Response, AppError> {
    let mut conn = state.db.connect().await?;
    let listing = load_listing(&mut conn, &table_name).await;
    close(conn).await;
    let Some((tables, page)) = listing? else {
        return Err(AppError::TableNotFound(table_name));
    };

    let (jar, message) = flash::take(jar);
    let configured = state.registry.get(&table_name);
    let base_path = configured.map(|t| base_path_for(&t.name));
    let html = render_table(&TableView {
        tables: &tables,
        current_table: &table_name,
        col_names: &page.columns,
        rows: &page.rows,
        editable: configured.zip(base_path.as_deref()),
        flash: message.as_deref(),
    });
    Ok((jar, Html(html)).into_response())
}
