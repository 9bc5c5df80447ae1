//! Add, edit, and delete for one configured table.
//! The table comes from the `/crud/:table_name` segment or from the family the router was nested under.

use crate::config::ResolvedTable;
use crate::error::AppError;
use crate::extractors::{ConfiguredTable, RecordId};
use crate::response::redirect_with_flash;
use crate::service::{CrudService, FieldError, FormValidator, FormValues};
use crate::sql::SqlValue;
use crate::state::AppState;
use crate::store::close;
use crate::views::{cell_text, render_form, FormMode, FormPage};
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Form,
};
use axum_extra::extract::cookie::SignedCookieJar;
use sqlx::sqlite::SqliteConnection;
use std::collections::HashMap;

/// Turns a submitted form into column values, or the message to show.
pub type FormParser = fn(&ResolvedTable, &FormValues) -> Result<Vec<(String, SqlValue)>, FieldError>;

pub const RECORD_NOT_FOUND: &str = "Record not found.";

/// Salary's employee_id and salary_amount must be whole numbers on every route that writes it.
pub const SALARY_TABLE: &str = "Salary";

/// Validator for submissions to `table`.
pub fn parser_for(table: &ResolvedTable) -> FormParser {
    if table.name == SALARY_TABLE {
        FormValidator::whole_numbers
    } else {
        FormValidator::coerce_form
    }
}

fn form_page(target: &ConfiguredTable, mode: FormMode, values: &HashMap<String, String>, flash: Option<&str>) -> Response {
    Html(render_form(&FormPage {
        table: &target.table,
        base_path: &target.base_path,
        mode,
        values,
        flash,
    }))
    .into_response()
}

fn db_failure(jar: SignedCookieJar, table: &ResolvedTable, action: &str, e: sqlx::Error) -> Response {
    tracing::warn!(table = %table.name, action, error = %e, "statement failed");
    redirect_with_flash(jar, &table.name, format!("Database error: {}", e))
}

pub async fn add_form(target: ConfiguredTable) -> Response {
    form_page(&target, FormMode::Add, &HashMap::new(), None)
}

pub async fn add_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    target: ConfiguredTable,
    Form(form): Form<FormValues>,
) -> Result<Response, AppError> {
    submit_add(&state, jar, &target, &form, parser_for(&target.table)).await
}

pub async fn edit_form(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    target: ConfiguredTable,
    RecordId(id): RecordId,
) -> Result<Response, AppError> {
    let mut conn = state.db.connect().await?;
    let row = CrudService::read(&mut conn, &target.table, id).await;
    close(conn).await;
    let row = match row {
        Ok(Some(row)) => row,
        Ok(None) => return Ok(redirect_with_flash(jar, &target.table.name, RECORD_NOT_FOUND)),
        Err(e) => return Ok(db_failure(jar, &target.table, "read", e)),
    };
    let values: HashMap<String, String> = row.iter().map(|(k, v)| (k.clone(), cell_text(v))).collect();
    Ok(form_page(&target, FormMode::Edit(id), &values, None))
}

pub async fn edit_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    target: ConfiguredTable,
    record: RecordId,
    Form(form): Form<FormValues>,
) -> Result<Response, AppError> {
    submit_edit(&state, jar, &target, record, &form, parser_for(&target.table)).await
}

pub async fn delete(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    target: ConfiguredTable,
    RecordId(id): RecordId,
) -> Result<Response, AppError> {
    let mut conn = state.db.connect().await?;
    let deleted = CrudService::delete(&mut conn, &target.table, id).await;
    close(conn).await;
    Ok(match deleted {
        Ok(0) => redirect_with_flash(jar, &target.table.name, RECORD_NOT_FOUND),
        Ok(_) => {
            tracing::info!(table = %target.table.name, id, "row deleted");
            redirect_with_flash(jar, &target.table.name, "Row deleted.")
        }
        Err(e) => db_failure(jar, &target.table, "delete", e),
    })
}

/// Validate with `parse`, then insert. Invalid input re-renders the form with what was submitted.
pub async fn submit_add(
    state: &AppState,
    jar: SignedCookieJar,
    target: &ConfiguredTable,
    form: &FormValues,
    parse: FormParser,
) -> Result<Response, AppError> {
    let values = match parse(&target.table, form) {
        Ok(v) => v,
        Err(e) => return Ok(form_page(target, FormMode::Add, form, Some(&e.message))),
    };
    let mut conn = state.db.connect().await?;
    let created = CrudService::create(&mut conn, &target.table, &values).await;
    close(conn).await;
    Ok(match created {
        Ok(id) => {
            tracing::info!(table = %target.table.name, id, "row added");
            redirect_with_flash(jar, &target.table.name, "Row added.")
        }
        Err(e) => db_failure(jar, &target.table, "insert", e),
    })
}

enum EditOutcome {
    Updated,
    Missing,
    Rejected(FieldError),
    Failed(sqlx::Error),
}

async fn apply_edit(
    conn: &mut SqliteConnection,
    table: &ResolvedTable,
    id: i64,
    form: &FormValues,
    parse: FormParser,
) -> EditOutcome {
    match CrudService::read(conn, table, id).await {
        Ok(Some(_)) => {}
        Ok(None) => return EditOutcome::Missing,
        Err(e) => return EditOutcome::Failed(e),
    }
    let values = match parse(table, form) {
        Ok(v) => v,
        Err(e) => return EditOutcome::Rejected(e),
    };
    match CrudService::update(conn, table, id, &values).await {
        Ok(0) => EditOutcome::Missing,
        Ok(_) => EditOutcome::Updated,
        Err(e) => EditOutcome::Failed(e),
    }
}

/// The row must exist before the submission is validated; then update.
pub async fn submit_edit(
    state: &AppState,
    jar: SignedCookieJar,
    target: &ConfiguredTable,
    RecordId(id): RecordId,
    form: &FormValues,
    parse: FormParser,
) -> Result<Response, AppError> {
    let mut conn = state.db.connect().await?;
    let outcome = apply_edit(&mut conn, &target.table, id, form, parse).await;
    close(conn).await;
    Ok(match outcome {
        EditOutcome::Updated => {
            tracing::info!(table = %target.table.name, id, "row updated");
            redirect_with_flash(jar, &target.table.name, "Row updated.")
        }
        EditOutcome::Missing => redirect_with_flash(jar, &target.table.name, RECORD_NOT_FOUND),
        EditOutcome::Rejected(e) => form_page(target, FormMode::Edit(id), form, Some(&e.message)),
        EditOutcome::Failed(e) => db_failure(jar, &target.table, "update", e),
    })
}
