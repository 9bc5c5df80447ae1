// Route tests: drive the full router against a temporary database file.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use prodynamic_admin::{app, bootstrap, builtin_tables, resolve, AppState, Settings};
use tempfile::TempDir;
use tower::ServiceExt;

async fn test_app(with_schema: bool) -> (TempDir, AppState, Router) {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::for_database(dir.path().join("prodynamic.db"));
    let registry = resolve(&builtin_tables()).unwrap();
    let state = AppState::new(&settings, registry);
    if with_schema {
        bootstrap(&state).await.unwrap();
    }
    let router = app(state.clone());
    (dir, state, router)
}

async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(resp: &Response) -> &str {
    resp.headers()[header::LOCATION].to_str().unwrap()
}

/// `name=value` part of the flash Set-Cookie header, ready to send back.
fn flash_cookie(resp: &Response) -> String {
    let set = resp.headers()[header::SET_COOKIE].to_str().unwrap();
    set.split(';').next().unwrap().to_string()
}

/// Follow a redirect carrying a flash and return the rendered listing.
async fn follow(app: &Router, resp: Response) -> String {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let cookie = flash_cookie(&resp);
    let listing = send(app, get_with_cookie(location(&resp), &cookie)).await;
    assert_eq!(listing.status(), StatusCode::OK);
    body_text(listing).await
}

#[tokio::test]
async fn home_redirects_to_salary() {
    let (_dir, _state, app) = test_app(true).await;
    let resp = send(&app, get("/")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/table/Salary");
}

#[tokio::test]
async fn home_without_tables_says_so() {
    let (_dir, _state, app) = test_app(false).await;
    let resp = send(&app, get("/")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "No tables found in prodynamic.db");
}

#[tokio::test]
async fn home_falls_back_to_first_table() {
    let (_dir, state, app) = test_app(false).await;
    let mut conn = state.db.connect().await.unwrap();
    sqlx::query("CREATE TABLE Zeta (id INTEGER PRIMARY KEY)").execute(&mut conn).await.unwrap();
    sqlx::query("CREATE TABLE Alpha (id INTEGER PRIMARY KEY)").execute(&mut conn).await.unwrap();
    drop(conn);
    let resp = send(&app, get("/")).await;
    assert_eq!(location(&resp), "/table/Alpha");
}

#[tokio::test]
async fn unknown_tables_are_404() {
    let (_dir, _state, app) = test_app(true).await;
    let resp = send(&app, get("/table/Nope")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(resp).await, "Table not found");

    let resp = send(&app, get("/crud/Nope/add")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = send(&app, post_form("/crud/Nope/delete/1", "")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_integer_record_id_is_404() {
    let (_dir, _state, app) = test_app(true).await;
    for uri in ["/salary/edit/abc", "/salary/edit/-1", "/salary/edit/+1", "/crud/Job/edit/1.0"] {
        let resp = send(&app, get(uri)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
    let resp = send(&app, post_form("/job/delete/-1", "")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn salary_add_edit_delete() {
    let (_dir, _state, app) = test_app(true).await;

    let resp = send(&app, get("/salary/add")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("action=\"/salary/add\""));

    let resp = send(&app, post_form("/salary/add", "employee_id=1&salary_amount=50000")).await;
    assert_eq!(location(&resp), "/table/Salary");
    let listing = follow(&app, resp).await;
    assert!(listing.contains("Row added."));
    assert!(listing.contains("<td>50000</td>"));

    let resp = send(&app, get("/salary/edit/1")).await;
    let form = body_text(resp).await;
    assert!(form.contains("value=\"50000\""));

    let resp = send(&app, post_form("/salary/edit/1", "employee_id=1&salary_amount=61000")).await;
    let listing = follow(&app, resp).await;
    assert!(listing.contains("Row updated."));
    assert!(listing.contains("<td>61000</td>"));
    assert!(!listing.contains("<td>50000</td>"));

    let resp = send(&app, post_form("/salary/delete/1", "")).await;
    let listing = follow(&app, resp).await;
    assert!(listing.contains("Row deleted."));
    assert!(!listing.contains("<td>61000</td>"));
    assert!(listing.contains("No rows."));
}

#[tokio::test]
async fn salary_rejects_non_whole_numbers() {
    let (_dir, state, app) = test_app(true).await;
    let resp = send(&app, post_form("/salary/add", "employee_id=1&salary_amount=12.5")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("employee_id and salary_amount must be whole numbers."));
    assert!(body.contains("value=\"12.5\""));

    let mut conn = state.db.connect().await.unwrap();
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Salary").fetch_one(&mut conn).await.unwrap();
    assert_eq!(n, 0);
}

#[tokio::test]
async fn salary_listing_links_to_salary_routes() {
    let (_dir, _state, app) = test_app(true).await;
    let resp = send(&app, post_form("/salary/add", "employee_id=1&salary_amount=50000")).await;
    let listing = follow(&app, resp).await;
    assert!(listing.contains("href=\"/salary/add\""));
    assert!(listing.contains("href=\"/salary/edit/1\""));
    assert!(listing.contains("action=\"/salary/delete/1\""));
    assert!(!listing.contains("/crud/Salary/"));
}

#[tokio::test]
async fn generic_salary_route_requires_whole_numbers() {
    let (_dir, state, app) = test_app(true).await;
    let resp = send(&app, post_form("/salary/add", "employee_id=1&salary_amount=50000")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = send(&app, post_form("/crud/Salary/edit/1", "employee_id=-3&salary_amount=")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("employee_id and salary_amount must be whole numbers."));

    let resp = send(&app, post_form("/crud/Salary/add", "employee_id=2&salary_amount=1.5")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let mut conn = state.db.connect().await.unwrap();
    let rows: Vec<(i64, Option<i64>)> = sqlx::query_as("SELECT employee_id, salary_amount FROM Salary")
        .fetch_all(&mut conn)
        .await
        .unwrap();
    assert_eq!(rows, vec![(1, Some(50000))]);
}

#[tokio::test]
async fn failed_statement_flashes_database_error() {
    let (_dir, state, app) = test_app(false).await;
    let mut conn = state.db.connect().await.unwrap();
    sqlx::query("CREATE TABLE Department (department_id INTEGER PRIMARY KEY, department_name TEXT NOT NULL, location TEXT)")
        .execute(&mut conn)
        .await
        .unwrap();
    drop(conn);

    let resp = send(&app, post_form("/department/add", "department_name=&location=Oslo")).await;
    assert_eq!(location(&resp), "/table/Department");
    let listing = follow(&app, resp).await;
    assert!(listing.contains("Database error:"));
    assert!(listing.contains("NOT NULL constraint failed: Department.department_name"));
    assert!(listing.contains("No rows."));
}

#[tokio::test]
async fn employee_family_coerces_values() {
    let (_dir, state, app) = test_app(true).await;
    let resp = send(
        &app,
        post_form(
            "/employee/add",
            "first_name=Ada&last_name=Lovelace&email=&hire_date=2024-01-15&department_id=2&job_id=&is_active=on",
        ),
    )
    .await;
    assert_eq!(location(&resp), "/table/Employee");

    let mut conn = state.db.connect().await.unwrap();
    let (email, dept, active): (Option<String>, Option<i64>, String) =
        sqlx::query_as("SELECT email, department_id, is_active FROM Employee WHERE employee_id = 1")
            .fetch_one(&mut conn)
            .await
            .unwrap();
    assert_eq!(email, None);
    assert_eq!(dept, Some(2));
    assert_eq!(active, "True");
    drop(conn);

    let resp = send(&app, post_form("/employee/edit/1", "first_name=Ada&department_id=two")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Invalid value for department_id: &#39;two&#39; is not a valid int"));

    let resp = send(&app, post_form("/employee/edit/1", "first_name=Ada&department_id=3")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let mut conn = state.db.connect().await.unwrap();
    let active: String = sqlx::query_scalar("SELECT is_active FROM Employee WHERE employee_id = 1")
        .fetch_one(&mut conn)
        .await
        .unwrap();
    assert_eq!(active, "False");
}

#[tokio::test]
async fn generic_crud_reports_missing_rows() {
    let (_dir, _state, app) = test_app(true).await;
    let resp = send(&app, get("/crud/Job/edit/99")).await;
    assert_eq!(location(&resp), "/table/Job");
    let listing = follow(&app, resp).await;
    assert!(listing.contains("Record not found."));

    let resp = send(&app, post_form("/crud/Job/edit/99", "job_title=Dev")).await;
    assert!(follow(&app, resp).await.contains("Record not found."));

    let resp = send(&app, post_form("/department/delete/5", "")).await;
    assert_eq!(location(&resp), "/table/Department");
    assert!(follow(&app, resp).await.contains("Record not found."));
}

#[tokio::test]
async fn flash_is_shown_once() {
    let (_dir, _state, app) = test_app(true).await;
    let resp = send(&app, post_form("/crud/Department/add", "department_name=Research&location=Oslo")).await;
    let cookie = flash_cookie(&resp);

    let first = send(&app, get_with_cookie("/table/Department", &cookie)).await;
    let removal = first.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(removal.starts_with("flash="));
    let body = body_text(first).await;
    assert!(body.contains("Row added."));
    assert!(body.contains("<td>Research</td>"));
    assert!(body.contains("href=\"/department/edit/1\""));
    assert!(!body.contains("/crud/Department/"));

    let second = send(&app, get("/table/Department")).await;
    assert!(!body_text(second).await.contains("Row added."));
}

#[tokio::test]
async fn tampered_flash_cookie_is_ignored() {
    let (_dir, _state, app) = test_app(true).await;
    let resp = send(&app, get_with_cookie("/table/Salary", "flash=forged")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!body_text(resp).await.contains("forged"));
}

#[tokio::test]
async fn unconfigured_tables_are_read_only() {
    let (_dir, state, app) = test_app(true).await;
    let mut conn = state.db.connect().await.unwrap();
    sqlx::query("CREATE TABLE Notes (id INTEGER PRIMARY KEY, body TEXT, score REAL, raw BLOB)")
        .execute(&mut conn)
        .await
        .unwrap();
    sqlx::query("INSERT INTO Notes (body, score, raw) VALUES ('<b>hi</b>', 2.5, x'6869'), ('flat', 3.0, NULL)")
        .execute(&mut conn)
        .await
        .unwrap();
    drop(conn);

    let resp = send(&app, get("/table/Notes")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("<th>body</th>"));
    assert!(body.contains("<td>&lt;b&gt;hi&lt;/b&gt;</td>"));
    assert!(body.contains("<td>2.5</td>"));
    assert!(body.contains("<td>3.0</td>"));
    assert!(body.contains("<td>hi</td>"));
    assert!(!body.contains("Add row"));

    let resp = send(&app, get("/crud/Notes/add")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_and_ready() {
    let (_dir, _state, app) = test_app(true).await;
    let resp = send(&app, get("/health")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, r#"{"status":"ok"}"#);

    let resp = send(&app, get("/ready")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("\"database\":\"ok\""));

    let resp = send(&app, get("/version")).await;
    assert!(body_text(resp).await.contains("prodynamic-admin"));
}
