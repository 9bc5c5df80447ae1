//! Redirect and URL helpers shared by the HTML handlers.

use crate::flash;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::SignedCookieJar;

/// `/table/<name>` for a table listing.
pub fn listing_url(table_name: &str) -> String {
    format!("/table/{}", urlencoding::encode(table_name))
}

/// `/crud/<name>`, the generic add/edit/delete prefix.
pub fn crud_path(table_name: &str) -> String {
    format!("/crud/{}", urlencoding::encode(table_name))
}

pub fn redirect_to_listing(table_name: &str) -> Redirect {
    Redirect::to(&listing_url(table_name))
}

/// Queue `message` and send the browser back to the table listing.
pub fn redirect_with_flash(jar: SignedCookieJar, table_name: &str, message: impl Into<String>) -> Response {
    (flash::push(jar, message), redirect_to_listing(table_name)).into_response()
}
