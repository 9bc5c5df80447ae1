//! One-shot messages carried to the next page in a signed cookie.

use axum_extra::extract::cookie::{Cookie, SignedCookieJar};

const FLASH_COOKIE: &str = "flash";

/// Queue a message for the next rendered listing.
pub fn push(jar: SignedCookieJar, message: impl Into<String>) -> SignedCookieJar {
    let mut cookie = Cookie::new(FLASH_COOKIE, message.into());
    cookie.set_path("/");
    cookie.set_http_only(true);
    jar.add(cookie)
}

/// Take the pending message, if any, clearing it from the jar.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Option<String>) {
    match jar.get(FLASH_COOKIE) {
        Some(cookie) => {
            let message = cookie.value().to_string();
            let mut removal = Cookie::from(FLASH_COOKIE);
            removal.set_path("/");
            (jar.remove(removal), Some(message))
        }
        None => (jar, None),
    }
}
