//! One-shot error messages carried across the redirect back to the form.

use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use uuid::Uuid;

use crate::error::AppError;

const FLASH_COOKIE: &str = "flash";

pub fn push(jar: SignedCookieJar, message: &str) -> SignedCookieJar {
    // Encoded so arbitrary error text stays a valid header value.
    let value = URL_SAFE_NO_PAD.encode(message.as_bytes());
    jar.add(
        Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Returns the pending message, if any, and clears it from the jar.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Option<String>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let message = URL_SAFE_NO_PAD
        .decode(cookie.value())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok());

    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), message)
}

/// The request boundary: logs the failure and sends the user back to the form.
pub fn redirect_with_error(
    jar: SignedCookieJar,
    request_id: &str,
    error: &AppError,
) -> (SignedCookieJar, Redirect) {
    let error_id = Uuid::new_v4().to_string();
    let timestamp = chrono::Utc::now().to_rfc3339();

    tracing::error!(
        request_id = %request_id,
        error_id = %error_id,
        error_code = error.error_code(),
        category = %error.category(),
        transient = error.is_transient(),
        timestamp = %timestamp,
        error_message = %error,
        "Request failed, redirecting to form"
    );

    (push(jar, &error.user_message()), Redirect::to("/"))
}
