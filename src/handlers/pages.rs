use askama::Template;
use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;
use tracing::error;

use crate::error::AppError;
use crate::handlers::flash;
use crate::middleware::request_id;
use crate::models::TargetLanguage;
use crate::services::sanitize::secure_filename;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub languages: [TargetLanguage; 4],
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "success.html")]
pub struct SuccessTemplate {
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    pub filename: Option<String>,
}

fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "Template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

/// `GET /`: the upload form, showing any pending flash message.
pub async fn index_handler(jar: SignedCookieJar) -> Response {
    let (jar, error) = flash::take(jar);
    let page = render(&IndexTemplate {
        languages: TargetLanguage::ALL,
        error,
    });
    (jar, page).into_response()
}

/// `GET /success?filename=`: confirmation with a download link.
pub async fn success_handler(
    headers: HeaderMap,
    jar: SignedCookieJar,
    Query(query): Query<SuccessQuery>,
) -> Response {
    let filename = query
        .filename
        .map(|name| secure_filename(&name))
        .filter(|name| !name.is_empty());

    match filename {
        Some(filename) => render(&SuccessTemplate { filename }),
        None => flash::redirect_with_error(jar, &request_id(&headers), &AppError::NothingToDownload)
            .into_response(),
    }
}
