use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::{info, warn};

use crate::error::AppError;
use crate::handlers::flash;
use crate::middleware::request_id;
use crate::services::PipelineStage;
use crate::state::AppState;

/// `GET /download/:filename`: serves a generated document as an attachment.
pub async fn download_handler(
    State(state): State<AppState>,
    Path(requested): Path<String>,
    headers: HeaderMap,
    jar: SignedCookieJar,
) -> Response {
    let request_id = request_id(&headers);

    let Some((file_name, path)) = state.pipeline.dirs().locate_output(&requested).await else {
        warn!(request_id = %request_id, requested = %requested, "Requested translation does not exist");
        let error = AppError::FileNotFound {
            file_name: requested,
        };
        return flash::redirect_with_error(jar, &request_id, &error).into_response();
    };

    let content = match tokio::fs::read(&path).await {
        Ok(content) => content,
        Err(e) => {
            let error = AppError::internal(format!("Error downloading file: {}", e));
            return flash::redirect_with_error(jar, &request_id, &error).into_response();
        }
    };

    let content_type = mime_guess::from_path(&file_name)
        .first_or_octet_stream()
        .to_string();

    info!(
        request_id = %request_id,
        file_name = %file_name,
        size = content.len(),
        stage = %PipelineStage::Delivered,
        "Serving translated document"
    );

    (
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        content,
    )
        .into_response()
}
