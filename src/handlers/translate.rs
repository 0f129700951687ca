use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::handlers::flash;
use crate::middleware::request_id;
use crate::models::UploadRequest;
use crate::state::AppState;

/// `POST /translate`: runs the whole pipeline and redirects to the success page.
pub async fn translate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: SignedCookieJar,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let request_id = request_id(&headers);
    info!(request_id = %request_id, "Starting document translation request");

    let limit_mb = state.config.max_file_size_mb;
    let upload = match multipart {
        Ok(mut multipart) => read_upload_form(&mut multipart, limit_mb).await,
        // Not a multipart form, so there is no file part to read.
        Err(rejection) => {
            debug!("Upload is not a multipart form: {}", rejection.body_text());
            Err(AppError::MissingFile)
        }
    };

    let upload = match upload {
        Ok(upload) => upload,
        Err(e) => return flash::redirect_with_error(jar, &request_id, &e).into_response(),
    };

    info!(
        request_id = %request_id,
        file_name = upload.file_name.as_deref().unwrap_or(""),
        file_size = upload.content.len(),
        language = upload.language.as_deref().unwrap_or(""),
        "Upload form received"
    );

    match state.pipeline.run(&request_id, upload).await {
        Ok(outcome) => {
            info!(
                request_id = %request_id,
                output = %outcome.output_file_name,
                language = %outcome.language,
                source_kind = %outcome.source_kind,
                extracted_chars = outcome.extracted_chars,
                translated_chars = outcome.translated_chars,
                total_time_ms = outcome.processing_time_ms,
                "Request completed successfully"
            );
            Redirect::to(&format!("/success?filename={}", outcome.output_file_name)).into_response()
        }
        Err(e) => flash::redirect_with_error(jar, &request_id, &e).into_response(),
    }
}

/// Collects the `file` and `language` fields; other fields are ignored.
async fn read_upload_form(multipart: &mut Multipart, limit_mb: usize) -> AppResult<UploadRequest> {
    let mut upload = UploadRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit_mb))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(|e| multipart_error(e, limit_mb))?;
                debug!("Received file field: {} ({} bytes)", file_name, data.len());
                upload.file_name = Some(file_name);
                upload.content = data;
            }
            "language" => {
                let language = field.text().await.map_err(|e| multipart_error(e, limit_mb))?;
                upload.language = Some(language);
            }
            other => debug!("Ignoring form field: {}", other),
        }
    }

    Ok(upload)
}

fn multipart_error(err: MultipartError, limit_mb: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge { limit_mb }
    } else {
        AppError::InvalidUpload {
            message: format!("Failed to read multipart field: {}", err.body_text()),
        }
    }
}
