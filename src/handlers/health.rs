use axum::{extract::State, http::StatusCode, response::Json};
use tracing::info;

use crate::models::{DirectoryStatus, HealthResponse, ServiceStatus};
use crate::state::AppState;

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    info!("Health check requested");

    let dirs = state.pipeline.dirs();
    let backend = state.pipeline.translator().backend();
    let backend_configured = backend.is_configured();

    let status = if backend_configured { "healthy" } else { "degraded" };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        services: ServiceStatus {
            translation_backend: backend.name(),
            translation_backend_configured: backend_configured,
            pdf_extractor: true,
            docx_extractor: true,
        },
        directories: DirectoryStatus {
            uploads: dirs.upload_dir().display().to_string(),
            uploads_present: dirs.upload_dir().is_dir(),
            translations: dirs.translations_dir().display().to_string(),
            translations_present: dirs.translations_dir().is_dir(),
        },
    };

    info!(
        status = status,
        backend = backend.name(),
        backend_configured,
        "Health check completed"
    );

    Json(response)
}

/// Readiness check endpoint
pub async fn ready_handler(State(state): State<AppState>) -> Result<StatusCode, StatusCode> {
    match state.pipeline.dirs().ensure().await {
        Ok(()) => {
            info!("Readiness check passed");
            Ok(StatusCode::OK)
        }
        Err(e) => {
            info!(error = %e, "Readiness check failed - working directories unavailable");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
