pub mod download;
pub mod flash;
pub mod health;
pub mod pages;
pub mod translate;

pub use download::*;
pub use health::*;
pub use pages::*;
pub use translate::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::logging_middleware;
use crate::state::AppState;

/// Builds the application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes();

    Router::new()
        .route("/", get(index_handler))
        .route("/translate", post(translate_handler))
        .route("/success", get(success_handler))
        .route("/download/:filename", get(download_handler))
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(logging_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
