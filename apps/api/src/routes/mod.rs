pub mod document;
pub mod export;
pub mod health;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/cv",
            get(document::handle_get_document).post(document::handle_save_document),
        )
        .route("/api/preview", post(export::handle_preview))
        .route("/api/export", post(export::handle_export))
        .route(
            "/api/photo",
            post(upload::handle_upload_photo).layer(DefaultBodyLimit::max(upload::BODY_LIMIT)),
        )
        // The browser client and rendered previews fetch css/images from here.
        .nest_service("/assets", ServeDir::new(&state.config.assets_dir))
        .with_state(state)
}
