use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

use cv_core::store;

use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/cv
pub async fn handle_get_document(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let doc = store::load_document(&state.config.data_path)?;
    Ok(Json(doc))
}

/// POST /api/cv
/// Whole-document replacement; the previous content is snapshotted into
/// the backup rotation before the write.
pub async fn handle_save_document(
    State(state): State<AppState>,
    Json(doc): Json<Value>,
) -> Result<StatusCode, AppError> {
    if !doc.is_object() {
        return Err(AppError::Validation(
            "document root must be an object".to_string(),
        ));
    }
    store::save_document(&state.config.data_path, &doc)?;
    tracing::info!(path = %state.config.data_path.display(), "document saved");
    Ok(StatusCode::NO_CONTENT)
}
