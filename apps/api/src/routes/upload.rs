use axum::{extract::Multipart, extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Request body cap for the upload route; slightly above the photo
/// limit to leave room for multipart framing.
pub const BODY_LIMIT: usize = MAX_PHOTO_BYTES + 64 * 1024;

#[derive(Serialize)]
pub struct UploadResponse {
    pub path: String,
}

/// POST /api/photo
/// Accepts a single `photo` multipart field, validates MIME type and
/// size, and stores it under the upload directory with a
/// timestamp-based filename.
pub async fn handle_upload_photo(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("photo") {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| AppError::Validation("missing content type".to_string()))?
            .to_string();
        let ext = extension_for(&content_type).ok_or_else(|| {
            AppError::Validation(format!("unsupported image type: {content_type}"))
        })?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("empty upload".to_string()));
        }
        if bytes.len() > MAX_PHOTO_BYTES {
            return Err(AppError::Validation(format!(
                "photo exceeds the {} MiB limit",
                MAX_PHOTO_BYTES / (1024 * 1024)
            )));
        }

        let filename = format!("photo-{}.{ext}", Utc::now().format("%Y%m%dT%H%M%S%3f"));
        let dest = state.config.upload_dir.join(&filename);
        tokio::fs::create_dir_all(&state.config.upload_dir)
            .await
            .map_err(|e| AppError::Internal(e.into()))?;
        tokio::fs::write(&dest, &bytes)
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

        info!(path = %dest.display(), size = bytes.len(), "photo stored");
        return Ok(Json(UploadResponse {
            path: dest.to_string_lossy().into_owned(),
        }));
    }

    Err(AppError::Validation(
        "multipart field 'photo' missing".to_string(),
    ))
}

/// Maps the MIME allow-list to on-disk extensions.
fn extension_for(mime: &str) -> Option<&'static str> {
    match mime {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}
