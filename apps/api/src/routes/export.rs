use std::path::PathBuf;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;

use cv_core::document::is_language;
use cv_core::{localize, pdf, PageOptions};

use crate::errors::AppError;
use crate::state::AppState;

/// The template both preview and export render.
const PDF_TEMPLATE: &str = "cv_pdf.html";

#[derive(Deserialize)]
pub struct RenderRequest {
    pub data: Value,
    pub language: String,
}

/// POST /api/preview
/// Renders the posted document without touching the one on disk, so the
/// form client can preview unsaved edits.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Html<String>, AppError> {
    Ok(Html(render_markup(&state, &req)?))
}

/// POST /api/export
/// Same rendering path as the preview, then a blocking PDF capture.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let html = render_markup(&state, &req)?;
    let base_dir = asset_base_dir(&state);
    let filename = format!("cv_{}.pdf", req.language);

    // The capture drives a whole browser process; spawn_blocking keeps
    // it off the async executor.
    let pdf = tokio::task::spawn_blocking(move || pdf::export_pdf(&html, &base_dir))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))??;

    tracing::info!(language = %req.language, bytes = pdf.len(), "PDF exported");

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((StatusCode::OK, headers, Bytes::from(pdf)).into_response())
}

fn render_markup(state: &AppState, req: &RenderRequest) -> Result<String, AppError> {
    if !is_language(&req.language) {
        return Err(AppError::Validation(format!(
            "unsupported language: {}",
            req.language
        )));
    }
    let localized = localize(&req.data, &req.language);
    let opts = PageOptions::new(&req.language);
    Ok(state.renderer.render(PDF_TEMPLATE, &localized, &opts)?)
}

/// Directory relative asset URLs resolve against: the parent of the
/// assets tree, so `assets/css/...` links keep working in the capture.
fn asset_base_dir(state: &AppState) -> PathBuf {
    match state.config.assets_dir.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
