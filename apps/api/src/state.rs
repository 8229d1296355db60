use std::sync::Arc;

use cv_core::Renderer;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Templates are parsed once at startup and shared read-only.
    pub renderer: Arc<Renderer>,
}
