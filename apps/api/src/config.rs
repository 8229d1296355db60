use std::path::PathBuf;

use anyhow::{Context, Result};

/// Runtime configuration loaded from environment variables.
/// Every knob has a default matching the repository layout, so the
/// service starts with no environment at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub templates_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            data_path: env_path("CV_DATA_PATH", "data/cv.json"),
            templates_dir: env_path("CV_TEMPLATES_DIR", "templates"),
            assets_dir: env_path("CV_ASSETS_DIR", "assets"),
            upload_dir: env_path("CV_UPLOAD_DIR", "assets/images/uploads"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}
