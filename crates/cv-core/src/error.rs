use std::path::PathBuf;

use thiserror::Error;

/// Errors returned from all fallible operations in this crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("document not found: {0}")]
    DocumentMissing(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("browser engine unavailable: {0}")]
    Browser(String),

    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
