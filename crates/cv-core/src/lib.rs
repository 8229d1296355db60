//! Core library for the bilingual CV publishing toolchain.
//!
//! A single JSON document (see [`document`]) holds the whole curriculum
//! vitae with per-language text variants. This crate turns that document
//! into deliverables:
//!
//! - [`mod@localize`] collapses bilingual nodes to one language,
//! - [`render`] feeds the localized tree through Tera templates,
//! - [`pdf`] captures rendered markup as an A4 PDF via headless Chromium,
//! - [`site`] drives the renderer across all pages and languages,
//! - [`store`] owns on-disk persistence and backup rotation.

pub mod document;
pub mod error;
pub mod localize;
pub mod pdf;
pub mod render;
pub mod site;
pub mod store;

pub use error::{Error, Result};
pub use localize::localize;
pub use render::{PageOptions, Renderer};
