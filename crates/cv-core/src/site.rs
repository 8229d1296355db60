//! Static site builder.
//!
//! Renders the fixed page set once per language (the default language
//! at the output root, every other language under its own subdirectory)
//! and copies the assets tree verbatim.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::document::{DEFAULT_LANGUAGE, LANGUAGES};
use crate::error::Result;
use crate::localize::localize;
use crate::render::{Alternate, PageOptions, Renderer};
use crate::store::load_document;

/// Pages rendered for every language.
const PAGES: &[&str] = &[
    "index.html",
    "cv.html",
    "publications.html",
    "presentations.html",
];

const ASSETS_SUBDIR: &str = "assets";

/// Input and output locations for one build.
#[derive(Debug, Clone)]
pub struct SitePaths {
    pub data: PathBuf,
    pub templates: PathBuf,
    pub assets: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Copy)]
pub struct SiteReport {
    pub pages_written: usize,
    pub assets_copied: usize,
}

/// Builds the whole site. Fails fast when the source document is
/// missing; any render or write failure aborts the build.
pub fn build_site(paths: &SitePaths) -> Result<SiteReport> {
    let doc = load_document(&paths.data)?;
    let renderer = Renderer::from_dir(&paths.templates)?;

    let mut pages_written = 0;
    for lang in LANGUAGES {
        let localized = localize(&doc, lang);
        let (page_root, base_path) = if *lang == DEFAULT_LANGUAGE {
            (paths.output.clone(), String::new())
        } else {
            (paths.output.join(lang), "../".to_string())
        };
        fs::create_dir_all(&page_root)?;

        for page in PAGES {
            let opts = PageOptions::new(lang)
                .base_path(&base_path)
                .alternate(alternate_for(lang, page));
            let html = renderer.render(page, &localized, &opts)?;
            let dest = page_root.join(page);
            fs::write(&dest, html)?;
            debug!(page = %dest.display(), "page written");
            pages_written += 1;
        }
    }

    let assets_copied = copy_tree(&paths.assets, &paths.output.join(ASSETS_SUBDIR))?;

    let report = SiteReport {
        pages_written,
        assets_copied,
    };
    info!(
        pages = report.pages_written,
        assets = report.assets_copied,
        output = %paths.output.display(),
        "site build complete"
    );
    Ok(report)
}

/// The language-switcher target for `page` in the other language's tree.
fn alternate_for(lang: &str, page: &str) -> Alternate {
    if lang == DEFAULT_LANGUAGE {
        Alternate {
            code: "nl".to_string(),
            label: "Nederlands".to_string(),
            href: format!("nl/{page}"),
        }
    } else {
        Alternate {
            code: "en".to_string(),
            label: "English".to_string(),
            href: format!("../{page}"),
        }
    }
}

/// Recursive verbatim copy; returns the number of files copied.
fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    fs::create_dir_all(dst)?;

    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if from.is_dir() {
            copied += copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to)?;
            copied += 1;
        }
    }
    Ok(copied)
}
