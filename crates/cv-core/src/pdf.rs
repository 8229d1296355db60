//! HTML → PDF capture through headless Chromium.
//!
//! Every call launches its own browser instance and tears it down when
//! done. No pooling, no retries, no cancellation. Callers on an async
//! runtime must wrap [`export_pdf`] in `tokio::task::spawn_blocking`.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use tracing::debug;

use crate::error::{Error, Result};

// A4 in inches, the unit Chromium's print API expects.
const PAPER_WIDTH_IN: f64 = 8.27;
const PAPER_HEIGHT_IN: f64 = 11.69;
const MARGIN_IN: f64 = 0.4;

/// Web fonts keep reflowing briefly after `document.fonts` settles.
const SETTLE_DELAY: Duration = Duration::from_millis(250);

/// Renders `html` to an A4 PDF. Relative asset URLs in the markup are
/// resolved against `base_dir`: the markup is written to a scratch file
/// in that directory and loaded over `file://`.
pub fn export_pdf(html: &str, base_dir: &Path) -> Result<Vec<u8>> {
    let mut scratch = tempfile::Builder::new()
        .prefix("cv-export-")
        .suffix(".html")
        .tempfile_in(base_dir)?;
    scratch.write_all(html.as_bytes())?;
    scratch.flush()?;

    let launch = LaunchOptions::default_builder()
        .build()
        .map_err(|e| Error::Browser(e.to_string()))?;
    let browser = Browser::new(launch).map_err(|e| Error::Browser(e.to_string()))?;
    let tab = browser
        .new_tab()
        .map_err(|e| Error::Browser(e.to_string()))?;

    let url = format!("file://{}", scratch.path().display());
    debug!(%url, "printing CV to PDF");

    tab.navigate_to(&url)
        .and_then(|tab| tab.wait_until_navigated())
        .map_err(|e| Error::Browser(e.to_string()))?;

    // Fonts load asynchronously; capture only after the font set settles.
    tab.evaluate("document.fonts.ready.then(() => document.fonts.status)", true)
        .map_err(|e| Error::Browser(e.to_string()))?;
    std::thread::sleep(SETTLE_DELAY);

    let pdf = tab
        .print_to_pdf(Some(print_options()))
        .map_err(|e| Error::Browser(e.to_string()))?;
    Ok(pdf)
}

fn print_options() -> PrintToPdfOptions {
    PrintToPdfOptions {
        landscape: Some(false),
        display_header_footer: Some(false),
        print_background: Some(true),
        paper_width: Some(PAPER_WIDTH_IN),
        paper_height: Some(PAPER_HEIGHT_IN),
        margin_top: Some(MARGIN_IN),
        margin_bottom: Some(MARGIN_IN),
        margin_left: Some(MARGIN_IN),
        margin_right: Some(MARGIN_IN),
        prefer_css_page_size: Some(true),
        ..Default::default()
    }
}
