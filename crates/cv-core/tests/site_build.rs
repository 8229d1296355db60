use cv_core::site::{build_site, SitePaths};
use cv_core::Error;
use serde_json::json;
use std::fs;
use std::path::Path;

const PAGE_TEMPLATE: &str = "<h1>{{ personal.name }}</h1><p>{{ personal.title }}</p>";

fn write_fixture(root: &Path) -> SitePaths {
    let data = root.join("data").join("cv.json");
    fs::create_dir_all(data.parent().unwrap()).unwrap();
    let doc = json!({
        "personal": {
            "name": "M. van den Berg",
            "title": {"en": "Researcher", "nl": "Onderzoeker"}
        }
    });
    fs::write(&data, serde_json::to_string_pretty(&doc).unwrap()).unwrap();

    let templates = root.join("templates");
    fs::create_dir_all(&templates).unwrap();
    for page in [
        "index.html",
        "cv.html",
        "publications.html",
        "presentations.html",
    ] {
        fs::write(templates.join(page), PAGE_TEMPLATE).unwrap();
    }

    let assets = root.join("assets");
    fs::create_dir_all(assets.join("css")).unwrap();
    fs::write(assets.join("css").join("site.css"), "body { margin: 0 }").unwrap();

    SitePaths {
        data,
        templates,
        assets,
        output: root.join("site"),
    }
}

#[test]
fn build_writes_every_page_for_every_language() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_fixture(dir.path());

    let report = build_site(&paths).unwrap();
    assert_eq!(report.pages_written, 8);

    // Default language at the root, Dutch under its own subdirectory.
    for page in [
        "index.html",
        "cv.html",
        "publications.html",
        "presentations.html",
    ] {
        assert!(paths.output.join(page).is_file());
        assert!(paths.output.join("nl").join(page).is_file());
    }

    let en = fs::read_to_string(paths.output.join("cv.html")).unwrap();
    assert!(en.contains("Researcher"));
    let nl = fs::read_to_string(paths.output.join("nl").join("cv.html")).unwrap();
    assert!(nl.contains("Onderzoeker"));
}

#[test]
fn build_copies_assets_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_fixture(dir.path());

    let report = build_site(&paths).unwrap();
    assert_eq!(report.assets_copied, 1);

    let copied = paths.output.join("assets").join("css").join("site.css");
    assert_eq!(
        fs::read(copied).unwrap(),
        fs::read(paths.assets.join("css").join("site.css")).unwrap()
    );
}

#[test]
fn build_fails_fast_when_the_document_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = write_fixture(dir.path());
    paths.data = dir.path().join("data").join("absent.json");

    let err = build_site(&paths).unwrap_err();
    assert!(matches!(err, Error::DocumentMissing(_)));
}
