use cv_core::localize::localize;
use cv_core::render::{PageOptions, Renderer};
use serde_json::json;
use std::fs;

fn renderer_with(template: &str) -> (tempfile::TempDir, Renderer) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cv.html"), template).unwrap();
    let renderer = Renderer::from_dir(dir.path()).unwrap();
    (dir, renderer)
}

#[test]
fn hidden_records_are_absent_from_rendered_output() {
    let (_dir, renderer) = renderer_with(
        "{% for job in experience %}<h3>{{ job.role }}</h3>{% endfor %}",
    );
    let doc = json!({
        "experience": [
            {"role": "Shown role"},
            {"role": "Hidden role", "visible": false}
        ]
    });

    let html = renderer
        .render("cv.html", &doc, &PageOptions::new("en"))
        .unwrap();

    assert!(html.contains("Shown role"));
    assert!(!html.contains("Hidden role"));
}

#[test]
fn localized_document_renders_target_language_text() {
    let (_dir, renderer) = renderer_with("<h1>{{ personal.title }}</h1>");
    let doc = json!({
        "personal": {"title": {"en": "Researcher", "nl": "Onderzoeker"}}
    });

    let nl = renderer
        .render("cv.html", &localize(&doc, "nl"), &PageOptions::new("nl"))
        .unwrap();
    assert!(nl.contains("Onderzoeker"));
    assert!(!nl.contains("Researcher"));
}

#[test]
fn presentation_groups_render_in_descending_bucket_order() {
    let (_dir, renderer) = renderer_with(
        "{% for group in presentation_groups %}[{{ group.year }}]{% endfor %}",
    );
    let doc = json!({
        "presentations": [
            {"title": "A", "date": "September 2025"},
            {"title": "B", "date": "2024"},
            {"title": "C", "date": "forthcoming"}
        ]
    });

    let html = renderer
        .render("cv.html", &doc, &PageOptions::new("en"))
        .unwrap();
    assert_eq!(html, "[Other][2025][2024]");
}

#[test]
fn section_toggles_reach_the_template() {
    let (_dir, renderer) = renderer_with(
        "{% if sections.references %}<section>refs</section>{% endif %}",
    );
    let doc = json!({});

    let shown = renderer
        .render("cv.html", &doc, &PageOptions::new("en"))
        .unwrap();
    assert!(shown.contains("refs"));

    let hidden = renderer
        .render(
            "cv.html",
            &doc,
            &PageOptions::new("en").hide_section("references"),
        )
        .unwrap();
    assert!(!hidden.contains("refs"));
}

#[test]
fn base_path_and_alternate_link_reach_the_template() {
    let (_dir, renderer) = renderer_with(
        "<link href=\"{{ base_path }}assets/css/site.css\">\
         {% if alternate %}<a href=\"{{ alternate.href }}\">{{ alternate.label }}</a>{% endif %}",
    );
    let doc = json!({});

    let opts = PageOptions::new("nl")
        .base_path("../")
        .alternate(cv_core::render::Alternate {
            code: "en".to_string(),
            label: "English".to_string(),
            href: "../cv.html".to_string(),
        });
    let html = renderer.render("cv.html", &doc, &opts).unwrap();

    assert!(html.contains("href=\"../assets/css/site.css\""));
    assert!(html.contains("<a href=\"../cv.html\">English</a>"));
}
