//! Template rendering over a localized document.
//!
//! [`Renderer`] wraps a [`Tera`] instance loaded from the templates
//! directory. Before a template sees the document, the context goes
//! through light derived-data shaping:
//!
//! - records flagged `visible: false` are dropped from every section list,
//! - presentations are grouped by the 4-digit year found in their
//!   free-text date (literal `"Other"` bucket when none matches),
//! - publication items are sorted per category by numeric year descending.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use tera::{Context, Tera};

use crate::document::is_visible;
use crate::error::Result;

/// Section lists whose records carry the `visible` flag.
const SECTION_LISTS: &[&str] = &[
    "experience",
    "education",
    "publications",
    "presentations",
    "references",
];

/// Sections a page may toggle; all shown unless a caller hides one.
const SECTIONS: &[&str] = &[
    "summary",
    "experience",
    "education",
    "skills",
    "publications",
    "presentations",
    "references",
];

/// Bucket for presentations whose date carries no 4-digit year.
const OTHER_BUCKET: &str = "Other";

static YEAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{4}\b").unwrap());

/// Link to the same page in the other language.
#[derive(Debug, Clone, Serialize)]
pub struct Alternate {
    pub code: String,
    pub label: String,
    pub href: String,
}

/// Presentation options passed alongside the document.
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub language: String,
    /// Prefix for asset links ("" at the site root, "../" one level down).
    pub base_path: String,
    pub alternate: Option<Alternate>,
    pub sections: BTreeMap<String, bool>,
}

impl PageOptions {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            base_path: String::new(),
            alternate: None,
            sections: SECTIONS.iter().map(|s| (s.to_string(), true)).collect(),
        }
    }

    pub fn base_path(mut self, base_path: &str) -> Self {
        self.base_path = base_path.to_string();
        self
    }

    pub fn alternate(mut self, alternate: Alternate) -> Self {
        self.alternate = Some(alternate);
        self
    }

    pub fn hide_section(mut self, section: &str) -> Self {
        self.sections.insert(section.to_string(), false);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct YearGroup {
    pub year: String,
    pub items: Vec<Value>,
}

pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Loads every `.html` template under `dir`. Template names are the
    /// paths relative to `dir`, e.g. `cv.html`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let pattern = format!("{}/**/*.html", dir.display());
        let tera = Tera::new(&pattern)?;
        Ok(Self { tera })
    }

    /// Renders `template` against a localized document.
    pub fn render(&self, template: &str, doc: &Value, opts: &PageOptions) -> Result<String> {
        let shaped = shape(doc);

        let mut ctx = Context::new();
        if let Value::Object(map) = &shaped {
            for (key, value) in map {
                ctx.insert(key, value);
            }
        }

        let groups = shaped
            .get("presentations")
            .and_then(Value::as_array)
            .map(|items| group_by_year(items))
            .unwrap_or_default();
        ctx.insert("presentation_groups", &groups);

        ctx.insert("language", &opts.language);
        ctx.insert("base_path", &opts.base_path);
        ctx.insert("alternate", &opts.alternate);
        ctx.insert("sections", &opts.sections);

        Ok(self.tera.render(template, &ctx)?)
    }
}

/// Applies hidden-record filtering and publication sorting to a copy of
/// the document.
fn shape(doc: &Value) -> Value {
    let mut shaped = doc.clone();
    strip_hidden(&mut shaped);
    sort_publications(&mut shaped);
    shaped
}

fn strip_hidden(doc: &mut Value) {
    let Some(map) = doc.as_object_mut() else {
        return;
    };
    for key in SECTION_LISTS {
        if let Some(Value::Array(records)) = map.get_mut(*key) {
            records.retain(is_visible);
            // Publication records sit one level down, inside categories.
            if *key == "publications" {
                for category in records.iter_mut() {
                    if let Some(Value::Array(items)) =
                        category.as_object_mut().and_then(|c| c.get_mut("items"))
                    {
                        items.retain(is_visible);
                    }
                }
            }
        }
    }
}

/// Buckets presentations by the first 4-digit year in their `date` field.
/// Bucket keys sort lexicographically descending, so the literal "Other"
/// bucket lands above numeric years.
fn group_by_year(items: &[Value]) -> Vec<YearGroup> {
    let mut buckets: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    for item in items {
        let date = item.get("date").and_then(Value::as_str).unwrap_or_default();
        let year = YEAR_PATTERN
            .find(date)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| OTHER_BUCKET.to_string());
        buckets.entry(year).or_default().push(item.clone());
    }
    buckets
        .into_iter()
        .rev()
        .map(|(year, items)| YearGroup { year, items })
        .collect()
}

fn sort_publications(doc: &mut Value) {
    let Some(categories) = doc.get_mut("publications").and_then(Value::as_array_mut) else {
        return;
    };
    for category in categories {
        if let Some(items) = category.get_mut("items").and_then(Value::as_array_mut) {
            items.sort_by_key(|item| std::cmp::Reverse(publication_year(item)));
        }
    }
}

/// Numeric year of a publication; missing or unparseable years count as 0.
fn publication_year(item: &Value) -> i64 {
    match item.get("year") {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
