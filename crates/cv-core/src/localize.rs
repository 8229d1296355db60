//! Bilingual resolution.
//!
//! Collapses every bilingual node in a document to the requested
//! language's value. Resolution is structural: a bilingual node missing
//! the target key is treated as a plain object and its entries are
//! resolved recursively. No implicit language fallback happens here;
//! callers supply a default translation set themselves.

use serde_json::{Map, Value};

use crate::document::{classify, is_text, Node};

/// Produces a copy of `value` with all bilingual nodes collapsed to
/// `lang`. The input is never mutated; scalar-only trees come back
/// unchanged, so the operation is idempotent.
pub fn localize(value: &Value, lang: &str) -> Value {
    match classify(value) {
        Node::Scalar(v) => v.clone(),
        Node::List(items) => Value::Array(items.iter().map(|item| localize(item, lang)).collect()),
        Node::Bilingual(map) => match map.get(lang) {
            Some(text) if is_text(text) => text.clone(),
            _ => localize_entries(map, lang),
        },
        Node::Object(map) => localize_entries(map, lang),
    }
}

fn localize_entries(map: &Map<String, Value>, lang: &str) -> Value {
    Value::Object(
        map.iter()
            .map(|(key, v)| (key.clone(), localize(v, lang)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bilingual_node_resolves_to_each_language_exactly() {
        let node = json!({"en": "Legal researcher", "nl": "Juridisch onderzoeker"});

        assert_eq!(localize(&node, "en"), json!("Legal researcher"));
        assert_eq!(localize(&node, "nl"), json!("Juridisch onderzoeker"));
    }

    #[test]
    fn bilingual_list_resolves_unmutated() {
        let node = json!({
            "en": ["first point", "second point"],
            "nl": ["eerste punt", "tweede punt"]
        });

        assert_eq!(localize(&node, "nl"), json!(["eerste punt", "tweede punt"]));
    }

    #[test]
    fn nested_structures_resolve_at_every_depth() {
        let doc = json!({
            "personal": {
                "name": "M. van den Berg",
                "title": {"en": "Researcher", "nl": "Onderzoeker"}
            },
            "experience": [
                {
                    "role": {"en": "Lecturer", "nl": "Docent"},
                    "highlights": {"en": ["taught"], "nl": ["doceerde"]}
                }
            ]
        });

        let localized = localize(&doc, "nl");
        assert_eq!(localized["personal"]["name"], json!("M. van den Berg"));
        assert_eq!(localized["personal"]["title"], json!("Onderzoeker"));
        assert_eq!(localized["experience"][0]["role"], json!("Docent"));
        assert_eq!(localized["experience"][0]["highlights"], json!(["doceerde"]));
    }

    #[test]
    fn localization_is_idempotent_on_scalar_only_documents() {
        let doc = json!({
            "personal": {"name": "M. van den Berg", "email": "m@example.org"},
            "skills": ["privacy law", "copyright"],
            "count": 3
        });

        let once = localize(&doc, "en");
        assert_eq!(once, doc);
        assert_eq!(localize(&once, "en"), once);
    }

    #[test]
    fn missing_target_language_falls_back_structurally() {
        // No "fr" variant: the node resolves as a plain object, entries kept.
        let node = json!({"en": "Researcher", "nl": "Onderzoeker"});

        assert_eq!(localize(&node, "fr"), node);
    }

    #[test]
    fn input_is_not_mutated() {
        let doc = json!({"title": {"en": "A", "nl": "B"}});
        let copy = doc.clone();

        let _ = localize(&doc, "en");
        assert_eq!(doc, copy);
    }
}
