//! Typed view over the loosely structured CV document.
//!
//! The document on disk is plain JSON: scalars, lists, objects, and
//! *bilingual nodes*: objects keyed by language code whose values are a
//! string or a list of strings. Rather than shape-sniffing at every use
//! site, [`classify`] maps one level of the tree onto the [`Node`] union
//! and callers pattern-match on that.

use serde_json::{Map, Value};

/// Languages the toolchain renders, default first.
pub const LANGUAGES: &[&str] = &["en", "nl"];

/// Language written at the site root; others get a subdirectory.
pub const DEFAULT_LANGUAGE: &str = "en";

/// One level of the document tree.
#[derive(Debug)]
pub enum Node<'a> {
    /// String, number, bool, or null.
    Scalar(&'a Value),
    List(&'a Vec<Value>),
    /// Object carrying at least one supported language key with text content.
    Bilingual(&'a Map<String, Value>),
    /// Any other object.
    Object(&'a Map<String, Value>),
}

/// Classifies a value without copying it.
pub fn classify(value: &Value) -> Node<'_> {
    match value {
        Value::Array(items) => Node::List(items),
        Value::Object(map) => {
            if map.iter().any(|(key, v)| is_language(key) && is_text(v)) {
                Node::Bilingual(map)
            } else {
                Node::Object(map)
            }
        }
        other => Node::Scalar(other),
    }
}

pub fn is_language(code: &str) -> bool {
    LANGUAGES.contains(&code)
}

/// A bilingual variant holds a string or a list of strings, nothing else.
pub(crate) fn is_text(value: &Value) -> bool {
    match value {
        Value::String(_) => true,
        Value::Array(items) => items.iter().all(Value::is_string),
        _ => false,
    }
}

/// Section records are hidden only by an explicit `visible: false`.
pub fn is_visible(record: &Value) -> bool {
    record
        .get("visible")
        .and_then(Value::as_bool)
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bilingual_object_is_classified_as_bilingual() {
        let value = json!({"en": "Researcher", "nl": "Onderzoeker"});
        assert!(matches!(classify(&value), Node::Bilingual(_)));
    }

    #[test]
    fn partial_bilingual_object_still_classifies() {
        let value = json!({"en": ["one", "two"]});
        assert!(matches!(classify(&value), Node::Bilingual(_)));
    }

    #[test]
    fn object_with_non_text_language_value_is_plain() {
        // "en" holding an object is structure, not a translation.
        let value = json!({"en": {"deep": "value"}, "other": 1});
        assert!(matches!(classify(&value), Node::Object(_)));
    }

    #[test]
    fn scalars_and_lists_classify_directly() {
        assert!(matches!(classify(&json!("text")), Node::Scalar(_)));
        assert!(matches!(classify(&json!(42)), Node::Scalar(_)));
        assert!(matches!(classify(&json!([1, 2])), Node::List(_)));
    }

    #[test]
    fn visibility_defaults_to_true() {
        assert!(is_visible(&json!({"title": "kept"})));
        assert!(is_visible(&json!({"visible": true})));
        assert!(!is_visible(&json!({"visible": false})));
    }
}
