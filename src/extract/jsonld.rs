//! JSON-LD `@type` harvesting
//!
//! Structured data shows up in many shapes: a single object, a top-level
//! array, an `@graph` wrapper, or types buried inside `mainEntity` and
//! `itemListElement`. Rather than special-casing each, the whole value is
//! walked and every `@type` found at any depth is collected.

use super::document::PageDocument;
use super::truncate_chars;
use serde_json::Value;

const JSON_LD_SELECTOR: &str = r#"script[type="application/ld+json"]"#;
const TYPE_KEY: &str = "@type";
const MAX_TYPE_CHARS: usize = 100;

/// Collects the distinct schema types declared by a page's JSON-LD blocks
///
/// Blocks that are not valid JSON are skipped with a warning. The result keeps
/// first-seen order and contains no duplicates.
pub fn extract_schema_types(document: &PageDocument) -> Vec<String> {
    let mut types = Vec::new();

    for (index, script) in document.find_all(JSON_LD_SELECTOR).into_iter().enumerate() {
        let raw = script.text().collect::<String>();
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(raw) {
            Ok(value) => collect_schema_types(&value, &mut types),
            Err(e) => {
                tracing::warn!("Malformed JSON-LD block #{} skipped: {}", index + 1, e);
            }
        }
    }

    dedup_preserving_order(types)
}

/// Recursively collects `@type` values from a JSON value
///
/// `@type` may be a string or an array of strings; non-string entries are
/// ignored. Nested objects and arrays are visited at any depth, object keys in
/// source order.
pub fn collect_schema_types(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                if key == TYPE_KEY {
                    push_types(nested, out);
                } else {
                    collect_schema_types(nested, out);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_schema_types(item, out);
            }
        }
        _ => {}
    }
}

fn push_types(type_value: &Value, out: &mut Vec<String>) {
    let mut push = |candidate: &str| {
        let candidate = candidate.trim();
        if !candidate.is_empty() {
            out.push(truncate_chars(candidate, MAX_TYPE_CHARS));
        }
    };

    match type_value {
        Value::String(single) => push(single.as_str()),
        Value::Array(many) => many.iter().filter_map(Value::as_str).for_each(push),
        _ => {}
    }
}

fn dedup_preserving_order(types: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(types.len());
    for schema_type in types {
        if !unique.contains(&schema_type) {
            unique.push(schema_type);
        }
    }
    unique
}
