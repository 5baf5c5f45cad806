//! Image-key heuristics over JSON trees
//!
//! Shared by the structured JSON and inline script passes. Recursion depth is
//! bounded by serde_json's own parse limit.

use serde_json::Value;

/// Which string values under an image-like key count as URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFilter {
    /// `http...` or `//...`
    AbsoluteOnly,
    /// Also `/...`
    AllowRootRelative,
}

impl ValueFilter {
    pub fn accepts(self, value: &str) -> bool {
        let value = value.trim();
        if value.starts_with("http") || value.starts_with("//") {
            return true;
        }
        matches!(self, Self::AllowRootRelative) && value.starts_with('/')
    }
}

/// Collect string values (or string array items) stored under keys containing
/// one of `key_hints` (lowercase), anywhere in the tree, in document order
pub fn collect_image_values(value: &Value, key_hints: &[String], filter: ValueFilter) -> Vec<String> {
    let mut found = Vec::new();
    walk(value, key_hints, filter, &mut found);
    found
}

fn walk(value: &Value, key_hints: &[String], filter: ValueFilter, found: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let key = key.to_lowercase();
                if key_hints.iter().any(|hint| key.contains(hint.as_str())) {
                    collect_strings(child, filter, found);
                }
                walk(child, key_hints, filter, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, key_hints, filter, found);
            }
        }
        _ => {}
    }
}

fn collect_strings(value: &Value, filter: ValueFilter, found: &mut Vec<String>) {
    match value {
        Value::String(s) if filter.accepts(s) => found.push(s.clone()),
        Value::Array(items) => found.extend(
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| filter.accepts(s))
                .map(str::to_string),
        ),
        _ => {}
    }
}

/// Follow a key path through nested objects
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// Members of an object or elements of an array
pub fn members(value: &Value) -> Vec<&Value> {
    match value {
        Value::Object(map) => map.values().collect(),
        Value::Array(items) => items.iter().collect(),
        _ => Vec::new(),
    }
}
