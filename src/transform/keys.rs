// src/transform/keys.rs
//! camelCase → snake_case key normalization for CMS documents

use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::{Mapping, Value};

static ACRONYM_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("valid regex"));
static WORD_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));

/// `startDate` → `start_date`, `HTTPServer` → `http_server`
pub fn camel_to_snake(name: &str) -> String {
    let split_acronyms = ACRONYM_BOUNDARY.replace_all(name, "${1}_${2}");
    WORD_BOUNDARY
        .replace_all(&split_acronyms, "${1}_${2}")
        .to_lowercase()
}

/// Rewrite every string mapping key in `value`, recursing through
/// mappings and sequences. Scalars and non-string keys are left untouched.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => Value::Mapping(normalize_mapping(mapping)),
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(normalize_keys).collect()),
        Value::Tagged(mut tagged) => {
            tagged.value = normalize_keys(tagged.value);
            Value::Tagged(tagged)
        }
        scalar => scalar,
    }
}

fn normalize_mapping(mapping: Mapping) -> Mapping {
    let mut normalized = Mapping::with_capacity(mapping.len());
    for (key, value) in mapping {
        let key = match key {
            Value::String(name) => Value::String(camel_to_snake(&name)),
            other => other,
        };
        normalized.insert(key, normalize_keys(value));
    }
    normalized
}
