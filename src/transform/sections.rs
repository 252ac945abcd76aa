// src/transform/sections.rs
//! Reshape CMS section entries into the entry types the engine knows

use serde_yaml::{Mapping, Value};

/// Fields emitted only when the source entry carries a truthy value
const DATED_OPTIONAL_FIELDS: [&str; 4] = ["location", "start_date", "end_date", "highlights"];

/// Entry shape for a known section name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Education,
    Experience,
    Publications,
    OneLine,
    Passthrough,
}

impl SectionKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "education" => Self::Education,
            "experience" => Self::Experience,
            "publications" => Self::Publications,
            "awards" | "skills" => Self::OneLine,
            _ => Self::Passthrough,
        }
    }
}

/// Transform every non-empty section. Empty or null sections are dropped,
/// unknown sections are copied as-is.
pub fn transform_sections(sections: &Mapping) -> Mapping {
    let mut result = Mapping::new();

    for (name, entries) in sections {
        if !is_truthy(entries) {
            continue;
        }

        let kind = name.as_str().map_or(SectionKind::Passthrough, SectionKind::from_name);
        let transformed = match (kind, entries) {
            (SectionKind::Passthrough, _) | (_, Value::Mapping(_)) => entries.clone(),
            (_, Value::Sequence(items)) => Value::Sequence(
                items
                    .iter()
                    .map(|entry| Value::Mapping(transform_entry(kind, entry)))
                    .collect(),
            ),
            // A lone scalar entry still yields a single defaulted entry
            (_, scalar) => Value::Sequence(vec![Value::Mapping(transform_entry(kind, scalar))]),
        };
        result.insert(name.clone(), transformed);
    }

    result
}

pub fn transform_entry(kind: SectionKind, entry: &Value) -> Mapping {
    let empty = Mapping::new();
    let source = entry.as_mapping().unwrap_or(&empty);

    match kind {
        SectionKind::Education => {
            let mut result = required_strings(source, &["institution", "area", "degree"]);
            copy_truthy(source, &mut result, &DATED_OPTIONAL_FIELDS);
            result
        }
        SectionKind::Experience => {
            let mut result = required_strings(source, &["company", "position"]);
            copy_truthy(source, &mut result, &DATED_OPTIONAL_FIELDS);
            result
        }
        SectionKind::Publications => transform_publication(source),
        SectionKind::OneLine => required_strings(source, &["label", "details"]),
        SectionKind::Passthrough => source.clone(),
    }
}

fn transform_publication(source: &Mapping) -> Mapping {
    let mut result = required_strings(source, &["title"]);
    result.insert(
        "authors".into(),
        source
            .get("authors")
            .cloned()
            .unwrap_or_else(|| Value::Sequence(Vec::new())),
    );
    copy_truthy(source, &mut result, &["journal"]);
    if let Some(date) = source.get("date").filter(|v| is_truthy(v)) {
        result.insert("date".into(), Value::String(scalar_to_string(date)));
    }
    copy_truthy(source, &mut result, &["doi", "url"]);
    result
}

/// Copy each field, defaulting to an empty string when absent
fn required_strings(source: &Mapping, fields: &[&str]) -> Mapping {
    let mut result = Mapping::new();
    for field in fields {
        let value = source
            .get(*field)
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));
        result.insert((*field).into(), value);
    }
    result
}

fn copy_truthy(source: &Mapping, target: &mut Mapping, fields: &[&str]) {
    for field in fields {
        if let Some(value) = source.get(*field).filter(|v| is_truthy(v)) {
            target.insert((*field).into(), value.clone());
        }
    }
}

/// YAML truthiness: null, false, zero and empty containers/strings are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(items) => !items.is_empty(),
        Value::Mapping(mapping) => !mapping.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
