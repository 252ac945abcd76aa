// src/types/cv_data.rs
//! Documents read and written around a render run

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::config::PUBLIC_PDF_PATH;

// ===== Metadata consumed by the website =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvMetadata {
    pub last_generated: DateTime<Utc>,
    pub pdf_path: String,
    pub pdf_size: u64,
}

impl CvMetadata {
    pub fn new(pdf_size: u64) -> Self {
        Self {
            last_generated: Utc::now(),
            pdf_path: PUBLIC_PDF_PATH.to_string(),
            pdf_size,
        }
    }

    /// Pretty JSON (2-space indent) with a trailing newline
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

// ===== Raw engine YAML uploaded through the CMS =====

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadOverride {
    #[serde(default, deserialize_with = "deserialize_switch")]
    pub enabled: bool,
    #[serde(default)]
    pub content: Option<String>,
}

impl UploadOverride {
    /// Embedded YAML when the override is switched on and not blank
    pub fn active_content(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.content
            .as_deref()
            .map(str::trim)
            .filter(|content| !content.is_empty())
    }
}

/// YAML 1.1 style switch: `yes`/`on`/`1` count as true, `no`/`off`/`0` and
/// null as false. Other strings are true when non-empty.
fn deserialize_switch<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => Ok(false),
        serde_yaml::Value::Bool(b) => Ok(b),
        serde_yaml::Value::Number(n) => Ok(n.as_f64().is_some_and(|n| n != 0.0)),
        serde_yaml::Value::String(s) => {
            let s = s.trim().to_lowercase();
            Ok(!matches!(s.as_str(), "" | "no" | "off" | "false" | "n"))
        }
        other => Err(de::Error::custom(format!(
            "'enabled' must be a boolean, got {}",
            value_kind(&other)
        ))),
    }
}

fn value_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Sequence(_) => "a list",
        serde_yaml::Value::Mapping(_) => "a mapping",
        _ => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_serializes_camel_case() {
        let metadata = CvMetadata::new(51200);
        let json = metadata.to_json().unwrap();
        assert!(json.ends_with("}\n"));
        assert!(json.contains("\n  \"pdfPath\": \"/cv.pdf\""));
        assert!(json.contains("\n  \"pdfSize\": 51200"));
        assert!(json.contains("\n  \"lastGenerated\": \""));

        let parsed: CvMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, metadata);
    }

    #[test]
    fn test_upload_override_active_content() {
        let upload: UploadOverride =
            serde_yaml::from_str("enabled: true\ncontent: \"  cv:\\n  name: A\\n\"").unwrap();
        assert_eq!(upload.active_content(), Some("cv:\n  name: A"));

        let disabled: UploadOverride =
            serde_yaml::from_str("enabled: false\ncontent: \"cv: {}\"").unwrap();
        assert_eq!(disabled.active_content(), None);

        let blank: UploadOverride = serde_yaml::from_str("enabled: true\ncontent: \"   \"").unwrap();
        assert_eq!(blank.active_content(), None);

        let missing: UploadOverride = serde_yaml::from_str("enabled: true").unwrap();
        assert_eq!(missing.active_content(), None);
    }

    fn enabled(yaml: &str) -> bool {
        serde_yaml::from_str::<UploadOverride>(yaml).unwrap().enabled
    }

    #[test]
    fn test_upload_override_enabled_accepts_yaml_switch_words() {
        for on in ["enabled: yes", "enabled: On", "enabled: 1", "enabled: \"true\"", "enabled: y"] {
            assert!(enabled(on), "{}", on);
        }
        for off in ["enabled: no", "enabled: OFF", "enabled: 0", "enabled:", "enabled: \"\"", "content: x"] {
            assert!(!enabled(off), "{}", off);
        }
    }

    #[test]
    fn test_upload_override_enabled_rejects_collections() {
        let err = serde_yaml::from_str::<UploadOverride>("enabled: [not, a, bool]").unwrap_err();
        assert!(err.to_string().contains("'enabled' must be a boolean, got a list"));
    }
}
