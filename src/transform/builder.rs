// src/transform/builder.rs
//! Build the engine input document from the CMS config or an uploaded override

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tracing::{info, warn};

use super::keys::normalize_keys;
use super::sections::{is_truthy, transform_sections};
use crate::config::CvConfig;
use crate::core::FsOps;
use crate::types::UploadOverride;

/// Where the engine input came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Upload,
    Structured,
}

#[derive(Debug, Clone)]
pub struct RenderInput {
    pub source: InputSource,
    pub document: Value,
}

/// Normalize keys, reshape `cv.sections` and keep `design` when set.
pub fn build_render_input(config: Value) -> Result<Value> {
    let converted = normalize_keys(config);

    let mut cv = match converted.get("cv") {
        Some(Value::Mapping(cv)) if !cv.is_empty() => cv.clone(),
        Some(other) if is_truthy(other) => anyhow::bail!("'cv' section must be a mapping"),
        _ => anyhow::bail!("CV config is empty or missing 'cv' section"),
    };

    let sections = match cv.remove("sections") {
        Some(Value::Mapping(sections)) => sections,
        _ => Mapping::new(),
    };
    cv.insert("sections".into(), Value::Mapping(transform_sections(&sections)));

    let mut result = Mapping::new();
    result.insert("cv".into(), Value::Mapping(cv));

    if let Some(design) = converted.get("design").filter(|d| is_truthy(d)) {
        result.insert("design".into(), design.clone());
    }

    Ok(Value::Mapping(result))
}

/// Load the uploaded engine YAML if it is enabled, non-blank and has a `cv`
/// key. Anything malformed falls back to the structured config with a warning.
pub async fn load_upload(path: &Path) -> Option<Value> {
    if !path.exists() {
        return None;
    }

    let raw = match FsOps::read_file_safe(path).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Ignoring unreadable upload {}: {:#}", path.display(), e);
            return None;
        }
    };

    let upload: Option<UploadOverride> = match serde_yaml::from_str(&raw) {
        Ok(upload) => upload,
        Err(e) => {
            warn!("Ignoring malformed upload {}: {}", path.display(), e);
            return None;
        }
    };
    let content = upload.as_ref().and_then(UploadOverride::active_content)?;

    match serde_yaml::from_str::<Value>(content) {
        Ok(parsed) if parsed.as_mapping().is_some_and(|m| m.contains_key("cv")) => {
            info!("Using raw YAML from {}", path.display());
            Some(parsed)
        }
        Ok(_) => {
            warn!("Uploaded YAML is missing 'cv' key, falling back to structured config");
            None
        }
        Err(e) => {
            warn!("Uploaded YAML does not parse ({}), falling back to structured config", e);
            None
        }
    }
}

/// Load and validate the structured CMS config
pub async fn load_config(path: &Path) -> Result<Value> {
    if !path.exists() {
        anyhow::bail!("CV config not found at {}", path.display());
    }

    info!("Loading CV config from {}", path.display());
    let raw = FsOps::read_file_safe(path).await?;
    let config: Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse CV config: {}", path.display()))?;

    if !config.get("cv").is_some_and(is_truthy) {
        anyhow::bail!("CV config is empty or missing 'cv' section");
    }
    Ok(config)
}

/// The uploaded override wins over the structured config when it applies
pub async fn resolve_render_input(config: &CvConfig) -> Result<RenderInput> {
    if let Some(document) = load_upload(&config.upload_path()).await {
        return Ok(RenderInput {
            source: InputSource::Upload,
            document,
        });
    }

    let raw = load_config(&config.config_path()).await?;
    Ok(RenderInput {
        source: InputSource::Structured,
        document: build_render_input(raw)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn yaml(src: &str) -> Value {
        serde_yaml::from_str(src).unwrap()
    }

    #[test]
    fn test_build_render_input_education_entry() {
        let input = yaml(
            r#"
cv:
  name: Ada Lovelace
  socialNetworks: []
  sections:
    education:
      - institution: X
        area: CS
        degree: PhD
        startDate: "2020"
        endDate: "2024"
"#,
        );

        let built = build_render_input(input).unwrap();
        let entry = &built["cv"]["sections"]["education"][0];
        assert_eq!(
            entry,
            &yaml("institution: X\narea: CS\ndegree: PhD\nstart_date: \"2020\"\nend_date: \"2024\"")
        );
        assert!(entry.get("highlights").is_none());
        assert_eq!(built["cv"]["social_networks"], yaml("[]"));
        assert!(built.get("design").is_none());
    }

    #[test]
    fn test_build_render_input_keeps_design_and_adds_sections() {
        let input = yaml(
            r#"
cv:
  name: Ada
design:
  theme: classic
  pageSize: letterpaper
extra: ignored
"#,
        );

        let built = build_render_input(input).unwrap();
        assert_eq!(
            built,
            yaml(
                r#"
cv:
  name: Ada
  sections: {}
design:
  theme: classic
  page_size: letterpaper
"#
            )
        );
    }

    #[test]
    fn test_build_render_input_drops_empty_design() {
        let built = build_render_input(yaml("cv:\n  name: Ada\ndesign: {}")).unwrap();
        assert!(built.get("design").is_none());
    }

    #[test]
    fn test_build_render_input_requires_cv() {
        assert!(build_render_input(yaml("design: {}")).is_err());
        assert!(build_render_input(yaml("cv:")).is_err());
        assert!(build_render_input(yaml("cv: just text")).is_err());
    }

    #[tokio::test]
    async fn test_load_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.yml");

        let err = load_config(&path).await.unwrap_err();
        assert!(err.to_string().contains("CV config not found"));

        std::fs::write(&path, "").unwrap();
        let err = load_config(&path).await.unwrap_err();
        assert!(err.to_string().contains("empty or missing 'cv'"));

        std::fs::write(&path, "cv: [unclosed").unwrap();
        assert!(load_config(&path).await.is_err());

        std::fs::write(&path, "cv:\n  name: Ada\n").unwrap();
        assert!(load_config(&path).await.is_ok());
    }

    #[tokio::test]
    async fn test_load_upload_variants() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv-upload.yml");

        assert!(load_upload(&path).await.is_none());

        std::fs::write(&path, "enabled: true\ncontent: |\n  cv:\n    name: Ada\n").unwrap();
        assert_eq!(load_upload(&path).await, Some(yaml("cv:\n  name: Ada")));

        std::fs::write(&path, "enabled: false\ncontent: |\n  cv:\n    name: Ada\n").unwrap();
        assert!(load_upload(&path).await.is_none());

        std::fs::write(&path, "enabled: yes\ncontent: |\n  cv:\n    name: Ada\n").unwrap();
        assert_eq!(load_upload(&path).await, Some(yaml("cv:\n  name: Ada")));

        std::fs::write(&path, "enabled: 1\ncontent: |\n  cv:\n    name: Ada\n").unwrap();
        assert_eq!(load_upload(&path).await, Some(yaml("cv:\n  name: Ada")));

        std::fs::write(&path, "enabled: off\ncontent: |\n  cv:\n    name: Ada\n").unwrap();
        assert!(load_upload(&path).await.is_none());

        std::fs::write(&path, "enabled: true\ncontent: |\n  design:\n    theme: x\n").unwrap();
        assert!(load_upload(&path).await.is_none());

        std::fs::write(&path, "enabled: true\ncontent: \"cv: [broken\"\n").unwrap();
        assert!(load_upload(&path).await.is_none());

        std::fs::write(&path, "enabled: [not, a, bool]\n").unwrap();
        assert!(load_upload(&path).await.is_none());

        std::fs::write(&path, "").unwrap();
        assert!(load_upload(&path).await.is_none());
    }
}
