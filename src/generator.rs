// src/generator.rs
use anyhow::{Context, Result};
use serde_yaml::Value;
use tracing::info;

use crate::config::CvConfig;
use crate::pdf_validator::PdfValidator;
use crate::publisher::Publisher;
use crate::render::{RenderInvoker, RenderedPdf};
use crate::transform::{resolve_render_input, InputSource};
use crate::types::CvMetadata;

/// Drives one run: build input → render → validate → publish
pub struct CvRenderer {
    pub config: CvConfig,
}

impl CvRenderer {
    pub fn new(config: CvConfig) -> Self {
        Self { config }
    }

    /// Engine input document for this run, without rendering anything
    pub async fn build_input(&self) -> Result<Value> {
        let input = resolve_render_input(&self.config)
            .await
            .context("Failed to load CV config")?;

        if input.source == InputSource::Upload {
            info!("Raw upload is already in engine format, using it directly");
        }
        Ok(input.document)
    }

    pub async fn run(&self) -> Result<CvMetadata> {
        let document = self.build_input().await?;

        let pdf = RenderInvoker::from_config(&self.config)
            .render(&document)
            .await
            .context("Failed to render CV")?;

        let pdf = validated(pdf, self.config.max_pdf_size).await?;

        let metadata = Publisher::from_config(&self.config)
            .publish(pdf)
            .await
            .context("Failed to publish CV")?;

        info!(
            "CV render complete: {} ({} bytes)",
            self.config.output_pdf_path().display(),
            metadata.pdf_size
        );
        Ok(metadata)
    }
}

/// Pass `pdf` through only if it validates. A rejected PDF is dropped here,
/// which deletes the temporary copy.
async fn validated(pdf: RenderedPdf, max_size: u64) -> Result<RenderedPdf> {
    PdfValidator::validate(pdf.path(), max_size)
        .await
        .context("PDF validation failed")?;
    Ok(pdf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn rendered_pdf(bytes: &[u8]) -> RenderedPdf {
        let mut file = tempfile::Builder::new()
            .prefix("cv-")
            .suffix(".pdf")
            .tempfile()
            .unwrap();
        file.write_all(bytes).unwrap();
        RenderedPdf::new(file.into_temp_path())
    }

    #[tokio::test]
    async fn test_rejected_pdf_is_deleted() {
        let empty = rendered_pdf(b"");
        let empty_path = empty.path().to_path_buf();
        let err = validated(empty, 1024).await.unwrap_err();
        assert!(format!("{:#}", err).contains("PDF file is empty"));
        assert!(!empty_path.exists());

        let oversized = rendered_pdf(&[0u8; 2048]);
        let oversized_path = oversized.path().to_path_buf();
        let err = validated(oversized, 1024).await.unwrap_err();
        assert!(format!("{:#}", err).contains("PDF file is too large"));
        assert!(!oversized_path.exists());
    }

    #[tokio::test]
    async fn test_accepted_pdf_is_kept() {
        let pdf = validated(rendered_pdf(b"%PDF-1.7"), 1024).await.unwrap();
        assert_eq!(std::fs::read(pdf.path()).unwrap(), b"%PDF-1.7");
    }
}
