// src/publisher.rs
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::config::CvConfig;
use crate::core::FsOps;
use crate::render::RenderedPdf;
use crate::types::CvMetadata;

/// Copies a validated PDF to the public path and records its metadata
pub struct Publisher {
    output_pdf: PathBuf,
    metadata_path: PathBuf,
}

impl Publisher {
    pub fn new(output_pdf: PathBuf, metadata_path: PathBuf) -> Self {
        Self {
            output_pdf,
            metadata_path,
        }
    }

    pub fn from_config(config: &CvConfig) -> Self {
        Self::new(config.output_pdf_path(), config.metadata_path())
    }

    pub async fn publish(&self, pdf: RenderedPdf) -> Result<CvMetadata> {
        FsOps::copy_file(pdf.path(), &self.output_pdf).await?;
        let pdf_size = tokio::fs::metadata(&self.output_pdf)
            .await
            .with_context(|| format!("Failed to stat {}", self.output_pdf.display()))?
            .len();
        info!("PDF written to {}", self.output_pdf.display());

        pdf.discard();

        let metadata = CvMetadata::new(pdf_size);
        let json = metadata
            .to_json()
            .context("Failed to serialize CV metadata")?;
        FsOps::write_file_safe(&self.metadata_path, &json).await?;
        info!("Metadata written to {}", self.metadata_path.display());

        Ok(metadata)
    }
}
