// src/pdf_validator.rs
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::info;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct PdfValidationError {
    pub path: PathBuf,
    pub error_type: PdfErrorType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfErrorType {
    FileNotFound,
    UnreadableFile,
    EmptyFile,
    TooLarge,
}

impl PdfErrorType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::FileNotFound => "PDF_NOT_FOUND",
            Self::UnreadableFile => "PDF_UNREADABLE",
            Self::EmptyFile => "PDF_EMPTY",
            Self::TooLarge => "PDF_TOO_LARGE",
        }
    }
}

pub struct PdfValidator;

impl PdfValidator {
    /// Check the rendered PDF exists, is non-empty and at most `max_size`
    /// bytes. Returns the size on success.
    pub async fn validate(pdf_path: &Path, max_size: u64) -> Result<u64, PdfValidationError> {
        let error = |error_type, message: String| PdfValidationError {
            path: pdf_path.to_path_buf(),
            error_type,
            message,
        };

        if !pdf_path.exists() {
            return Err(error(
                PdfErrorType::FileNotFound,
                "PDF file does not exist".to_string(),
            ));
        }

        let size = fs::metadata(pdf_path)
            .await
            .map_err(|e| {
                error(
                    PdfErrorType::UnreadableFile,
                    format!("Cannot read PDF metadata: {}", e),
                )
            })?
            .len();

        if size == 0 {
            return Err(error(PdfErrorType::EmptyFile, "PDF file is empty".to_string()));
        }

        if size > max_size {
            return Err(error(
                PdfErrorType::TooLarge,
                format!(
                    "PDF file is too large: {:.1}MB (limit: {:.0}MB)",
                    size as f64 / 1024.0 / 1024.0,
                    max_size as f64 / 1024.0 / 1024.0
                ),
            ));
        }

        info!("PDF validated: {:.1} KB", size as f64 / 1024.0);
        Ok(size)
    }
}
