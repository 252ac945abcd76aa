// src/core/fs_ops.rs
//! Shared file system operations used by the render pipeline

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub struct FsOps;

impl FsOps {
    /// Ensure directory exists, creating parents as needed
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            debug!("Created directory: {}", path.display());
        }
        Ok(())
    }

    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Write file, creating the parent directory first
    pub async fn write_file_safe(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            Self::ensure_dir_exists(parent).await?;
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        debug!("Written file: {}", path.display());
        Ok(())
    }

    /// Copy file, overwriting the destination. Returns the number of bytes copied.
    pub async fn copy_file(src: &Path, dest: &Path) -> Result<u64> {
        if let Some(parent) = dest.parent() {
            Self::ensure_dir_exists(parent).await?;
        }

        let bytes = fs::copy(src, dest)
            .await
            .with_context(|| format!("Failed to copy {} to {}", src.display(), dest.display()))?;

        debug!("Copied {} to {}", src.display(), dest.display());
        Ok(bytes)
    }

    /// Recursively collect files with the given extension (case-insensitive),
    /// sorted by path. A missing directory yields an empty list.
    pub fn find_files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        if dir.is_dir() {
            Self::collect_files(dir, extension, &mut found)?;
        }
        found.sort();
        Ok(found)
    }

    fn collect_files(dir: &Path, extension: &str, found: &mut Vec<PathBuf>) -> Result<()> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                Self::collect_files(&path, extension, found)?;
            } else if Self::get_extension(&path).as_deref() == Some(extension) {
                found.push(path);
            }
        }
        Ok(())
    }

    /// Get file extension in lowercase
    pub fn get_extension(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }
}
