// src/render.rs
//! Run the external rendering engine inside a scoped temporary workspace

use serde_yaml::Value;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tempfile::{TempDir, TempPath};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::config::CvConfig;
use crate::core::FsOps;
use crate::error::RenderError;

const INPUT_FILE_NAME: &str = "cv_input.yaml";
const OUTPUT_FOLDER_NAME: &str = "output";
const SPAWN_ATTEMPTS: u32 = 5;
const SPAWN_RETRY_DELAY: Duration = Duration::from_millis(50);

/// A rendered PDF living outside the engine workspace. The file is removed
/// when this value is dropped unless it was published first.
#[derive(Debug)]
pub struct RenderedPdf {
    path: TempPath,
}

impl RenderedPdf {
    pub(crate) fn new(path: TempPath) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the temporary copy now, logging instead of failing
    pub fn discard(self) {
        let path = self.path.to_path_buf();
        if let Err(e) = self.path.close() {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove temporary PDF {}: {}", path.display(), e);
            }
        }
    }
}

pub struct RenderInvoker {
    engine: String,
    timeout: Duration,
}

impl RenderInvoker {
    pub fn new(engine: impl Into<String>, timeout: Duration) -> Self {
        Self {
            engine: engine.into(),
            timeout,
        }
    }

    pub fn from_config(config: &CvConfig) -> Self {
        Self::new(config.engine.clone(), config.timeout)
    }

    /// Render `document` and return the produced PDF. The workspace is torn
    /// down before returning, on success and on every error path.
    pub async fn render(&self, document: &Value) -> Result<RenderedPdf, RenderError> {
        let workspace: TempDir = tempfile::Builder::new().prefix("cv-render-").tempdir()?;
        let input_file = workspace.path().join(INPUT_FILE_NAME);

        let yaml = serde_yaml::to_string(document)?;
        tokio::fs::write(&input_file, yaml).await?;

        info!("Running {} render on {}...", self.engine, input_file.display());
        self.run_engine(workspace.path(), &input_file).await?;

        let output_dir = workspace.path().join(OUTPUT_FOLDER_NAME);
        let produced = self.find_output_pdf(&output_dir)?;

        // Copy out before `workspace` drops and removes everything under it
        let stable = tempfile::Builder::new()
            .prefix("cv-")
            .suffix(".pdf")
            .tempfile()?
            .into_temp_path();
        tokio::fs::copy(&produced, &stable).await?;
        debug!("Copied {} to {}", produced.display(), stable.display());

        Ok(RenderedPdf::new(stable))
    }

    async fn run_engine(&self, workdir: &Path, input_file: &Path) -> Result<(), RenderError> {
        let mut cmd = Command::new(&self.engine);
        cmd.arg("render")
            .arg(input_file)
            .arg("--output-folder-name")
            .arg(OUTPUT_FOLDER_NAME)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = self.spawn_engine(&mut cmd).await?;

        // Dropping the child on timeout kills it
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| RenderError::Timeout {
                engine: self.engine.clone(),
                timeout: self.timeout,
            })??;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            info!("{}", stdout.trim_end());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            warn!("{}", stderr.trim_end());
        }

        if !output.status.success() {
            return Err(RenderError::ExitStatus {
                engine: self.engine.clone(),
                code: output.status.code(),
            });
        }
        Ok(())
    }

    /// Spawn the engine, retrying while the executable is still open for
    /// writing somewhere else (ETXTBSY)
    async fn spawn_engine(&self, cmd: &mut Command) -> Result<Child, RenderError> {
        let mut attempt = 1;
        loop {
            match cmd.spawn() {
                Ok(child) => return Ok(child),
                Err(e) if is_text_file_busy(&e) && attempt < SPAWN_ATTEMPTS => {
                    debug!("{} is busy, retrying spawn ({}/{})", self.engine, attempt, SPAWN_ATTEMPTS);
                    attempt += 1;
                    tokio::time::sleep(SPAWN_RETRY_DELAY).await;
                }
                Err(source) => {
                    return Err(RenderError::Spawn {
                        engine: self.engine.clone(),
                        source,
                    });
                }
            }
        }
    }

    /// First PDF under `output_dir` in path order
    fn find_output_pdf(&self, output_dir: &Path) -> Result<PathBuf, RenderError> {
        let pdfs = FsOps::find_files_with_extension(output_dir, "pdf")
            .map_err(|e| std::io::Error::other(format!("{:#}", e)))?;

        if pdfs.len() > 1 {
            warn!(
                "{} produced {} PDFs, using {}",
                self.engine,
                pdfs.len(),
                pdfs[0].display()
            );
        }

        pdfs.into_iter().next().ok_or_else(|| RenderError::NoPdf {
            engine: self.engine.clone(),
            dir: output_dir.to_path_buf(),
        })
    }
}

#[cfg(unix)]
fn is_text_file_busy(err: &std::io::Error) -> bool {
    const ETXTBSY: i32 = 26;
    err.raw_os_error() == Some(ETXTBSY)
}

#[cfg(not(unix))]
fn is_text_file_busy(_err: &std::io::Error) -> bool {
    false
}
