// src/config.rs
use std::path::PathBuf;
use std::time::Duration;

/// PDFs larger than this are rejected (10 MiB)
pub const MAX_PDF_SIZE: u64 = 10 * 1024 * 1024;

/// Upper bound on a single engine run
pub const RENDER_TIMEOUT: Duration = Duration::from_secs(120);

/// Path the website serves the PDF from
pub const PUBLIC_PDF_PATH: &str = "/cv.pdf";

pub const DEFAULT_ENGINE: &str = "rendercv";

/// Environment variable overriding the engine binary when no flag is given
pub const ENGINE_ENV_VAR: &str = "CV_RENDER_ENGINE";

/// Paths and limits for a single render run. All relative paths resolve
/// against `root_dir`, the site repository root.
#[derive(Debug, Clone)]
pub struct CvConfig {
    pub root_dir: PathBuf,
    pub engine: String,
    pub timeout: Duration,
    pub max_pdf_size: u64,
}

impl CvConfig {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            engine: DEFAULT_ENGINE.to_string(),
            timeout: RENDER_TIMEOUT,
            max_pdf_size: MAX_PDF_SIZE,
        }
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_pdf_size(mut self, max_pdf_size: u64) -> Self {
        self.max_pdf_size = max_pdf_size;
        self
    }

    /// Structured config written by the CMS
    pub fn config_path(&self) -> PathBuf {
        self.root_dir.join("config").join("cv.yml")
    }

    /// Optional raw engine YAML that bypasses the structured config
    pub fn upload_path(&self) -> PathBuf {
        self.root_dir.join("config").join("cv-upload.yml")
    }

    pub fn output_pdf_path(&self) -> PathBuf {
        self.root_dir.join("public").join("cv.pdf")
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.root_dir.join("src").join("data").join("cv.json")
    }
}
