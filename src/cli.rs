// src/cli.rs
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{CvConfig, DEFAULT_ENGINE, ENGINE_ENV_VAR};

#[derive(Parser, Debug)]
#[command(name = "cv-render")]
#[command(about = "Render the site CV to public/cv.pdf with rendercv")]
pub struct Cli {
    /// Site repository root containing config/, public/ and src/data/
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Rendering engine binary (falls back to $CV_RENDER_ENGINE, then rendercv)
    #[arg(long)]
    pub engine: Option<String>,

    /// Seconds to wait for the engine before giving up
    #[arg(long, default_value_t = 120)]
    pub timeout: u64,

    /// Print the engine input as YAML and exit without rendering
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Cli {
    /// Build the run configuration. `env_engine` is the value of
    /// `CV_RENDER_ENGINE`, consulted only when `--engine` is absent.
    pub fn to_config(&self, env_engine: Option<String>) -> CvConfig {
        let engine = self
            .engine
            .clone()
            .or(env_engine)
            .filter(|engine| !engine.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENGINE.to_string());

        CvConfig::new(self.root.clone())
            .with_engine(engine)
            .with_timeout(Duration::from_secs(self.timeout))
    }

    pub fn config_from_env(&self) -> CvConfig {
        self.to_config(std::env::var(ENGINE_ENV_VAR).ok())
    }
}
