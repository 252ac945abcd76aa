// src/error.rs
//! Failures of the external rendering engine run

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to serialize engine input: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Failed to launch '{engine}': {source}\nIs it installed and on PATH?")]
    Spawn {
        engine: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{engine} timed out after {}", describe_timeout(.timeout))]
    Timeout { engine: String, timeout: Duration },

    #[error("{engine} exited with {}", exit_description(.code))]
    ExitStatus { engine: String, code: Option<i32> },

    #[error("{engine} did not produce a PDF file under '{dir}'")]
    NoPdf { engine: String, dir: PathBuf },

    #[error("I/O error while rendering: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn describe_timeout(timeout: &Duration) -> String {
    if timeout.subsec_nanos() == 0 {
        format!("{} seconds", timeout.as_secs())
    } else {
        format!("{:?}", timeout)
    }
}

impl RenderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = RenderError::Timeout {
            engine: "rendercv".into(),
            timeout: Duration::from_secs(120),
        };
        assert_eq!(err.to_string(), "rendercv timed out after 120 seconds");
        assert!(err.is_timeout());

        let err = RenderError::Timeout {
            engine: "rendercv".into(),
            timeout: Duration::from_millis(200),
        };
        assert_eq!(err.to_string(), "rendercv timed out after 200ms");

        let err = RenderError::Timeout {
            engine: "rendercv".into(),
            timeout: Duration::from_millis(1500),
        };
        assert_eq!(err.to_string(), "rendercv timed out after 1.5s");

        let err = RenderError::ExitStatus {
            engine: "rendercv".into(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "rendercv exited with code 2");
        assert!(!err.is_timeout());

        let err = RenderError::ExitStatus {
            engine: "rendercv".into(),
            code: None,
        };
        assert!(err.to_string().contains("terminated by signal"));
    }
}
