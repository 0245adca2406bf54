// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::syntax::Diagnostic;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Invalid config {path}: {source}")]
    Config {
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("Cannot read config {path}: {source}")]
    ConfigRead {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Cannot resolve working directory: {source}")]
    WorkingDir { source: std::io::Error },

    #[error("Cannot read manifest {path}: {source}")]
    Manifest {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Malformed manifest {path}: {source}")]
    ManifestParse {
        source: serde_json::Error,
        path: PathBuf,
    },

    #[error("Unusable manifest {path}: {reason}")]
    ManifestShape { path: PathBuf, reason: String },

    #[error("Cannot list directory {path}: {source}")]
    ReadDir {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Cannot read {path}: {source}")]
    ReadFile {
        source: std::io::Error,
        path: PathBuf,
    },

    // Assertion message layout: file, blank line, diagnostic.
    #[error("{path}\n\n{diagnostic}")]
    Syntax { path: String, diagnostic: Diagnostic },
}

impl CheckError {
    /// True for errors caused by project configuration rather than the scan itself.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::ConfigRead { .. }
                | Self::Manifest { .. }
                | Self::ManifestParse { .. }
                | Self::ManifestShape { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
