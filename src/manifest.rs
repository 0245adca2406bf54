// src/manifest.rs
//! Reads the `directories` map of a package manifest.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CheckError, Result};

pub const DEFAULT_MANIFEST: &str = "package.json";

#[derive(Deserialize)]
struct RawManifest {
    directories: Option<Value>,
}

/// Extra scan roots named by a manifest, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub directories: Vec<String>,
}

impl Manifest {
    /// Loads and parses the manifest at `path`.
    ///
    /// # Errors
    /// Returns error if the file is unreadable, not JSON, or lacks a
    /// `directories` object.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| CheckError::Manifest {
            source,
            path: path.to_path_buf(),
        })?;
        Self::parse(&content, path)
    }

    /// Parses manifest text; `path` is only used in error messages.
    ///
    /// # Errors
    /// Returns error if the text is not JSON or lacks a `directories` object.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let raw: RawManifest =
            serde_json::from_str(content).map_err(|source| CheckError::ManifestParse {
                source,
                path: path.to_path_buf(),
            })?;

        let shape_err = |reason: &str| CheckError::ManifestShape {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        match raw.directories {
            Some(Value::Object(map)) => Ok(Self {
                directories: keys_in_order(map),
            }),
            Some(_) => Err(shape_err("`directories` must be an object")),
            None => Err(shape_err("missing `directories` entry")),
        }
    }
}

// Requires serde_json's `preserve_order`; without it keys come back sorted.
fn keys_in_order(map: Map<String, Value>) -> Vec<String> {
    map.into_iter().map(|(k, _)| k).collect()
}

/// Default manifest location for a project root.
#[must_use]
pub fn default_path(root: &Path) -> PathBuf {
    root.join(DEFAULT_MANIFEST)
}
