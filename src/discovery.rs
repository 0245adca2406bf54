// src/discovery.rs
//! Builds the target directory set and lists `.js` files in each.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{CheckError, Result};
use crate::manifest::Manifest;

pub const JS_SUFFIX: &str = ".js";

/// `"."` followed by the manifest's directory keys. Duplicates are kept.
#[must_use]
pub fn target_directories(manifest: &Manifest) -> Vec<String> {
    std::iter::once(".".to_string())
        .chain(manifest.directories.iter().cloned())
        .collect()
}

/// Lists `.js` entries directly inside each directory, resolved against `root`.
///
/// Order is directory order, then whatever order the OS returns entries in.
///
/// # Errors
/// Returns error if any directory cannot be read.
pub fn discover(root: &Path, dirs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for dir in dirs {
        list_js_files(root, dir, &mut files)?;
    }
    Ok(files)
}

fn list_js_files(root: &Path, dir: &str, out: &mut Vec<PathBuf>) -> Result<()> {
    let dir_path = resolve(root, Path::new(dir));
    let read_err = |source| CheckError::ReadDir {
        source,
        path: dir_path.clone(),
    };

    for item in fs::read_dir(&dir_path).map_err(read_err)? {
        let entry = item.map_err(read_err)?;
        // Name match only, same as a readdir filter; a directory called
        // `x.js` is listed and fails later when read.
        if entry.file_name().to_string_lossy().ends_with(JS_SUFFIX) {
            out.push(resolve(&dir_path, Path::new(&entry.file_name())));
        }
    }
    Ok(())
}

/// Lexically joins `path` onto `base` and folds `.` and `..` components.
/// Symlinks are left alone.
#[must_use]
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    let joined = base.join(path);
    let mut out = PathBuf::new();
    for comp in joined.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push(comp);
                }
            }
            other => out.push(other),
        }
    }
    out
}
