// src/validator.rs
//! The check pass: discover files, skip the entry script, parse each file in
//! order and stop at the first failure.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::discovery;
use crate::error::{CheckError, Result};
use crate::manifest::Manifest;
use crate::reporting::Progress;
use crate::syntax::{Diagnostic, SyntaxChecker, TreeSitterChecker};

/// Outcome of a run in which every file passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub checked: Vec<PathBuf>,
    pub skipped_entry: bool,
}

pub struct Validator<C = TreeSitterChecker> {
    config: Config,
    checker: C,
}

impl Validator<TreeSitterChecker> {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_checker(config, TreeSitterChecker::new())
    }
}

impl<C: SyntaxChecker> Validator<C> {
    #[must_use]
    pub fn with_checker(config: Config, checker: C) -> Self {
        Self { config, checker }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads the manifest and returns `"."` plus its directory keys.
    ///
    /// # Errors
    /// Returns error if the manifest cannot be loaded.
    pub fn target_directories(&self) -> Result<Vec<String>> {
        let manifest = Manifest::load(&self.config.manifest)?;
        Ok(discovery::target_directories(&manifest))
    }

    /// Resolves the full file list, entry script included.
    ///
    /// # Errors
    /// Returns error if the manifest or any target directory cannot be read.
    pub fn collect(&self, progress: &mut dyn Progress) -> Result<Vec<PathBuf>> {
        let dirs = self.target_directories()?;
        progress.note(&format!("Target directories: {}", dirs.join(", ")));
        discovery::discover(&self.config.root, &dirs)
    }

    /// Checks every discovered file in order, halting on the first failure.
    ///
    /// # Errors
    /// Returns the first configuration, filesystem, or syntax error hit.
    pub fn run(&self, progress: &mut dyn Progress) -> Result<RunSummary> {
        if let Some(path) = &self.config.loaded_from {
            progress.note(&format!("Using config {}", path.display()));
        }
        let files = self.collect(progress)?;
        let mut summary = RunSummary::default();

        for file in files {
            if file == self.config.entry {
                progress.note(&format!("Skipping entry script {}", file.display()));
                summary.skipped_entry = true;
                continue;
            }
            progress.checking(&file);
            self.check_file(&file)?;
            progress.done(&file);
            summary.checked.push(file);
        }
        Ok(summary)
    }

    /// Reads and parses one file.
    ///
    /// # Errors
    /// Returns error if the file is unreadable or has a syntax error.
    pub fn check_file(&self, path: &Path) -> Result<()> {
        let source = read_source(path)?;
        let name = path.display().to_string();
        let diagnostic = self
            .checker
            .check_syntax(&source, &name, &self.config.parse);
        assert_clean(name, diagnostic)
    }
}

fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| CheckError::ReadFile {
        source,
        path: path.to_path_buf(),
    })?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.strip_prefix('\u{feff}').unwrap_or(&*text).to_string())
}

/// Passes only when there is no diagnostic text at all.
fn assert_clean(path: String, diagnostic: Option<Diagnostic>) -> Result<()> {
    match diagnostic {
        Some(d) if !d.to_string().is_empty() => Err(CheckError::Syntax {
            path,
            diagnostic: d,
        }),
        _ => Ok(()),
    }
}
