// src/config/mod.rs
pub mod types;

pub use self::types::{Config, JsCheckToml, Overrides};

use std::fs;
use std::path::{Path, PathBuf};

use crate::discovery::resolve;
use crate::error::{CheckError, Result};
use crate::manifest;
use crate::syntax::{ParseOptions, SourceType};

pub const CONFIG_FILE: &str = "jscheck.toml";
pub const DEFAULT_ENTRY: &str = "test.js";

impl Config {
    /// Built-in defaults for a project rooted at `root`.
    ///
    /// # Errors
    /// Returns error if `root` is relative and the working directory is gone.
    pub fn new(root: &Path) -> Result<Self> {
        let root = absolute(root)?;
        Ok(Self {
            manifest: manifest::default_path(&root),
            entry: root.join(DEFAULT_ENTRY),
            root,
            parse: ParseOptions::default(),
            verbose: false,
            loaded_from: None,
        })
    }

    /// Defaults plus `jscheck.toml` from `root`, when present.
    ///
    /// # Errors
    /// Returns error if the config file exists but cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self> {
        let mut config = Self::new(root)?;
        let path = config.root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(config);
        }
        let content = fs::read_to_string(&path).map_err(|source| CheckError::ConfigRead {
            source,
            path: path.clone(),
        })?;
        config.parse_toml(&content, &path)?;
        config.loaded_from = Some(path);
        Ok(config)
    }

    /// Applies `jscheck.toml` text on top of the current settings.
    ///
    /// # Errors
    /// Returns error if the TOML is invalid or has unknown keys.
    pub fn parse_toml(&mut self, content: &str, path: &Path) -> Result<()> {
        let file: JsCheckToml = toml::from_str(content).map_err(|source| CheckError::Config {
            source,
            path: path.to_path_buf(),
        })?;
        if let Some(m) = file.manifest {
            self.manifest = resolve(&self.root, &m);
        }
        if let Some(e) = file.entry {
            self.entry = resolve(&self.root, &e);
        }
        if let Some(p) = file.parser {
            self.parse = p;
        }
        Ok(())
    }

    /// Layers command-line overrides; paths are taken relative to the root.
    pub fn apply(&mut self, o: &Overrides) {
        if let Some(m) = &o.manifest {
            self.manifest = resolve(&self.root, m);
        }
        if let Some(e) = &o.entry {
            self.entry = resolve(&self.root, e);
        }
        if o.script {
            self.parse.source_type = SourceType::Script;
        }
        if o.no_top_level_return {
            self.parse.allow_return_outside_function = false;
        }
        if o.no_top_level_await {
            self.parse.allow_await_outside_function = false;
        }
        self.verbose |= o.verbose;
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(resolve(path, Path::new("")));
    }
    let cwd = std::env::current_dir().map_err(|source| CheckError::WorkingDir { source })?;
    Ok(resolve(&cwd, path))
}
