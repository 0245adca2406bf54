use serde::Deserialize;
use std::path::PathBuf;

use crate::syntax::ParseOptions;

/// On-disk shape of `jscheck.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsCheckToml {
    #[serde(default)]
    pub manifest: Option<PathBuf>,
    #[serde(default)]
    pub entry: Option<PathBuf>,
    #[serde(default)]
    pub parser: Option<ParseOptions>,
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the target directories are resolved against.
    pub root: PathBuf,
    pub manifest: PathBuf,
    /// The validator's own script; never checked.
    pub entry: PathBuf,
    pub parse: ParseOptions,
    pub verbose: bool,
    /// `jscheck.toml` that contributed to this config, if any.
    pub loaded_from: Option<PathBuf>,
}

/// Command-line settings layered over the file config.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub manifest: Option<PathBuf>,
    pub entry: Option<PathBuf>,
    pub script: bool,
    pub no_top_level_return: bool,
    pub no_top_level_await: bool,
    pub verbose: bool,
}
