use clap::Parser;
use std::path::PathBuf;

use crate::config::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "jscheck",
    version,
    about = "Fail on the first JavaScript syntax error in a package"
)]
pub struct Cli {
    /// Project root; target directories resolve against it [default: current dir]
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
    /// Manifest with a `directories` map [default: <root>/package.json]
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
    /// Entry script excluded from the scan [default: <root>/test.js]
    #[arg(long, value_name = "FILE")]
    pub entry: Option<PathBuf>,
    /// Parse as a classic script instead of an ES module
    #[arg(long)]
    pub script: bool,
    /// Reject `return` outside of a function
    #[arg(long)]
    pub no_top_level_return: bool,
    /// Reject `await` outside of a function
    #[arg(long)]
    pub no_top_level_await: bool,
    /// Print configuration and skip notes
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            manifest: self.manifest.clone(),
            entry: self.entry.clone(),
            script: self.script,
            no_top_level_return: self.no_top_level_return,
            no_top_level_await: self.no_top_level_await,
            verbose: self.verbose,
        }
    }
}
