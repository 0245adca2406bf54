// src/syntax/mod.rs
//! Syntax checking of JavaScript source text.
//!
//! The validator only needs one operation: given source text, a file name and
//! a set of [`ParseOptions`], report the first syntax problem or nothing.
//! [`SyntaxChecker`] is that operation; [`TreeSitterChecker`] is the bundled
//! backend.

mod diagnostic;
mod early;
mod tree;

use serde::Deserialize;

pub use self::diagnostic::Diagnostic;
pub use self::tree::TreeSitterChecker;

/// Which grammar goal the source is parsed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Module,
    Script,
}

/// Parser relaxations. Defaults accept ES modules with top-level `return`
/// and top-level `await`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParseOptions {
    #[serde(default)]
    pub source_type: SourceType,
    #[serde(default = "default_allow")]
    pub allow_return_outside_function: bool,
    #[serde(default = "default_allow")]
    pub allow_await_outside_function: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            source_type: SourceType::Module,
            allow_return_outside_function: true,
            allow_await_outside_function: true,
        }
    }
}

fn default_allow() -> bool {
    true
}

/// A swappable syntax-checking backend.
pub trait SyntaxChecker {
    /// Parses `source` and returns the first diagnostic, if any.
    fn check_syntax(&self, source: &str, filename: &str, options: &ParseOptions)
        -> Option<Diagnostic>;
}

impl<T: SyntaxChecker + ?Sized> SyntaxChecker for &T {
    fn check_syntax(
        &self,
        source: &str,
        filename: &str,
        options: &ParseOptions,
    ) -> Option<Diagnostic> {
        (**self).check_syntax(source, filename, options)
    }
}
