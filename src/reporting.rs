//! Console progress lines for a check run.
//!
//! `Checking <path>` goes to stderr before a file is parsed and `Done <path>`
//! goes to stdout once it passes. Nothing else is printed unless verbose.

use colored::Colorize;
use std::path::{Path, PathBuf};

/// Receives progress events from the validator.
pub trait Progress {
    fn checking(&mut self, path: &Path);
    fn done(&mut self, path: &Path);
    /// Diagnostic chatter; sinks may drop it.
    fn note(&mut self, message: &str);
}

/// Writes progress to the terminal.
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    verbose: bool,
}

impl ConsoleProgress {
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Progress for ConsoleProgress {
    fn checking(&mut self, path: &Path) {
        eprintln!("{} {}", "Checking".cyan(), path.display());
    }

    fn done(&mut self, path: &Path) {
        println!("{} {}", "Done".green(), path.display());
    }

    fn note(&mut self, message: &str) {
        if self.verbose {
            eprintln!("{}", message.dimmed());
        }
    }
}

/// One recorded progress event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Checking(PathBuf),
    Done(PathBuf),
    Note(String),
}

/// Keeps events in memory instead of printing them.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events other than notes, i.e. what a user would see without `--verbose`.
    #[must_use]
    pub fn visible(&self) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| !matches!(e, Event::Note(_)))
            .collect()
    }
}

impl Progress for Recorder {
    fn checking(&mut self, path: &Path) {
        self.events.push(Event::Checking(path.to_path_buf()));
    }

    fn done(&mut self, path: &Path) {
        self.events.push(Event::Done(path.to_path_buf()));
    }

    fn note(&mut self, message: &str) {
        self.events.push(Event::Note(message.to_string()));
    }
}
