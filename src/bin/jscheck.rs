// src/bin/jscheck.rs
use clap::Parser;
use colored::Colorize;

use jscheck_core::cli::{self, Cli};
use jscheck_core::exit::JsCheckExit;

fn main() -> JsCheckExit {
    let cli = Cli::parse();
    match cli::handle_check(&cli) {
        Ok(_) => JsCheckExit::Success,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            JsCheckExit::from(&e)
        }
    }
}
