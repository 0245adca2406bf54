pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod manifest;
pub mod reporting;
pub mod syntax;
pub mod validator;
