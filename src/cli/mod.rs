//! CLI support for statscript
//!
//! Provides programmatic access to the `statscript` binary's
//! functionality for embedding in content pipelines and build tools.

mod eval;

pub use eval::{EvalOptions, EvalResult, NumericMode, execute_eval, execute_scan};

use std::io;

use thiserror::Error;

use crate::lexer::LexError;
use crate::parser::ParseError;
use crate::registry::RegistryError;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("scan error: {0}")]
    Scan(#[from] LexError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("no stat set provided; use --stats or pipe JSON to stdin")]
    NoStats,

    #[error("stat set must be a JSON object of name -> number")]
    StatSetShape,

    #[error("stat '{0}' is not representable in the selected numeric mode")]
    NonNumericStat(String),
}
