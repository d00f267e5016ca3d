//! CLI support for querylens
//!
//! Each subcommand is exposed as a plain function over an options struct so
//! the same behaviour can be driven from tests or embedded elsewhere.

mod chart;
mod compile;
mod status;

pub use chart::{ChartCommandOptions, execute_chart};
pub use compile::{CompileCommandOptions, CompileOutput, execute_compile, parse_policy};
pub use status::{StatusCommandOptions, execute_status};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid response: {0}")]
    Response(#[from] crate::ResponseError),

    #[error("Compile error: {0}")]
    Compile(#[from] crate::query::CompileError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Unknown duplicate policy: '{0}' (expected first, last or reject)")]
    UnknownPolicy(String),
}
