//! Compile a visual query definition

use super::CliError;
use crate::{
    query::{Compiler, DuplicatePolicy, VisualQuery},
    response::ExecuteRequest,
};

/// Options for the compile command
#[derive(Debug, Clone, Default)]
pub struct CompileCommandOptions {
    /// `VisualQuery` JSON
    pub input: Option<String>,
    pub policy: DuplicatePolicy,
    /// When set, wrap the compiled text in an execution request for this user
    pub user_id: Option<String>,
}

/// Result of a compile operation
#[derive(Debug, PartialEq)]
pub enum CompileOutput {
    /// Compiled query text
    Text(String),
    /// Execution request body
    Request(ExecuteRequest),
}

pub fn parse_policy(name: &str) -> Result<DuplicatePolicy, CliError> {
    match name.to_lowercase().as_str() {
        "first" | "first-wins" => Ok(DuplicatePolicy::FirstWins),
        "last" | "last-wins" => Ok(DuplicatePolicy::LastWins),
        "reject" => Ok(DuplicatePolicy::Reject),
        _ => Err(CliError::UnknownPolicy(name.to_string())),
    }
}

pub fn execute_compile(options: &CompileCommandOptions) -> Result<CompileOutput, CliError> {
    let json = options.input.as_ref().ok_or(CliError::NoInput)?;
    let query: VisualQuery = serde_json::from_str(json)?;

    let text = query.compile_with(&Compiler::new(options.policy))?;
    tracing::info!(id = %query.id, nodes = query.nodes.len(), "compiled visual query");

    Ok(match &options.user_id {
        Some(user) => CompileOutput::Request(ExecuteRequest::new(text, user.clone())),
        None => CompileOutput::Text(text),
    })
}
