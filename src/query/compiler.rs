use thiserror::Error;
use tracing::debug;

use super::node::{ClauseKind, QueryNode, QueryType};

/// Question sent for a file query when neither SELECT nor WHERE has text
pub const FILE_FALLBACK_PROMPT: &str = "Extract all relevant information from the document";

/// What to do when several nodes share a clause kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Use the first node of each kind; later ones are ignored
    #[default]
    FirstWins,
    /// Use the last node of each kind
    LastWins,
    /// Fail compilation
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("more than one {0} clause")]
    DuplicateClause(ClauseKind),
}

/// Turns clause nodes into query text.
///
/// The output is opaque to this crate: values are concatenated verbatim and
/// the backend is responsible for validating them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler {
    pub policy: DuplicatePolicy,
}

impl Compiler {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Compiler { policy }
    }

    pub fn compile(
        &self,
        nodes: &[QueryNode],
        fallback_target: &str,
        query_type: QueryType,
    ) -> Result<String, CompileError> {
        let clauses = self.pick(nodes)?;
        Ok(match query_type {
            QueryType::Database => database_query(&clauses, fallback_target),
            QueryType::File => file_question(&clauses),
        })
    }

    /// Trimmed text chosen for each clause kind, indexed by `ClauseKind as usize`.
    fn pick<'a>(&self, nodes: &'a [QueryNode]) -> Result<[Option<&'a str>; 7], CompileError> {
        let mut chosen: [Option<&QueryNode>; 7] = [None; 7];
        for node in nodes {
            let slot = &mut chosen[node.kind as usize];
            match (slot.is_some(), self.policy) {
                (false, _) | (true, DuplicatePolicy::LastWins) => *slot = Some(node),
                (true, DuplicatePolicy::FirstWins) => {
                    debug!(id = %node.id, kind = %node.kind, "ignoring duplicate clause");
                }
                (true, DuplicatePolicy::Reject) => {
                    return Err(CompileError::DuplicateClause(node.kind));
                }
            }
        }
        Ok(chosen.map(|node| node.map(|n| n.value.trim()).filter(|v| !v.is_empty())))
    }
}

/// Compile with first-wins duplicate handling. Never fails.
///
/// # Examples
///
/// ```
/// use querylens::query::{compile, QueryType};
///
/// assert_eq!(compile(&[], "users", QueryType::Database), "SELECT * FROM users");
/// ```
pub fn compile(nodes: &[QueryNode], fallback_target: &str, query_type: QueryType) -> String {
    let clauses = Compiler::default()
        .pick(nodes)
        .unwrap_or([None; 7]);
    match query_type {
        QueryType::Database => database_query(&clauses, fallback_target),
        QueryType::File => file_question(&clauses),
    }
}

fn database_query(clauses: &[Option<&str>; 7], fallback_target: &str) -> String {
    let mut parts = Vec::with_capacity(ClauseKind::ALL.len());
    for kind in ClauseKind::ALL {
        let text = match (kind, clauses[kind as usize]) {
            (_, Some(text)) => text,
            (ClauseKind::Select, None) => "*",
            (ClauseKind::From, None) if !fallback_target.trim().is_empty() => fallback_target.trim(),
            (_, None) => continue,
        };
        parts.push(format!("{} {}", kind.keyword(), text));
    }
    parts.join(" ")
}

fn file_question(clauses: &[Option<&str>; 7]) -> String {
    let parts: Vec<&str> = [ClauseKind::Select, ClauseKind::Where]
        .into_iter()
        .filter_map(|kind| clauses[kind as usize])
        .collect();
    if parts.is_empty() {
        FILE_FALLBACK_PROMPT.to_string()
    } else {
        parts.join(" ")
    }
}
