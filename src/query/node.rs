use serde::{Deserialize, Serialize};

use super::{
    compiler::{CompileError, Compiler, compile},
    ids::IdGenerator,
};

/// Kind of clause a node contributes.
///
/// Declaration order is the order clauses appear in compiled SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClauseKind {
    Select,
    From,
    Where,
    Join,
    Group,
    Order,
    Limit,
}

impl ClauseKind {
    pub const ALL: [ClauseKind; 7] = [
        ClauseKind::Select,
        ClauseKind::From,
        ClauseKind::Where,
        ClauseKind::Join,
        ClauseKind::Group,
        ClauseKind::Order,
        ClauseKind::Limit,
    ];

    /// SQL keyword that introduces the clause
    pub fn keyword(self) -> &'static str {
        match self {
            ClauseKind::Select => "SELECT",
            ClauseKind::From => "FROM",
            ClauseKind::Where => "WHERE",
            ClauseKind::Join => "JOIN",
            ClauseKind::Group => "GROUP BY",
            ClauseKind::Order => "ORDER BY",
            ClauseKind::Limit => "LIMIT",
        }
    }
}

impl std::fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Where a query is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    #[default]
    Database,
    File,
}

/// One clause in the builder. `value` is free text used verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ClauseKind,
    #[serde(default)]
    pub value: String,
    /// Carried through untouched; no clause reads it
    #[serde(default)]
    pub parameters: serde_json::Map<String, serde_json::Value>,
}

impl QueryNode {
    pub fn new(id: impl Into<String>, kind: ClauseKind, value: impl Into<String>) -> Self {
        QueryNode {
            id: id.into(),
            kind,
            value: value.into(),
            parameters: serde_json::Map::new(),
        }
    }
}

/// Builder state for one query. Lives only as long as the editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualQuery {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub nodes: Vec<QueryNode>,
    #[serde(rename = "queryType", default)]
    pub query_type: QueryType,
    /// Table or document the query runs against when no FROM clause is given
    #[serde(default)]
    pub target: String,
}

impl VisualQuery {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        query_type: QueryType,
        target: impl Into<String>,
    ) -> Self {
        VisualQuery {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            nodes: Vec::new(),
            query_type,
            target: target.into(),
        }
    }

    /// Append an empty clause of `kind` with a fresh id.
    pub fn add_node(&mut self, kind: ClauseKind, ids: &mut impl IdGenerator) -> &QueryNode {
        self.nodes.push(QueryNode::new(ids.next_id(), kind, ""));
        &self.nodes[self.nodes.len() - 1]
    }

    /// Replace the text of node `id`. Returns false if no such node exists.
    pub fn update_node(&mut self, id: &str, value: impl Into<String>) -> bool {
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                node.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_node(&mut self, id: &str) -> Option<QueryNode> {
        let pos = self.nodes.iter().position(|n| n.id == id)?;
        Some(self.nodes.remove(pos))
    }

    /// Compile with the default first-wins duplicate handling
    pub fn compile(&self) -> String {
        compile(&self.nodes, &self.target, self.query_type)
    }

    pub fn compile_with(&self, compiler: &Compiler) -> Result<String, CompileError> {
        compiler.compile(&self.nodes, &self.target, self.query_type)
    }
}
