use serde::{Deserialize, Serialize};

use super::node::{QueryType, VisualQuery};

/// Body sent to the backend when a query is saved.
///
/// Only the compiled text is persisted, never the clause nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQuery {
    pub name: String,
    pub description: String,
    pub query: String,
    #[serde(rename = "type")]
    pub query_type: QueryType,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl VisualQuery {
    pub fn to_saved(&self, user_id: impl Into<String>, tags: Vec<String>) -> SavedQuery {
        SavedQuery {
            name: self.name.clone(),
            description: self.description.clone(),
            query: self.compile(),
            query_type: self.query_type,
            user_id: user_id.into(),
            tags,
        }
    }
}
