//! # Visual query builder
//!
//! A visual query is an ordered list of clause nodes edited one at a time in
//! the builder. Only the compiled text ever leaves the client:
//!
//! - [`node`] - clause kinds, nodes and the [`VisualQuery`] aggregate
//! - [`compiler`] - concatenation of nodes into SQL or a document question
//! - [`ids`] - injectable node id generators
//! - [`saved`] - payload for persisting a compiled query
//!
//! ```
//! use querylens::query::{ClauseKind, QueryType, SequentialIds, VisualQuery};
//!
//! let mut ids = SequentialIds::new("node");
//! let mut query = VisualQuery::new("q1", "Top customers", QueryType::Database, "customers");
//! let id = query.add_node(ClauseKind::Limit, &mut ids).id.clone();
//! query.update_node(&id, "5");
//!
//! assert_eq!(query.compile(), "SELECT * FROM customers LIMIT 5");
//! ```

pub mod compiler;
pub mod ids;
pub mod node;
pub mod saved;

pub use compiler::{CompileError, Compiler, DuplicatePolicy, FILE_FALLBACK_PROMPT, compile};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use node::{ClauseKind, QueryNode, QueryType, VisualQuery};
pub use saved::SavedQuery;
