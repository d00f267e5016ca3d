pub mod chart;
pub mod cli;
pub mod convert;
pub mod query;
pub mod response;
pub mod upload;
pub mod value;

pub use chart::{ChartOptions, ChartSeries, analyze, analyze_with};
pub use query::{ClauseKind, Compiler, DuplicatePolicy, QueryNode, QueryType, VisualQuery, compile};
pub use response::{ExecuteRequest, QueryOutcome, ResponseError, ResultSet, parse_response};
pub use upload::{BundleStatus, TaskStatus};
pub use value::{Number, Row, Value};
