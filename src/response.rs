//! Query-execution backend payloads.
//!
//! The backend answers successful queries in one of two shapes:
//!
//! ```text
//! { "success": true, "data": { "payload": { "data": [...rows], "sql": "..." } } }
//! { "success": true, "data": [...rows] }
//! ```
//!
//! [`parse_response`] checks the shape once and hands back a [`QueryOutcome`],
//! so nothing downstream has to guess which one it got.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{convert::object_to_row, value::Row};

/// Rows of a successful query, with the column names in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub keys: Vec<String>,
    pub rows: Vec<Row>,
    /// SQL the backend generated for a natural-language question, if reported
    pub sql: Option<String>,
}

impl ResultSet {
    /// Build a result set from raw JSON rows.
    ///
    /// Every element must be a JSON object.
    pub fn from_json_rows(
        rows: Vec<serde_json::Value>,
        sql: Option<String>,
    ) -> Result<Self, ResponseError> {
        let mut keys = Vec::new();
        let mut out = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            match row {
                serde_json::Value::Object(object) => out.push(object_to_row(object, &mut keys)),
                _ => return Err(ResponseError::RowNotObject(index)),
            }
        }
        Ok(ResultSet {
            keys,
            rows: out,
            sql,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Normalized answer from the execution backend.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Rows(ResultSet),
    Failed { message: String },
}

/// Errors raised while reading a backend response.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unrecognized response shape: {0}")]
    UnexpectedShape(String),

    #[error("row {0} is not a JSON object")]
    RowNotObject(usize),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope {
    Wrapped(RawResponse),
    Bare(Vec<serde_json::Value>),
}

#[derive(Deserialize)]
struct RawResponse {
    success: bool,
    #[serde(default)]
    data: Option<RawData>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawData {
    Payload { payload: RawPayload },
    Rows(Vec<serde_json::Value>),
}

#[derive(Deserialize)]
struct RawPayload {
    #[serde(default)]
    data: Vec<serde_json::Value>,
    #[serde(default)]
    sql: Option<String>,
}

/// Parse and normalize a backend response body.
///
/// A bare JSON array is accepted as a row list without an envelope.
///
/// # Examples
///
/// ```
/// use querylens::response::{parse_response, QueryOutcome};
///
/// let body = r#"{"success": true, "data": [{"city": "Oslo", "n": 3}]}"#;
/// match parse_response(body).unwrap() {
///     QueryOutcome::Rows(set) => assert_eq!(set.keys, vec!["city", "n"]),
///     QueryOutcome::Failed { .. } => unreachable!(),
/// }
/// ```
pub fn parse_response(text: &str) -> Result<QueryOutcome, ResponseError> {
    let envelope: Envelope = serde_json::from_str(text)?;
    normalize(envelope)
}

/// Same as [`parse_response`] for an already-decoded JSON value.
pub fn parse_response_value(value: serde_json::Value) -> Result<QueryOutcome, ResponseError> {
    let envelope: Envelope = serde_json::from_value(value)?;
    normalize(envelope)
}

fn normalize(envelope: Envelope) -> Result<QueryOutcome, ResponseError> {
    let raw = match envelope {
        Envelope::Bare(rows) => return ResultSet::from_json_rows(rows, None).map(QueryOutcome::Rows),
        Envelope::Wrapped(raw) => raw,
    };

    if !raw.success {
        let message = raw
            .error
            .or(raw.message)
            .unwrap_or_else(|| "Query failed".to_string());
        tracing::debug!(%message, "backend reported a failed query");
        return Ok(QueryOutcome::Failed { message });
    }

    let set = match raw.data {
        Some(RawData::Payload { payload }) => ResultSet::from_json_rows(payload.data, payload.sql)?,
        Some(RawData::Rows(rows)) => ResultSet::from_json_rows(rows, None)?,
        None => {
            return Err(ResponseError::UnexpectedShape(
                "successful response carries no row data".to_string(),
            ));
        }
    };
    tracing::debug!(rows = set.rows.len(), columns = set.keys.len(), "normalized query response");
    Ok(QueryOutcome::Rows(set))
}

/// Body posted to the execution backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub query: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl ExecuteRequest {
    pub fn new(query: impl Into<String>, user_id: impl Into<String>) -> Self {
        ExecuteRequest {
            query: query.into(),
            user_id: user_id.into(),
        }
    }
}
