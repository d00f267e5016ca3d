//! JSON <-> row conversion utilities

use rust_decimal::prelude::ToPrimitive;
use serde::Serializer;

use crate::value::{Number, Row, Value};

/// Convert a serde_json::Value into a row cell.
///
/// Nested arrays and objects are flattened to their compact JSON text.
pub fn json_to_value(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
        },
        serde_json::Value::String(s) => Value::String(s),
        nested @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
            Value::String(nested.to_string())
        }
    }
}

/// Convert a row cell back to serde_json::Value
pub fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
    }
}

/// Convert a JSON object into a row, appending unseen column names to `keys`
/// in the order they are first encountered.
pub fn object_to_row(
    object: serde_json::Map<String, serde_json::Value>,
    keys: &mut Vec<String>,
) -> Row {
    let mut row = Row::with_capacity(object.len());
    for (k, v) in object {
        if !keys.contains(&k) {
            keys.push(k.clone());
        }
        row.insert(k, json_to_value(v));
    }
    row
}

/// Whole exact numbers become JSON integers, everything else a float.
pub fn number_to_json(n: &Number) -> serde_json::Value {
    if let Number::Exact(d) = n {
        let d = d.normalize();
        if d.scale() == 0
            && let Some(i) = d.to_i64()
        {
            return serde_json::Value::Number(i.into());
        }
    }
    serde_json::Number::from_f64(n.to_f64())
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

/// `serialize_with` adapter for numeric fields
pub fn serialize_number<S: Serializer>(n: &Number, serializer: S) -> Result<S::Ok, S::Error> {
    serde::Serialize::serialize(&number_to_json(n), serializer)
}
