use querylens::response::{
    ExecuteRequest, QueryOutcome, ResponseError, ResultSet, parse_response, parse_response_value,
};
use querylens::Value;
use serde_json::json;

fn rows_of(outcome: QueryOutcome) -> ResultSet {
    match outcome {
        QueryOutcome::Rows(set) => set,
        QueryOutcome::Failed { message } => panic!("unexpected failure: {message}"),
    }
}

#[test]
fn test_payload_shape() {
    let body = r#"{
        "success": true,
        "data": {"payload": {"data": [{"city": "Oslo", "n": 3}], "sql": "SELECT city, n FROM t"}}
    }"#;
    let set = rows_of(parse_response(body).unwrap());

    assert_eq!(set.keys, vec!["city", "n"]);
    assert_eq!(set.rows.len(), 1);
    assert_eq!(set.rows[0]["n"], Value::Integer(3));
    assert_eq!(set.sql.as_deref(), Some("SELECT city, n FROM t"));
}

#[test]
fn test_flat_shape() {
    let body = r#"{"success": true, "data": [{"a": 1.5}, {"a": "x"}]}"#;
    let set = rows_of(parse_response(body).unwrap());

    assert_eq!(set.keys, vec!["a"]);
    assert_eq!(set.rows[0]["a"], Value::Float(1.5));
    assert_eq!(set.rows[1]["a"], Value::String("x".into()));
    assert!(set.sql.is_none());
}

#[test]
fn test_bare_array() {
    let set = rows_of(parse_response(r#"[{"k": true}]"#).unwrap());
    assert_eq!(set.rows[0]["k"], Value::Boolean(true));
}

#[test]
fn test_empty_result() {
    let set = rows_of(parse_response(r#"{"success": true, "data": []}"#).unwrap());
    assert!(set.is_empty());
    assert!(set.keys.is_empty());
}

#[test]
fn test_keys_in_first_seen_order() {
    let set = rows_of(
        parse_response_value(json!([
            {"b": 1, "a": 2},
            {"c": 3, "a": 4},
            {"d": null},
        ]))
        .unwrap(),
    );
    assert_eq!(set.keys, vec!["b", "a", "c", "d"]);
    assert!(!set.rows[0].contains_key("c"));
    assert_eq!(set.rows[2]["d"], Value::Null);
}

#[test]
fn test_nested_values_become_text() {
    let set = rows_of(parse_response_value(json!([{"meta": {"x": 1}, "tags": [1, 2]}])).unwrap());
    assert_eq!(set.rows[0]["meta"], Value::String(r#"{"x":1}"#.into()));
    assert_eq!(set.rows[0]["tags"], Value::String("[1,2]".into()));
}

#[test]
fn test_failure_with_error() {
    let outcome = parse_response(r#"{"success": false, "error": "table not found"}"#).unwrap();
    assert_eq!(
        outcome,
        QueryOutcome::Failed {
            message: "table not found".into()
        }
    );
}

#[test]
fn test_failure_with_message() {
    let outcome = parse_response(r#"{"success": false, "message": "timeout"}"#).unwrap();
    assert_eq!(
        outcome,
        QueryOutcome::Failed {
            message: "timeout".into()
        }
    );
}

#[test]
fn test_failure_without_details() {
    let outcome = parse_response(r#"{"success": false}"#).unwrap();
    assert_eq!(
        outcome,
        QueryOutcome::Failed {
            message: "Query failed".into()
        }
    );
}

#[test]
fn test_success_without_data() {
    let err = parse_response(r#"{"success": true}"#).unwrap_err();
    assert!(matches!(err, ResponseError::UnexpectedShape(_)));
}

#[test]
fn test_row_that_is_not_an_object() {
    let err = parse_response(r#"{"success": true, "data": [{"a": 1}, 2]}"#).unwrap_err();
    assert!(matches!(err, ResponseError::RowNotObject(1)));
}

#[test]
fn test_invalid_json() {
    let err = parse_response("{not json").unwrap_err();
    assert!(matches!(err, ResponseError::Json(_)));

    let err = parse_response(r#"{"rows": []}"#).unwrap_err();
    assert!(matches!(err, ResponseError::Json(_)));
}

#[test]
fn test_execute_request_body() {
    let request = ExecuteRequest::new("how many users signed up in May?", "u-1");
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({"query": "how many users signed up in May?", "userId": "u-1"})
    );
}
