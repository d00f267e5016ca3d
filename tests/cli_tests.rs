use querylens::cli::{
    ChartCommandOptions, CliError, CompileCommandOptions, CompileOutput, StatusCommandOptions,
    execute_chart, execute_compile, execute_status, parse_policy,
};
use querylens::{DuplicatePolicy, ExecuteRequest};
use serde_json::json;

const SALES: &str = r#"{"success": true, "data": {"payload": {"data": [
    {"category": "Electronics", "sales": 150},
    {"category": "Clothing", "sales": 200},
    {"category": "Electronics", "sales": 75}
]}}}"#;

fn chart(input: &str) -> ChartCommandOptions {
    ChartCommandOptions {
        input: Some(input.to_string()),
        ..ChartCommandOptions::default()
    }
}

#[test]
fn test_chart_command() {
    let output = execute_chart(&chart(SALES)).unwrap();
    assert_eq!(
        output,
        json!({
            "pie": {"key": "category", "data": [
                {"name": "Electronics", "value": 2},
                {"name": "Clothing", "value": 1}
            ]},
            "bar": {"key": "sales", "data": [
                {"name": "Electronics", "sales": 225},
                {"name": "Clothing", "sales": 200}
            ]}
        })
    );
}

#[test]
fn test_chart_command_colors() {
    let options = ChartCommandOptions {
        color_seed: Some(0),
        ..chart(SALES)
    };
    let output = execute_chart(&options).unwrap();
    assert_eq!(output["colors"], json!(["hsl(0, 70%, 50%)", "hsl(138, 70%, 50%)"]));
}

#[test]
fn test_chart_command_no_colors_without_pie() {
    let options = ChartCommandOptions {
        color_seed: Some(3),
        ..chart(r#"[{"n": 1}, {"n": 2}]"#)
    };
    let output = execute_chart(&options).unwrap();
    assert!(output.get("colors").is_none());
}

#[test]
fn test_chart_command_failed_query() {
    let err = execute_chart(&chart(r#"{"success": false, "error": "boom"}"#)).unwrap_err();
    assert!(matches!(err, CliError::QueryFailed(ref m) if m == "boom"));
    assert_eq!(err.to_string(), "Query failed: boom");
}

#[test]
fn test_chart_command_no_input() {
    let err = execute_chart(&ChartCommandOptions::default()).unwrap_err();
    assert!(matches!(err, CliError::NoInput));
}

#[test]
fn test_compile_command_text() {
    let options = CompileCommandOptions {
        input: Some(
            json!({
                "id": "q",
                "queryType": "database",
                "target": "users",
                "nodes": [{"id": "1", "type": "where", "value": "active"}]
            })
            .to_string(),
        ),
        ..CompileCommandOptions::default()
    };
    assert_eq!(
        execute_compile(&options).unwrap(),
        CompileOutput::Text("SELECT * FROM users WHERE active".into())
    );
}

#[test]
fn test_compile_command_request() {
    let options = CompileCommandOptions {
        input: Some(r#"{"id": "q", "queryType": "file", "nodes": []}"#.to_string()),
        user_id: Some("u-7".to_string()),
        ..CompileCommandOptions::default()
    };
    assert_eq!(
        execute_compile(&options).unwrap(),
        CompileOutput::Request(ExecuteRequest::new(
            "Extract all relevant information from the document",
            "u-7"
        ))
    );
}

#[test]
fn test_compile_command_reject_policy() {
    let options = CompileCommandOptions {
        input: Some(
            json!({
                "id": "q",
                "nodes": [
                    {"id": "1", "type": "limit", "value": "1"},
                    {"id": "2", "type": "limit", "value": "2"}
                ]
            })
            .to_string(),
        ),
        policy: DuplicatePolicy::Reject,
        user_id: None,
    };
    let err = execute_compile(&options).unwrap_err();
    assert_eq!(err.to_string(), "Compile error: more than one LIMIT clause");
}

#[test]
fn test_compile_command_bad_json() {
    let options = CompileCommandOptions {
        input: Some("[]".to_string()),
        ..CompileCommandOptions::default()
    };
    assert!(matches!(execute_compile(&options), Err(CliError::Json(_))));
}

#[test]
fn test_parse_policy() {
    assert_eq!(parse_policy("first").unwrap(), DuplicatePolicy::FirstWins);
    assert_eq!(parse_policy("Last").unwrap(), DuplicatePolicy::LastWins);
    assert_eq!(parse_policy("reject").unwrap(), DuplicatePolicy::Reject);
    assert!(matches!(parse_policy("random"), Err(CliError::UnknownPolicy(_))));
}

#[test]
fn test_status_command() {
    let options = StatusCommandOptions {
        input: Some(
            json!({
                "bundleId": "b-3",
                "status": "processing",
                "tasks": [
                    {"fileName": "a.pdf", "status": "completed"},
                    {"fileName": "b.pdf", "status": "error", "error": "corrupt file"},
                    {"fileName": "c.pdf", "status": "pending"},
                    {"fileName": "d.pdf", "status": "running"}
                ]
            })
            .to_string(),
        ),
    };
    let output = execute_status(&options).unwrap();

    assert_eq!(output["bundleId"], "b-3");
    assert_eq!(output["status"], "running");
    assert_eq!(output["finished"], false);
    assert_eq!(output["percentComplete"], 50);
    assert_eq!(output["progress"]["total"], 4);
    assert_eq!(output["failures"], json!([{"fileName": "b.pdf", "error": "corrupt file"}]));
}
