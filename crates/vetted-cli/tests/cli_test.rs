use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;

const SCHEMA: &str = r#"{
    "type": "object",
    "properties": {
        "name": {"type": "string"},
        "age": {"type": "integer", "minimum": 0},
        "role": {"type": "string", "required": false, "default": "guest"}
    },
    "additionalProperties": false
}"#;

fn fixture(name: &str, contents: &str) -> PathBuf {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn vetted(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_vetted"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // the child may exit before reading stdin
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());
    child.wait_with_output().unwrap()
}

fn schema_path(test: &str) -> String {
    fixture(&format!("{test}_schema.json"), SCHEMA)
        .display()
        .to_string()
}

#[test]
fn test_valid_data_from_stdin() {
    let output = vetted(
        &[&schema_path("valid_stdin"), "--print"],
        r#"{"name": "Ada", "age": 36}"#,
    );
    assert_eq!(output.status.code(), Some(0));

    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        printed,
        serde_json::json!({"name": "Ada", "age": 36, "role": "guest"})
    );
}

#[test]
fn test_invalid_data_exits_with_one() {
    let data = fixture("cli_invalid.json", r#"{"name": "Ada", "age": -1, "x": 0}"#);
    let output = vetted(&[&schema_path("invalid"), &data.display().to_string()], "");
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("validation failed with 2 errors"));
    assert!(stderr.contains("less-than-minimum at age"));
    assert!(stderr.contains("forbidden-property"));
}

#[test]
fn test_coerce_flag() {
    let output = vetted(
        &[&schema_path("coerce"), "--coerce", "--print"],
        r#"{"name": "Ada", "age": "36", "x": 0}"#,
    );
    assert_eq!(output.status.code(), Some(0));

    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        printed,
        serde_json::json!({"name": "Ada", "age": 36, "role": "guest"})
    );
}

#[test]
fn test_optional_by_default_flag() {
    let output = vetted(&[&schema_path("optional"), "--optional-by-default"], "{}");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_schema_error_exits_with_two() {
    let schema = fixture("cli_bad_schema.json", r#"{"type": "colour"}"#);
    let output = vetted(&[&schema.display().to_string()], "1");
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("field type 'colour' is not supported"));
}

#[test]
fn test_malformed_json_exits_with_two() {
    let output = vetted(&[&schema_path("malformed")], "{not json");
    assert_eq!(output.status.code(), Some(2));
    assert!(
        String::from_utf8(output.stderr)
            .unwrap()
            .contains("decoding <stdin> as JSON")
    );
}

#[test]
fn test_missing_schema_file_exits_with_two() {
    let output = vetted(&["/nonexistent/schema.json"], "{}");
    assert_eq!(output.status.code(), Some(2));
}
