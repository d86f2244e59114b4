use assert_cmd::Command;
use serde_json::Value;
use std::time::Duration;
use tempfile::tempdir;

fn parse_estree() -> Command {
  let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("parse-estree");
  cmd.timeout(Duration::from_secs(5));
  cmd
}

fn stdout_json(stdout: &[u8]) -> Value {
  serde_json::from_slice(stdout).expect("stdout should be valid JSON")
}

#[test]
fn parses_file_to_estree_json() {
  let dir = tempdir().unwrap();
  let path = dir.path().join("input.js");
  std::fs::write(&path, "var a = 1;").unwrap();

  let assert = parse_estree()
    .arg("parse")
    .arg(&path)
    .arg("--range")
    .assert()
    .success();
  let output = stdout_json(&assert.get_output().stdout);
  assert_eq!(output["type"], "Program");
  assert_eq!(output["sourceType"], "script");
  assert_eq!(output["body"][0]["type"], "VariableDeclaration");
  assert_eq!(output["range"], serde_json::json!([0, 10]));
}

#[test]
fn reads_stdin_and_applies_json_options() {
  let assert = parse_estree()
    .args(["parse", "--options", r#"{"jsx":true,"sourceType":"module"}"#])
    .write_stdin("export default <a/>;")
    .assert()
    .success();
  let output = stdout_json(&assert.get_output().stdout);
  assert_eq!(output["sourceType"], "module");
  assert_eq!(output["body"][0]["declaration"]["type"], "JSXElement");
}

#[test]
fn reports_syntax_errors_with_position() {
  let assert = parse_estree()
    .arg("parse")
    .write_stdin("var a = ;")
    .assert()
    .failure()
    .code(1);
  let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
  assert!(stderr.contains("<stdin>:1:9: Unexpected token ;"), "stderr: {stderr}");
  assert!(assert.get_output().stdout.is_empty());
}

#[test]
fn tolerant_parse_succeeds_with_errors() {
  let assert = parse_estree()
    .args(["parse", "--tolerant"])
    .write_stdin("1 +")
    .assert()
    .success();
  let output = stdout_json(&assert.get_output().stdout);
  assert_eq!(output["errors"][0]["description"], "Unexpected end of input");
}

#[test]
fn tokenizes() {
  let assert = parse_estree()
    .args(["tokenize", "--comment"])
    .write_stdin("a /* b */ ;")
    .assert()
    .success();
  let output = stdout_json(&assert.get_output().stdout);
  let kinds: Vec<&str> = output["tokens"]
    .as_array()
    .unwrap()
    .iter()
    .map(|t| t["type"].as_str().unwrap())
    .collect();
  assert_eq!(kinds, vec!["Identifier", "Block", "Punctuator"]);
}

#[test]
fn classifies_literals() {
  let assert = parse_estree()
    .args(["classify", "--strip-selector-prefix"])
    .write_stdin("$('.nav #main'); x = '<b>bold</b>';")
    .assert()
    .success();
  let output = stdout_json(&assert.get_output().stdout);
  assert_eq!(output["tokens"], serde_json::json!(["nav", "main"]));
  assert_eq!(output["htmlTokens"], serde_json::json!(["<b>bold</b>"]));
}

#[test]
fn rejects_malformed_options() {
  parse_estree()
    .args(["parse", "--options", "{not json"])
    .write_stdin("a")
    .assert()
    .failure()
    .code(2);
}
