use parse_estree::options::ParseOptions;
use parse_estree::options::SourceType;
use parse_estree::parse;
use parse_estree::parse_module;
use parse_estree::parse_script;
use serde_json::json;
use serde_json::Value;

fn to_json(source: &str, options: &ParseOptions) -> Value {
  let program = parse(source, options, None).expect("expected parse success");
  serde_json::to_value(&program).unwrap()
}

#[test]
fn variable_declaration_with_ranges() {
  let options = ParseOptions {
    range: true,
    ..ParseOptions::default()
  };
  assert_eq!(
    to_json("var a = 1;", &options),
    json!({
      "type": "Program",
      "body": [{
        "type": "VariableDeclaration",
        "declarations": [{
          "type": "VariableDeclarator",
          "id": {"type": "Identifier", "name": "a", "range": [4, 5]},
          "init": {"type": "Literal", "value": 1, "raw": "1", "range": [8, 9]},
          "range": [4, 9],
        }],
        "kind": "var",
        "range": [0, 10],
      }],
      "sourceType": "script",
      "range": [0, 10],
    })
  );
}

#[test]
fn literal_values() {
  let program = to_json("null; true; 'a\\u0062'; 0x10; 1n; 1e3;", &ParseOptions::default());
  let values: Vec<&Value> = program["body"]
    .as_array()
    .unwrap()
    .iter()
    .map(|s| &s["expression"]["value"])
    .collect();
  assert_eq!(values, vec![
    &Value::Null,
    &json!(true),
    &json!("ab"),
    &json!(16),
    &Value::Null,
    &json!(1000),
  ]);
  assert_eq!(program["body"][2]["expression"]["raw"], "'a\\u0062'");
  assert_eq!(program["body"][4]["expression"]["bigint"], "1");
}

#[test]
fn source_type_entry_points() {
  let options = ParseOptions::default();
  let module = parse_module("export const a = 1;", &options, None).unwrap();
  assert_eq!(module.stx.source_type, SourceType::Module);
  assert!(parse_script("export const a = 1;", &ParseOptions::module(), None).is_err());

  // `await` is an ordinary identifier in scripts only.
  assert!(parse_script("var await = 1;", &options, None).is_ok());
  assert!(parse_module("var await = 1;", &options, None).is_err());
}

#[test]
fn tokens_and_errors_are_attached_on_request() {
  let options = ParseOptions {
    tokens: true,
    tolerant: true,
    ..ParseOptions::default()
  };
  let program = to_json("a = /b/;", &options);
  assert_eq!(
    program["tokens"],
    json!([
      {"type": "Identifier", "value": "a"},
      {"type": "Punctuator", "value": "="},
      {"type": "RegularExpression", "value": "/b/", "regex": {"pattern": "b", "flags": ""}},
      {"type": "Punctuator", "value": ";"},
    ])
  );
  assert_eq!(program["errors"], json!([]));

  let program = to_json("a = /b/;", &ParseOptions::default());
  assert!(program.get("tokens").is_none());
  assert!(program.get("errors").is_none());
  assert!(program.get("comments").is_none());
}

#[test]
fn html_comments_only_in_scripts() {
  let options = ParseOptions {
    comment: true,
    ..ParseOptions::default()
  };
  let program = to_json("<!-- hidden\na;", &options);
  assert_eq!(program["body"].as_array().unwrap().len(), 1);
  assert_eq!(program["comments"][0]["type"], "Line");

  assert!(parse_module("<!-- hidden\na;", &options, None).is_err());
}

#[test]
fn error_serializes_with_position() {
  let err = parse("var 1;", &ParseOptions::default(), None).unwrap_err();
  assert_eq!(
    serde_json::to_value(&err).unwrap(),
    json!({
      "message": "Line 1: Unexpected number",
      "description": "Unexpected number",
      "index": 4,
      "line": 1,
      "column": 5,
    })
  );
  assert_eq!(err.to_string(), "Line 1: Unexpected number");
}
