use parse_estree::options::ParseOptions;
use parse_estree::parse;
use serde_json::json;
use serde_json::Value;

fn attached(source: &str) -> Value {
  let options = ParseOptions {
    attach_comment: true,
    ..ParseOptions::default()
  };
  let program = parse(source, &options, None).expect("expected parse success");
  serde_json::to_value(&program).unwrap()
}

#[test]
fn leading_and_trailing_comments_attach_to_statement() {
  let program = attached("/* a */ x; // b");
  let stmt = &program["body"][0];
  assert_eq!(stmt["leadingComments"], json!([{"type": "Block", "value": " a "}]));
  assert_eq!(stmt["trailingComments"], json!([{"type": "Line", "value": " b"}]));
  // The statement takes the comment over from the identifier it starts with.
  assert!(stmt["expression"].get("leadingComments").is_none());
  assert!(program.get("comments").is_none());
}

#[test]
fn comments_between_statements() {
  let program = attached("a;\n// between\nb;");
  let body = program["body"].as_array().unwrap();
  assert_eq!(body[0]["trailingComments"][0]["value"], " between");
  assert_eq!(body[1]["leadingComments"][0]["value"], " between");
}

#[test]
fn empty_block_gets_inner_comments() {
  let program = attached("function f() { /* x */ }");
  let block = &program["body"][0]["body"];
  assert_eq!(block["type"], "BlockStatement");
  assert_eq!(block["innerComments"], json!([{"type": "Block", "value": " x "}]));
  assert!(block.get("leadingComments").is_none());
  assert!(block.get("trailingComments").is_none());
}

#[test]
fn collected_comments_carry_positions_on_request() {
  let options = ParseOptions {
    comment: true,
    range: true,
    loc: true,
    ..ParseOptions::default()
  };
  let program = parse("a; /* x */\n// y", &options, None).unwrap();
  let program = serde_json::to_value(&program).unwrap();
  assert_eq!(
    program["comments"],
    json!([
      {
        "type": "Block",
        "value": " x ",
        "range": [3, 10],
        "loc": {"start": {"line": 1, "column": 3}, "end": {"line": 1, "column": 10}},
      },
      {
        "type": "Line",
        "value": " y",
        "range": [11, 15],
        "loc": {"start": {"line": 2, "column": 0}, "end": {"line": 2, "column": 4}},
      },
    ])
  );
  // Collecting does not attach.
  assert!(program["body"][0].get("trailingComments").is_none());
}
