use parse_estree::options::ParseOptions;
use parse_estree::parse;
use similar::TextDiff;

fn dump(source: &str, jsx: bool) -> String {
  let options = ParseOptions {
    jsx,
    range: true,
    loc: true,
    tokens: true,
    ..ParseOptions::default()
  };
  let program = parse(source, &options, None)
    .unwrap_or_else(|err| panic!("failed to parse {:?} with jsx={}: {}", source, jsx, err));
  serde_json::to_string_pretty(&program).unwrap()
}

// Sources without JSX must produce the same tree whether or not JSX is enabled.
#[test]
fn jsx_flag_does_not_change_plain_programs() {
  let sources = [
    "a < b > c;",
    "if (a < b) { x = y > z; }",
    "for (let i = 0; i < n; i++) {}",
    "x = a < b ? c : d;",
    "f(a < 1, b > 2);",
    "a = b\n<c;",
  ];
  for source in sources {
    let plain = dump(source, false);
    let with_jsx = dump(source, true);
    if plain != with_jsx {
      let diff = TextDiff::from_lines(&plain, &with_jsx);
      panic!(
        "output for {:?} changed with jsx enabled:\n{}",
        source,
        diff.unified_diff().header("jsx=false", "jsx=true")
      );
    };
  }
}

#[test]
fn self_closing_element_requires_jsx() {
  assert!(parse("<a/>", &ParseOptions::default(), None).is_err());
  let options = ParseOptions {
    jsx: true,
    ..ParseOptions::default()
  };
  let program = parse("<a/>", &options, None).unwrap();
  let program = serde_json::to_value(&program).unwrap();
  let elem = &program["body"][0]["expression"];
  assert_eq!(elem["type"], "JSXElement");
  assert_eq!(elem["openingElement"]["selfClosing"], true);
  assert_eq!(elem["closingElement"], serde_json::Value::Null);
  assert_eq!(elem["children"], serde_json::json!([]));
}

#[test]
fn jsx_tokens() {
  let options = ParseOptions {
    jsx: true,
    tokens: true,
    ..ParseOptions::default()
  };
  let program = parse("<a:b c={1}>hi</a:b>", &options, None).unwrap();
  let tokens = program.stx.tokens.as_ref().unwrap();
  let kinds: Vec<serde_json::Value> = tokens
    .iter()
    .map(|t| serde_json::to_value(t.kind).unwrap())
    .collect();
  let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
  assert_eq!(values, vec![
    "<", "a", ":", "b", "c", "=", "{", "1", "}", ">", "hi", "</", "a", ":", "b", ">",
  ]);
  assert_eq!(kinds[1], "JSXIdentifier");
  assert_eq!(kinds[7], "Numeric");
  assert_eq!(kinds[10], "JSXText");
}
