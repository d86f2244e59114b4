use parse_estree::classify::is_markup;
use parse_estree::options::ClassifyOptions;
use parse_estree::options::NonLiteralPolicy;
use parse_estree::options::TokenizeOptions;
use parse_estree::tokenize;
use parse_estree::tokenize::TokenEntry;
use parse_estree::tokenize::TokenKind;
use parse_estree::tokenize_c;
use serde_json::json;

#[test]
fn tokens_serialize_with_positions() {
  let options = TokenizeOptions {
    range: true,
    loc: true,
    ..TokenizeOptions::default()
  };
  let tokens = tokenize("let x\n= 1", &options, None).unwrap();
  assert_eq!(
    serde_json::to_value(&tokens).unwrap(),
    json!({
      "tokens": [
        {
          "type": "Keyword",
          "value": "let",
          "range": [0, 3],
          "loc": {"start": {"line": 1, "column": 0}, "end": {"line": 1, "column": 3}},
        },
        {
          "type": "Identifier",
          "value": "x",
          "range": [4, 5],
          "loc": {"start": {"line": 1, "column": 4}, "end": {"line": 1, "column": 5}},
        },
        {
          "type": "Punctuator",
          "value": "=",
          "range": [6, 7],
          "loc": {"start": {"line": 2, "column": 0}, "end": {"line": 2, "column": 1}},
        },
        {
          "type": "Numeric",
          "value": "1",
          "range": [8, 9],
          "loc": {"start": {"line": 2, "column": 2}, "end": {"line": 2, "column": 3}},
        },
      ],
    })
  );
  assert!(tokens.tokens[2].preceded_by_line_terminator);
  assert_eq!(tokens.tokens[2].line, 2);
}

#[test]
fn tolerant_tokenize_reports_errors() {
  let options = TokenizeOptions {
    tolerant: true,
    ..TokenizeOptions::default()
  };
  let tokens = tokenize("a # b", &options, None).unwrap();
  let values: Vec<&str> = tokens.tokens.iter().map(|t| t.value.as_str()).collect();
  assert_eq!(values, vec!["a", "b"]);
  let errors = tokens.errors.unwrap();
  assert_eq!(errors.len(), 1);
  assert_eq!(errors[0].index, 2);

  let err = tokenize("a # b", &TokenizeOptions::default(), None).unwrap_err();
  assert_eq!(err.description, "Invalid or unexpected token");
  assert!(tokenize("'abc", &TokenizeOptions::default(), None).is_err());
}

#[test]
fn transform_rewrites_each_token() {
  let mut upper = |mut t: TokenEntry| {
    if t.kind == TokenKind::Identifier {
      t.value = t.value.to_uppercase();
    };
    t
  };
  let tokens = tokenize("foo + bar", &TokenizeOptions::default(), Some(&mut upper)).unwrap();
  let values: Vec<&str> = tokens.tokens.iter().map(|t| t.value.as_str()).collect();
  assert_eq!(values, vec!["FOO", "+", "BAR"]);
}

fn classify(source: &str) -> parse_estree::classify::ClassifiedTokens {
  tokenize_c(source, &TokenizeOptions::default(), &ClassifyOptions::default(), None).unwrap()
}

#[test]
fn classifies_plain_words() {
  let out = classify("const x = 'foo bar'");
  assert_eq!(out.tokens, vec!["foo", "bar"]);
  assert!(out.html_tokens.is_empty());
}

#[test]
fn classifies_markup() {
  let out = classify("const x = '<div>hi</div>'");
  assert!(out.tokens.is_empty());
  assert_eq!(out.html_tokens, vec!["<div>hi</div>"]);

  assert!(is_markup("<DIV>x</DIV>"));
  assert!(is_markup("<div>x</div>"));
  assert!(!is_markup("not html"));
}

#[test]
fn classified_output_shape() {
  let out = classify("el.innerHTML = `<span class=\"x\">${a}</span>`; t('hello \"world\"')");
  assert_eq!(
    serde_json::to_value(&out).unwrap(),
    json!({
      "tokens": ["hello", "world"],
      "htmlTokens": ["<span class=\"x\">", "</span>"],
    })
  );
}

#[test]
fn halting_policy_stops_at_first_non_literal() {
  let options = ClassifyOptions {
    policy: NonLiteralPolicy::Halt,
    ..ClassifyOptions::default()
  };
  let out = tokenize_c("'a b'; 'c'", &TokenizeOptions::default(), &options, None).unwrap();
  assert_eq!(out.tokens, vec!["a", "b"]);
}

#[test]
fn transform_sees_non_literal_tokens() {
  let mut seen = Vec::new();
  let mut transform = |t: &TokenEntry| -> Option<String> {
    seen.push(t.value.clone());
    None
  };
  let out = tokenize_c(
    "x = 'y'",
    &TokenizeOptions::default(),
    &ClassifyOptions::default(),
    Some(&mut transform),
  )
  .unwrap();
  assert_eq!(out.tokens, vec!["y"]);
  assert_eq!(seen, vec!["x", "="]);
}
