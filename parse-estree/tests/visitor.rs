use parse_estree::ast::kind::NodeKind;
use parse_estree::options::ParseOptions;
use parse_estree::parse;
use parse_estree::visit::NodeEvent;

fn events(source: &str) -> Vec<NodeEvent> {
  let mut seen = Vec::new();
  let mut visitor = |event: &NodeEvent| seen.push(event.clone());
  parse(source, &ParseOptions::default(), Some(&mut visitor)).expect("expected parse success");
  seen
}

#[test]
fn children_complete_before_parents() {
  let kinds: Vec<NodeKind> = events("a + b;").iter().map(|e| e.kind).collect();
  assert_eq!(kinds, vec![
    NodeKind::Identifier,
    NodeKind::Identifier,
    NodeKind::BinaryExpression,
    NodeKind::ExpressionStatement,
    NodeKind::Program,
  ]);
}

#[test]
fn event_markers_have_lines_and_columns() {
  let seen = events("x;\n  yy;");
  let yy = seen
    .iter()
    .find(|e| e.kind == NodeKind::Identifier && e.start.line == 2)
    .expect("expected identifier on line 2");
  assert_eq!(yy.start.offset, 5);
  assert_eq!(yy.start.column, 2);
  assert_eq!(yy.end.column, 4);
  let program = seen.last().unwrap();
  assert_eq!(program.kind, NodeKind::Program);
  assert_eq!(program.loc().0, 0);
  assert_eq!(program.loc().1, 8);
}

#[test]
fn abandoned_speculation_is_not_reported() {
  // `(a)` is first tried as arrow parameters.
  let seen = events("(a);");
  let ids = seen.iter().filter(|e| e.kind == NodeKind::Identifier).count();
  assert_eq!(ids, 1);

  let seen = events("(a) => a;");
  let kinds: Vec<NodeKind> = seen.iter().map(|e| e.kind).collect();
  assert_eq!(kinds.iter().filter(|k| **k == NodeKind::Identifier).count(), 2);
  assert!(kinds.contains(&NodeKind::ArrowFunctionExpression));
}

#[test]
fn empty_blocks_are_flagged() {
  let seen = events("{} { a; }");
  let blocks: Vec<bool> = seen
    .iter()
    .filter(|e| e.kind == NodeKind::BlockStatement)
    .map(|e| e.empty)
    .collect();
  assert_eq!(blocks, vec![true, false]);
}

#[test]
fn nodes_completed_before_an_error_are_reported() {
  let mut count = 0;
  let mut visitor = |_: &NodeEvent| count += 1;
  assert!(parse("a +", &ParseOptions::default(), Some(&mut visitor)).is_err());
  // The identifier completed before the error.
  assert_eq!(count, 1);
}
