use super::Parser;
use super::ParserConfig;
use crate::error::ParseError;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::options::ParseOptions;
use crate::token::TT;
use crate::visit::Dispatch;
use serde_json::json;
use serde_json::Value;

fn parse_with(source: &str, options: &ParseOptions) -> Result<Value, ParseError> {
  let program = crate::parse(source, options, None)?;
  Ok(serde_json::to_value(&program).unwrap())
}

fn parse_ok(source: &str) -> Value {
  parse_with(source, &ParseOptions::default())
    .unwrap_or_else(|err| panic!("failed to parse {:?}: {}", source, err))
}

fn parse_err(source: &str) -> ParseError {
  match parse_with(source, &ParseOptions::default()) {
    Ok(_) => panic!("expected {:?} to fail", source),
    Err(err) => err,
  }
}

fn body(program: &Value) -> &Vec<Value> {
  program["body"].as_array().unwrap()
}

#[test]
fn test_parser() {
  let lexer = Lexer::new("let x = /a/ / 1;");
  let mut p = Parser::new(
    lexer,
    ParserConfig::default(),
    false,
    Dispatch::new(None, None),
  );
  // Initial state.
  let cp = p.checkpoint();
  assert_eq!(p.next_tok_i, 0);

  // Peek the first token.
  let t = p.peek();
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::KeywordLet);

  // Consume the first token.
  let t = p.consume();
  assert_eq!(p.next_tok_i, 1);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::KeywordLet);

  // Consume the second token.
  let t = p.consume();
  assert_eq!(p.next_tok_i, 2);
  assert_eq!(p.buf.len(), 2);
  assert_eq!(t.typ, TT::Identifier);
  assert_eq!(p.prev_end(), 5);

  // Reset to a past point.
  p.restore_checkpoint(cp);
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 2);

  // Peek using a different mode, which should truncate the buffer.
  let t = p.peek_with_mode(LexMode::SlashIsRegex);
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::KeywordLet);
}

#[test]
fn test_asi_on_newline() {
  let program = parse_ok("a\nb");
  assert_eq!(body(&program).len(), 2);

  // No semicolon is inserted when the next line continues the expression.
  let program = parse_ok("a\n+b");
  let stmts = body(&program);
  assert_eq!(stmts.len(), 1);
  assert_eq!(stmts[0]["expression"]["type"], "BinaryExpression");

  let program = parse_ok("x\n++y");
  let stmts = body(&program);
  assert_eq!(stmts.len(), 2);
  assert_eq!(stmts[1]["expression"]["type"], "UpdateExpression");
  assert_eq!(stmts[1]["expression"]["prefix"], true);
}

#[test]
fn test_asi_restricted_productions() {
  let program = parse_ok("function f() { return\na }");
  let inner = program["body"][0]["body"]["body"].as_array().unwrap();
  assert_eq!(inner.len(), 2);
  assert_eq!(inner[0]["type"], "ReturnStatement");
  assert_eq!(inner[0]["argument"], Value::Null);
  assert_eq!(inner[1]["type"], "ExpressionStatement");

  let err = parse_err("throw\nerr");
  assert_eq!(err.description, "Illegal newline after throw");

  let err = parse_err("a b");
  assert_eq!(err.description, "Unexpected identifier");
}

#[test]
fn test_error_positions() {
  let err = parse_err("1 +");
  assert_eq!(err.description, "Unexpected end of input");
  assert_eq!(err.message, "Line 1: Unexpected end of input");
  assert_eq!(err.index, 3);
  assert_eq!(err.line, 1);
  assert_eq!(err.column, 4);

  let err = parse_err("var a;\n  }");
  assert_eq!(err.description, "Unexpected token }");
  assert_eq!(err.index, 9);
  assert_eq!(err.line, 2);
  assert_eq!(err.column, 3);
}

#[test]
fn test_tolerant_collects_errors() {
  let options = ParseOptions {
    tolerant: true,
    ..ParseOptions::default()
  };
  let program = parse_with("1 +", &options).unwrap();
  let errors = program["errors"].as_array().unwrap();
  assert_eq!(errors.len(), 1);
  assert_eq!(errors[0]["description"], "Unexpected end of input");

  // Later statements are still parsed.
  let program = parse_with("a b;\nc;", &options).unwrap();
  assert!(!program["errors"].as_array().unwrap().is_empty());
  let last = body(&program).last().unwrap();
  assert_eq!(last["expression"]["name"], "c");

  // Recoverable errors leave the node in place.
  let program = parse_with("\"use strict\"; with (a) b;", &options).unwrap();
  assert_eq!(program["errors"][0]["description"], "Strict mode code may not include a with statement");
  assert_eq!(body(&program)[1]["type"], "WithStatement");
}

#[test]
fn test_abandoned_attempt_drops_its_errors() {
  let options = ParseOptions {
    tolerant: true,
    ..ParseOptions::default()
  };
  // `(eval)` is first tried as arrow parameters, which is an error in strict code.
  let program = parse_with("'use strict'; (eval)", &options).unwrap();
  assert_eq!(program["errors"], json!([]));
  assert_eq!(body(&program)[1]["expression"]["name"], "eval");

  let program = parse_with("'use strict'; (eval) => 1", &options).unwrap();
  let errors = program["errors"].as_array().unwrap();
  assert_eq!(errors.len(), 1);
  assert_eq!(
    errors[0]["description"],
    "Unexpected eval or arguments in strict mode"
  );
}

#[test]
fn test_strict_mode() {
  let program = parse_ok("'use strict'; a");
  assert_eq!(body(&program)[0]["directive"], "use strict");
  assert!(body(&program)[1].get("directive").is_none());

  let err = parse_err("'use strict'; with (a) {}");
  assert_eq!(err.description, "Strict mode code may not include a with statement");
  let err = parse_err("'use strict'; delete x;");
  assert_eq!(err.description, "Delete of an unqualified identifier in strict mode.");
  let err = parse_err("'use strict'; var eval;");
  assert_eq!(err.description, "Unexpected eval or arguments in strict mode");
  let err = parse_err("'use strict'; 010");
  assert_eq!(err.description, "Octal literals are not allowed in strict mode.");

  // An octal escape in a directive before `"use strict"` is reported at that directive.
  parse_ok(r"'\01'; a");
  let err = parse_err(r"'\01'; 'use strict';");
  assert_eq!(err.description, "Octal escape sequences are not allowed in strict mode.");
  assert_eq!(err.index, 0);

  // Strictness is scoped to the function that declares it.
  parse_ok("function f() { 'use strict'; } with (a) {}");
  let err = parse_err("function f() { 'use strict'; with (a) {} }");
  assert_eq!(err.description, "Strict mode code may not include a with statement");

  // Modules are always strict.
  let err = parse_with("with (a) {}", &ParseOptions::module()).unwrap_err();
  assert_eq!(err.description, "Strict mode code may not include a with statement");
}

#[test]
fn test_labels_and_jumps() {
  parse_ok("a: while (true) { break a; }");
  parse_ok("a: for (;;) { continue a; }");
  parse_ok("switch (x) { case 1: break; }");

  let err = parse_err("a: a: ;");
  assert_eq!(err.description, "Label 'a' has already been declared");
  let err = parse_err("while (true) { break b; }");
  assert_eq!(err.description, "Undefined label 'b'");
  let err = parse_err("break;");
  assert_eq!(err.description, "Illegal break statement");
  let err = parse_err("switch (x) { case 1: continue; }");
  assert_eq!(err.description, "Illegal continue statement");
  let err = parse_err("return 1;");
  assert_eq!(err.description, "Illegal return statement");
  // Labels do not cross function boundaries.
  let err = parse_err("a: while (true) { (function () { break a; }); }");
  assert_eq!(err.description, "Undefined label 'a'");
}

#[test]
fn test_lexical_declarations() {
  parse_ok("var a; var a;");
  parse_ok("let a; { let a; }");
  let err = parse_err("let a; let a;");
  assert_eq!(err.description, "Identifier 'a' has already been declared");
  let err = parse_err("let a; var a;");
  assert_eq!(err.description, "Identifier 'a' has already been declared");
  let err = parse_err("const a;");
  assert_eq!(err.description, "Missing initializer in const declaration");

  let program = parse_ok("let [a, , ...b] = c, {d: e = 1} = f;");
  let decl = &body(&program)[0];
  assert_eq!(decl["kind"], "let");
  assert_eq!(decl["declarations"][0]["id"]["type"], "ArrayPattern");
  assert_eq!(decl["declarations"][0]["id"]["elements"][1], Value::Null);
  assert_eq!(decl["declarations"][0]["id"]["elements"][2]["type"], "RestElement");
  assert_eq!(decl["declarations"][1]["id"]["type"], "ObjectPattern");
  assert_eq!(decl["declarations"][1]["id"]["properties"][0]["value"]["type"], "AssignmentPattern");
}

#[test]
fn test_assignment_targets() {
  let program = parse_ok("({a, b: [c]} = d)");
  let expr = &body(&program)[0]["expression"];
  assert_eq!(expr["type"], "AssignmentExpression");
  assert_eq!(expr["left"]["type"], "ObjectPattern");
  assert_eq!(expr["left"]["properties"][1]["value"]["type"], "ArrayPattern");

  let err = parse_err("1 = 2");
  assert_eq!(err.description, "Invalid left-hand side in assignment");
  let err = parse_err("({a = 1})");
  assert_eq!(err.description, "Invalid shorthand property initializer");
}

#[test]
fn test_regex_or_division() {
  let program = parse_ok("a / b / c");
  assert_eq!(body(&program)[0]["expression"]["type"], "BinaryExpression");

  let program = parse_ok("x = /ab+c/gi");
  let lit = &body(&program)[0]["expression"]["right"];
  assert_eq!(lit["type"], "Literal");
  assert_eq!(lit["value"], Value::Null);
  assert_eq!(lit["raw"], "/ab+c/gi");
  assert_eq!(lit["regex"], json!({"pattern": "ab+c", "flags": "gi"}));
}

#[test]
fn test_functions_and_arrows() {
  let program = parse_ok("(a, b) => a + b");
  let arrow = &body(&program)[0]["expression"];
  assert_eq!(arrow["type"], "ArrowFunctionExpression");
  assert_eq!(arrow["expression"], true);
  assert_eq!(arrow["params"].as_array().unwrap().len(), 2);

  let program = parse_ok("async function* f(a = 1, ...rest) { yield await a; }");
  let func = &body(&program)[0];
  assert_eq!(func["type"], "FunctionDeclaration");
  assert_eq!(func["async"], true);
  assert_eq!(func["generator"], true);
  assert_eq!(func["params"][1]["type"], "RestElement");

  let err = parse_err("(a, b)\n=> a");
  assert_eq!(err.description, "Illegal newline before arrow");
}

#[test]
fn test_optional_chaining() {
  let program = parse_ok("a?.b.c");
  let outer = &body(&program)[0]["expression"];
  assert_eq!(outer["type"], "MemberExpression");
  assert_eq!(outer["optional"], false);
  assert_eq!(outer["object"]["optional"], true);

  let program = parse_ok("f?.(x)");
  let call = &body(&program)[0]["expression"];
  assert_eq!(call["type"], "CallExpression");
  assert_eq!(call["optional"], true);
}

#[test]
fn test_template_literal() {
  let program = parse_ok("`a${b}c`");
  let tpl = &body(&program)[0]["expression"];
  assert_eq!(tpl["type"], "TemplateLiteral");
  let quasis = tpl["quasis"].as_array().unwrap();
  assert_eq!(quasis.len(), 2);
  assert_eq!(quasis[0]["value"], json!({"raw": "a", "cooked": "a"}));
  assert_eq!(quasis[1]["tail"], true);
  assert_eq!(tpl["expressions"][0]["name"], "b");
}

#[test]
fn test_classes() {
  let program = parse_ok("class A extends B { constructor() { super(); } static get x() { return 1; } }");
  let class = &body(&program)[0];
  assert_eq!(class["type"], "ClassDeclaration");
  assert_eq!(class["superClass"]["name"], "B");
  let methods = class["body"]["body"].as_array().unwrap();
  assert_eq!(methods[0]["kind"], "constructor");
  assert_eq!(methods[1]["kind"], "get");
  assert_eq!(methods[1]["static"], true);

  let err = parse_err("class A { constructor() {} constructor() {} }");
  assert_eq!(err.description, "A class may only have one constructor");
}

#[test]
fn test_module_items() {
  let err = parse_err("import a from 'b';");
  assert_eq!(err.description, "'import' and 'export' may appear only with 'sourceType: module'");

  let program = parse_with(
    "import a, {b as c} from 'd'; export default 1; export {c};",
    &ParseOptions::module(),
  )
  .unwrap();
  assert_eq!(program["sourceType"], "module");
  let stmts = body(&program);
  assert_eq!(stmts[0]["type"], "ImportDeclaration");
  assert_eq!(stmts[0]["specifiers"][0]["type"], "ImportDefaultSpecifier");
  assert_eq!(stmts[0]["specifiers"][1]["imported"]["name"], "b");
  assert_eq!(stmts[0]["specifiers"][1]["local"]["name"], "c");
  assert_eq!(stmts[1]["type"], "ExportDefaultDeclaration");
  assert_eq!(stmts[2]["type"], "ExportNamedDeclaration");
  assert_eq!(stmts[2]["source"], Value::Null);

  // Only allowed at the top level.
  assert!(parse_with("{ export var a; }", &ParseOptions::module()).is_err());
}

#[test]
fn test_jsx() {
  let options = ParseOptions {
    jsx: true,
    ..ParseOptions::default()
  };
  let program = parse_with("<a b=\"c\">{d} text</a>", &options).unwrap();
  let elem = &body(&program)[0]["expression"];
  assert_eq!(elem["type"], "JSXElement");
  assert_eq!(elem["openingElement"]["name"]["name"], "a");
  assert_eq!(elem["openingElement"]["attributes"][0]["value"]["value"], "c");
  assert_eq!(elem["children"][0]["type"], "JSXExpressionContainer");
  assert_eq!(elem["children"][1]["type"], "JSXText");
  assert_eq!(elem["children"][1]["value"], " text");
  assert_eq!(elem["closingElement"]["name"]["name"], "a");

  let program = parse_with("<><b.c /></>", &options).unwrap();
  let frag = &body(&program)[0]["expression"];
  assert_eq!(frag["type"], "JSXFragment");
  assert_eq!(frag["children"][0]["openingElement"]["name"]["type"], "JSXMemberExpression");
  assert_eq!(frag["children"][0]["openingElement"]["selfClosing"], true);

  let err = parse_with("<a></b>", &options).unwrap_err();
  assert_eq!(err.description, "Expected corresponding JSX closing tag for a");

  // Without JSX enabled, `<` is only ever an operator.
  assert!(parse_with("<a/>", &ParseOptions::default()).is_err());
}

#[test]
fn test_ranges_and_locations() {
  let options = ParseOptions {
    range: true,
    loc: true,
    ..ParseOptions::default()
  };
  let program = parse_with("a;\n(b)", &options).unwrap();
  assert_eq!(program["range"], json!([0, 6]));
  let stmts = body(&program);
  assert_eq!(stmts[0]["range"], json!([0, 2]));
  // Parentheses are not part of the expression.
  assert_eq!(stmts[1]["expression"]["range"], json!([4, 5]));
  assert_eq!(
    stmts[1]["expression"]["loc"],
    json!({"start": {"line": 2, "column": 1}, "end": {"line": 2, "column": 2}})
  );

  // Without the options, neither field is present.
  let program = parse_ok("a;");
  assert!(program.get("range").is_none());
  assert!(program.get("loc").is_none());
}
