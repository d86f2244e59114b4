use crate::error::SyntaxErrorType;
use crate::lex::lex_next;
use crate::lex::CommentKind;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::token::TT;
use crate::token::TT::*;

fn check_mode<const N: usize>(code: &str, mode: LexMode, expecteds: [TT; N]) {
  let mut lexer = Lexer::new(code);
  for expected in expecteds {
    let t = lex_next(&mut lexer, mode);
    assert_eq!(t.typ, expected, "lexing {:?}", code);
  }
  let t = lex_next(&mut lexer, mode);
  assert_eq!(EOF, t.typ);
}

fn check<const N: usize>(code: &str, expecteds: [TT; N]) {
  check_mode(code, LexMode::Standard, expecteds);
}

fn invalid_reason(code: &str) -> SyntaxErrorType {
  let mut lexer = Lexer::new(code);
  loop {
    let t = lex_next(&mut lexer, LexMode::SlashIsRegex);
    match t.typ {
      Invalid => return lexer.invalid_reason(t.loc.0),
      EOF => panic!("no invalid token in {:?}", code),
      _ => {}
    };
  }
}

#[test]
fn test_lex_keywords() {
  check("class", [KeywordClass]);
  check("instanceof", [KeywordInstanceof]);
  check("let yield", [KeywordLet, KeywordYield]);
}

#[test]
fn test_lex_keyword_prefixed_identifiers() {
  check("iffy", [Identifier]);
  check("instanceofx", [Identifier]);
  check("do_", [Identifier]);
  check("new$", [Identifier]);
  check("in1", [Identifier]);
}

#[test]
fn test_lex_identifiers() {
  check("h929", [Identifier]);
  check("ünïcödé", [Identifier]);
  check("\\u0061b", [Identifier]);
  check("a\\u{62}", [Identifier]);
}

#[test]
fn test_lex_literal_numbers() {
  check("1", [LiteralNumber]);
  check("929", [LiteralNumber]);
  check(".929", [LiteralNumber]);
  check(". 929", [Dot, LiteralNumber]);
  check(". 929.2.", [Dot, LiteralNumber, Dot]);
  check(".929.2..", [LiteralNumber, LiteralNumber, Dot, Dot]);
  check("?.929", [Question, LiteralNumber]);
  check("?..929", [QuestionDot, LiteralNumber]);
  check("1e10 1E-5 0x1F 0o17 0b101 017 089", [
    LiteralNumber,
    LiteralNumber,
    LiteralNumber,
    LiteralNumber,
    LiteralNumber,
    LiteralNumber,
    LiteralNumber,
  ]);
  check("1_000_000", [LiteralNumber]);
}

#[test]
fn test_lex_invalid_numbers() {
  assert_eq!(invalid_reason("3in x"), SyntaxErrorType::InvalidNumericLiteral);
  assert_eq!(invalid_reason("1__0"), SyntaxErrorType::InvalidNumericLiteral);
  assert_eq!(invalid_reason("1_"), SyntaxErrorType::InvalidNumericLiteral);
  assert_eq!(invalid_reason("0x"), SyntaxErrorType::InvalidNumericLiteral);
  assert_eq!(invalid_reason("0_1"), SyntaxErrorType::InvalidNumericLiteral);
}

#[test]
fn test_lex_literal_bigints() {
  check("0n", [LiteralBigInt]);
  check("1n", [LiteralBigInt]);
  check("0x1Fn", [LiteralBigInt]);
  check("0b1n", [LiteralBigInt]);
  check("1.5", [LiteralNumber]);
}

#[test]
fn test_lex_literal_strings() {
  check("'hello world'", [LiteralString]);
  check("\"a\\\"b\"", [LiteralString]);
  check("'line\\\ncontinued'", [LiteralString]);
  check("'sep\u{2028}arator'", [LiteralString]);
  assert_eq!(invalid_reason("'hello\nworld'"), SyntaxErrorType::LineTerminatorInString);
  assert_eq!(invalid_reason("'hello"), SyntaxErrorType::UnterminatedString);
}

#[test]
fn test_lex_templates() {
  check("`abc`", [LiteralTemplatePartStringEnd]);
  check("`a${", [LiteralTemplatePartString]);
  assert_eq!(invalid_reason("`abc"), SyntaxErrorType::UnterminatedTemplate);

  let mut lexer = Lexer::new("`a${b}c${d} e`");
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, LiteralTemplatePartString);
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, Identifier);
  let middle = lex_next(&mut lexer, LexMode::TemplateStrContinue);
  assert_eq!(middle.typ, LiteralTemplatePartString);
  assert_eq!(&lexer[middle.loc], "}c${");
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, Identifier);
  let tail = lex_next(&mut lexer, LexMode::TemplateStrContinue);
  assert_eq!(tail.typ, LiteralTemplatePartStringEnd);
  assert_eq!(&lexer[tail.loc], "} e`");
}

#[test]
fn test_lex_regex() {
  check_mode("/a[/]b/gi", LexMode::SlashIsRegex, [LiteralRegex]);
  check("/a/g", [Slash, Identifier, Slash, Identifier]);
  assert_eq!(invalid_reason("/abc"), SyntaxErrorType::UnterminatedRegex);
  assert_eq!(invalid_reason("/a\n/"), SyntaxErrorType::UnterminatedRegex);
  assert_eq!(invalid_reason("/a/gg"), SyntaxErrorType::InvalidRegexFlags);
  assert_eq!(invalid_reason("/a/x"), SyntaxErrorType::InvalidRegexFlags);
}

#[test]
fn test_lex_line_terminators() {
  let mut lexer = Lexer::new("a\nb /* x\n */ c /* y */ d\u{2028}e");
  let expected = [
    ("a", false),
    ("b", true),
    ("c", true),
    ("d", false),
    ("e", true),
  ];
  for (raw, preceded) in expected {
    let t = lex_next(&mut lexer, LexMode::Standard);
    assert_eq!(&lexer[t.loc], raw);
    assert_eq!(t.preceded_by_line_terminator, preceded, "before {}", raw);
  }
}

#[test]
fn test_lex_comments_recorded_once() {
  let mut lexer = Lexer::new("a // one\n/* two */ b");
  lex_next(&mut lexer, LexMode::Standard);
  let cp = lexer.checkpoint();
  lex_next(&mut lexer, LexMode::Standard);
  lexer.apply_checkpoint(cp);
  let b = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(&lexer[b.loc], "b");
  let comments = lexer.comments();
  assert_eq!(comments.len(), 2);
  assert_eq!(comments[0].kind, CommentKind::Line);
  assert_eq!(&lexer[comments[0].value], " one");
  assert_eq!(comments[1].kind, CommentKind::Block);
  assert_eq!(comments[1].loc, Loc(9, 18));
  assert_eq!(&lexer[comments[1].value], " two ");
  assert_eq!(comments[1].trivia_start, 1);
}

#[test]
fn test_lex_html_comments() {
  check("a <!-- hidden\nb", [Identifier, Identifier]);
  check("a\n--> hidden\nb", [Identifier, Identifier]);
  check("a --> b", [Identifier, HyphenHyphen, ChevronRight, Identifier]);

  let mut lexer = Lexer::new("a <!-- b");
  lexer.set_html_comments(false);
  let typs: Vec<_> = std::iter::from_fn(|| {
    let t = lex_next(&mut lexer, LexMode::Standard);
    (t.typ != EOF).then_some(t.typ)
  })
  .collect();
  assert_eq!(typs, vec![Identifier, ChevronLeft, Exclamation, HyphenHyphen, Identifier]);
}

#[test]
fn test_lex_unterminated_comment() {
  assert_eq!(invalid_reason("a /* b"), SyntaxErrorType::UnterminatedComment);
}

#[test]
fn test_lex_jsx_modes() {
  check_mode("<div a-b=\"x\ny\"></div>", LexMode::JsxTag, [
    ChevronLeft,
    Identifier,
    Identifier,
    Equals,
    LiteralString,
    ChevronRight,
    ChevronLeftSlash,
    Identifier,
    ChevronRight,
  ]);
  // Text mode has no EOF; it yields an empty text token at the end.
  let mut lexer = Lexer::new("hello world");
  let text = lex_next(&mut lexer, LexMode::JsxTextContent);
  assert_eq!(text.typ, JsxTextContent);
  assert_eq!(text.loc, Loc(0, 11));
  let end = lex_next(&mut lexer, LexMode::JsxTextContent);
  assert_eq!(end.typ, JsxTextContent);
  assert!(end.loc.is_empty());
  let mut lexer = Lexer::new("ab{c");
  assert_eq!(lex_next(&mut lexer, LexMode::JsxTextContent).loc, Loc(0, 2));
  // `</` is two tokens outside JSX.
  check("a </b/", [Identifier, ChevronLeft, Slash, Identifier, Slash]);
}

#[test]
fn test_lex_import_statement() {
  check("import a, {b as c} from 'd';", [
    KeywordImport,
    Identifier,
    Comma,
    BraceOpen,
    Identifier,
    KeywordAs,
    Identifier,
    BraceClose,
    KeywordFrom,
    LiteralString,
    Semicolon,
  ]);
}
