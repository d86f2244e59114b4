use crate::ast::expr::lit::RegexValue;
use crate::error::ErrorHandler;
use crate::error::ParseError;
use crate::error::SyntaxErrorType;
use crate::lex::lex_next;
use crate::lex::CommentKind;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::lex::RawComment;
use crate::loc::LineIndex;
use crate::loc::Loc;
use crate::loc::SourceLocation;
use crate::options::TokenizeOptions;
use crate::parse::expr::lit::decode_escapes;
use crate::parse::expr::lit::template_raw;
use crate::token::Token;
use crate::token::TT;
use ahash::HashSet;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TokenKind {
  Boolean,
  #[serde(rename = "<end>")]
  EOF,
  Identifier,
  Keyword,
  Null,
  Numeric,
  Punctuator,
  String,
  RegularExpression,
  Template,
  JSXIdentifier,
  JSXText,
  // Comment entries, only present when requested.
  Line,
  Block,
}

impl TokenKind {
  /// The public kind of a lexed token, given the mode it was lexed in.
  pub fn of(typ: TT, mode: LexMode) -> TokenKind {
    match typ {
      TT::EOF => TokenKind::EOF,
      TT::Identifier if mode == LexMode::JsxTag => TokenKind::JSXIdentifier,
      TT::Identifier => TokenKind::Identifier,
      TT::JsxTextContent => TokenKind::JSXText,
      TT::LiteralTrue | TT::LiteralFalse => TokenKind::Boolean,
      TT::LiteralNull => TokenKind::Null,
      TT::LiteralNumber | TT::LiteralBigInt => TokenKind::Numeric,
      TT::LiteralString => TokenKind::String,
      TT::LiteralRegex => TokenKind::RegularExpression,
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => TokenKind::Template,
      // Contextual words are only keywords in particular positions.
      TT::KeywordAs
      | TT::KeywordAsync
      | TT::KeywordAwait
      | TT::KeywordFrom
      | TT::KeywordGet
      | TT::KeywordOf
      | TT::KeywordSet
      | TT::KeywordStatic => TokenKind::Identifier,
      t if t.is_keyword() => TokenKind::Keyword,
      _ => TokenKind::Punctuator,
    }
  }

  pub fn is_comment(self) -> bool {
    matches!(self, TokenKind::Line | TokenKind::Block)
  }
}

/// One entry of a token list, serialized the way ESTree tools expect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenEntry {
  #[serde(rename = "type")]
  pub kind: TokenKind,
  /// The token as written; for comments, the text between the delimiters.
  pub value: String,
  /// Template pieces with valid escapes carry their decoded text.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cooked: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub regex: Option<RegexValue>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub range: Option<[usize; 2]>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
  #[serde(skip)]
  pub start: usize,
  #[serde(skip)]
  pub end: usize,
  // 1-based.
  #[serde(skip)]
  pub line: usize,
  // 0-based, in characters.
  #[serde(skip)]
  pub column: usize,
  #[serde(skip)]
  pub preceded_by_line_terminator: bool,
}

impl TokenEntry {
  pub fn from_token(
    token: &Token,
    mode: LexMode,
    lines: &LineIndex,
    range: bool,
    loc: bool,
  ) -> TokenEntry {
    let kind = TokenKind::of(token.typ, mode);
    let value = lines.source()[token.loc.0..token.loc.1].to_string();
    let cooked = match kind {
      TokenKind::Template => decode_escapes(template_raw(&value), true)
        .ok()
        .map(|d| d.value),
      _ => None,
    };
    let regex = match kind {
      TokenKind::RegularExpression => value.rfind('/').map(|end| RegexValue {
        pattern: value[1..end].to_string(),
        flags: value[end + 1..].to_string(),
      }),
      _ => None,
    };
    let position = lines.position(token.loc.0);
    TokenEntry {
      kind,
      value,
      cooked,
      regex,
      range: range.then(|| token.loc.range()),
      loc: loc.then(|| lines.location(token.loc)),
      start: token.loc.0,
      end: token.loc.1,
      line: position.line,
      column: position.column,
      preceded_by_line_terminator: token.preceded_by_line_terminator,
    }
  }

  pub fn from_comment(comment: &RawComment, lines: &LineIndex, range: bool, loc: bool) -> TokenEntry {
    let position = lines.position(comment.loc.0);
    TokenEntry {
      kind: match comment.kind {
        CommentKind::Line => TokenKind::Line,
        CommentKind::Block => TokenKind::Block,
      },
      value: lines.source()[comment.value.0..comment.value.1].to_string(),
      cooked: None,
      regex: None,
      range: range.then(|| comment.loc.range()),
      loc: loc.then(|| lines.location(comment.loc)),
      start: comment.loc.0,
      end: comment.loc.1,
      line: position.line,
      column: position.column,
      preceded_by_line_terminator: false,
    }
  }
}

/// The result of `tokenize`. `errors` is only present in tolerant mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tokens {
  pub tokens: Vec<TokenEntry>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub errors: Option<Vec<ParseError>>,
}

/// Converts the tokens a parser consumed into entries, keeping the parser's regex and JSX decisions.
pub fn entries_from_parser(
  tokens: &[(Token, LexMode)],
  lines: &LineIndex,
  range: bool,
  loc: bool,
) -> Vec<TokenEntry> {
  tokens
    .iter()
    // JSX text between tags can be empty, which is not a token.
    .filter(|(t, _)| t.typ != TT::JsxTextContent || !t.loc.is_empty())
    .map(|(t, mode)| TokenEntry::from_token(t, *mode, lines, range, loc))
    .collect()
}

// Tokens after which a `function` keyword starts an expression rather than a declaration.
static BEFORE_FUNCTION_EXPRESSION: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  [
    "(", "{", "[", "in", "typeof", "instanceof", "new", "return", "case", "delete", "throw",
    "void", "=", "+=", "-=", "*=", "**=", "/=", "%=", "<<=", ">>=", ">>>=", "&=", "|=", "^=",
    "&&=", "||=", "??=", ",", "+", "-", "*", "**", "/", "%", "++", "--", "<<", ">>", ">>>", "&",
    "|", "^", "!", "~", "&&", "||", "??", "?", ":", "===", "==", ">=", "<=", "<", ">", "!=",
    "!==",
  ]
  .into_iter()
  .collect()
});

/// Scans a source without parsing it, deciding between regular expressions and division from the preceding tokens.
struct Tokenizer<'a, 'o> {
  lexer: Lexer<'a>,
  lines: LineIndex<'a>,
  options: &'o TokenizeOptions,
  errors: ErrorHandler,
  // For each significant token so far, its text if it is a punctuator or keyword.
  values: Vec<Option<&'a str>>,
  // Indices into `values` of unclosed `(` and `{`.
  parens: Vec<usize>,
  curlies: Vec<usize>,
  // For each unclosed `{` or template substitution, whether it is a substitution.
  braces: Vec<bool>,
  comments_seen: usize,
}

impl<'a, 'o> Tokenizer<'a, 'o> {
  fn new(source: &'a str, options: &'o TokenizeOptions) -> Self {
    Tokenizer {
      lexer: Lexer::new(source),
      lines: LineIndex::new(source),
      options,
      errors: ErrorHandler::new(options.tolerant),
      values: Vec::new(),
      parens: Vec::new(),
      curlies: Vec::new(),
      braces: Vec::new(),
      comments_seen: 0,
    }
  }

  fn value_at(&self, i: Option<usize>) -> Option<&'a str> {
    i.and_then(|i| self.values.get(i).copied().flatten())
  }

  fn is_regex_start(&self) -> bool {
    let Some(previous) = self.values.last() else {
      return true;
    };
    let Some(previous) = *previous else {
      return false;
    };
    match previous {
      "this" | "]" | "super" => false,
      ")" => {
        let keyword = self.value_at(self.parens.last().and_then(|&i| i.checked_sub(1)));
        matches!(keyword, Some("if" | "while" | "for" | "with"))
      }
      "}" => {
        let Some(&curly) = self.curlies.last() else {
          return false;
        };
        let before = |n: usize| curly.checked_sub(n);
        let not_before_expression = |check: &str| !BEFORE_FUNCTION_EXPRESSION.contains(check);
        if self.value_at(before(3)) == Some("function") {
          // Anonymous function.
          self.value_at(before(4)).map_or(false, not_before_expression)
        } else if self.value_at(before(4)) == Some("function") {
          // Named function.
          self.value_at(before(5)).map_or(true, not_before_expression)
        } else {
          false
        }
      }
      _ => true,
    }
  }

  fn push_comments(&mut self, out: &mut Vec<TokenEntry>) {
    let comments = self.lexer.comments();
    if self.options.comment {
      for c in &comments[self.comments_seen..] {
        out.push(TokenEntry::from_comment(c, &self.lines, self.options.range, self.options.loc));
      }
    };
    self.comments_seen = comments.len();
  }

  /// Tracks brackets after a significant token; `}` closing a substitution was already handled.
  fn record(&mut self, token: &Token, kind: TokenKind) {
    let value = match kind {
      TokenKind::Punctuator | TokenKind::Keyword => Some(&self.lexer.source()[token.loc.0..token.loc.1]),
      _ => None,
    };
    match token.typ {
      TT::ParenthesisOpen => self.parens.push(self.values.len()),
      TT::BraceOpen => {
        self.curlies.push(self.values.len());
        self.braces.push(false);
      }
      TT::LiteralTemplatePartString => self.braces.push(true),
      _ => {}
    };
    self.values.push(value);
  }

  fn run(mut self, mut transform: Option<&mut dyn FnMut(TokenEntry) -> TokenEntry>) -> Result<Tokens, ParseError> {
    let mut out = Vec::new();
    // The opener of a `)` or `}` stays on its stack until the following token has been lexed, so `if (x) /re/` can look back at it.
    let mut pending_close: Option<TT> = None;
    loop {
      let mode = if self.is_regex_start() {
        LexMode::SlashIsRegex
      } else {
        LexMode::Standard
      };
      match pending_close.take() {
        Some(TT::ParenthesisClose) => {
          self.parens.pop();
        }
        Some(TT::BraceClose) => {
          self.curlies.pop();
        }
        _ => {}
      };
      let mut token = lex_next(&mut self.lexer, mode);
      if token.typ == TT::BraceClose && self.braces.last() == Some(&true) {
        self.braces.pop();
        let preceded_by_line_terminator = token.preceded_by_line_terminator;
        self.lexer.set_next(token.loc.0);
        token = lex_next(&mut self.lexer, LexMode::TemplateStrContinue);
        token.preceded_by_line_terminator = preceded_by_line_terminator;
      } else if token.typ == TT::BraceClose {
        self.braces.pop();
      };
      self.push_comments(&mut out);
      match token.typ {
        TT::EOF => break,
        TT::Invalid => {
          let err = token.error(self.lexer.invalid_reason(token.loc.0));
          if let Err(err) = self.errors.tolerate(err) {
            return Err(err.to_parse_error(&self.lines));
          };
          tracing::trace!(offset = token.loc.0, "skipped invalid token");
          continue;
        }
        _ => {}
      };
      let kind = TokenKind::of(token.typ, mode);
      self.record(&token, kind);
      if matches!(token.typ, TT::ParenthesisClose | TT::BraceClose) {
        pending_close = Some(token.typ);
      };
      let entry = TokenEntry::from_token(&token, mode, &self.lines, self.options.range, self.options.loc);
      out.push(match transform.as_mut() {
        Some(f) => f(entry),
        None => entry,
      });
    }
    if self.braces.contains(&true) {
      let end = self.lexer.source().len();
      let err = Loc::at(end).error(SyntaxErrorType::UnterminatedTemplate, Some(TT::EOF));
      if let Err(err) = self.errors.tolerate(err) {
        return Err(err.to_parse_error(&self.lines));
      };
    };
    let errors = self.options.tolerant.then(|| {
      self
        .errors
        .errors()
        .iter()
        .map(|e| e.to_parse_error(&self.lines))
        .collect()
    });
    Ok(Tokens {
      tokens: out,
      errors,
    })
  }
}

/// Scans `source` into a flat token list. Each entry passes through `transform` if given.
pub fn tokenize_source(
  source: &str,
  options: &TokenizeOptions,
  transform: Option<&mut dyn FnMut(TokenEntry) -> TokenEntry>,
) -> Result<Tokens, ParseError> {
  Tokenizer::new(source, options).run(transform)
}

#[cfg(test)]
mod tests {
  use super::tokenize_source;
  use super::TokenKind;
  use crate::options::TokenizeOptions;

  fn kinds_and_values(source: &str) -> Vec<(TokenKind, String)> {
    tokenize_source(source, &TokenizeOptions::default(), None)
      .unwrap()
      .tokens
      .into_iter()
      .map(|t| (t.kind, t.value))
      .collect()
  }

  #[test]
  fn test_division_after_identifier() {
    let tokens = kinds_and_values("a / b / c");
    assert_eq!(tokens[1], (TokenKind::Punctuator, "/".to_string()));
    assert_eq!(tokens.len(), 5);
  }

  #[test]
  fn test_regex_after_keyword_and_if_parens() {
    let tokens = kinds_and_values("return /ab+c/gi");
    assert_eq!(tokens[1], (TokenKind::RegularExpression, "/ab+c/gi".to_string()));
    let tokens = kinds_and_values("if (x) /re/.test(y)");
    assert_eq!(tokens[4].0, TokenKind::RegularExpression);
  }

  #[test]
  fn test_division_after_call_parens() {
    let tokens = kinds_and_values("f(x) / 2");
    assert_eq!(tokens[4], (TokenKind::Punctuator, "/".to_string()));
  }

  #[test]
  fn test_regex_after_function_body_statement() {
    let tokens = kinds_and_values("function f() {}\n/re/");
    assert_eq!(tokens.last().unwrap().0, TokenKind::RegularExpression);
    let tokens = kinds_and_values("x = function () {} / 2");
    assert_eq!(tokens[tokens.len() - 2], (TokenKind::Punctuator, "/".to_string()));
  }

  #[test]
  fn test_template_pieces() {
    let tokens = kinds_and_values("`a${b}c${ {d} }e`");
    let values: Vec<_> = tokens.iter().map(|(_, v)| v.as_str()).collect();
    assert_eq!(values, vec!["`a${", "b", "}c${", "{", "d", "}", "}e`"]);
    assert_eq!(tokens[0].0, TokenKind::Template);
    assert_eq!(tokens[6].0, TokenKind::Template);
  }

  #[test]
  fn test_cooked_template_value() {
    let tokens = tokenize_source("`a\\x41`", &TokenizeOptions::default(), None).unwrap();
    assert_eq!(tokens.tokens[0].cooked.as_deref(), Some("aA"));
  }

  #[test]
  fn test_keyword_kinds() {
    let tokens = kinds_and_values("let x = true; async; null");
    assert_eq!(tokens[0].0, TokenKind::Keyword);
    assert_eq!(tokens[3].0, TokenKind::Boolean);
    assert_eq!(tokens[5].0, TokenKind::Identifier);
    assert_eq!(tokens[7].0, TokenKind::Null);
  }

  #[test]
  fn test_comment_entries_are_interleaved() {
    let options = TokenizeOptions {
      comment: true,
      ..TokenizeOptions::default()
    };
    let tokens = tokenize_source("a /* b */ + c // d", &options, None).unwrap();
    let kinds: Vec<_> = tokens.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![
      TokenKind::Identifier,
      TokenKind::Block,
      TokenKind::Punctuator,
      TokenKind::Identifier,
      TokenKind::Line,
    ]);
    assert_eq!(tokens.tokens[1].value, " b ");
  }

  #[test]
  fn test_tolerant_skips_invalid_tokens() {
    let options = TokenizeOptions {
      tolerant: true,
      ..TokenizeOptions::default()
    };
    let tokens = tokenize_source("a # b", &options, None).unwrap();
    assert_eq!(tokens.tokens.len(), 2);
    assert_eq!(tokens.errors.unwrap().len(), 1);
  }

  #[test]
  fn test_strict_fails_on_invalid_token() {
    let err = tokenize_source("'abc", &TokenizeOptions::default(), None).unwrap_err();
    assert_eq!(err.index, 0);
    assert_eq!(err.line, 1);
  }

  #[test]
  fn test_transform_is_applied() {
    let mut upper = |mut t: super::TokenEntry| {
      t.value = t.value.to_uppercase();
      t
    };
    let tokens = tokenize_source("ab", &TokenizeOptions::default(), Some(&mut upper)).unwrap();
    assert_eq!(tokens.tokens[0].value, "AB");
  }
}
