use crate::char::is_id_continue;
use crate::char::is_id_start;
use crate::char::is_jsx_id_continue;
use crate::char::is_line_terminator;
use crate::char::CharFilter;
use crate::char::DIGIT;
use crate::char::DIGIT_BIN;
use crate::char::DIGIT_HEX;
use crate::char::DIGIT_OCT;
use crate::char::ECMASCRIPT_WHITESPACE;
use crate::char::ID_START_CHARSTR;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use ahash::HashMap;
use ahash::HashMapExt;
use aho_corasick::AhoCorasick;
use aho_corasick::AhoCorasickBuilder;
use aho_corasick::AhoCorasickKind;
use aho_corasick::Anchored;
use aho_corasick::Input;
use aho_corasick::MatchKind;
use aho_corasick::StartKind;
use core::ops::Index;
use memchr::memchr;
use memchr::memchr2;
use memchr::memchr3;
use once_cell::sync::Lazy;
use serde::Serialize;

#[cfg(test)]
mod tests;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LexMode {
  JsxTag,
  JsxTextContent,
  SlashIsRegex,
  Standard,
  // Continues a template after a substitution; the token starts at the closing `}`.
  TemplateStrContinue,
}

#[derive(Copy, Clone)]
pub struct LexerCheckpoint {
  next: usize,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
pub enum CommentKind {
  Line,
  Block,
}

/// A comment as met by the lexer.
#[derive(Clone, Debug)]
pub struct RawComment {
  pub kind: CommentKind,
  // Includes the delimiters.
  pub loc: Loc,
  pub value: Loc,
  // Start of the run of whitespace and comments this comment belongs to, i.e. the end of the previous token.
  pub trivia_start: usize,
}

// Contains the match length.
#[derive(Copy, Clone)]
struct Match(usize);

impl Match {
  pub fn len(&self) -> usize {
    self.0
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

struct PatternMatcher {
  patterns: Vec<TT>,
  matcher: AhoCorasick,
  anchored: bool,
}

impl PatternMatcher {
  pub fn new<D: AsRef<str>>(anchored: bool, patterns: Vec<(TT, D)>) -> Self {
    let (tts, syns): (Vec<_>, Vec<_>) = patterns.into_iter().unzip();
    let matcher = AhoCorasickBuilder::new()
      .start_kind(if anchored {
        StartKind::Anchored
      } else {
        StartKind::Unanchored
      })
      .kind(Some(AhoCorasickKind::DFA))
      .match_kind(MatchKind::LeftmostLongest)
      .build(syns.iter().map(|s| s.as_ref().as_bytes()))
      .expect("lexer patterns are valid");
    PatternMatcher {
      patterns: tts,
      matcher,
      anchored,
    }
  }

  pub fn find(&self, lexer: &Lexer) -> Option<(TT, Match)> {
    self
      .matcher
      .find(
        Input::new(&lexer.source[lexer.next..]).anchored(if self.anchored {
          Anchored::Yes
        } else {
          Anchored::No
        }),
      )
      .map(|m| (self.patterns[m.pattern().as_usize()], Match(m.end())))
  }
}

#[derive(Debug)]
struct LexFailure(SyntaxErrorType);

type LexResult<T> = Result<T, LexFailure>;

pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
  html_comments: bool,
  comments: Vec<RawComment>,
  // Comments starting before this offset have already been recorded; the parser re-lexes after backtracking.
  comments_until: usize,
  invalid: HashMap<usize, SyntaxErrorType>,
}

impl<'a> Lexer<'a> {
  pub fn new(code: &'a str) -> Lexer<'a> {
    Lexer {
      source: code,
      next: 0,
      html_comments: true,
      comments: Vec::new(),
      comments_until: 0,
      invalid: HashMap::new(),
    }
  }

  /// `<!--` and `-->` comments are only recognised in scripts.
  pub fn set_html_comments(&mut self, enabled: bool) {
    self.html_comments = enabled;
  }

  pub fn source(&self) -> &'a str {
    self.source
  }

  pub fn next(&self) -> usize {
    self.next
  }

  fn end(&self) -> usize {
    self.source.len()
  }

  fn remaining(&self) -> usize {
    self.end() - self.next
  }

  pub fn source_range(&self) -> Loc {
    Loc(0, self.end())
  }

  fn eof_range(&self) -> Loc {
    Loc(self.end(), self.end())
  }

  pub fn at_end(&self) -> bool {
    self.next >= self.end()
  }

  fn peek(&self, n: usize) -> LexResult<char> {
    self
      .peek_or_eof(n)
      .ok_or(LexFailure(SyntaxErrorType::UnexpectedCharacter))
  }

  fn peek_or_eof(&self, n: usize) -> Option<char> {
    self.source[self.next..].chars().nth(n)
  }

  /// WARNING: Prefer checkpoints instead. Only use this if you know what you're doing.
  pub fn set_next(&mut self, next: usize) {
    self.next = next;
  }

  pub fn checkpoint(&self) -> LexerCheckpoint {
    LexerCheckpoint { next: self.next }
  }

  pub fn since_checkpoint(&self, checkpoint: LexerCheckpoint) -> Loc {
    Loc(checkpoint.next, self.next)
  }

  pub fn apply_checkpoint(&mut self, checkpoint: LexerCheckpoint) {
    self.next = checkpoint.next;
  }

  pub fn comments(&self) -> &[RawComment] {
    &self.comments
  }

  /// Why the `Invalid` token starting at `start` was rejected.
  pub fn invalid_reason(&self, start: usize) -> SyntaxErrorType {
    self
      .invalid
      .get(&start)
      .cloned()
      .unwrap_or(SyntaxErrorType::UnexpectedCharacter)
  }

  fn record_comment(&mut self, kind: CommentKind, loc: Loc, value: Loc, trivia_start: usize) {
    if loc.0 < self.comments_until {
      return;
    };
    self.comments_until = loc.1;
    self.comments.push(RawComment {
      kind,
      loc,
      value,
      trivia_start,
    });
  }

  fn if_char(&self, c: char) -> Match {
    match self.peek_or_eof(0) {
      Some(n) if n == c => Match(c.len_utf8()),
      _ => Match(0),
    }
  }

  fn while_not_2_chars(&self, a: char, b: char) -> Match {
    debug_assert!(a.is_ascii() && b.is_ascii());
    Match(
      memchr2(a as u8, b as u8, self.source[self.next..].as_bytes()).unwrap_or(self.remaining()),
    )
  }

  fn while_not_3_chars(&self, a: char, b: char, c: char) -> Match {
    debug_assert!(a.is_ascii() && b.is_ascii() && c.is_ascii());
    Match(
      memchr3(a as u8, b as u8, c as u8, self.source[self.next..].as_bytes())
        .unwrap_or(self.remaining()),
    )
  }

  fn while_not_char(&self, a: char) -> Match {
    debug_assert!(a.is_ascii());
    Match(memchr(a as u8, self.source[self.next..].as_bytes()).unwrap_or(self.remaining()))
  }

  fn while_not_line_terminator(&self) -> Match {
    let bytes = self.source[self.next..].as_bytes();
    let mut from = 0;
    loop {
      // U+2028 and U+2029 both start with 0xE2 in UTF-8.
      let Some(i) = memchr3(b'\n', b'\r', 0xE2, &bytes[from..]) else {
        return Match(bytes.len());
      };
      let at = from + i;
      let rest = &bytes[at..];
      if rest[0] != 0xE2
        || rest.starts_with("\u{2028}".as_bytes())
        || rest.starts_with("\u{2029}".as_bytes())
      {
        return Match(at);
      };
      from = at + 1;
    }
  }

  fn while_chars(&self, chars: &CharFilter) -> Match {
    let mut len = 0;
    for ch in self.source[self.next..].chars() {
      if chars.has(ch) {
        len += ch.len_utf8();
      } else {
        break;
      }
    }
    Match(len)
  }

  fn while_pred(&self, pred: impl Fn(char) -> bool) -> Match {
    let mut len = 0;
    for ch in self.source[self.next..].chars() {
      if pred(ch) {
        len += ch.len_utf8();
      } else {
        break;
      }
    }
    Match(len)
  }

  fn consume(&mut self, m: Match) -> Match {
    self.next += m.len();
    m
  }

  fn skip_expect(&mut self, n: usize) {
    debug_assert!(self.next + n <= self.end());
    self.next += n;
  }

  fn drive_fallible(
    &mut self,
    preceded_by_line_terminator: bool,
    f: impl FnOnce(&mut Self) -> LexResult<TT>,
  ) -> Token {
    let cp = self.checkpoint();
    let typ = match f(self) {
      Ok(typ) => typ,
      Err(LexFailure(reason)) => {
        // Always make progress, so that callers skipping invalid tokens terminate.
        if self.next == cp.next {
          if let Some(c) = self.peek_or_eof(0) {
            self.next += c.len_utf8();
          };
        };
        self.invalid.insert(cp.next, reason);
        TT::Invalid
      }
    };
    Token {
      loc: self.since_checkpoint(cp),
      typ,
      preceded_by_line_terminator,
    }
  }

  fn drive(&mut self, preceded_by_line_terminator: bool, f: impl FnOnce(&mut Self) -> TT) -> Token {
    self.drive_fallible(preceded_by_line_terminator, |lexer| Ok(f(lexer)))
  }
}

impl<'a> Index<Loc> for Lexer<'a> {
  type Output = str;

  fn index(&self, index: Loc) -> &Self::Output {
    &self.source[index.0..index.1]
  }
}

#[rustfmt::skip]
pub static OPERATORS_MAPPING: Lazy<HashMap<TT, &'static str>> = Lazy::new(|| {
  let mut map = HashMap::<TT, &'static str>::new();
  map.insert(TT::Ampersand, "&");
  map.insert(TT::AmpersandAmpersand, "&&");
  map.insert(TT::AmpersandAmpersandEquals, "&&=");
  map.insert(TT::AmpersandEquals, "&=");
  map.insert(TT::Asterisk, "*");
  map.insert(TT::AsteriskAsterisk, "**");
  map.insert(TT::AsteriskAsteriskEquals, "**=");
  map.insert(TT::AsteriskEquals, "*=");
  map.insert(TT::Bar, "|");
  map.insert(TT::BarBar, "||");
  map.insert(TT::BarBarEquals, "||=");
  map.insert(TT::BarEquals, "|=");
  map.insert(TT::BraceClose, "}");
  map.insert(TT::BraceOpen, "{");
  map.insert(TT::BracketClose, "]");
  map.insert(TT::BracketOpen, "[");
  map.insert(TT::Caret, "^");
  map.insert(TT::CaretEquals, "^=");
  map.insert(TT::ChevronLeft, "<");
  map.insert(TT::ChevronLeftChevronLeft, "<<");
  map.insert(TT::ChevronLeftChevronLeftEquals, "<<=");
  map.insert(TT::ChevronLeftEquals, "<=");
  map.insert(TT::ChevronRight, ">");
  map.insert(TT::ChevronRightChevronRight, ">>");
  map.insert(TT::ChevronRightChevronRightChevronRight, ">>>");
  map.insert(TT::ChevronRightChevronRightChevronRightEquals, ">>>=");
  map.insert(TT::ChevronRightChevronRightEquals, ">>=");
  map.insert(TT::ChevronRightEquals, ">=");
  map.insert(TT::Colon, ":");
  map.insert(TT::Comma, ",");
  map.insert(TT::Dot, ".");
  map.insert(TT::DotDotDot, "...");
  map.insert(TT::Equals, "=");
  map.insert(TT::EqualsChevronRight, "=>");
  map.insert(TT::EqualsEquals, "==");
  map.insert(TT::EqualsEqualsEquals, "===");
  map.insert(TT::Exclamation, "!");
  map.insert(TT::ExclamationEquals, "!=");
  map.insert(TT::ExclamationEqualsEquals, "!==");
  map.insert(TT::Hyphen, "-");
  map.insert(TT::HyphenEquals, "-=");
  map.insert(TT::HyphenHyphen, "--");
  map.insert(TT::ParenthesisClose, ")");
  map.insert(TT::ParenthesisOpen, "(");
  map.insert(TT::Percent, "%");
  map.insert(TT::PercentEquals, "%=");
  map.insert(TT::Plus, "+");
  map.insert(TT::PlusEquals, "+=");
  map.insert(TT::PlusPlus, "++");
  map.insert(TT::Question, "?");
  map.insert(TT::QuestionDot, "?.");
  map.insert(TT::QuestionQuestion, "??");
  map.insert(TT::QuestionQuestionEquals, "??=");
  map.insert(TT::Semicolon, ";");
  map.insert(TT::Slash, "/");
  map.insert(TT::SlashEquals, "/=");
  map.insert(TT::Tilde, "~");
  map
});

pub static KEYWORDS_MAPPING: Lazy<HashMap<TT, &'static str>> = Lazy::new(|| {
  let mut map = HashMap::<TT, &'static str>::new();
  map.insert(TT::KeywordAs, "as");
  map.insert(TT::KeywordAsync, "async");
  map.insert(TT::KeywordAwait, "await");
  map.insert(TT::KeywordBreak, "break");
  map.insert(TT::KeywordCase, "case");
  map.insert(TT::KeywordCatch, "catch");
  map.insert(TT::KeywordClass, "class");
  map.insert(TT::KeywordConst, "const");
  map.insert(TT::KeywordContinue, "continue");
  map.insert(TT::KeywordDebugger, "debugger");
  map.insert(TT::KeywordDefault, "default");
  map.insert(TT::KeywordDelete, "delete");
  map.insert(TT::KeywordDo, "do");
  map.insert(TT::KeywordElse, "else");
  map.insert(TT::KeywordEnum, "enum");
  map.insert(TT::KeywordExport, "export");
  map.insert(TT::KeywordExtends, "extends");
  map.insert(TT::KeywordFinally, "finally");
  map.insert(TT::KeywordFor, "for");
  map.insert(TT::KeywordFrom, "from");
  map.insert(TT::KeywordFunction, "function");
  map.insert(TT::KeywordGet, "get");
  map.insert(TT::KeywordIf, "if");
  map.insert(TT::KeywordImport, "import");
  map.insert(TT::KeywordIn, "in");
  map.insert(TT::KeywordInstanceof, "instanceof");
  map.insert(TT::KeywordLet, "let");
  map.insert(TT::KeywordNew, "new");
  map.insert(TT::KeywordOf, "of");
  map.insert(TT::KeywordReturn, "return");
  map.insert(TT::KeywordSet, "set");
  map.insert(TT::KeywordStatic, "static");
  map.insert(TT::KeywordSuper, "super");
  map.insert(TT::KeywordSwitch, "switch");
  map.insert(TT::KeywordThis, "this");
  map.insert(TT::KeywordThrow, "throw");
  map.insert(TT::KeywordTry, "try");
  map.insert(TT::KeywordTypeof, "typeof");
  map.insert(TT::KeywordVar, "var");
  map.insert(TT::KeywordVoid, "void");
  map.insert(TT::KeywordWhile, "while");
  map.insert(TT::KeywordWith, "with");
  map.insert(TT::KeywordYield, "yield");
  map.insert(TT::LiteralFalse, "false");
  map.insert(TT::LiteralNull, "null");
  map.insert(TT::LiteralTrue, "true");
  map
});

pub static KEYWORD_STRS: Lazy<HashMap<&'static str, TT>> =
  Lazy::new(|| KEYWORDS_MAPPING.iter().map(|(tt, s)| (*s, *tt)).collect());

#[rustfmt::skip]
static SIG: Lazy<PatternMatcher> = Lazy::new(|| {
  let mut patterns: Vec<(TT, String)> = Vec::new();
  for (&k, &v) in OPERATORS_MAPPING.iter() {
    patterns.push((k, v.into()));
  }
  // A keyword match is demoted to an identifier when more identifier characters follow; see `lex_next`.
  for (&k, &v) in KEYWORDS_MAPPING.iter() {
    patterns.push((k, v.into()));
  }
  for c in ID_START_CHARSTR.chars() {
    patterns.push((TT::Identifier, c.to_string()));
  }
  patterns.push((TT::Identifier, "\\".into()));
  for c in "0123456789".chars() {
    patterns.push((TT::LiteralNumber, c.to_string()));
  }
  patterns.push((TT::LiteralNumberBin, "0b".into()));
  patterns.push((TT::LiteralNumberBin, "0B".into()));
  patterns.push((TT::LiteralNumberHex, "0x".into()));
  patterns.push((TT::LiteralNumberHex, "0X".into()));
  patterns.push((TT::LiteralNumberOct, "0o".into()));
  patterns.push((TT::LiteralNumberOct, "0O".into()));
  // Prevent `.` immediately followed by a digit from being recognised as the `.` operator.
  for digit in '0'..='9' {
    patterns.push((TT::LiteralNumber, format!(".{}", digit)));
  }
  // Prevent `?` immediately followed by a decimal number from being recognised as the `?.` operator.
  for digit in '0'..='9' {
    patterns.push((TT::Question, format!("?.{}", digit)));
  }
  patterns.push((TT::LiteralString, "\"".into()));
  patterns.push((TT::LiteralString, "'".into()));
  patterns.push((TT::LiteralTemplatePartString, "`".into()));

  PatternMatcher::new(true, patterns)
});

static ML_COMMENT: Lazy<PatternMatcher> = Lazy::new(|| {
  PatternMatcher::new::<&str>(false, vec![
    (TT::CommentMultilineEnd, "*/"),
    (TT::LineTerminator, "\r"),
    (TT::LineTerminator, "\n"),
    (TT::LineTerminator, "\u{2028}"),
    (TT::LineTerminator, "\u{2029}"),
  ])
});

static INSIG: Lazy<PatternMatcher> = Lazy::new(|| {
  let mut patterns: Vec<(TT, String)> = vec![
    (TT::LineTerminator, "\r".into()),
    (TT::LineTerminator, "\n".into()),
    (TT::LineTerminator, "\u{2028}".into()),
    (TT::LineTerminator, "\u{2029}".into()),
    (TT::CommentMultiline, "/*".into()),
    (TT::CommentSingle, "//".into()),
    (TT::CommentSingle, "<!--".into()),
    (TT::CommentSingle, "-->".into()),
  ];
  for c in ECMASCRIPT_WHITESPACE {
    patterns.push((TT::Whitespace, c.to_string()));
  }
  PatternMatcher::new(true, patterns)
});

/// Returns whether the comment includes a line terminator.
fn lex_multiline_comment(lexer: &mut Lexer<'_>) -> LexResult<bool> {
  // Consume `/*`.
  lexer.skip_expect(2);
  let mut contains_newline = false;
  loop {
    let Some((tt, mat)) = ML_COMMENT.find(lexer) else {
      lexer.set_next(lexer.end());
      return Err(LexFailure(SyntaxErrorType::UnterminatedComment));
    };
    lexer.consume(mat);
    match tt {
      TT::CommentMultilineEnd => break,
      _ => contains_newline = true,
    };
  }
  Ok(contains_newline)
}

fn lex_unicode_escape(lexer: &mut Lexer<'_>) -> LexResult<char> {
  let invalid = || LexFailure(SyntaxErrorType::InvalidCharacterEscape);
  // Consume `\`.
  lexer.skip_expect(1);
  if lexer.peek_or_eof(0) != Some('u') {
    return Err(invalid());
  };
  lexer.skip_expect(1);
  let digits = if lexer.peek_or_eof(0) == Some('{') {
    lexer.skip_expect(1);
    let digits = lexer.consume(lexer.while_chars(&DIGIT_HEX));
    if digits.is_empty() || lexer.peek_or_eof(0) != Some('}') {
      return Err(invalid());
    };
    let digits = &lexer.source[lexer.next - digits.len()..lexer.next];
    lexer.skip_expect(1);
    digits
  } else {
    let start = lexer.next;
    for _ in 0..4 {
      match lexer.peek_or_eof(0) {
        Some(c) if DIGIT_HEX.has(c) => lexer.skip_expect(1),
        _ => return Err(invalid()),
      };
    }
    &lexer.source[start..lexer.next]
  };
  u32::from_str_radix(digits, 16)
    .ok()
    .and_then(char::from_u32)
    .ok_or_else(invalid)
}

fn lex_identifier(lexer: &mut Lexer<'_>, jsx: bool) -> LexResult<TT> {
  let invalid = || LexFailure(SyntaxErrorType::InvalidCharacterEscape);
  let continues = |c: char| {
    if jsx {
      is_jsx_id_continue(c)
    } else {
      is_id_continue(c)
    }
  };
  // Consume starter (either a char or a Unicode escape).
  let starter = lexer.peek(0)?;
  if starter == '\\' {
    if !is_id_start(lex_unicode_escape(lexer)?) {
      return Err(invalid());
    };
  } else {
    lexer.skip_expect(starter.len_utf8());
  };
  loop {
    lexer.consume(lexer.while_pred(continues));
    if lexer.peek_or_eof(0) != Some('\\') {
      break;
    };
    if !is_id_continue(lex_unicode_escape(lexer)?) {
      return Err(invalid());
    };
  }
  Ok(TT::Identifier)
}

/// Consumes digits matching `filter` with optional `_` separators between them. Returns the number of digits.
fn lex_digits(lexer: &mut Lexer<'_>, filter: &CharFilter) -> LexResult<usize> {
  let mut count = 0;
  loop {
    count += lexer.consume(lexer.while_chars(filter)).len();
    if lexer.peek_or_eof(0) != Some('_') {
      break;
    };
    // A separator must sit between two digits.
    let next_is_digit = lexer.peek_or_eof(1).is_some_and(|c| filter.has(c));
    if count == 0 || !next_is_digit {
      lexer.skip_expect(1);
      return Err(LexFailure(SyntaxErrorType::InvalidNumericLiteral));
    };
    lexer.skip_expect(1);
  }
  Ok(count)
}

// An identifier start or digit directly after a numeric literal is an error, e.g. `3in`.
fn lex_number_end(lexer: &mut Lexer<'_>, typ: TT) -> LexResult<TT> {
  match lexer.peek_or_eof(0) {
    Some(c) if is_id_start(c) || c == '\\' || DIGIT.has(c) => {
      lexer.consume(lexer.while_pred(|c| is_id_continue(c) || c == '\\'));
      Err(LexFailure(SyntaxErrorType::InvalidNumericLiteral))
    }
    _ => Ok(typ),
  }
}

fn lex_exponent(lexer: &mut Lexer<'_>) -> LexResult<bool> {
  if !matches!(lexer.peek_or_eof(0), Some('e' | 'E')) {
    return Ok(false);
  };
  lexer.skip_expect(1);
  if matches!(lexer.peek_or_eof(0), Some('+' | '-')) {
    lexer.skip_expect(1);
  };
  if lex_digits(lexer, &DIGIT)? == 0 {
    return Err(LexFailure(SyntaxErrorType::InvalidNumericLiteral));
  };
  Ok(true)
}

fn lex_bigint_or_number(lexer: &mut Lexer<'_>) -> LexResult<TT> {
  if lexer.peek(0)? == '.' {
    lexer.skip_expect(1);
    lex_digits(lexer, &DIGIT)?;
    lex_exponent(lexer)?;
    return lex_number_end(lexer, TT::LiteralNumber);
  };
  let start = lexer.next();
  if lexer.peek(0)? == '0' && lexer.peek_or_eof(1).is_some_and(|c| DIGIT.has(c) || c == '_') {
    // Legacy octal (`017`) or legacy non-octal decimal (`089`). Separators are not allowed.
    lexer.consume(lexer.while_chars(&DIGIT));
    if lexer.peek_or_eof(0) == Some('_') {
      lexer.skip_expect(1);
      return Err(LexFailure(SyntaxErrorType::InvalidNumericLiteral));
    };
    let is_octal = lexer[Loc(start, lexer.next())].chars().all(|c| DIGIT_OCT.has(c));
    if !is_octal {
      if !lexer.consume(lexer.if_char('.')).is_empty() {
        lex_digits(lexer, &DIGIT)?;
      };
      lex_exponent(lexer)?;
    };
    return lex_number_end(lexer, TT::LiteralNumber);
  };
  lex_digits(lexer, &DIGIT)?;
  let mut integer = true;
  if !lexer.consume(lexer.if_char('.')).is_empty() {
    integer = false;
    lex_digits(lexer, &DIGIT)?;
  };
  if lex_exponent(lexer)? {
    integer = false;
  };
  if integer && !lexer.consume(lexer.if_char('n')).is_empty() {
    return lex_number_end(lexer, TT::LiteralBigInt);
  };
  lex_number_end(lexer, TT::LiteralNumber)
}

fn lex_radix_bigint_or_number(lexer: &mut Lexer<'_>, digits: &CharFilter) -> LexResult<TT> {
  // Consume `0x`, `0o` or `0b`.
  lexer.skip_expect(2);
  if lex_digits(lexer, digits)? == 0 {
    return Err(LexFailure(SyntaxErrorType::InvalidNumericLiteral));
  };
  if !lexer.consume(lexer.if_char('n')).is_empty() {
    return lex_number_end(lexer, TT::LiteralBigInt);
  };
  lex_number_end(lexer, TT::LiteralNumber)
}

fn lex_regex(lexer: &mut Lexer<'_>) -> LexResult<TT> {
  let unterminated = || LexFailure(SyntaxErrorType::UnterminatedRegex);
  // Consume slash.
  lexer.skip_expect(1);
  let mut in_charset = false;
  loop {
    let c = lexer.peek_or_eof(0).ok_or_else(unterminated)?;
    if is_line_terminator(c) {
      return Err(unterminated());
    };
    lexer.skip_expect(c.len_utf8());
    match c {
      '\\' => {
        // Cannot escape line terminator.
        let escaped = lexer.peek_or_eof(0).ok_or_else(unterminated)?;
        if is_line_terminator(escaped) {
          return Err(unterminated());
        };
        lexer.skip_expect(escaped.len_utf8());
      }
      '/' if !in_charset => break,
      '[' => in_charset = true,
      ']' if in_charset => in_charset = false,
      _ => {}
    };
  }
  let flags_start = lexer.next();
  lexer.consume(lexer.while_pred(is_id_continue));
  let flags = &lexer[Loc(flags_start, lexer.next())];
  let mut seen = Vec::new();
  for f in flags.chars() {
    if !"dgimsuy".contains(f) || seen.contains(&f) {
      return Err(LexFailure(SyntaxErrorType::InvalidRegexFlags));
    };
    seen.push(f);
  }
  Ok(TT::LiteralRegex)
}

fn lex_string(lexer: &mut Lexer<'_>) -> LexResult<TT> {
  let quote = lexer.peek(0)?;
  lexer.skip_expect(1);
  loop {
    lexer.consume(lexer.while_pred(|c| c != '\\' && c != quote && c != '\n' && c != '\r'));
    let Some(c) = lexer.peek_or_eof(0) else {
      return Err(LexFailure(SyntaxErrorType::UnterminatedString));
    };
    match c {
      '\\' => {
        lexer.skip_expect(1);
        // Escapes are validated when the value is decoded. A `\r\n` line continuation is one unit.
        match lexer.peek_or_eof(0) {
          None => return Err(LexFailure(SyntaxErrorType::UnterminatedString)),
          Some('\r') => {
            lexer.skip_expect(1);
            lexer.consume(lexer.if_char('\n'));
          }
          Some(e) => lexer.skip_expect(e.len_utf8()),
        };
      }
      // U+2028 and U+2029 are allowed in string literals.
      '\n' | '\r' => return Err(LexFailure(SyntaxErrorType::LineTerminatorInString)),
      _ => {
        lexer.skip_expect(1);
        break;
      }
    };
  }
  Ok(TT::LiteralString)
}

/// Ends with `${` or backtick.
fn lex_template_string_continue(lexer: &mut Lexer<'_>) -> LexResult<TT> {
  loop {
    lexer.consume(lexer.while_not_3_chars('\\', '`', '$'));
    let Some(c) = lexer.peek_or_eof(0) else {
      return Err(LexFailure(SyntaxErrorType::UnterminatedTemplate));
    };
    match c {
      '\\' => {
        lexer.skip_expect(1);
        match lexer.peek_or_eof(0) {
          None => return Err(LexFailure(SyntaxErrorType::UnterminatedTemplate)),
          Some(e) => lexer.skip_expect(e.len_utf8()),
        };
      }
      '`' => {
        lexer.skip_expect(1);
        return Ok(TT::LiteralTemplatePartStringEnd);
      }
      _ => {
        lexer.skip_expect(1);
        if !lexer.consume(lexer.if_char('{')).is_empty() {
          return Ok(TT::LiteralTemplatePartString);
        };
      }
    };
  }
}

fn lex_template(lexer: &mut Lexer<'_>) -> LexResult<TT> {
  // Consume backtick.
  lexer.skip_expect(1);
  lex_template_string_continue(lexer)
}

fn lex_jsx_tag(lexer: &mut Lexer<'_>) -> LexResult<TT> {
  let c = lexer.peek(0)?;
  if c == '<' && lexer.peek_or_eof(1) == Some('/') {
    lexer.skip_expect(2);
    return Ok(TT::ChevronLeftSlash);
  };
  let typ = match c {
    '<' => TT::ChevronLeft,
    '>' => TT::ChevronRight,
    '/' => TT::Slash,
    '=' => TT::Equals,
    '{' => TT::BraceOpen,
    '}' => TT::BraceClose,
    ':' => TT::Colon,
    '.' => TT::Dot,
    // Attribute strings have no escapes and may span lines.
    '"' | '\'' => {
      lexer.skip_expect(1);
      lexer.consume(lexer.while_not_char(c));
      if lexer.at_end() {
        return Err(LexFailure(SyntaxErrorType::UnterminatedString));
      };
      lexer.skip_expect(1);
      return Ok(TT::LiteralString);
    }
    c if is_id_start(c) || c == '\\' => return lex_identifier(lexer, true),
    _ => return Err(LexFailure(SyntaxErrorType::UnexpectedCharacter)),
  };
  lexer.skip_expect(1);
  Ok(typ)
}

/// Skips whitespace and comments. Returns whether a line terminator was passed.
fn skip_trivia(lexer: &mut Lexer<'_>) -> bool {
  let trivia_start = lexer.next();
  // `-->` only starts a comment at the beginning of a line, ignoring whitespace and block comments.
  let mut at_line_start = lexer.next() == 0;
  let mut preceded_by_line_terminator = false;
  while let Some((tt, mat)) = INSIG.find(lexer) {
    match tt {
      TT::LineTerminator => {
        lexer.consume(mat);
        at_line_start = true;
        preceded_by_line_terminator = true;
      }
      TT::Whitespace => {
        lexer.consume(mat);
      }
      TT::CommentMultiline => {
        let start = lexer.next();
        match lex_multiline_comment(lexer) {
          Ok(has_line_terminator) => {
            let end = lexer.next();
            lexer.record_comment(
              CommentKind::Block,
              Loc(start, end),
              Loc(start + 2, end - 2),
              trivia_start,
            );
            at_line_start |= has_line_terminator;
            preceded_by_line_terminator |= has_line_terminator;
          }
          Err(_) => {
            // Leave the opening delimiter for `lex_next` to report as an invalid token.
            lexer.set_next(start);
            break;
          }
        };
      }
      TT::CommentSingle => {
        let is_html = mat.len() != 2;
        if is_html && (!lexer.html_comments || (mat.len() == 3 && !at_line_start)) {
          break;
        };
        let start = lexer.next();
        lexer.consume(mat);
        let value_start = lexer.next();
        lexer.consume(lexer.while_not_line_terminator());
        let end = lexer.next();
        lexer.record_comment(
          CommentKind::Line,
          Loc(start, end),
          Loc(value_start, end),
          trivia_start,
        );
      }
      _ => unreachable!(),
    };
  }
  preceded_by_line_terminator
}

pub fn lex_next(lexer: &mut Lexer<'_>, mode: LexMode) -> Token {
  if mode == LexMode::JsxTextContent {
    return lexer.drive(false, |lexer| {
      lexer.consume(lexer.while_not_2_chars('{', '<'));
      TT::JsxTextContent
    });
  };

  let preceded_by_line_terminator = skip_trivia(lexer);

  // EOF is different from Invalid, so we should emit this specifically instead of letting drive_fallible return an Invalid.
  if lexer.at_end() {
    return Token {
      loc: lexer.eof_range(),
      typ: TT::EOF,
      preceded_by_line_terminator,
    };
  };

  if lexer.source[lexer.next..].starts_with("/*") {
    // An unterminated block comment; `skip_trivia` stopped at its start.
    return lexer.drive_fallible(preceded_by_line_terminator, |lexer| {
      lexer.set_next(lexer.end());
      Err(LexFailure(SyntaxErrorType::UnterminatedComment))
    });
  };

  match mode {
    LexMode::JsxTag => {
      return lexer.drive_fallible(preceded_by_line_terminator, lex_jsx_tag);
    }
    LexMode::TemplateStrContinue => {
      return lexer.drive_fallible(preceded_by_line_terminator, |lexer| {
        if lexer.peek(0)? != '}' {
          return Err(LexFailure(SyntaxErrorType::UnexpectedCharacter));
        };
        lex_template(lexer)
      });
    }
    _ => {}
  };

  lexer.drive_fallible(preceded_by_line_terminator, |lexer| {
    // Non-ASCII characters are only valid as identifier starts here; whitespace was consumed above.
    if let Some(c) = lexer.peek_or_eof(0) {
      if !c.is_ascii() {
        if is_id_start(c) {
          return lex_identifier(lexer, false);
        };
        return Err(LexFailure(SyntaxErrorType::UnexpectedCharacter));
      };
    };

    let (tt, mat) = SIG
      .find(lexer)
      .ok_or(LexFailure(SyntaxErrorType::UnexpectedCharacter))?;
    match tt {
      TT::Identifier => lex_identifier(lexer, false),
      TT::LiteralNumber => lex_bigint_or_number(lexer),
      TT::LiteralNumberBin => lex_radix_bigint_or_number(lexer, &DIGIT_BIN),
      TT::LiteralNumberHex => lex_radix_bigint_or_number(lexer, &DIGIT_HEX),
      TT::LiteralNumberOct => lex_radix_bigint_or_number(lexer, &DIGIT_OCT),
      TT::LiteralString => lex_string(lexer),
      TT::LiteralTemplatePartString => lex_template(lexer),
      TT::Slash | TT::SlashEquals if mode == LexMode::SlashIsRegex => lex_regex(lexer),
      typ if typ.is_keyword() => {
        // `instanceofx` or `ifa` are identifiers, not keywords.
        let follows = lexer.source[lexer.next + mat.len()..].chars().next();
        if follows.is_some_and(|c| is_id_continue(c) || c == '\\') {
          return lex_identifier(lexer, false);
        };
        lexer.consume(mat);
        Ok(typ)
      }
      typ => {
        if typ == TT::Question && mat.len() != 1 {
          // We've matched `?.[0-9]`.
          lexer.consume(Match(1));
        } else {
          lexer.consume(mat);
        };
        Ok(typ)
      }
    }
  })
}
