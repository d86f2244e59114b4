use crate::ast::node::Node;
use crate::ast::node::NodeId;
use crate::ast::node::Syntax;
use crate::error::ErrorHandler;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::lex_next;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::lex::KEYWORD_STRS;
use crate::loc::LineIndex;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use crate::token::UNRESERVED_KEYWORDS;
use crate::visit::Dispatch;
use crate::visit::Marker;
use crate::visit::NodeEvent;
use crate::visit::NodeVisitor;
use expr::pat::ParsePatternRules;
use scope::FnState;
use scope::Scope;
use std::cmp::max;

pub mod class_or_object;
pub mod drive;
pub mod expr;
pub mod func;
pub mod import_export;
pub mod operator;
pub mod scope;
pub mod stmt;
#[cfg(test)]
mod tests;
pub mod toplevel;

// Almost every parse_* function takes these field values as parameters. Instead of having to enumerate them as parameters on every function and ordered unnamed arguments on every call, we simply pass this struct around. The with_* methods create an altered copy for passing into other functions, which is useful as most calls simply pass through the values unchanged. This struct should be received as a value, not a reference.
#[derive(Clone, Copy)]
pub struct ParseCtx {
  pub rules: ParsePatternRules,
  // False inside the head of a `for` statement, where `in` would be ambiguous.
  pub in_allowed: bool,
}

impl ParseCtx {
  pub fn with_rules(&self, rules: ParsePatternRules) -> ParseCtx {
    ParseCtx { rules, ..*self }
  }

  pub fn with_in(&self, in_allowed: bool) -> ParseCtx {
    ParseCtx { in_allowed, ..*self }
  }
}

/// Per-call switches that do not change during a parse.
#[derive(Clone, Copy, Default)]
pub struct ParserConfig {
  pub jsx: bool,
  pub module: bool,
  pub range: bool,
  pub loc: bool,
}

#[derive(Debug)]
#[must_use]
pub struct MaybeToken {
  typ: TT,
  loc: Loc,
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn match_loc(&self) -> Option<Loc> {
    if self.matched {
      Some(self.loc)
    } else {
      None
    }
  }

  pub fn error(&self, err: SyntaxErrorType) -> SyntaxError {
    debug_assert!(!self.matched);
    self.loc.error(err, Some(self.typ))
  }
}

pub struct ParserCheckpoint {
  next_tok_i: usize,
  errors: usize,
  deferred_events: usize,
  cover_init: Option<Loc>,
}

/// To get the lexer's `next` after this token was lexed, use `token.loc.1`.
struct BufferedToken {
  token: Token,
  lex_mode: LexMode,
}

pub struct Parser<'a> {
  lexer: Lexer<'a>,
  lines: LineIndex<'a>,
  buf: Vec<BufferedToken>,
  next_tok_i: usize,
  config: ParserConfig,
  errors: ErrorHandler,
  dispatch: Dispatch<'a>,
  // Events of nodes completed while speculating; delivered once the outermost speculation commits.
  deferred_events: Vec<NodeEvent>,
  speculating: usize,
  next_node_id: u32,
  strict: bool,
  fn_state: FnState,
  scopes: Vec<Scope>,
  // First shorthand initializer (`{a = 1}`) seen in an object literal that has not yet been reinterpreted as a pattern.
  cover_init: Option<Loc>,
}

/// What is left of a parser once parsing has finished.
pub struct ParserOutput<'a> {
  pub lexer: Lexer<'a>,
  pub lines: LineIndex<'a>,
  pub errors: ErrorHandler,
  pub dispatch: Dispatch<'a>,
  // Consumed tokens with the mode they were lexed in, excluding EOF.
  pub tokens: Vec<(Token, LexMode)>,
}

// We extend this struct with added methods in the various submodules, instead of simply using free functions and passing `&mut Parser` around, for several reasons:
// - Avoid needing to redeclare `<'a>` on every function.
// - More lifetime elision is available for `self` than if it was just another reference parameter.
// - Don't need to import each function.
// - For general consistency; if there's no reason why it should be a free function, it should be a method.
impl<'a> Parser<'a> {
  pub fn new(
    lexer: Lexer<'a>,
    config: ParserConfig,
    tolerant: bool,
    dispatch: Dispatch<'a>,
  ) -> Parser<'a> {
    let lines = LineIndex::new(lexer.source());
    Parser {
      lexer,
      lines,
      buf: Vec::new(),
      next_tok_i: 0,
      config,
      errors: ErrorHandler::new(tolerant),
      dispatch,
      deferred_events: Vec::new(),
      speculating: 0,
      next_node_id: 0,
      strict: config.module,
      fn_state: FnState::default(),
      scopes: Vec::new(),
      cover_init: None,
    }
  }

  pub fn finish(self) -> ParserOutput<'a> {
    let tokens = self.buf[..self.next_tok_i]
      .iter()
      .filter(|t| t.token.typ != TT::EOF)
      .map(|t| (t.token.clone(), t.lex_mode))
      .collect();
    ParserOutput {
      lexer: self.lexer,
      lines: self.lines,
      errors: self.errors,
      dispatch: self.dispatch,
      tokens,
    }
  }

  pub fn config(&self) -> ParserConfig {
    self.config
  }

  pub fn source_range(&self) -> Loc {
    self.lexer.source_range()
  }

  pub fn str(&self, loc: Loc) -> &'a str {
    &self.lexer.source()[loc.0..loc.1]
  }

  pub fn string(&self, loc: Loc) -> String {
    self.str(loc).to_string()
  }

  pub fn is_strict(&self) -> bool {
    self.strict
  }

  /// Records an error that does not stop parsing in tolerant mode.
  pub fn tolerate(&mut self, err: SyntaxError) -> SyntaxResult<()> {
    self.errors.tolerate(err)
  }

  pub fn checkpoint(&self) -> ParserCheckpoint {
    ParserCheckpoint {
      next_tok_i: self.next_tok_i,
      errors: self.errors.len(),
      deferred_events: self.deferred_events.len(),
      cover_init: self.cover_init,
    }
  }

  pub fn restore_checkpoint(&mut self, checkpoint: ParserCheckpoint) {
    self.next_tok_i = checkpoint.next_tok_i;
    self.errors.truncate(checkpoint.errors);
    self.deferred_events.truncate(checkpoint.deferred_events);
    self.cover_init = checkpoint.cover_init;
  }

  /// End of the last consumed token.
  pub fn prev_end(&self) -> usize {
    match self.next_tok_i {
      0 => 0,
      i => self.buf[i - 1].token.loc.1,
    }
  }

  fn reset_to(&mut self, n: usize) {
    self.next_tok_i = n;
    self.buf.truncate(n);
    match self.buf.last() {
      Some(t) => self.lexer.set_next(t.token.loc.1),
      None => self.lexer.set_next(0),
    };
  }

  fn forward<K: FnOnce(&Token) -> bool>(&mut self, mode: LexMode, keep: K) -> (bool, Token) {
    if self
      .buf
      .get(self.next_tok_i)
      .is_some_and(|t| t.lex_mode != mode)
    {
      self.reset_to(self.next_tok_i);
    }
    debug_assert!(self.buf.len() >= self.next_tok_i);
    if self.buf.len() == self.next_tok_i {
      let token = lex_next(&mut self.lexer, mode);
      self.buf.push(BufferedToken {
        token,
        lex_mode: mode,
      });
    }
    let t = self.buf[self.next_tok_i].token.clone();
    let k = keep(&t);
    if k {
      self.next_tok_i += 1;
    };
    (k, t)
  }

  pub fn consume_with_mode(&mut self, mode: LexMode) -> Token {
    self.forward(mode, |_| true).1
  }

  pub fn consume(&mut self) -> Token {
    self.consume_with_mode(LexMode::Standard)
  }

  pub fn peek_with_mode(&mut self, mode: LexMode) -> Token {
    self.forward(mode, |_| false).1
  }

  pub fn peek(&mut self) -> Token {
    self.peek_with_mode(LexMode::Standard)
  }

  pub fn peek_2(&mut self) -> (Token, Token) {
    let n = self.next_tok_i;
    let a = self.forward(LexMode::Standard, |_| true).1;
    let b = self.forward(LexMode::Standard, |_| true).1;
    self.next_tok_i = n;
    (a, b)
  }

  pub fn peek_3(&mut self) -> (Token, Token, Token) {
    let n = self.next_tok_i;
    let a = self.forward(LexMode::Standard, |_| true).1;
    let b = self.forward(LexMode::Standard, |_| true).1;
    let c = self.forward(LexMode::Standard, |_| true).1;
    self.next_tok_i = n;
    (a, b, c)
  }

  pub fn maybe_consume_with_mode(&mut self, typ: TT, mode: LexMode) -> MaybeToken {
    let (matched, t) = self.forward(mode, |t| t.typ == typ);
    MaybeToken {
      typ: t.typ,
      matched,
      loc: t.loc,
    }
  }

  pub fn consume_if(&mut self, typ: TT) -> MaybeToken {
    self.maybe_consume_with_mode(typ, LexMode::Standard)
  }

  pub fn require_with_mode(&mut self, typ: TT, mode: LexMode) -> SyntaxResult<Token> {
    let t = self.peek_with_mode(mode);
    if t.typ != typ {
      return Err(match t.typ {
        TT::Invalid | TT::EOF => self.unexpected(&t),
        _ => t.error(SyntaxErrorType::RequiredTokenNotFound(typ)),
      });
    };
    Ok(self.consume_with_mode(mode))
  }

  pub fn require(&mut self, typ: TT) -> SyntaxResult<Token> {
    self.require_with_mode(typ, LexMode::Standard)
  }

  /// The error for a token that cannot appear here. Invalid tokens report why the lexer rejected them.
  pub fn unexpected(&self, t: &Token) -> SyntaxError {
    match t.typ {
      TT::Invalid => t.error(self.lexer.invalid_reason(t.loc.0)),
      TT::KeywordEnum => t.error(SyntaxErrorType::UnexpectedReservedWord),
      _ => t.error(SyntaxErrorType::UnexpectedToken),
    }
  }

  /// Whether the token can be an identifier in sloppy code, ignoring `yield`/`await` context.
  pub fn is_identifier_like(typ: TT) -> bool {
    typ == TT::Identifier
      || UNRESERVED_KEYWORDS.contains(&typ)
      || typ == TT::KeywordYield
      || typ == TT::KeywordAwait
  }

  /// Decodes the escapes in an identifier token, reporting escaped reserved words.
  pub fn identifier_name(&mut self, t: &Token) -> SyntaxResult<String> {
    let raw = self.str(t.loc);
    if !raw.contains('\\') {
      return Ok(raw.to_string());
    };
    let name = expr::lit::decode_identifier(raw).ok_or_else(|| {
      t.error(SyntaxErrorType::InvalidCharacterEscape)
    })?;
    if KEYWORD_STRS
      .get(name.as_str())
      .is_some_and(|tt| !UNRESERVED_KEYWORDS.contains(tt))
    {
      self.tolerate(t.error(SyntaxErrorType::EscapedKeyword))?;
    };
    Ok(name)
  }

  fn marker(&self, offset: usize) -> Marker {
    let p = self.lines.position(offset);
    Marker {
      offset,
      line: p.line,
      column: p.column,
    }
  }

  fn emit(&mut self, event: NodeEvent) {
    if self.speculating > 0 {
      self.deferred_events.push(event);
    } else {
      self.dispatch.visit_node(&event);
    }
  }

  /// Creates a node over `loc`, assigning it an id and announcing its completion.
  pub fn node_at<S: Syntax>(&mut self, loc: Loc, stx: S) -> Node<S> {
    let id = NodeId(self.next_node_id);
    self.next_node_id += 1;
    let event = NodeEvent {
      id,
      kind: S::KIND,
      start: self.marker(loc.0),
      end: self.marker(loc.1),
      empty: stx.is_empty_body(),
    };
    let mut node = Node::new(loc, id, stx);
    if self.config.range {
      node.meta.range = Some(loc.range());
    };
    if self.config.loc {
      node.meta.position = Some(self.lines.location(loc));
    };
    self.emit(event);
    node
  }

  /// Creates a node spanning from `start` to the end of the last consumed token.
  pub fn node<S: Syntax>(&mut self, start: usize, stx: S) -> Node<S> {
    let loc = Loc(start, max(start, self.prev_end()));
    self.node_at(loc, stx)
  }

  /// Start offset of the next token.
  pub fn start(&mut self) -> usize {
    self.peek().loc.0
  }

  /// Runs `f` speculatively: if it fails or returns None, everything it consumed, recorded or emitted is undone.
  pub fn attempt<S, F>(&mut self, f: F) -> Option<S>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<Option<S>>,
  {
    let checkpoint = self.checkpoint();
    self.speculating += 1;
    let result = f(self);
    self.speculating -= 1;
    match result {
      Ok(Some(v)) => {
        if self.speculating == 0 {
          for event in std::mem::take(&mut self.deferred_events) {
            self.dispatch.visit_node(&event);
          }
        };
        Some(v)
      }
      _ => {
        self.restore_checkpoint(checkpoint);
        None
      }
    }
  }
}
