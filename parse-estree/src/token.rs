use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::lex::KEYWORDS_MAPPING;
use crate::loc::Loc;
use ahash::HashSet;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Token type. Contextual words such as `of` and `get` get their own variant; the parser decides
/// whether they act as keywords or identifiers.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum TT {
  /// End of input.
  EOF,
  /// Unscannable input; see `Lexer::invalid_reason`.
  Invalid,

  // Produced by the pattern matcher and folded away before tokens leave the lexer.
  CommentMultiline,
  CommentMultilineEnd,
  CommentSingle,
  LineTerminator,
  LiteralNumberBin,
  LiteralNumberHex,
  LiteralNumberOct,
  Whitespace,

  // Brackets and separators.
  BraceOpen,
  BraceClose,
  BracketOpen,
  BracketClose,
  ParenthesisOpen,
  ParenthesisClose,
  Colon,
  Comma,
  Dot,
  DotDotDot,
  Semicolon,
  Question,
  QuestionDot,
  EqualsChevronRight,

  // Operators, each followed by its compound assignment form.
  Ampersand,
  AmpersandEquals,
  AmpersandAmpersand,
  AmpersandAmpersandEquals,
  Asterisk,
  AsteriskEquals,
  AsteriskAsterisk,
  AsteriskAsteriskEquals,
  Bar,
  BarEquals,
  BarBar,
  BarBarEquals,
  Caret,
  CaretEquals,
  Hyphen,
  HyphenEquals,
  HyphenHyphen,
  Percent,
  PercentEquals,
  Plus,
  PlusEquals,
  PlusPlus,
  QuestionQuestion,
  QuestionQuestionEquals,
  Slash,
  SlashEquals,
  Exclamation,
  Tilde,
  Equals,

  // Comparison and shifts.
  ChevronLeft,
  ChevronLeftEquals,
  ChevronLeftChevronLeft,
  ChevronLeftChevronLeftEquals,
  ChevronRight,
  ChevronRightEquals,
  ChevronRightChevronRight,
  ChevronRightChevronRightEquals,
  ChevronRightChevronRightChevronRight,
  ChevronRightChevronRightChevronRightEquals,
  EqualsEquals,
  EqualsEqualsEquals,
  ExclamationEquals,
  ExclamationEqualsEquals,

  Identifier,

  // Reserved words.
  KeywordBreak,
  KeywordCase,
  KeywordCatch,
  KeywordClass,
  KeywordConst,
  KeywordContinue,
  KeywordDebugger,
  KeywordDefault,
  KeywordDelete,
  KeywordDo,
  KeywordElse,
  KeywordEnum,
  KeywordExport,
  KeywordExtends,
  KeywordFinally,
  KeywordFor,
  KeywordFunction,
  KeywordIf,
  KeywordImport,
  KeywordIn,
  KeywordInstanceof,
  KeywordNew,
  KeywordReturn,
  KeywordSuper,
  KeywordSwitch,
  KeywordThis,
  KeywordThrow,
  KeywordTry,
  KeywordTypeof,
  KeywordVar,
  KeywordVoid,
  KeywordWhile,
  KeywordWith,
  // Reserved depending on context or strictness.
  KeywordAs,
  KeywordAsync,
  KeywordAwait,
  KeywordFrom,
  KeywordGet,
  KeywordLet,
  KeywordOf,
  KeywordSet,
  KeywordStatic,
  KeywordYield,

  LiteralBigInt,
  LiteralFalse,
  LiteralNull,
  LiteralNumber,
  LiteralRegex,
  LiteralString,
  LiteralTrue,
  /// Template piece that stops at `${`.
  LiteralTemplatePartString,
  /// Template piece that stops at the closing backtick.
  LiteralTemplatePartStringEnd,

  // JSX tag and child modes only.
  ChevronLeftSlash,
  JsxTextContent,
}

impl TT {
  pub fn is_keyword(self) -> bool {
    KEYWORDS_MAPPING.contains_key(&self)
  }

  pub fn is_template_part(self) -> bool {
    matches!(
      self,
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd
    )
  }
}

// Words with their own token type that still bind as names outside strict code.
pub static UNRESERVED_KEYWORDS: Lazy<HashSet<TT>> = Lazy::new(|| {
  [
    TT::KeywordAs,
    TT::KeywordAsync,
    TT::KeywordFrom,
    TT::KeywordGet,
    TT::KeywordLet,
    TT::KeywordOf,
    TT::KeywordSet,
    TT::KeywordStatic,
  ]
  .into_iter()
  .collect()
});

// Reserved only in strict mode code. `yield` and `let` are also handled by the grammar.
pub static STRICT_RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  [
    "implements",
    "interface",
    "let",
    "package",
    "private",
    "protected",
    "public",
    "static",
    "yield",
  ]
  .into_iter()
  .collect()
});

#[derive(Clone, Debug)]
pub struct Token {
  pub loc: Loc,
  // A line terminator (possibly inside a comment) sits between this token and the previous one.
  pub preceded_by_line_terminator: bool,
  pub typ: TT,
}

impl Token {
  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    self.loc.error(typ, Some(self.typ))
  }
}
