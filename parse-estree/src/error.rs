use crate::loc::LineIndex;
use crate::loc::Loc;
use crate::token::TT;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use serde::Serialize;
use std::error::Error;
use std::fmt::Display;

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum SyntaxErrorType {
  // Lexical.
  InvalidCharacterEscape,
  InvalidNumericLiteral,
  InvalidRegexFlags,
  LineTerminatorInString,
  UnexpectedCharacter,
  UnterminatedComment,
  UnterminatedRegex,
  UnterminatedString,
  UnterminatedTemplate,

  // Grammar.
  BadGetterArity,
  BadSetterArity,
  ConstructorSpecialMethod,
  DeclarationMissingInitializer(&'static str),
  DuplicateConstructor,
  DuplicateDefaultClause,
  DuplicateLabel(String),
  DuplicateParameter,
  DuplicateProto,
  EscapedKeyword,
  ExpectedSyntax(&'static str),
  ForInOfInitializer(&'static str),
  IllegalBreak,
  IllegalContinue,
  IllegalReturn,
  IllegalUseStrict,
  InvalidAssigmentTarget,
  InvalidShorthandInitializer,
  JsxClosingTagMismatch(String),
  LetInLexicalBinding,
  LineTerminatorAfterArrowFunctionParameters,
  LineTerminatorAfterThrow,
  ModuleDeclarationInScript,
  NewTargetOutsideFunction,
  Redeclaration(String),
  RequiredTokenNotFound(TT),
  RestElementNotLast,
  RestParameterWithDefault,
  StaticPrototype,
  StrictDelete,
  StrictEvalArguments,
  StrictOctalEscape,
  StrictOctalLiteral,
  StrictReservedWord,
  StrictWith,
  TemplateOctalEscape,
  TryStatementHasNoCatchOrFinally,
  UndefinedLabel(String),
  UnexpectedReservedWord,
  UnexpectedToken,
}

impl SyntaxErrorType {
  /// Human-readable description. `raw` is the source text of the offending token, used by messages that quote it.
  pub fn message(&self, actual_token: Option<TT>, raw: &str) -> String {
    match self {
      SyntaxErrorType::InvalidCharacterEscape => "Invalid escape sequence".into(),
      SyntaxErrorType::InvalidNumericLiteral => "Invalid numeric literal".into(),
      SyntaxErrorType::InvalidRegexFlags => "Invalid regular expression flags".into(),
      SyntaxErrorType::LineTerminatorInString => "Unterminated string constant".into(),
      SyntaxErrorType::UnexpectedCharacter => "Invalid or unexpected token".into(),
      SyntaxErrorType::UnterminatedComment => "Unterminated comment".into(),
      SyntaxErrorType::UnterminatedRegex => "Invalid regular expression: missing /".into(),
      SyntaxErrorType::UnterminatedString => "Unterminated string constant".into(),
      SyntaxErrorType::UnterminatedTemplate => "Unterminated template".into(),
      SyntaxErrorType::BadGetterArity => "Getter must not have any formal parameters.".into(),
      SyntaxErrorType::BadSetterArity => "Setter must have exactly one formal parameter.".into(),
      SyntaxErrorType::ConstructorSpecialMethod => {
        "Class constructor may not be an accessor, generator or async method".into()
      }
      SyntaxErrorType::DeclarationMissingInitializer(kind) => {
        format!("Missing initializer in {} declaration", kind)
      }
      SyntaxErrorType::DuplicateConstructor => "A class may only have one constructor".into(),
      SyntaxErrorType::DuplicateDefaultClause => {
        "More than one default clause in switch statement".into()
      }
      SyntaxErrorType::DuplicateLabel(name) => {
        format!("Label '{}' has already been declared", name)
      }
      SyntaxErrorType::DuplicateParameter => {
        "Duplicate parameter name not allowed in this context".into()
      }
      SyntaxErrorType::DuplicateProto => {
        "Duplicate __proto__ fields are not allowed in object literals".into()
      }
      SyntaxErrorType::EscapedKeyword => "Keyword must not contain escaped characters".into(),
      SyntaxErrorType::ExpectedSyntax(expected) => format!("Expected {}", expected),
      SyntaxErrorType::ForInOfInitializer(kind) => {
        format!("{} loop variable declaration may not have an initializer.", kind)
      }
      SyntaxErrorType::IllegalBreak => "Illegal break statement".into(),
      SyntaxErrorType::IllegalContinue => "Illegal continue statement".into(),
      SyntaxErrorType::IllegalReturn => "Illegal return statement".into(),
      SyntaxErrorType::IllegalUseStrict => {
        "Illegal 'use strict' directive in function with non-simple parameter list".into()
      }
      SyntaxErrorType::InvalidAssigmentTarget => "Invalid left-hand side in assignment".into(),
      SyntaxErrorType::InvalidShorthandInitializer => "Invalid shorthand property initializer".into(),
      SyntaxErrorType::JsxClosingTagMismatch(name) => {
        format!("Expected corresponding JSX closing tag for {}", name)
      }
      SyntaxErrorType::LetInLexicalBinding => "let is disallowed as a lexically bound name".into(),
      SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters => {
        "Illegal newline before arrow".into()
      }
      SyntaxErrorType::LineTerminatorAfterThrow => "Illegal newline after throw".into(),
      SyntaxErrorType::ModuleDeclarationInScript => {
        "'import' and 'export' may appear only with 'sourceType: module'".into()
      }
      SyntaxErrorType::NewTargetOutsideFunction => {
        "new.target expression is not allowed here".into()
      }
      SyntaxErrorType::Redeclaration(name) => {
        format!("Identifier '{}' has already been declared", name)
      }
      SyntaxErrorType::RequiredTokenNotFound(_) | SyntaxErrorType::UnexpectedToken => {
        unexpected_token_message(actual_token, raw)
      }
      SyntaxErrorType::RestElementNotLast => "Rest element must be last element".into(),
      SyntaxErrorType::RestParameterWithDefault => {
        "Rest parameter may not have a default initializer".into()
      }
      SyntaxErrorType::StaticPrototype => {
        "Classes may not have static property named prototype".into()
      }
      SyntaxErrorType::StrictDelete => "Delete of an unqualified identifier in strict mode.".into(),
      SyntaxErrorType::StrictEvalArguments => {
        "Unexpected eval or arguments in strict mode".into()
      }
      SyntaxErrorType::StrictOctalEscape => {
        "Octal escape sequences are not allowed in strict mode.".into()
      }
      SyntaxErrorType::StrictOctalLiteral => "Octal literals are not allowed in strict mode.".into(),
      SyntaxErrorType::StrictReservedWord => "Unexpected strict mode reserved word".into(),
      SyntaxErrorType::StrictWith => "Strict mode code may not include a with statement".into(),
      SyntaxErrorType::TemplateOctalEscape => {
        "Octal escape sequences are not allowed in template strings".into()
      }
      SyntaxErrorType::TryStatementHasNoCatchOrFinally => "Missing catch or finally after try".into(),
      SyntaxErrorType::UndefinedLabel(name) => format!("Undefined label '{}'", name),
      SyntaxErrorType::UnexpectedReservedWord => "Unexpected reserved word".into(),
    }
  }
}

fn unexpected_token_message(actual_token: Option<TT>, raw: &str) -> String {
  match actual_token {
    None => "Unexpected token".into(),
    Some(TT::EOF) => "Unexpected end of input".into(),
    Some(TT::Invalid) => "Invalid or unexpected token".into(),
    Some(TT::Identifier) => "Unexpected identifier".into(),
    Some(TT::LiteralNumber | TT::LiteralBigInt) => "Unexpected number".into(),
    Some(TT::LiteralString) => "Unexpected string".into(),
    Some(TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd) => {
      format!("Unexpected quasi {}", raw)
    }
    Some(TT::JsxTextContent) => format!("Unexpected JSX text {}", raw.trim()),
    Some(_) => format!("Unexpected token {}", raw),
  }
}

#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  pub actual_token: Option<TT>,
}

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, loc: Loc, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      actual_token,
    }
  }

  pub fn description(&self, source: &str) -> String {
    let raw = source.get(self.loc.0..self.loc.1).unwrap_or("");
    self.typ.message(self.actual_token, raw)
  }

  /// Resolves this error against the source into the public error record.
  pub fn to_parse_error(&self, lines: &LineIndex) -> ParseError {
    let description = self.description(lines.source());
    let position = lines.position(self.loc.0);
    ParseError {
      message: format!("Line {}: {}", position.line, description),
      description,
      index: self.loc.0,
      line: position.line,
      column: position.column + 1,
    }
  }
}

impl Debug for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} around loc [{}:{}]", self, self.loc.0, self.loc.1)
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{:?} [token={:?}]", self.typ, self.actual_token)
  }
}

impl Error for SyntaxError {}

impl PartialEq for SyntaxError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ
  }
}

impl Eq for SyntaxError {}

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// A diagnostic resolved against the source text. `line` and `column` are both 1-based; `index` is a byte offset.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ParseError {
  pub message: String,
  pub description: String,
  pub index: usize,
  pub line: usize,
  pub column: usize,
}

impl Display for ParseError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(&self.message)
  }
}

impl Error for ParseError {}

/// Per-call error sink. In strict mode the first error is returned to the caller; in tolerant mode errors are kept and parsing carries on.
pub struct ErrorHandler {
  tolerant: bool,
  errors: Vec<SyntaxError>,
}

impl ErrorHandler {
  pub fn new(tolerant: bool) -> ErrorHandler {
    ErrorHandler {
      tolerant,
      errors: Vec::new(),
    }
  }

  pub fn is_tolerant(&self) -> bool {
    self.tolerant
  }

  pub fn tolerate(&mut self, err: SyntaxError) -> SyntaxResult<()> {
    if !self.tolerant {
      return Err(err);
    };
    // Recovery can report the same problem twice from the same place.
    if self
      .errors
      .last()
      .is_some_and(|last| last.loc == err.loc && last.typ == err.typ)
    {
      return Ok(());
    };
    self.errors.push(err);
    Ok(())
  }

  pub fn len(&self) -> usize {
    self.errors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.errors.is_empty()
  }

  /// Forgets errors recorded after `len`; used when a speculative parse is rewound.
  pub fn truncate(&mut self, len: usize) {
    self.errors.truncate(len);
  }

  pub fn errors(&self) -> &[SyntaxError] {
    &self.errors
  }
}

#[cfg(test)]
mod tests {
  use super::ErrorHandler;
  use super::SyntaxErrorType;
  use crate::loc::LineIndex;
  use crate::loc::Loc;
  use crate::token::TT;

  #[test]
  fn test_strict_handler_returns_first_error() {
    let mut handler = ErrorHandler::new(false);
    let err = Loc(0, 1).error(SyntaxErrorType::UnexpectedToken, Some(TT::Comma));
    assert!(handler.tolerate(err).is_err());
    assert!(handler.is_empty());
  }

  #[test]
  fn test_tolerant_handler_accumulates() {
    let mut handler = ErrorHandler::new(true);
    handler
      .tolerate(Loc(0, 1).error(SyntaxErrorType::StrictWith, None))
      .unwrap();
    handler
      .tolerate(Loc(4, 5).error(SyntaxErrorType::IllegalReturn, None))
      .unwrap();
    assert_eq!(handler.len(), 2);
    handler.truncate(1);
    assert_eq!(handler.errors()[0].typ, SyntaxErrorType::StrictWith);
  }

  #[test]
  fn test_parse_error_record() {
    let source = "a\n  )";
    let lines = LineIndex::new(source);
    let err = Loc(4, 5)
      .error(SyntaxErrorType::UnexpectedToken, Some(TT::ParenthesisClose))
      .to_parse_error(&lines);
    assert_eq!(err.description, "Unexpected token )");
    assert_eq!(err.message, "Line 2: Unexpected token )");
    assert_eq!(err.index, 4);
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 3);
  }

  #[test]
  fn test_unexpected_end_message() {
    let msg = SyntaxErrorType::UnexpectedToken.message(Some(TT::EOF), "");
    assert_eq!(msg, "Unexpected end of input");
  }
}
