use super::super::ParseCtx;
use super::super::Parser;
use crate::ast::expr::lit::LitExpr;
use crate::ast::expr::lit::LitValue;
use crate::ast::expr::lit::RegexValue;
use crate::ast::expr::lit::TemplateElement;
use crate::ast::expr::lit::TemplateExpr;
use crate::ast::expr::lit::TemplateValue;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::num::JsNumber;
use crate::token::Token;
use crate::token::TT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeError {
  // Offsets are relative to the decoded text's start.
  Invalid(usize),
  Octal(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
  pub value: String,
  // Offset of the first legacy octal escape (`\01`, `\8`), only recorded for strings.
  pub legacy_octal: Option<usize>,
}

fn hex_value(digits: &str) -> Option<u32> {
  if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
    return None;
  };
  u32::from_str_radix(digits, 16).ok()
}

/// Parses the part of a `\u` escape after the `u`, returning the code point and the number of bytes used.
fn unicode_escape(rest: &str) -> Option<(u32, usize)> {
  if let Some(braced) = rest.strip_prefix('{') {
    let end = braced.find('}')?;
    let cp = hex_value(&braced[..end])?;
    if cp > 0x10FFFF {
      return None;
    };
    return Some((cp, end + 2));
  };
  let digits = rest.get(..4)?;
  Some((hex_value(digits)?, 4))
}

fn push_code_point(out: &mut Vec<u16>, cp: u32) {
  match char::from_u32(cp) {
    Some(c) => {
      let mut buf = [0u16; 2];
      out.extend_from_slice(c.encode_utf16(&mut buf));
    }
    // A lone surrogate; pairs are joined when the units are decoded.
    None => out.push(cp as u16),
  }
}

/// Decodes escape sequences in the body of a string literal or template piece.
///
/// Template pieces reject legacy octal escapes and normalise raw line terminators to `\n`.
pub fn decode_escapes(body: &str, template: bool) -> Result<Decoded, EscapeError> {
  let mut out = Vec::<u16>::with_capacity(body.len());
  let mut legacy_octal = None;
  let mut i = 0;
  while i < body.len() {
    let rest = &body[i..];
    let Some(c) = rest.chars().next() else {
      break;
    };
    if c == '\r' && template {
      out.push(b'\n' as u16);
      i += if rest.starts_with("\r\n") { 2 } else { 1 };
      continue;
    };
    if c != '\\' {
      push_code_point(&mut out, c as u32);
      i += c.len_utf8();
      continue;
    };
    let escape_start = i;
    let Some(e) = rest[1..].chars().next() else {
      return Err(EscapeError::Invalid(escape_start));
    };
    i += 1 + e.len_utf8();
    match e {
      'b' => out.push(0x08),
      'f' => out.push(0x0c),
      'n' => out.push(b'\n' as u16),
      'r' => out.push(b'\r' as u16),
      't' => out.push(b'\t' as u16),
      'v' => out.push(0x0b),
      // Line continuation.
      '\r' => {
        if body[i..].starts_with('\n') {
          i += 1;
        };
      }
      '\n' | '\u{2028}' | '\u{2029}' => {}
      '0' if !body[i..].starts_with(|c: char| c.is_ascii_digit()) => out.push(0),
      '0'..='7' => {
        if template {
          return Err(EscapeError::Octal(escape_start));
        };
        legacy_octal.get_or_insert(escape_start);
        let mut value = e as u32 - '0' as u32;
        // Up to three digits, as long as the value stays within a byte.
        let max_digits = if e <= '3' { 2 } else { 1 };
        for _ in 0..max_digits {
          match body[i..].chars().next() {
            Some(d @ '0'..='7') => {
              value = value * 8 + (d as u32 - '0' as u32);
              i += 1;
            }
            _ => break,
          };
        }
        out.push(value as u16);
      }
      '8' | '9' => {
        if template {
          return Err(EscapeError::Octal(escape_start));
        };
        legacy_octal.get_or_insert(escape_start);
        out.push(e as u16);
      }
      'x' => {
        let cp = body
          .get(i..i + 2)
          .and_then(hex_value)
          .ok_or(EscapeError::Invalid(escape_start))?;
        out.push(cp as u16);
        i += 2;
      }
      'u' => {
        let (cp, len) = unicode_escape(&body[i..]).ok_or(EscapeError::Invalid(escape_start))?;
        push_code_point(&mut out, cp);
        i += len;
      }
      other => push_code_point(&mut out, other as u32),
    };
  }
  Ok(Decoded {
    value: String::from_utf16_lossy(&out),
    legacy_octal,
  })
}

/// Decodes `\u` escapes in an identifier. Returns None for any other or malformed escape.
pub fn decode_identifier(raw: &str) -> Option<String> {
  let mut out = String::with_capacity(raw.len());
  let mut i = 0;
  while i < raw.len() {
    let rest = &raw[i..];
    if let Some(esc) = rest.strip_prefix('\\') {
      let (cp, len) = unicode_escape(esc.strip_prefix('u')?)?;
      out.push(char::from_u32(cp)?);
      i += 2 + len;
    } else {
      let c = rest.chars().next()?;
      out.push(c);
      i += c.len_utf8();
    };
  }
  Some(out)
}

/// Splits a template token into its raw text without the delimiters.
pub fn template_raw(raw: &str) -> &str {
  let raw = &raw[1..];
  raw
    .strip_suffix("${")
    .or_else(|| raw.strip_suffix('`'))
    .unwrap_or(raw)
}

impl<'a> Parser<'a> {
  pub fn lit_str(&mut self, t: &Token) -> SyntaxResult<Node<LitExpr>> {
    let raw = self.str(t.loc);
    let body = raw.get(1..raw.len().saturating_sub(1)).unwrap_or("");
    let decoded = decode_escapes(body, false)
      .map_err(|_| t.error(SyntaxErrorType::InvalidCharacterEscape))?;
    if decoded.legacy_octal.is_some() && self.is_strict() {
      self.tolerate(t.error(SyntaxErrorType::StrictOctalEscape))?;
    };
    Ok(self.node_at(t.loc, LitExpr::string(decoded.value, raw.to_string())))
  }

  pub fn lit_num(&mut self, t: &Token) -> SyntaxResult<Node<LitExpr>> {
    let raw = self.str(t.loc);
    if self.is_strict() && JsNumber::is_legacy_octal_like(raw) {
      self.tolerate(t.error(SyntaxErrorType::StrictOctalLiteral))?;
    };
    let value = JsNumber::from_literal(raw)
      .ok_or_else(|| t.error(SyntaxErrorType::InvalidNumericLiteral))?;
    Ok(self.node_at(t.loc, LitExpr {
      value: LitValue::Num(value),
      raw: raw.to_string(),
      regex: None,
      bigint: None,
    }))
  }

  pub fn lit_bigint(&mut self, t: &Token) -> Node<LitExpr> {
    let raw = self.str(t.loc);
    let digits = raw.strip_suffix('n').unwrap_or(raw).replace('_', "");
    self.node_at(t.loc, LitExpr {
      value: LitValue::Null,
      raw: raw.to_string(),
      regex: None,
      bigint: Some(digits),
    })
  }

  pub fn lit_regex(&mut self, t: &Token) -> Node<LitExpr> {
    let raw = self.str(t.loc);
    let close = raw.rfind('/').unwrap_or(raw.len());
    let regex = RegexValue {
      pattern: raw.get(1..close).unwrap_or("").to_string(),
      flags: raw.get(close + 1..).unwrap_or("").to_string(),
    };
    self.node_at(t.loc, LitExpr {
      value: LitValue::Null,
      raw: raw.to_string(),
      regex: Some(regex),
      bigint: None,
    })
  }

  /// `true`, `false` and `null`.
  pub fn lit_keyword(&mut self, t: &Token) -> Node<LitExpr> {
    let value = match t.typ {
      TT::LiteralTrue => LitValue::Bool(true),
      TT::LiteralFalse => LitValue::Bool(false),
      _ => LitValue::Null,
    };
    self.node_at(t.loc, LitExpr {
      value,
      raw: self.string(t.loc),
      regex: None,
      bigint: None,
    })
  }

  fn template_element(&mut self, t: &Token, tagged: bool) -> SyntaxResult<Node<TemplateElement>> {
    let raw = template_raw(self.str(t.loc));
    let cooked = match decode_escapes(raw, true) {
      Ok(d) => Some(d.value),
      Err(_) if tagged => None,
      Err(EscapeError::Octal(_)) => return Err(t.error(SyntaxErrorType::TemplateOctalEscape)),
      Err(EscapeError::Invalid(_)) => return Err(t.error(SyntaxErrorType::InvalidCharacterEscape)),
    };
    let value = TemplateValue {
      raw: raw.replace("\r\n", "\n").replace('\r', "\n"),
      cooked,
    };
    let tail = t.typ == TT::LiteralTemplatePartStringEnd;
    Ok(self.node_at(t.loc, TemplateElement { value, tail }))
  }

  /// Parses a template literal starting at the next token. In tagged templates, invalid escapes produce a null `cooked` value instead of an error.
  pub fn template(&mut self, ctx: ParseCtx, tagged: bool) -> SyntaxResult<Node<TemplateExpr>> {
    let mut t = self.consume();
    let start = t.loc.0;
    let mut quasis = Vec::new();
    let mut expressions = Vec::new();
    loop {
      if !t.typ.is_template_part() {
        return Err(self.unexpected(&t));
      };
      quasis.push(self.template_element(&t, tagged)?);
      if t.typ == TT::LiteralTemplatePartStringEnd {
        break;
      };
      expressions.push(self.expr(ctx.with_in(true))?);
      let close = self.peek();
      if close.typ != TT::BraceClose {
        return Err(self.unexpected(&close));
      };
      t = self.consume_with_mode(LexMode::TemplateStrContinue);
    }
    Ok(self.node(start, TemplateExpr {
      quasis,
      expressions,
    }))
  }
}

#[cfg(test)]
mod tests {
  use super::decode_escapes;
  use super::decode_identifier;
  use super::template_raw;
  use super::EscapeError;

  #[test]
  fn test_simple_escapes() {
    let d = decode_escapes(r"a\tb\n\x41B\u{43}", false).unwrap();
    assert_eq!(d.value, "a\tb\nABC");
    assert_eq!(d.legacy_octal, None);
  }

  #[test]
  fn test_surrogate_pair() {
    let d = decode_escapes(r"\uD83D\uDE00", false).unwrap();
    assert_eq!(d.value, "😀");
  }

  #[test]
  fn test_legacy_octal() {
    let d = decode_escapes(r"x\101\0", false).unwrap();
    assert_eq!(d.value, "xA\0");
    assert_eq!(d.legacy_octal, Some(1));
    assert_eq!(decode_escapes(r"\8", false).unwrap().legacy_octal, Some(0));
    assert_eq!(decode_escapes(r"\01", true), Err(EscapeError::Octal(0)));
    assert_eq!(decode_escapes(r"\0", true).unwrap().value, "\0");
  }

  #[test]
  fn test_invalid_escapes() {
    assert_eq!(decode_escapes(r"\xZ1", false), Err(EscapeError::Invalid(0)));
    assert_eq!(decode_escapes(r"ab\u{110000}", false), Err(EscapeError::Invalid(2)));
    assert_eq!(decode_escapes(r"\u12", true), Err(EscapeError::Invalid(0)));
  }

  #[test]
  fn test_line_continuation_and_template_newlines() {
    assert_eq!(decode_escapes("a\\\r\nb", false).unwrap().value, "ab");
    assert_eq!(decode_escapes("a\r\nb\rc", true).unwrap().value, "a\nb\nc");
  }

  #[test]
  fn test_template_raw() {
    assert_eq!(template_raw("`abc`"), "abc");
    assert_eq!(template_raw("`abc${"), "abc");
    assert_eq!(template_raw("}abc${"), "abc");
    assert_eq!(template_raw("}`"), "");
  }

  #[test]
  fn test_decode_identifier() {
    assert_eq!(decode_identifier(r"abc").as_deref(), Some("abc"));
    assert_eq!(decode_identifier(r"x\u{79}").as_deref(), Some("xy"));
    assert_eq!(decode_identifier(r"\x61"), None);
    assert_eq!(decode_identifier(r"a\"), None);
    assert_eq!(decode_identifier(r"\u0061\b"), None);
  }
}
