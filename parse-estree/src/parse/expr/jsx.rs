use super::super::ParseCtx;
use super::super::Parser;
use crate::ast::expr::jsx::JsxAttr;
use crate::ast::expr::jsx::JsxAttrItem;
use crate::ast::expr::jsx::JsxAttrName;
use crate::ast::expr::jsx::JsxAttrValue;
use crate::ast::expr::jsx::JsxChild;
use crate::ast::expr::jsx::JsxClosingElem;
use crate::ast::expr::jsx::JsxClosingFragment;
use crate::ast::expr::jsx::JsxContainerExpr;
use crate::ast::expr::jsx::JsxElem;
use crate::ast::expr::jsx::JsxElemName;
use crate::ast::expr::jsx::JsxEmptyExpr;
use crate::ast::expr::jsx::JsxExprContainer;
use crate::ast::expr::jsx::JsxFragment;
use crate::ast::expr::jsx::JsxIdentifier;
use crate::ast::expr::jsx::JsxMemberExpr;
use crate::ast::expr::jsx::JsxMemberObject;
use crate::ast::expr::jsx::JsxNamespacedName;
use crate::ast::expr::jsx::JsxOpeningElem;
use crate::ast::expr::jsx::JsxOpeningFragment;
use crate::ast::expr::jsx::JsxSpreadAttr;
use crate::ast::expr::jsx::JsxText;
use crate::ast::expr::lit::LitExpr;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::token::TT;
use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;

static ENTITIES: Lazy<HashMap<&'static str, char>> = Lazy::new(|| {
  let mut map = HashMap::<&'static str, char>::new();
  map.insert("amp", '&');
  map.insert("apos", '\'');
  map.insert("copy", '\u{a9}');
  map.insert("gt", '>');
  map.insert("hellip", '\u{2026}');
  map.insert("laquo", '\u{ab}');
  map.insert("lt", '<');
  map.insert("mdash", '\u{2014}');
  map.insert("middot", '\u{b7}');
  map.insert("nbsp", '\u{a0}');
  map.insert("ndash", '\u{2013}');
  map.insert("quot", '"');
  map.insert("raquo", '\u{bb}');
  map.insert("reg", '\u{ae}');
  map.insert("times", '\u{d7}');
  map.insert("trade", '\u{2122}');
  map
});

fn decode_entity(name: &str) -> Option<char> {
  if let Some(num) = name.strip_prefix('#') {
    let code = match num.strip_prefix(['x', 'X']) {
      Some(hex) => u32::from_str_radix(hex, 16).ok()?,
      None => num.parse::<u32>().ok()?,
    };
    return char::from_u32(code);
  };
  ENTITIES.get(name).copied()
}

/// Replaces character references like `&amp;` and `&#x41;`. Unknown references are kept as written.
pub fn decode_entities(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  let mut rest = raw;
  while let Some(i) = rest.find('&') {
    out.push_str(&rest[..i]);
    rest = &rest[i..];
    let decoded = rest[1..]
      .find(';')
      .filter(|&end| end > 0 && end <= 10)
      .and_then(|end| decode_entity(&rest[1..end + 1]).map(|c| (c, end + 2)));
    match decoded {
      Some((c, len)) => {
        out.push(c);
        rest = &rest[len..];
      }
      None => {
        out.push('&');
        rest = &rest[1..];
      }
    };
  }
  out.push_str(rest);
  out
}

impl<'a> Parser<'a> {
  fn jsx_identifier(&mut self) -> SyntaxResult<Node<JsxIdentifier>> {
    let t = self.require_with_mode(TT::Identifier, LexMode::JsxTag)?;
    let name = self.string(t.loc);
    Ok(self.node_at(t.loc, JsxIdentifier { name }))
  }

  fn jsx_elem_name(&mut self) -> SyntaxResult<JsxElemName> {
    let start = self.peek_with_mode(LexMode::JsxTag).loc.0;
    let first = self.jsx_identifier()?;
    match self.peek_with_mode(LexMode::JsxTag).typ {
      TT::Colon => {
        self.consume_with_mode(LexMode::JsxTag);
        let name = self.jsx_identifier()?;
        Ok(JsxElemName::Namespaced(self.node(start, JsxNamespacedName {
          namespace: first,
          name,
        })))
      }
      TT::Dot => {
        let mut object = JsxMemberObject::Id(first);
        while self.maybe_consume_with_mode(TT::Dot, LexMode::JsxTag).is_match() {
          let property = self.jsx_identifier()?;
          object = JsxMemberObject::Member(self.node(start, JsxMemberExpr { object, property }));
        }
        match object {
          JsxMemberObject::Member(m) => Ok(JsxElemName::Member(m)),
          JsxMemberObject::Id(id) => Ok(JsxElemName::Id(id)),
        }
      }
      _ => Ok(JsxElemName::Id(first)),
    }
  }

  fn jsx_attr_name(&mut self) -> SyntaxResult<JsxAttrName> {
    let start = self.peek_with_mode(LexMode::JsxTag).loc.0;
    let first = self.jsx_identifier()?;
    if !self.maybe_consume_with_mode(TT::Colon, LexMode::JsxTag).is_match() {
      return Ok(JsxAttrName::Id(first));
    };
    let name = self.jsx_identifier()?;
    Ok(JsxAttrName::Namespaced(self.node(start, JsxNamespacedName {
      namespace: first,
      name,
    })))
  }

  /// Parses `{expr}` or `{}`, starting at the opening brace in tag or text position.
  fn jsx_expr_container(&mut self, ctx: ParseCtx, allow_empty: bool) -> SyntaxResult<Node<JsxExprContainer>> {
    let open = self.require_with_mode(TT::BraceOpen, LexMode::JsxTag)?;
    let next = self.peek();
    let expression = if next.typ == TT::BraceClose && allow_empty {
      // Spans the inside of the braces, including any comments there.
      JsxContainerExpr::Empty(self.node_at(Loc(open.loc.1, next.loc.0), JsxEmptyExpr {}))
    } else {
      JsxContainerExpr::Expr(self.assignment_expr(ctx.with_in(true))?)
    };
    self.require(TT::BraceClose)?;
    Ok(self.node(open.loc.0, JsxExprContainer { expression }))
  }

  fn jsx_attr_value(&mut self, ctx: ParseCtx) -> SyntaxResult<JsxAttrValue> {
    let t = self.peek_with_mode(LexMode::JsxTag);
    match t.typ {
      TT::LiteralString => {
        self.consume_with_mode(LexMode::JsxTag);
        let raw = self.str(t.loc);
        let value = decode_entities(&raw[1..raw.len() - 1]);
        Ok(JsxAttrValue::Str(self.node_at(t.loc, LitExpr::string(value, raw.to_string()))))
      }
      TT::BraceOpen => Ok(JsxAttrValue::Container(self.jsx_expr_container(ctx, false)?)),
      TT::ChevronLeft => {
        self.consume_with_mode(LexMode::JsxTag);
        Ok(match self.jsx_after_chevron(ctx, t.loc.0)? {
          Expr::JsxFragment(f) => JsxAttrValue::Fragment(f),
          Expr::JsxElem(e) => JsxAttrValue::Elem(e),
          _ => return Err(t.error(SyntaxErrorType::UnexpectedToken)),
        })
      }
      _ => Err(self.unexpected(&t)),
    }
  }

  fn jsx_attributes(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<JsxAttrItem>> {
    let mut attributes = Vec::new();
    loop {
      let t = self.peek_with_mode(LexMode::JsxTag);
      match t.typ {
        TT::Slash | TT::ChevronRight => break,
        TT::BraceOpen => {
          self.consume_with_mode(LexMode::JsxTag);
          self.require(TT::DotDotDot)?;
          let argument = self.assignment_expr(ctx.with_in(true))?;
          self.require(TT::BraceClose)?;
          attributes.push(JsxAttrItem::Spread(self.node(t.loc.0, JsxSpreadAttr { argument })));
        }
        _ => {
          let name = self.jsx_attr_name()?;
          let value = if self.maybe_consume_with_mode(TT::Equals, LexMode::JsxTag).is_match() {
            Some(self.jsx_attr_value(ctx)?)
          } else {
            None
          };
          attributes.push(JsxAttrItem::Attr(self.node(t.loc.0, JsxAttr { name, value })));
        }
      };
    }
    Ok(attributes)
  }

  /// Parses children up to and including `</`, returning them with the start of the closing tag.
  fn jsx_children(&mut self, ctx: ParseCtx) -> SyntaxResult<(Vec<JsxChild>, usize)> {
    let mut children = Vec::new();
    loop {
      let text = self.peek_with_mode(LexMode::JsxTextContent);
      if !text.loc.is_empty() {
        self.consume_with_mode(LexMode::JsxTextContent);
        let raw = self.string(text.loc);
        children.push(JsxChild::Text(self.node_at(text.loc, JsxText {
          value: raw.clone(),
          raw,
        })));
        continue;
      };
      let t = self.peek_with_mode(LexMode::JsxTag);
      match t.typ {
        TT::ChevronLeftSlash => {
          self.consume_with_mode(LexMode::JsxTag);
          return Ok((children, t.loc.0));
        }
        TT::ChevronLeft => {
          self.consume_with_mode(LexMode::JsxTag);
          children.push(match self.jsx_after_chevron(ctx, t.loc.0)? {
            Expr::JsxFragment(f) => JsxChild::Fragment(f),
            Expr::JsxElem(e) => JsxChild::Elem(e),
            _ => return Err(t.error(SyntaxErrorType::UnexpectedToken)),
          });
        }
        TT::BraceOpen => {
          children.push(JsxChild::Container(self.jsx_expr_container(ctx, true)?));
        }
        _ => return Err(self.unexpected(&t)),
      };
    }
  }

  /// Parses the rest of an element or fragment whose `<` has been consumed.
  fn jsx_after_chevron(&mut self, ctx: ParseCtx, start: usize) -> SyntaxResult<Expr> {
    if self.peek_with_mode(LexMode::JsxTag).typ == TT::ChevronRight {
      let end = self.consume_with_mode(LexMode::JsxTag);
      let opening_fragment = self.node_at(Loc(start, end.loc.1), JsxOpeningFragment {});
      let (children, close_start) = self.jsx_children(ctx)?;
      let close = self.peek_with_mode(LexMode::JsxTag);
      if close.typ != TT::ChevronRight {
        let name = self.jsx_elem_name()?;
        return Err(name_loc(&name).error(SyntaxErrorType::JsxClosingTagMismatch("<>".into()), None));
      };
      self.consume_with_mode(LexMode::JsxTag);
      let closing_fragment = self.node(close_start, JsxClosingFragment {});
      return Ok(Expr::JsxFragment(self.node(start, JsxFragment {
        opening_fragment,
        children,
        closing_fragment,
      })));
    };

    let name = self.jsx_elem_name()?;
    let attributes = self.jsx_attributes(ctx)?;
    let self_closing = self.maybe_consume_with_mode(TT::Slash, LexMode::JsxTag).is_match();
    self.require_with_mode(TT::ChevronRight, LexMode::JsxTag)?;
    let opening_name = name.qualified();
    let opening_element = self.node(start, JsxOpeningElem {
      name,
      self_closing,
      attributes,
    });
    if self_closing {
      return Ok(Expr::JsxElem(self.node(start, JsxElem {
        opening_element,
        children: Vec::new(),
        closing_element: None,
      })));
    };

    let (children, close_start) = self.jsx_children(ctx)?;
    let close = self.peek_with_mode(LexMode::JsxTag);
    if close.typ == TT::ChevronRight {
      return Err(close.error(SyntaxErrorType::JsxClosingTagMismatch(opening_name)));
    };
    let closing_name = self.jsx_elem_name()?;
    if closing_name.qualified() != opening_name {
      return Err(name_loc(&closing_name).error(SyntaxErrorType::JsxClosingTagMismatch(opening_name), None));
    };
    self.require_with_mode(TT::ChevronRight, LexMode::JsxTag)?;
    let closing_element = self.node(close_start, JsxClosingElem { name: closing_name });
    Ok(Expr::JsxElem(self.node(start, JsxElem {
      opening_element,
      children,
      closing_element: Some(closing_element),
    })))
  }

  /// Parses a JSX element or fragment in expression position.
  pub fn jsx_elem_or_fragment(&mut self, ctx: ParseCtx) -> SyntaxResult<Expr> {
    let start = self.require_with_mode(TT::ChevronLeft, LexMode::JsxTag)?.loc.0;
    self.jsx_after_chevron(ctx, start)
  }
}

fn name_loc(name: &JsxElemName) -> Loc {
  match name {
    JsxElemName::Id(n) => n.loc,
    JsxElemName::Member(n) => n.loc,
    JsxElemName::Namespaced(n) => n.loc,
  }
}

#[cfg(test)]
mod tests {
  use super::decode_entities;

  #[test]
  fn test_decode_entities() {
    assert_eq!(decode_entities("a &amp; b"), "a & b");
    assert_eq!(decode_entities("&#65;&#x42;"), "AB");
    assert_eq!(decode_entities("&nbsp;"), "\u{a0}");
    assert_eq!(decode_entities("&unknown; & &;"), "&unknown; & &;");
  }
}
