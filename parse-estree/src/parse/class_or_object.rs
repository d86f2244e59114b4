use super::expr::lit::decode_identifier;
use super::expr::pat::is_valid_pattern_identifier;
use super::scope::DeclKind;
use super::scope::FnState;
use super::ParseCtx;
use super::Parser;
use crate::ast::class_or_object::ClassBody;
use crate::ast::class_or_object::MethodDef;
use crate::ast::class_or_object::MethodKind;
use crate::ast::class_or_object::ObjMember;
use crate::ast::class_or_object::PropKind;
use crate::ast::class_or_object::Property;
use crate::ast::expr::lit::LitValue;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::AssignExpr;
use crate::ast::expr::ClassExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::ObjExpr;
use crate::ast::expr::SpreadElement;
use crate::ast::func::FuncExpr;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ClassDecl;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::operator::OperatorName;
use crate::token::Token;
use crate::token::TT;

/// Whether the token can begin a property name.
fn is_key_start(t: &Token) -> bool {
  matches!(
    t.typ,
    TT::BracketOpen | TT::Identifier | TT::LiteralBigInt | TT::LiteralNumber | TT::LiteralString
  ) || t.typ.is_keyword()
}

/// The name of a non-computed key, if it is an identifier or string.
fn key_name(key: &Expr) -> Option<&str> {
  match key {
    Expr::Id(id) => Some(id.stx.name.as_str()),
    Expr::Lit(lit) => match &lit.stx.value {
      LitValue::Str(s) => Some(s.as_str()),
      _ => None,
    },
    _ => None,
  }
}

/// Modifiers preceding a property name: `async`, `get`, `set` and `*`.
struct MemberModifiers {
  is_async: bool,
  generator: bool,
  accessor: Option<PropKind>,
}

impl<'a> Parser<'a> {
  /// Parses a property name, returning it and whether it was computed.
  pub fn property_key(&mut self, ctx: ParseCtx) -> SyntaxResult<(Expr, bool)> {
    let t = self.peek();
    let key = match t.typ {
      TT::BracketOpen => {
        self.consume();
        let key = self.assignment_expr(ctx.with_in(true))?;
        self.require(TT::BracketClose)?;
        return Ok((key, true));
      }
      TT::LiteralString => {
        self.consume();
        Expr::Lit(self.lit_str(&t)?)
      }
      TT::LiteralNumber => {
        self.consume();
        Expr::Lit(self.lit_num(&t)?)
      }
      TT::LiteralBigInt => {
        self.consume();
        Expr::Lit(self.lit_bigint(&t))
      }
      typ if typ == TT::Identifier || typ.is_keyword() => {
        self.consume();
        let name = decode_identifier(self.str(t.loc))
          .ok_or_else(|| t.error(SyntaxErrorType::InvalidCharacterEscape))?;
        Expr::Id(self.node_at(t.loc, IdExpr { name }))
      }
      _ => return Err(self.unexpected(&t)),
    };
    Ok((key, false))
  }

  fn member_modifiers(&mut self) -> MemberModifiers {
    let mut m = MemberModifiers {
      is_async: false,
      generator: false,
      accessor: None,
    };
    let (t0, t1) = self.peek_2();
    match t0.typ {
      TT::KeywordAsync
        if !t1.preceded_by_line_terminator && (is_key_start(&t1) || t1.typ == TT::Asterisk) =>
      {
        self.consume();
        m.is_async = true;
      }
      TT::KeywordGet if is_key_start(&t1) => {
        self.consume();
        m.accessor = Some(PropKind::Get);
      }
      TT::KeywordSet if is_key_start(&t1) => {
        self.consume();
        m.accessor = Some(PropKind::Set);
      }
      _ => {}
    };
    if m.accessor.is_none() && self.consume_if(TT::Asterisk).is_match() {
      m.generator = true;
    };
    m
  }

  fn check_accessor_arity(&mut self, kind: PropKind, func: &Node<FuncExpr>) -> SyntaxResult<()> {
    let params = &func.stx.func.params;
    match kind {
      PropKind::Get if !params.is_empty() => {
        self.tolerate(func.error(SyntaxErrorType::BadGetterArity))
      }
      PropKind::Set if params.len() != 1 || matches!(params[0], Pat::Rest(_)) => {
        self.tolerate(func.error(SyntaxErrorType::BadSetterArity))
      }
      _ => Ok(()),
    }
  }

  pub fn obj_literal(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ObjExpr>> {
    let start = self.require(TT::BraceOpen)?.loc.0;
    let mut properties = Vec::new();
    let mut has_proto = false;
    while !self.consume_if(TT::BraceClose).is_match() {
      properties.push(self.obj_member(ctx, &mut has_proto)?);
      if !self.consume_if(TT::Comma).is_match() {
        self.require(TT::BraceClose)?;
        break;
      };
    }
    Ok(self.node(start, ObjExpr { properties }))
  }

  fn obj_member(&mut self, ctx: ParseCtx, has_proto: &mut bool) -> SyntaxResult<ObjMember> {
    let start = self.start();
    if self.consume_if(TT::DotDotDot).is_match() {
      let argument = self.assignment_expr(ctx.with_in(true))?;
      return Ok(ObjMember::Spread(self.node(start, SpreadElement { argument })));
    };
    let modifiers = self.member_modifiers();
    let key_tok = self.peek();
    let (key, computed) = self.property_key(ctx)?;

    if let Some(kind) = modifiers.accessor {
      let value = self.method_func(false, false, FnState::method(false))?;
      self.check_accessor_arity(kind, &value)?;
      return Ok(ObjMember::Prop(self.node(start, Property {
        key,
        computed,
        value: Expr::Func(value),
        kind,
        method: false,
        shorthand: false,
      })));
    };

    if modifiers.is_async || modifiers.generator || self.peek().typ == TT::ParenthesisOpen {
      let value = self.method_func(modifiers.is_async, modifiers.generator, FnState::method(false))?;
      return Ok(ObjMember::Prop(self.node(start, Property {
        key,
        computed,
        value: Expr::Func(value),
        kind: PropKind::Init,
        method: true,
        shorthand: false,
      })));
    };

    if self.consume_if(TT::Colon).is_match() {
      if !computed && key_name(&key) == Some("__proto__") {
        if *has_proto {
          self.tolerate(key.loc().error(SyntaxErrorType::DuplicateProto, None))?;
        };
        *has_proto = true;
      };
      let value = self.assignment_expr_cover(ctx.with_in(true))?;
      return Ok(ObjMember::Prop(self.node(start, Property {
        key,
        computed,
        value,
        kind: PropKind::Init,
        method: false,
        shorthand: false,
      })));
    };

    // Shorthand `{a}` or, only valid as a pattern, `{a = 1}`.
    if computed || !is_valid_pattern_identifier(key_tok.typ, ctx.rules) {
      return Err(self.unexpected(&key_tok));
    };
    let name = self.identifier_name(&key_tok)?;
    self.check_identifier(&key_tok, &name, false)?;
    let id = self.node_at(key_tok.loc, IdExpr { name });
    let value = match self.consume_if(TT::Equals).match_loc() {
      Some(eq) => {
        if self.cover_init.is_none() {
          self.cover_init = Some(eq);
        };
        let right = self.assignment_expr(ctx.with_in(true))?;
        Expr::Assign(self.node(start, AssignExpr {
          operator: OperatorName::Assignment,
          left: Pat::Id(id),
          right,
        }))
      }
      None => Expr::Id(id),
    };
    Ok(ObjMember::Prop(self.node(start, Property {
      key,
      computed,
      value,
      kind: PropKind::Init,
      method: false,
      shorthand: true,
    })))
  }

  /// Runs `f` in strict mode, as all parts of a class are strict.
  fn with_strict<T, F>(&mut self, f: F) -> SyntaxResult<T>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<T>,
  {
    let was_strict = self.strict;
    self.strict = true;
    let res = f(self);
    self.strict = was_strict;
    res
  }

  fn class_tail(&mut self, ctx: ParseCtx) -> SyntaxResult<(Option<Expr>, Node<ClassBody>)> {
    let super_class = if self.consume_if(TT::KeywordExtends).is_match() {
      Some(self.lhs_expr(ctx)?)
    } else {
      None
    };
    let start = self.require(TT::BraceOpen)?.loc.0;
    let mut body = Vec::new();
    let mut has_ctor = false;
    while !self.consume_if(TT::BraceClose).is_match() {
      if self.consume_if(TT::Semicolon).is_match() {
        continue;
      };
      body.push(self.class_member(ctx, super_class.is_some(), &mut has_ctor)?);
    }
    Ok((super_class, self.node(start, ClassBody { body })))
  }

  fn class_member(
    &mut self,
    ctx: ParseCtx,
    has_super: bool,
    has_ctor: &mut bool,
  ) -> SyntaxResult<Node<MethodDef>> {
    let start = self.start();
    let (t0, t1) = self.peek_2();
    let static_ = t0.typ == TT::KeywordStatic && (is_key_start(&t1) || t1.typ == TT::Asterisk);
    if static_ {
      self.consume();
    };
    let modifiers = self.member_modifiers();
    let (key, computed) = self.property_key(ctx)?;
    let next = self.peek();
    if next.typ != TT::ParenthesisOpen {
      return Err(self.unexpected(&next));
    };
    let name = if computed { None } else { key_name(&key) };
    let is_ctor = !static_ && name == Some("constructor");
    if is_ctor {
      if modifiers.is_async || modifiers.generator || modifiers.accessor.is_some() {
        self.tolerate(key.loc().error(SyntaxErrorType::ConstructorSpecialMethod, None))?;
      } else if *has_ctor {
        self.tolerate(key.loc().error(SyntaxErrorType::DuplicateConstructor, None))?;
      };
      *has_ctor = true;
    };
    if static_ && name == Some("prototype") {
      self.tolerate(key.loc().error(SyntaxErrorType::StaticPrototype, None))?;
    };
    let value = self.method_func(
      modifiers.is_async,
      modifiers.generator,
      FnState::method(is_ctor && has_super),
    )?;
    let kind = match modifiers.accessor {
      Some(accessor) => {
        self.check_accessor_arity(accessor, &value)?;
        match accessor {
          PropKind::Set => MethodKind::Set,
          _ => MethodKind::Get,
        }
      }
      None if is_ctor => MethodKind::Constructor,
      None => MethodKind::Method,
    };
    Ok(self.node(start, MethodDef {
      key,
      computed,
      value,
      kind,
      static_,
    }))
  }

  /// Parses a class declaration. The name may be omitted only for `export default`.
  pub fn class_decl(&mut self, ctx: ParseCtx, anonymous_ok: bool) -> SyntaxResult<Node<ClassDecl>> {
    let start = self.require(TT::KeywordClass)?.loc.0;
    self.with_strict(|p| {
      let next = p.peek().typ;
      let id = if anonymous_ok && matches!(next, TT::KeywordExtends | TT::BraceOpen) {
        None
      } else {
        let id = p.binding_id(ctx)?;
        p.declare(&id, DeclKind::Lexical)?;
        Some(id)
      };
      let (super_class, body) = p.class_tail(ctx)?;
      Ok(p.node(start, ClassDecl {
        id,
        super_class,
        body,
      }))
    })
  }

  pub fn class_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ClassExpr>> {
    let start = self.require(TT::KeywordClass)?.loc.0;
    self.with_strict(|p| {
      let id = match p.peek().typ {
        TT::KeywordExtends | TT::BraceOpen => None,
        _ => Some(p.binding_id(ctx)?),
      };
      let (super_class, body) = p.class_tail(ctx)?;
      Ok(p.node(start, ClassExpr {
        id,
        super_class,
        body,
      }))
    })
  }
}
