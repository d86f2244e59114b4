use super::super::ParseCtx;
use super::super::Parser;
use crate::ast::class_or_object::ObjMember;
use crate::ast::class_or_object::PropKind;
use crate::ast::expr::pat::ArrPat;
use crate::ast::expr::pat::AssignPat;
use crate::ast::expr::pat::ObjPat;
use crate::ast::expr::pat::ObjPatMember;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::pat::PatProperty;
use crate::ast::expr::pat::RestPat;
use crate::ast::expr::Expr;
use crate::ast::expr::ExprOrSpread;
use crate::ast::expr::IdExpr;
use crate::ast::expr::SpreadElement;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::operator::OperatorName;
use crate::token::Token;
use crate::token::STRICT_RESERVED_WORDS;
use crate::token::TT;
use crate::token::UNRESERVED_KEYWORDS;

#[derive(Clone, Copy, Default)]
pub struct ParsePatternRules {
  // `await` can be used as an identifier: not in modules or async functions.
  pub await_allowed: bool,
  // `yield` can be used as an identifier: not in generators. Strict mode is checked separately.
  pub yield_allowed: bool,
  // Whether `await` starts an `AwaitExpression` in the current context.
  pub await_expr_allowed: bool,
  // Whether `yield` starts a `YieldExpression` in the current context.
  pub yield_expr_allowed: bool,
}

impl ParsePatternRules {
  /// Rules for the body of a function.
  pub fn for_function(module: bool, is_async: bool, generator: bool) -> ParsePatternRules {
    ParsePatternRules {
      await_allowed: !module && !is_async,
      yield_allowed: !generator,
      await_expr_allowed: is_async,
      yield_expr_allowed: generator,
    }
  }
}

pub fn is_valid_pattern_identifier(typ: TT, rules: ParsePatternRules) -> bool {
  match typ {
    TT::Identifier => true,
    TT::KeywordAwait => rules.await_allowed,
    TT::KeywordYield => rules.yield_allowed,
    t => UNRESERVED_KEYWORDS.contains(&t),
  }
}

pub fn is_eval_or_arguments(name: &str) -> bool {
  name == "eval" || name == "arguments"
}

impl<'a> Parser<'a> {
  /// Reports names that strict mode code reserves. Bindings additionally may not be `eval` or `arguments`.
  pub fn check_identifier(&mut self, t: &Token, name: &str, binding: bool) -> SyntaxResult<()> {
    if !self.is_strict() {
      return Ok(());
    };
    if STRICT_RESERVED_WORDS.contains(name) {
      self.tolerate(t.error(SyntaxErrorType::StrictReservedWord))?;
    } else if binding && is_eval_or_arguments(name) {
      self.tolerate(t.error(SyntaxErrorType::StrictEvalArguments))?;
    };
    Ok(())
  }

  fn id_with(&mut self, ctx: ParseCtx, binding: bool) -> SyntaxResult<Node<IdExpr>> {
    let t = self.peek();
    if !is_valid_pattern_identifier(t.typ, ctx.rules) {
      return Err(match t.typ {
        _ if t.typ.is_keyword() => t.error(SyntaxErrorType::UnexpectedReservedWord),
        _ => self.unexpected(&t),
      });
    };
    self.consume();
    let name = self.identifier_name(&t)?;
    self.check_identifier(&t, &name, binding)?;
    Ok(self.node_at(t.loc, IdExpr { name }))
  }

  /// Parses an identifier used as a value.
  pub fn id_ref(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<IdExpr>> {
    self.id_with(ctx, false)
  }

  /// Parses an identifier that introduces a binding.
  pub fn binding_id(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<IdExpr>> {
    self.id_with(ctx, true)
  }

  /// Parses an identifier, array pattern or object pattern.
  pub fn binding_pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Pat> {
    match self.peek().typ {
      TT::BracketOpen => self.arr_pat(ctx).map(Pat::Arr),
      TT::BraceOpen => self.obj_pat(ctx).map(Pat::Obj),
      _ => self.binding_id(ctx).map(Pat::Id),
    }
  }

  /// Parses a binding pattern with an optional default value.
  pub fn binding_element(&mut self, ctx: ParseCtx) -> SyntaxResult<Pat> {
    let start = self.start();
    let left = self.binding_pat(ctx)?;
    if !self.consume_if(TT::Equals).is_match() {
      return Ok(left);
    };
    let right = self.assignment_expr(ctx.with_in(true))?;
    Ok(Pat::Assign(self.node(start, AssignPat { left, right })))
  }

  /// Parses `...pattern`, which must be followed by `close`.
  fn rest_pat<F>(&mut self, close: TT, f: F) -> SyntaxResult<Node<RestPat>>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<Pat>,
  {
    let start = self.require(TT::DotDotDot)?.loc.0;
    let argument = f(self)?;
    let rest = self.node(start, RestPat { argument });
    let next = self.peek();
    if next.typ == TT::Comma {
      return Err(next.error(SyntaxErrorType::RestElementNotLast));
    };
    if next.typ != close {
      return Err(self.unexpected(&next));
    };
    Ok(rest)
  }

  /// Parses an array pattern like `[a, , b = 1, ...rest]`.
  pub fn arr_pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ArrPat>> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::new();
      loop {
        if p.consume_if(TT::BracketClose).is_match() {
          break;
        };
        if p.consume_if(TT::Comma).is_match() {
          elements.push(None);
          continue;
        };
        if p.peek().typ == TT::DotDotDot {
          let rest = p.rest_pat(TT::BracketClose, |p| p.binding_pat(ctx))?;
          elements.push(Some(Pat::Rest(rest)));
          p.require(TT::BracketClose)?;
          break;
        };
        elements.push(Some(p.binding_element(ctx)?));
        if !p.consume_if(TT::Comma).is_match() {
          p.require(TT::BracketClose)?;
          break;
        };
      }
      Ok(ArrPat { elements })
    })
  }

  /// Parses an object pattern like `{ x, y: z, [computed]: value = 1, ...rest }`.
  pub fn obj_pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ObjPat>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut properties = Vec::new();
      loop {
        if p.consume_if(TT::BraceClose).is_match() {
          break;
        };
        if p.peek().typ == TT::DotDotDot {
          let rest = p.rest_pat(TT::BraceClose, |p| p.binding_id(ctx).map(Pat::Id))?;
          properties.push(ObjPatMember::Rest(rest));
          p.require(TT::BraceClose)?;
          break;
        };
        properties.push(ObjPatMember::Prop(p.pat_property(ctx)?));
        if !p.consume_if(TT::Comma).is_match() {
          p.require(TT::BraceClose)?;
          break;
        };
      }
      Ok(ObjPat { properties })
    })
  }

  fn pat_property(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<PatProperty>> {
    let start = self.start();
    let key_token = self.peek();
    let (key, computed) = self.property_key(ctx)?;
    if self.consume_if(TT::Colon).is_match() {
      let value = self.binding_element(ctx)?;
      return Ok(self.node(start, PatProperty {
        key,
        computed,
        value,
        kind: PropKind::Init,
        method: false,
        shorthand: false,
      }));
    };
    // Shorthand: the key doubles as the binding.
    if computed || !is_valid_pattern_identifier(key_token.typ, ctx.rules) {
      return Err(self.unexpected(&key_token));
    };
    let Expr::Id(key_id) = &key else {
      return Err(self.unexpected(&key_token));
    };
    let name = key_id.stx.name.clone();
    self.check_identifier(&key_token, &name, true)?;
    let binding = Pat::Id(self.node_at(key_token.loc, IdExpr { name }));
    let value = if self.consume_if(TT::Equals).is_match() {
      let right = self.assignment_expr(ctx.with_in(true))?;
      Pat::Assign(self.node(start, AssignPat {
        left: binding,
        right,
      }))
    } else {
      binding
    };
    Ok(self.node(start, PatProperty {
      key,
      computed,
      value,
      kind: PropKind::Init,
      method: false,
      shorthand: true,
    }))
  }

  fn check_assign_target_id(&mut self, id: &Node<IdExpr>) -> SyntaxResult<()> {
    if self.is_strict() && is_eval_or_arguments(&id.stx.name) {
      self.tolerate(id.error(SyntaxErrorType::StrictEvalArguments))?;
    };
    Ok(())
  }

  /// Validates the target of a compound assignment or update: only identifiers and member expressions.
  pub fn check_simple_target(&mut self, expr: &Expr) -> SyntaxResult<()> {
    match expr {
      Expr::Id(id) => self.check_assign_target_id(id),
      Expr::Member(m) if !m.stx.optional => Ok(()),
      e => self.tolerate(e.loc().error(SyntaxErrorType::InvalidAssigmentTarget, None)),
    }
  }

  /// Reinterprets an expression as the target of `=` or a `for-in`/`for-of` head.
  pub fn expr_to_pat(&mut self, expr: Expr) -> SyntaxResult<Pat> {
    match expr {
      Expr::Id(id) => {
        self.check_assign_target_id(&id)?;
        Ok(Pat::Id(id))
      }
      Expr::Member(m) if !m.stx.optional => Ok(Pat::Member(m)),
      Expr::Arr(arr) => {
        let pat = arr.try_map_stx(|stx| {
          let count = stx.elements.len();
          let mut elements = Vec::with_capacity(count);
          for (i, elem) in stx.elements.into_iter().enumerate() {
            elements.push(match elem {
              None => None,
              Some(ExprOrSpread::Spread(spread)) => {
                if i + 1 != count {
                  return Err(spread.error(SyntaxErrorType::RestElementNotLast));
                };
                Some(Pat::Rest(self.spread_to_rest(spread)?))
              }
              Some(ExprOrSpread::Expr(e)) => Some(self.expr_to_pat_element(e)?),
            });
          }
          Ok(ArrPat { elements })
        })?;
        Ok(Pat::Arr(pat))
      }
      Expr::Obj(obj) => {
        let pat = obj.try_map_stx(|stx| {
          let count = stx.properties.len();
          let mut properties = Vec::with_capacity(count);
          for (i, member) in stx.properties.into_iter().enumerate() {
            properties.push(match member {
              ObjMember::Spread(spread) => {
                if i + 1 != count {
                  return Err(spread.error(SyntaxErrorType::RestElementNotLast));
                };
                ObjPatMember::Rest(self.spread_to_rest(spread)?)
              }
              ObjMember::Prop(prop) => {
                if prop.stx.kind != PropKind::Init || prop.stx.method {
                  return Err(prop.error(SyntaxErrorType::InvalidAssigmentTarget));
                };
                ObjPatMember::Prop(prop.try_map_stx(|prop| {
                  Ok(PatProperty {
                    key: prop.key,
                    computed: prop.computed,
                    value: self.expr_to_pat_element(prop.value)?,
                    kind: PropKind::Init,
                    method: false,
                    shorthand: prop.shorthand,
                  })
                })?)
              }
            });
          }
          Ok(ObjPat { properties })
        })?;
        Ok(Pat::Obj(pat))
      }
      e => Err(e.loc().error(SyntaxErrorType::InvalidAssigmentTarget, None)),
    }
  }

  /// Like `expr_to_pat`, but `target = default` becomes an `AssignmentPattern`.
  fn expr_to_pat_element(&mut self, expr: Expr) -> SyntaxResult<Pat> {
    match expr {
      Expr::Assign(assign) if assign.stx.operator == OperatorName::Assignment => {
        Ok(Pat::Assign(assign.map_stx(|a| AssignPat {
          left: a.left,
          right: a.right,
        })))
      }
      e => self.expr_to_pat(e),
    }
  }

  fn spread_to_rest(&mut self, spread: Node<SpreadElement>) -> SyntaxResult<Node<RestPat>> {
    spread.try_map_stx(|s| {
      if let Expr::Assign(a) = &s.argument {
        return Err(a.error(SyntaxErrorType::InvalidAssigmentTarget));
      };
      Ok(RestPat {
        argument: self.expr_to_pat(s.argument)?,
      })
    })
  }
}
