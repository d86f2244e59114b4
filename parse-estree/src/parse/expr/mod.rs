pub mod jsx;
pub mod lit;
pub mod pat;

use super::operator::ASSIGNMENT_OPERATOR_MAPPING;
use super::operator::BINARY_OPERATOR_MAPPING;
use super::operator::UNARY_OPERATOR_MAPPING;
use super::scope::FnState;
use super::scope::ScopeKind;
use super::ParseCtx;
use super::Parser;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::ArrExpr;
use crate::ast::expr::ArrowFuncBody;
use crate::ast::expr::ArrowFuncExpr;
use crate::ast::expr::AssignExpr;
use crate::ast::expr::AwaitExpr;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::CallExpr;
use crate::ast::expr::CondExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::ExprOrSpread;
use crate::ast::expr::IdExpr;
use crate::ast::expr::ImportExpr;
use crate::ast::expr::LogicalExpr;
use crate::ast::expr::MemberExpr;
use crate::ast::expr::MetaPropertyExpr;
use crate::ast::expr::NewExpr;
use crate::ast::expr::SeqExpr;
use crate::ast::expr::SpreadElement;
use crate::ast::expr::SuperExpr;
use crate::ast::expr::TaggedTemplateExpr;
use crate::ast::expr::ThisExpr;
use crate::ast::expr::UnaryExpr;
use crate::ast::expr::UpdateExpr;
use crate::ast::expr::YieldExpr;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::operator::Associativity;
use crate::operator::Operator;
use crate::operator::OperatorName;
use crate::token::TT;
use pat::is_valid_pattern_identifier;
use pat::ParsePatternRules;

fn is_logical_op(expr: &Expr, ops: &[OperatorName]) -> bool {
  matches!(expr, Expr::Logical(l) if ops.contains(&l.stx.operator))
}

impl<'a> Parser<'a> {
  /// Parses a comma-separated sequence of assignment expressions.
  pub fn expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Expr> {
    let start = self.start();
    let first = self.assignment_expr(ctx)?;
    if self.peek().typ != TT::Comma {
      return Ok(first);
    };
    let mut expressions = vec![first];
    while self.consume_if(TT::Comma).is_match() {
      expressions.push(self.assignment_expr(ctx)?);
    }
    Ok(Expr::Seq(self.node(start, SeqExpr { expressions })))
  }

  /// Parses an assignment expression. A shorthand initializer like `{a = 1}` that was never turned into a pattern is reported here.
  pub fn assignment_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Expr> {
    let outer = self.cover_init.take();
    let expr = self.assignment_expr_cover(ctx)?;
    if let Some(loc) = self.cover_init.take() {
      self.tolerate(loc.error(SyntaxErrorType::InvalidShorthandInitializer, None))?;
    };
    self.cover_init = outer;
    Ok(expr)
  }

  /// Parses an assignment expression, leaving a shorthand initializer unreported while the result is an object or array literal that may still become a pattern.
  pub fn assignment_expr_cover(&mut self, ctx: ParseCtx) -> SyntaxResult<Expr> {
    if let Some(arrow) = self.maybe_arrow_func(ctx)? {
      return Ok(arrow);
    };
    let t = self.peek_with_mode(LexMode::SlashIsRegex);
    if t.typ == TT::KeywordYield && ctx.rules.yield_expr_allowed {
      return self.yield_expr(ctx);
    };
    let start = t.loc.0;
    let expr = self.conditional_expr(ctx)?;
    let is_literal = matches!(expr, Expr::Obj(_) | Expr::Arr(_));
    let op = self.peek();
    let Some(&operator) = ASSIGNMENT_OPERATOR_MAPPING.get(&op.typ) else {
      if !is_literal {
        if let Some(loc) = self.cover_init.take() {
          self.tolerate(loc.error(SyntaxErrorType::InvalidShorthandInitializer, None))?;
        };
      };
      return Ok(expr);
    };
    let left = if operator == OperatorName::Assignment {
      let pat = self.expr_to_pat(expr)?;
      if is_literal {
        self.cover_init = None;
      };
      pat
    } else {
      self.check_simple_target(&expr)?;
      match expr {
        Expr::Id(id) => Pat::Id(id),
        Expr::Member(m) => Pat::Member(m),
        e => return Err(e.loc().error(SyntaxErrorType::InvalidAssigmentTarget, None)),
      }
    };
    self.consume();
    let right = self.assignment_expr(ctx)?;
    Ok(Expr::Assign(self.node(start, AssignExpr {
      operator,
      left,
      right,
    })))
  }

  /// Detects and parses an arrow function at the next token, or returns None without consuming anything.
  fn maybe_arrow_func(&mut self, ctx: ParseCtx) -> SyntaxResult<Option<Expr>> {
    let (t0, t1, t2) = self.peek_3();
    let start = t0.loc.0;
    // `x => ...`
    if is_valid_pattern_identifier(t0.typ, ctx.rules) && t1.typ == TT::EqualsChevronRight {
      let param = self.binding_id(ctx)?;
      return self.arrow_func_rest(ctx, start, vec![Pat::Id(param)], false).map(Some);
    };
    let async_rules = ParsePatternRules {
      await_allowed: false,
      await_expr_allowed: false,
      ..ctx.rules
    };
    // `async x => ...`
    if t0.typ == TT::KeywordAsync
      && !t1.preceded_by_line_terminator
      && is_valid_pattern_identifier(t1.typ, async_rules)
      && t2.typ == TT::EqualsChevronRight
    {
      self.consume();
      let param = self.binding_id(ctx.with_rules(async_rules))?;
      return self.arrow_func_rest(ctx, start, vec![Pat::Id(param)], true).map(Some);
    };
    // `(a, b) => ...` and `async (a, b) => ...`
    let is_async = t0.typ == TT::KeywordAsync
      && t1.typ == TT::ParenthesisOpen
      && !t1.preceded_by_line_terminator;
    if t0.typ != TT::ParenthesisOpen && !is_async {
      return Ok(None);
    };
    let param_ctx = if is_async {
      ctx.with_rules(async_rules)
    } else {
      ParseCtx {
        rules: ParsePatternRules {
          await_expr_allowed: false,
          yield_expr_allowed: false,
          ..ctx.rules
        },
        ..ctx
      }
    };
    let params = self.attempt(|p| {
      if is_async {
        p.consume();
      };
      let params = p.formal_params(param_ctx)?;
      Ok((p.peek().typ == TT::EqualsChevronRight).then_some(params))
    });
    match params {
      Some(params) => self.arrow_func_rest(ctx, start, params, is_async).map(Some),
      None => Ok(None),
    }
  }

  fn arrow_func_rest(
    &mut self,
    ctx: ParseCtx,
    start: usize,
    params: Vec<Pat>,
    is_async: bool,
  ) -> SyntaxResult<Expr> {
    let arrow = self.require(TT::EqualsChevronRight)?;
    if arrow.preceded_by_line_terminator {
      self.tolerate(arrow.error(SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters))?;
    };
    let body_ctx = ParseCtx {
      rules: ParsePatternRules {
        await_allowed: ctx.rules.await_allowed && !is_async,
        yield_allowed: ctx.rules.yield_allowed,
        await_expr_allowed: is_async,
        yield_expr_allowed: false,
      },
      ..ctx
    };
    let outer = self.fn_state();
    // Arrow functions see the enclosing `new.target` and `super`.
    let state = FnState {
      in_function: true,
      allow_new_target: outer.allow_new_target,
      allow_super_call: outer.allow_super_call,
      allow_super_property: outer.allow_super_property,
      ..FnState::default()
    };
    let (body, expression) = self.with_fn_state(state, |p| {
      p.with_scope(ScopeKind::Function, |p| {
        if p.peek().typ == TT::BraceOpen {
          let body = p.func_body(body_ctx.with_in(true), &params, None, true)?;
          Ok((ArrowFuncBody::Block(body), false))
        } else {
          p.check_params(&params, None, true)?;
          let expr = p.assignment_expr(body_ctx)?;
          Ok((ArrowFuncBody::Expr(expr), true))
        }
      })
    })?;
    Ok(Expr::ArrowFunc(self.node(start, ArrowFuncExpr {
      id: None,
      params,
      body,
      generator: false,
      expression,
      async_: is_async,
    })))
  }

  fn yield_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Expr> {
    let start = self.require(TT::KeywordYield)?.loc.0;
    let next = self.peek_with_mode(LexMode::SlashIsRegex);
    let mut delegate = false;
    let argument = if next.preceded_by_line_terminator {
      None
    } else if next.typ == TT::Asterisk {
      self.consume();
      delegate = true;
      Some(self.assignment_expr(ctx)?)
    } else {
      match next.typ {
        TT::ParenthesisClose
        | TT::BracketClose
        | TT::BraceClose
        | TT::Comma
        | TT::Semicolon
        | TT::Colon
        | TT::EOF => None,
        TT::KeywordIn if !ctx.in_allowed => None,
        _ => Some(self.assignment_expr(ctx)?),
      }
    };
    Ok(Expr::Yield(self.node(start, YieldExpr { argument, delegate })))
  }

  fn conditional_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Expr> {
    let start = self.peek_with_mode(LexMode::SlashIsRegex).loc.0;
    let test = self.binary_expr(ctx, 0)?;
    if !self.consume_if(TT::Question).is_match() {
      return Ok(test);
    };
    let consequent = self.assignment_expr(ctx.with_in(true))?;
    self.require(TT::Colon)?;
    let alternate = self.assignment_expr(ctx)?;
    Ok(Expr::Cond(self.node(start, CondExpr {
      test,
      consequent,
      alternate,
    })))
  }

  fn binary_node(&mut self, start: usize, op: &Operator, left: Expr, right: Expr) -> Expr {
    if op.name.is_logical() {
      Expr::Logical(self.node(start, LogicalExpr {
        operator: op.name,
        left,
        right,
      }))
    } else {
      Expr::Binary(self.node(start, BinaryExpr {
        operator: op.name,
        left,
        right,
      }))
    }
  }

  /// Parses binary operators binding tighter than `min_prec` by precedence climbing.
  fn binary_expr(&mut self, ctx: ParseCtx, min_prec: u8) -> SyntaxResult<Expr> {
    let start = self.peek_with_mode(LexMode::SlashIsRegex).loc.0;
    let mut left = self.unary_expr(ctx)?;
    loop {
      let t = self.peek();
      let Some(&op) = BINARY_OPERATOR_MAPPING.get(&t.typ) else {
        break;
      };
      if t.typ == TT::KeywordIn && !ctx.in_allowed {
        break;
      };
      if op.precedence <= min_prec {
        break;
      };
      // `-a ** b` is ambiguous and must be parenthesized.
      if op.name == OperatorName::Exponentiation
        && matches!(left, Expr::Unary(_) | Expr::Await(_))
        && left.loc().0 == start
      {
        return Err(t.error(SyntaxErrorType::UnexpectedToken));
      };
      self.consume();
      let right_start = self.peek_with_mode(LexMode::SlashIsRegex).loc.0;
      let next_min = match op.associativity {
        Associativity::Left => op.precedence,
        Associativity::Right => op.precedence - 1,
      };
      let right = self.binary_expr(ctx, next_min)?;
      // `??` cannot be mixed with `&&` or `||` without parentheses.
      let conflicting: &[OperatorName] = match op.name {
        OperatorName::NullishCoalescing => &[OperatorName::LogicalAnd, OperatorName::LogicalOr],
        OperatorName::LogicalAnd | OperatorName::LogicalOr => &[OperatorName::NullishCoalescing],
        _ => &[],
      };
      if (is_logical_op(&left, conflicting) && left.loc().0 == start)
        || (is_logical_op(&right, conflicting) && right.loc().0 == right_start)
      {
        return Err(t.error(SyntaxErrorType::UnexpectedToken));
      };
      left = self.binary_node(start, op, left, right);
    }
    Ok(left)
  }

  fn unary_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Expr> {
    let t = self.peek_with_mode(LexMode::SlashIsRegex);
    let start = t.loc.0;
    if let Some(&operator) = UNARY_OPERATOR_MAPPING.get(&t.typ) {
      self.consume_with_mode(LexMode::SlashIsRegex);
      let argument = self.unary_expr(ctx)?;
      if operator == OperatorName::Delete && self.is_strict() && matches!(argument, Expr::Id(_)) {
        self.tolerate(t.error(SyntaxErrorType::StrictDelete))?;
      };
      return Ok(Expr::Unary(self.node(start, UnaryExpr {
        operator,
        argument,
        prefix: true,
      })));
    };
    if matches!(t.typ, TT::PlusPlus | TT::HyphenHyphen) {
      self.consume_with_mode(LexMode::SlashIsRegex);
      let argument = self.unary_expr(ctx)?;
      self.check_simple_target(&argument)?;
      let operator = if t.typ == TT::PlusPlus {
        OperatorName::Increment
      } else {
        OperatorName::Decrement
      };
      return Ok(Expr::Update(self.node(start, UpdateExpr {
        operator,
        argument,
        prefix: true,
      })));
    };
    if t.typ == TT::KeywordAwait && ctx.rules.await_expr_allowed {
      self.consume_with_mode(LexMode::SlashIsRegex);
      let argument = self.unary_expr(ctx)?;
      return Ok(Expr::Await(self.node(start, AwaitExpr { argument })));
    };
    let expr = self.lhs_expr(ctx)?;
    let next = self.peek();
    if matches!(next.typ, TT::PlusPlus | TT::HyphenHyphen) && !next.preceded_by_line_terminator {
      self.check_simple_target(&expr)?;
      self.consume();
      let operator = if next.typ == TT::PlusPlus {
        OperatorName::Increment
      } else {
        OperatorName::Decrement
      };
      return Ok(Expr::Update(self.node(start, UpdateExpr {
        operator,
        argument: expr,
        prefix: false,
      })));
    };
    Ok(expr)
  }

  /// Parses a left-hand-side expression: a primary expression followed by member accesses, calls and tagged templates.
  pub fn lhs_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Expr> {
    let t = self.peek_with_mode(LexMode::SlashIsRegex);
    let expr = match t.typ {
      TT::KeywordNew => self.new_expr(ctx)?,
      TT::KeywordSuper => self.super_expr()?,
      TT::KeywordImport => self.import_expr(ctx)?,
      _ => self.primary_expr(ctx)?,
    };
    self.call_tail(ctx, t.loc.0, expr, true)
  }

  /// The name after `.` or `?.`, which may be any identifier name including reserved words.
  fn member_property(&mut self) -> SyntaxResult<Expr> {
    let t = self.peek();
    if t.typ != TT::Identifier && !t.typ.is_keyword() {
      return Err(self.unexpected(&t));
    };
    self.consume();
    let raw = self.str(t.loc);
    let name = lit::decode_identifier(raw)
      .ok_or_else(|| t.error(SyntaxErrorType::InvalidCharacterEscape))?;
    Ok(Expr::Id(self.node_at(t.loc, IdExpr { name })))
  }

  fn computed_member(&mut self, ctx: ParseCtx) -> SyntaxResult<Expr> {
    self.require(TT::BracketOpen)?;
    let property = self.expr(ctx.with_in(true))?;
    self.require(TT::BracketClose)?;
    Ok(property)
  }

  fn call_tail(
    &mut self,
    ctx: ParseCtx,
    start: usize,
    mut expr: Expr,
    allow_call: bool,
  ) -> SyntaxResult<Expr> {
    let mut in_optional_chain = false;
    loop {
      let t = self.peek();
      expr = match t.typ {
        TT::Dot => {
          self.consume();
          let property = self.member_property()?;
          Expr::Member(self.node(start, MemberExpr {
            computed: false,
            object: expr,
            property,
            optional: false,
          }))
        }
        TT::QuestionDot => {
          if !allow_call {
            return Err(self.unexpected(&t));
          };
          self.consume();
          in_optional_chain = true;
          match self.peek().typ {
            TT::ParenthesisOpen => {
              let arguments = self.arguments(ctx)?;
              Expr::Call(self.node(start, CallExpr {
                callee: expr,
                arguments,
                optional: true,
              }))
            }
            TT::BracketOpen => {
              let property = self.computed_member(ctx)?;
              Expr::Member(self.node(start, MemberExpr {
                computed: true,
                object: expr,
                property,
                optional: true,
              }))
            }
            _ => {
              let property = self.member_property()?;
              Expr::Member(self.node(start, MemberExpr {
                computed: false,
                object: expr,
                property,
                optional: true,
              }))
            }
          }
        }
        TT::BracketOpen => {
          let property = self.computed_member(ctx)?;
          Expr::Member(self.node(start, MemberExpr {
            computed: true,
            object: expr,
            property,
            optional: false,
          }))
        }
        TT::ParenthesisOpen if allow_call => {
          let arguments = self.arguments(ctx)?;
          Expr::Call(self.node(start, CallExpr {
            callee: expr,
            arguments,
            optional: false,
          }))
        }
        TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
          if in_optional_chain {
            return Err(t.error(SyntaxErrorType::UnexpectedToken));
          };
          let quasi = self.template(ctx, true)?;
          Expr::TaggedTemplate(self.node(start, TaggedTemplateExpr { tag: expr, quasi }))
        }
        _ => break,
      };
    }
    Ok(expr)
  }

  /// Parses an argument list including its parentheses.
  pub fn arguments(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<ExprOrSpread>> {
    self.require(TT::ParenthesisOpen)?;
    let ctx = ctx.with_in(true);
    self.list(TT::Comma, TT::ParenthesisClose, |p| {
      if p.peek().typ == TT::DotDotDot {
        let start = p.consume().loc.0;
        let argument = p.assignment_expr(ctx)?;
        return Ok(ExprOrSpread::Spread(p.node(start, SpreadElement { argument })));
      };
      Ok(ExprOrSpread::Expr(p.assignment_expr(ctx)?))
    })
  }

  fn new_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Expr> {
    let new_tok = self.require(TT::KeywordNew)?;
    let start = new_tok.loc.0;
    if self.consume_if(TT::Dot).is_match() {
      let prop = self.peek();
      if prop.typ != TT::Identifier || self.str(prop.loc) != "target" {
        return Err(self.unexpected(&prop));
      };
      self.consume();
      if !self.fn_state().allow_new_target {
        self.tolerate(new_tok.loc.error(SyntaxErrorType::NewTargetOutsideFunction, None))?;
      };
      let meta = self.node_at(new_tok.loc, IdExpr { name: "new".into() });
      let property = self.node_at(prop.loc, IdExpr {
        name: "target".into(),
      });
      return Ok(Expr::MetaProperty(
        self.node(start, MetaPropertyExpr { meta, property }),
      ));
    };
    let t = self.peek_with_mode(LexMode::SlashIsRegex);
    let callee = match t.typ {
      TT::KeywordNew => self.new_expr(ctx)?,
      TT::KeywordSuper => self.super_expr()?,
      TT::KeywordImport => return Err(t.error(SyntaxErrorType::UnexpectedToken)),
      _ => self.primary_expr(ctx)?,
    };
    let callee = self.call_tail(ctx, t.loc.0, callee, false)?;
    let arguments = if self.peek().typ == TT::ParenthesisOpen {
      self.arguments(ctx)?
    } else {
      Vec::new()
    };
    Ok(Expr::New(self.node(start, NewExpr { callee, arguments })))
  }

  fn super_expr(&mut self) -> SyntaxResult<Expr> {
    let t = self.require(TT::KeywordSuper)?;
    let allow_call = self.fn_state().allow_super_call;
    let allow_property = self.fn_state().allow_super_property;
    let allowed = match self.peek().typ {
      TT::ParenthesisOpen => allow_call,
      TT::Dot | TT::BracketOpen => allow_property,
      _ => false,
    };
    if !allowed {
      return Err(t.error(SyntaxErrorType::UnexpectedToken));
    };
    Ok(Expr::Super(self.node_at(t.loc, SuperExpr {})))
  }

  /// `import(source)` or `import.meta`.
  fn import_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Expr> {
    let t = self.require(TT::KeywordImport)?;
    if self.consume_if(TT::Dot).is_match() {
      let prop = self.peek();
      if prop.typ != TT::Identifier || self.str(prop.loc) != "meta" {
        return Err(self.unexpected(&prop));
      };
      self.consume();
      if !self.config().module {
        self.tolerate(t.error(SyntaxErrorType::ModuleDeclarationInScript))?;
      };
      let meta = self.node_at(t.loc, IdExpr {
        name: "import".into(),
      });
      let property = self.node_at(prop.loc, IdExpr {
        name: "meta".into(),
      });
      return Ok(Expr::MetaProperty(
        self.node(t.loc.0, MetaPropertyExpr { meta, property }),
      ));
    };
    self.require(TT::ParenthesisOpen)?;
    let source = self.assignment_expr(ctx.with_in(true))?;
    self.require(TT::ParenthesisClose)?;
    Ok(Expr::Import(self.node(t.loc.0, ImportExpr { source })))
  }

  fn primary_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Expr> {
    let t = self.peek_with_mode(LexMode::SlashIsRegex);
    let expr = match t.typ {
      TT::KeywordThis => {
        self.consume_with_mode(LexMode::SlashIsRegex);
        Expr::This(self.node_at(t.loc, ThisExpr {}))
      }
      TT::LiteralNumber => {
        self.consume_with_mode(LexMode::SlashIsRegex);
        Expr::Lit(self.lit_num(&t)?)
      }
      TT::LiteralBigInt => {
        self.consume_with_mode(LexMode::SlashIsRegex);
        Expr::Lit(self.lit_bigint(&t))
      }
      TT::LiteralString => {
        self.consume_with_mode(LexMode::SlashIsRegex);
        Expr::Lit(self.lit_str(&t)?)
      }
      TT::LiteralRegex => {
        self.consume_with_mode(LexMode::SlashIsRegex);
        Expr::Lit(self.lit_regex(&t))
      }
      TT::LiteralTrue | TT::LiteralFalse | TT::LiteralNull => {
        self.consume_with_mode(LexMode::SlashIsRegex);
        Expr::Lit(self.lit_keyword(&t))
      }
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
        Expr::Template(self.template(ctx, false)?)
      }
      TT::BracketOpen => self.arr_literal(ctx)?,
      TT::BraceOpen => Expr::Obj(self.obj_literal(ctx)?),
      TT::ParenthesisOpen => {
        self.consume();
        let expr = self.expr(ctx.with_in(true))?;
        self.require(TT::ParenthesisClose)?;
        expr
      }
      TT::KeywordFunction => Expr::Func(self.func_expr(ctx)?),
      TT::KeywordAsync if {
        let (_, next) = self.peek_2();
        next.typ == TT::KeywordFunction && !next.preceded_by_line_terminator
      } =>
      {
        Expr::Func(self.func_expr(ctx)?)
      }
      TT::KeywordClass => Expr::Class(self.class_expr(ctx)?),
      TT::ChevronLeft if self.config().jsx => self.jsx_elem_or_fragment(ctx)?,
      typ if is_valid_pattern_identifier(typ, ctx.rules) => Expr::Id(self.id_ref(ctx)?),
      TT::Invalid | TT::EOF => return Err(self.unexpected(&t)),
      typ if typ.is_keyword() => {
        return Err(match typ {
          TT::KeywordAwait | TT::KeywordYield => t.error(SyntaxErrorType::UnexpectedReservedWord),
          _ => self.unexpected(&t),
        })
      }
      _ => return Err(self.unexpected(&t)),
    };
    Ok(expr)
  }

  fn arr_literal(&mut self, ctx: ParseCtx) -> SyntaxResult<Expr> {
    let start = self.require(TT::BracketOpen)?.loc.0;
    let ctx = ctx.with_in(true);
    let mut elements = Vec::new();
    loop {
      if self.consume_if(TT::BracketClose).is_match() {
        break;
      };
      if self.consume_if(TT::Comma).is_match() {
        elements.push(None);
        continue;
      };
      let elem = if self.peek().typ == TT::DotDotDot {
        let spread_start = self.consume().loc.0;
        let argument = self.assignment_expr_cover(ctx)?;
        ExprOrSpread::Spread(self.node(spread_start, SpreadElement { argument }))
      } else {
        ExprOrSpread::Expr(self.assignment_expr_cover(ctx)?)
      };
      elements.push(Some(elem));
      if !self.consume_if(TT::Comma).is_match() {
        self.require(TT::BracketClose)?;
        break;
      };
    }
    Ok(Expr::Arr(self.node(start, ArrExpr { elements })))
  }
}
