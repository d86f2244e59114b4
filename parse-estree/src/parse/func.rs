use super::expr::pat::is_eval_or_arguments;
use super::expr::pat::ParsePatternRules;
use super::scope::DeclKind;
use super::scope::FnState;
use super::scope::ScopeKind;
use super::ParseCtx;
use super::Parser;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::pat::RestPat;
use crate::ast::expr::IdExpr;
use crate::ast::func::Func;
use crate::ast::func::FuncDecl;
use crate::ast::func::FuncExpr;
use crate::ast::node::Node;
use crate::ast::stmt::BlockStmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::STRICT_RESERVED_WORDS;
use crate::token::TT;
use ahash::HashSet;
use ahash::HashSetExt;

impl FnState {
  /// State inside a function declaration or expression.
  pub fn function() -> FnState {
    FnState {
      in_function: true,
      allow_new_target: true,
      ..FnState::default()
    }
  }

  /// State inside a class or object method.
  pub fn method(allow_super_call: bool) -> FnState {
    FnState {
      in_function: true,
      allow_new_target: true,
      allow_super_call,
      allow_super_property: true,
      ..FnState::default()
    }
  }
}

impl<'a> Parser<'a> {
  /// Parses a parenthesized parameter list.
  pub fn formal_params(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<Pat>> {
    self.require(TT::ParenthesisOpen)?;
    let mut params = Vec::new();
    while !self.consume_if(TT::ParenthesisClose).is_match() {
      if self.peek().typ == TT::DotDotDot {
        let start = self.consume().loc.0;
        let argument = self.binding_pat(ctx)?;
        let next = self.peek();
        match next.typ {
          TT::Equals => return Err(next.error(SyntaxErrorType::RestParameterWithDefault)),
          TT::ParenthesisClose => {}
          _ => return Err(next.error(SyntaxErrorType::RestElementNotLast)),
        };
        params.push(Pat::Rest(self.node(start, RestPat { argument })));
        self.require(TT::ParenthesisClose)?;
        break;
      };
      params.push(self.binding_element(ctx)?);
      if !self.consume_if(TT::Comma).is_match() {
        self.require(TT::ParenthesisClose)?;
        break;
      };
    }
    Ok(params)
  }

  /// Declares parameters in the current function scope, applying the strictness the body ended up with.
  pub fn check_params(
    &mut self,
    params: &[Pat],
    use_strict: Option<Loc>,
    unique: bool,
  ) -> SyntaxResult<()> {
    let simple = params.iter().all(|p| matches!(p, Pat::Id(_)));
    if let Some(loc) = use_strict {
      if !simple {
        self.tolerate(loc.error(SyntaxErrorType::IllegalUseStrict, None))?;
      };
    };
    let strict = self.is_strict();
    let unique = unique || strict || !simple;
    let mut ids = Vec::new();
    for p in params {
      p.for_each_binding(&mut |id| ids.push(id));
    }
    let mut seen = HashSet::<&str>::new();
    for id in ids {
      let name = id.stx.name.as_str();
      if strict && is_eval_or_arguments(name) {
        self.tolerate(id.error(SyntaxErrorType::StrictEvalArguments))?;
      } else if strict && STRICT_RESERVED_WORDS.contains(name) {
        self.tolerate(id.error(SyntaxErrorType::StrictReservedWord))?;
      };
      if !seen.insert(name) && unique {
        self.tolerate(id.error(SyntaxErrorType::DuplicateParameter))?;
      };
      self.declare(id, DeclKind::Param)?;
    }
    Ok(())
  }

  /// Parses a function body including braces. Parameters are checked once the directive prologue has settled strictness.
  pub fn func_body(
    &mut self,
    ctx: ParseCtx,
    params: &[Pat],
    name: Option<&Node<IdExpr>>,
    unique: bool,
  ) -> SyntaxResult<Node<BlockStmt>> {
    let start = self.require(TT::BraceOpen)?.loc.0;
    let was_strict = self.is_strict();
    let (mut body, use_strict) = self.directive_prologue(ctx)?;
    if self.is_strict() && !was_strict {
      if let Some(name) = name {
        let n = name.stx.name.as_str();
        if is_eval_or_arguments(n) {
          self.tolerate(name.error(SyntaxErrorType::StrictEvalArguments))?;
        } else if STRICT_RESERVED_WORDS.contains(n) {
          self.tolerate(name.error(SyntaxErrorType::StrictReservedWord))?;
        };
      };
    };
    self.check_params(params, use_strict, unique)?;
    body.extend(self.stmt_list(ctx, TT::BraceClose)?);
    self.require(TT::BraceClose)?;
    Ok(self.node(start, BlockStmt { body }))
  }

  /// Parses the parameters and body that follow a function's name.
  pub fn func_rest(
    &mut self,
    id: Option<Node<IdExpr>>,
    is_async: bool,
    generator: bool,
    unique: bool,
    state: FnState,
  ) -> SyntaxResult<Func> {
    let rules = ParsePatternRules::for_function(self.config().module, is_async, generator);
    let body_ctx = ParseCtx {
      rules,
      in_allowed: true,
    };
    // Parameter defaults may not contain `await` or `yield` expressions.
    let param_ctx = body_ctx.with_rules(ParsePatternRules {
      await_expr_allowed: false,
      yield_expr_allowed: false,
      ..rules
    });
    self.with_fn_state(state, |p| {
      p.with_scope(ScopeKind::Function, |p| {
        let params = p.formal_params(param_ctx)?;
        let body = p.func_body(body_ctx, &params, id.as_ref(), unique)?;
        Ok(Func {
          id,
          params,
          body,
          generator,
          expression: false,
          async_: is_async,
        })
      })
    })
  }

  /// Parses `[async] function [*] name (...) {...}`. The name may be omitted only for `export default`.
  pub fn func_decl(&mut self, ctx: ParseCtx, anonymous_ok: bool) -> SyntaxResult<Node<FuncDecl>> {
    let start = self.start();
    let is_async = self.consume_if(TT::KeywordAsync).is_match();
    self.require(TT::KeywordFunction)?;
    let generator = self.consume_if(TT::Asterisk).is_match();
    let id = if anonymous_ok && self.peek().typ == TT::ParenthesisOpen {
      None
    } else {
      let id = self.binding_id(ctx)?;
      self.declare(&id, DeclKind::Function)?;
      Some(id)
    };
    let func = self.func_rest(id, is_async, generator, false, FnState::function())?;
    Ok(self.node(start, FuncDecl { func }))
  }

  pub fn func_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<FuncExpr>> {
    let start = self.start();
    let is_async = self.consume_if(TT::KeywordAsync).is_match();
    self.require(TT::KeywordFunction)?;
    let generator = self.consume_if(TT::Asterisk).is_match();
    // The name of a function expression is bound inside the function itself.
    let name_ctx = ctx.with_rules(ParsePatternRules {
      await_allowed: ctx.rules.await_allowed && !is_async,
      yield_allowed: !generator,
      ..ctx.rules
    });
    let id = match self.peek().typ {
      TT::ParenthesisOpen => None,
      _ => Some(self.binding_id(name_ctx)?),
    };
    let func = self.func_rest(id, is_async, generator, false, FnState::function())?;
    Ok(self.node(start, FuncExpr { func }))
  }

  /// Parses the parameters and body of a method into a function expression starting at the parameter list.
  pub fn method_func(
    &mut self,
    is_async: bool,
    generator: bool,
    state: FnState,
  ) -> SyntaxResult<Node<FuncExpr>> {
    let start = self.start();
    let func = self.func_rest(None, is_async, generator, true, state)?;
    Ok(self.node(start, FuncExpr { func }))
  }
}
