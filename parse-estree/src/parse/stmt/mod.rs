pub mod decl;

use decl::VarDeclParseMode;

use super::expr::lit::decode_escapes;
use super::expr::pat::is_valid_pattern_identifier;
use super::scope::Label;
use super::scope::ScopeKind;
use super::ParseCtx;
use super::Parser;
use crate::ast::expr::Expr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::SeqExpr;
use crate::ast::expr::pat::Pat;
use crate::ast::node::Node;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::BreakStmt;
use crate::ast::stmt::CatchClause;
use crate::ast::stmt::ContinueStmt;
use crate::ast::stmt::DebuggerStmt;
use crate::ast::stmt::DoWhileStmt;
use crate::ast::stmt::EmptyStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::ForHead;
use crate::ast::stmt::ForInStmt;
use crate::ast::stmt::ForInit;
use crate::ast::stmt::ForOfStmt;
use crate::ast::stmt::ForStmt;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::LabelStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::SwitchCase;
use crate::ast::stmt::SwitchStmt;
use crate::ast::stmt::ThrowStmt;
use crate::ast::stmt::TryStmt;
use crate::ast::stmt::WhileStmt;
use crate::ast::stmt::WithStmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Requires a statement terminator, inserting one where a line break, `}` or the end of input allows.
  pub fn consume_semicolon(&mut self) -> SyntaxResult<()> {
    let t = self.peek();
    match t.typ {
      TT::Semicolon => {
        self.consume();
        Ok(())
      }
      TT::BraceClose | TT::EOF => Ok(()),
      _ if t.preceded_by_line_terminator => Ok(()),
      _ => Err(self.unexpected(&t)),
    }
  }

  /// Skips to the next statement boundary after a failed statement, always moving past at least one token.
  fn resync(&mut self, start_tok: usize) {
    if self.next_tok_i == start_tok && self.peek().typ != TT::EOF {
      self.consume();
    };
    loop {
      let t = self.peek();
      match t.typ {
        TT::EOF | TT::BraceClose => break,
        TT::Semicolon => {
          self.consume();
          break;
        }
        _ if t.preceded_by_line_terminator => break,
        _ => {
          self.consume();
        }
      };
    }
    tracing::trace!(offset = self.prev_end(), "resynchronized after syntax error");
  }

  fn stmt_list_while<W>(&mut self, ctx: ParseCtx, cont: W) -> SyntaxResult<Vec<Stmt>>
  where
    W: Fn(TT) -> bool,
  {
    let mut body = Vec::new();
    loop {
      let t = self.peek();
      if t.typ == TT::EOF || !cont(t.typ) {
        break;
      };
      let start_tok = self.next_tok_i;
      match self.stmt_list_item(ctx) {
        Ok(stmt) => body.push(stmt),
        Err(err) if self.errors.is_tolerant() => {
          self.tolerate(err)?;
          self.cover_init = None;
          self.resync(start_tok);
        }
        Err(err) => return Err(err),
      };
    }
    Ok(body)
  }

  /// Parses statements and declarations until `end` or the end of input. In tolerant mode, a statement that fails is recorded and skipped.
  pub fn stmt_list(&mut self, ctx: ParseCtx, end: TT) -> SyntaxResult<Vec<Stmt>> {
    self.stmt_list_while(ctx, |t| t != end)
  }

  /// Parses leading string-literal statements, switching to strict mode at `"use strict"`. Also returns where that directive was.
  pub fn directive_prologue(&mut self, ctx: ParseCtx) -> SyntaxResult<(Vec<Stmt>, Option<Loc>)> {
    let mut body = Vec::new();
    let mut use_strict = None;
    // An octal escape in an earlier directive becomes an error once strict mode starts.
    let mut octal: Option<Loc> = None;
    while self.peek().typ == TT::LiteralString {
      let t = self.peek();
      let mut stmt = self.expr_stmt(ctx)?;
      // Only a string literal on its own is a directive, not `"a" + b`.
      if !matches!(&stmt.stx.expression, Expr::Lit(lit) if lit.loc == t.loc) {
        body.push(Stmt::Expr(stmt));
        break;
      };
      let raw = self.str(Loc(t.loc.0 + 1, t.loc.1 - 1));
      if raw == "use strict" {
        self.strict = true;
        use_strict.get_or_insert(t.loc);
        if let Some(loc) = octal.take() {
          self.tolerate(loc.error(SyntaxErrorType::StrictOctalEscape, None))?;
        };
      } else if octal.is_none() && decode_escapes(raw, false).is_ok_and(|d| d.legacy_octal.is_some()) {
        octal = Some(t.loc);
      };
      stmt.stx.directive = Some(raw.to_string());
      body.push(Stmt::Expr(stmt));
    }
    Ok((body, use_strict))
  }

  /// Whether `let` at the next token starts a declaration rather than an identifier expression.
  fn is_let_decl(&mut self) -> bool {
    let (t0, t1) = self.peek_2();
    t0.typ == TT::KeywordLet
      && (matches!(t1.typ, TT::BracketOpen | TT::BraceOpen) || Self::is_identifier_like(t1.typ))
  }

  /// Parses a statement or a declaration.
  pub fn stmt_list_item(&mut self, ctx: ParseCtx) -> SyntaxResult<Stmt> {
    let (t0, t1) = self.peek_2();
    #[rustfmt::skip]
    let stmt = match t0.typ {
      TT::KeywordClass => Stmt::ClassDecl(self.class_decl(ctx, false)?),
      TT::KeywordConst => Stmt::VarDecl(self.var_decl(ctx, VarDeclParseMode::Asi)?),
      TT::KeywordLet if self.is_let_decl() => Stmt::VarDecl(self.var_decl(ctx, VarDeclParseMode::Asi)?),
      TT::KeywordFunction => Stmt::FuncDecl(self.func_decl(ctx, false)?),
      TT::KeywordAsync if t1.typ == TT::KeywordFunction && !t1.preceded_by_line_terminator => Stmt::FuncDecl(self.func_decl(ctx, false)?),
      TT::KeywordImport if !matches!(t1.typ, TT::ParenthesisOpen | TT::Dot) => self.import_decl(ctx)?,
      TT::KeywordExport => self.export_decl(ctx)?,
      _ => self.stmt(ctx)?,
    };
    Ok(stmt)
  }

  /// Parses a statement; declarations other than `var` are not statements.
  pub fn stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Stmt> {
    let (t0, t1) = self.peek_2();
    #[rustfmt::skip]
    let stmt = match t0.typ {
      TT::BraceOpen => Stmt::Block(self.block_stmt(ctx)?),
      TT::KeywordBreak => Stmt::Break(self.break_stmt(ctx)?),
      TT::KeywordContinue => Stmt::Continue(self.continue_stmt(ctx)?),
      TT::KeywordDebugger => Stmt::Debugger(self.debugger_stmt()?),
      TT::KeywordDo => Stmt::DoWhile(self.do_while_stmt(ctx)?),
      TT::KeywordFor => self.for_stmt(ctx)?,
      TT::KeywordFunction => {
        // Sloppy code allows a function declaration as the body of `if` or a label.
        if self.is_strict() {
          self.tolerate(t0.error(SyntaxErrorType::UnexpectedToken))?;
        };
        Stmt::FuncDecl(self.func_decl(ctx, false)?)
      }
      TT::KeywordIf => Stmt::If(self.if_stmt(ctx)?),
      TT::KeywordReturn => Stmt::Return(self.return_stmt(ctx)?),
      TT::KeywordSwitch => Stmt::Switch(self.switch_stmt(ctx)?),
      TT::KeywordThrow => Stmt::Throw(self.throw_stmt(ctx)?),
      TT::KeywordTry => Stmt::Try(self.try_stmt(ctx)?),
      TT::KeywordVar => Stmt::VarDecl(self.var_decl(ctx, VarDeclParseMode::Asi)?),
      TT::KeywordWhile => Stmt::While(self.while_stmt(ctx)?),
      TT::KeywordWith => Stmt::With(self.with_stmt(ctx)?),
      TT::Semicolon => Stmt::Empty(self.empty_stmt()?),
      TT::KeywordClass | TT::KeywordConst | TT::KeywordImport | TT::KeywordExport if t1.typ != TT::ParenthesisOpen && t1.typ != TT::Dot => return Err(self.unexpected(&t0)),
      t if is_valid_pattern_identifier(t, ctx.rules) && t1.typ == TT::Colon => Stmt::Label(self.label_stmt(ctx)?),
      _ => Stmt::Expr(self.expr_stmt(ctx)?),
    };
    Ok(stmt)
  }

  pub fn expr_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ExprStmt>> {
    let start = self.start();
    let expression = self.expr(ctx.with_in(true))?;
    self.consume_semicolon()?;
    Ok(self.node(start, ExprStmt {
      expression,
      directive: None,
    }))
  }

  pub fn empty_stmt(&mut self) -> SyntaxResult<Node<EmptyStmt>> {
    self.with_loc(|p| p.require(TT::Semicolon).map(|_| EmptyStmt {}))
  }

  pub fn debugger_stmt(&mut self) -> SyntaxResult<Node<DebuggerStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordDebugger)?;
      p.consume_semicolon()?;
      Ok(DebuggerStmt {})
    })
  }

  /// Parses `{ ... }` without opening a scope; the caller decides which scope the statements belong to.
  fn block_in_current_scope(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<BlockStmt>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let body = p.stmt_list(ctx, TT::BraceClose)?;
      p.require(TT::BraceClose)?;
      Ok(BlockStmt { body })
    })
  }

  pub fn block_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<BlockStmt>> {
    self.with_scope(ScopeKind::Block, |p| p.block_in_current_scope(ctx))
  }

  /// Runs `f` with `break` and `continue` allowed.
  fn with_iteration<T, F>(&mut self, f: F) -> SyntaxResult<T>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<T>,
  {
    let outer = self.fn_state().in_iteration;
    self.fn_state_mut().in_iteration = true;
    let res = f(self);
    self.fn_state_mut().in_iteration = outer;
    res
  }

  /// Whether the statement after a label, skipping any further labels, is a loop.
  fn labels_iteration(&mut self) -> bool {
    let checkpoint = self.checkpoint();
    loop {
      let (t0, t1) = self.peek_2();
      if !Self::is_identifier_like(t0.typ) || t1.typ != TT::Colon {
        break;
      };
      self.consume();
      self.consume();
    }
    let typ = self.peek().typ;
    self.restore_checkpoint(checkpoint);
    matches!(typ, TT::KeywordDo | TT::KeywordFor | TT::KeywordWhile)
  }

  pub fn label_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LabelStmt>> {
    let start = self.start();
    let label = self.id_ref(ctx)?;
    self.require(TT::Colon)?;
    let name = label.stx.name.clone();
    if self.fn_state().labels.iter().any(|l| l.name == name) {
      self.tolerate(label.error(SyntaxErrorType::DuplicateLabel(name.clone())))?;
    };
    let iteration = self.labels_iteration();
    self.fn_state_mut().labels.push(Label { name, iteration });
    let body = self.stmt(ctx);
    self.fn_state_mut().labels.pop();
    let body = body?;
    Ok(self.node(start, LabelStmt { label, body }))
  }

  /// Parses the optional label after `break` or `continue`.
  fn jump_label(&mut self, ctx: ParseCtx) -> SyntaxResult<Option<Node<IdExpr>>> {
    let t = self.peek();
    if t.preceded_by_line_terminator || !is_valid_pattern_identifier(t.typ, ctx.rules) {
      return Ok(None);
    };
    self.id_ref(ctx).map(Some)
  }

  pub fn break_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<BreakStmt>> {
    let t = self.require(TT::KeywordBreak)?;
    let label = self.jump_label(ctx)?;
    match &label {
      Some(label) => {
        if !self.fn_state().labels.iter().any(|l| l.name == label.stx.name) {
          return Err(label.error(SyntaxErrorType::UndefinedLabel(label.stx.name.clone())));
        };
      }
      None => {
        let state = self.fn_state();
        if !state.in_iteration && !state.in_switch {
          return Err(t.error(SyntaxErrorType::IllegalBreak));
        };
      }
    };
    self.consume_semicolon()?;
    Ok(self.node(t.loc.0, BreakStmt { label }))
  }

  pub fn continue_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ContinueStmt>> {
    let t = self.require(TT::KeywordContinue)?;
    let label = self.jump_label(ctx)?;
    if !self.fn_state().in_iteration {
      return Err(t.error(SyntaxErrorType::IllegalContinue));
    };
    if let Some(label) = &label {
      let found = self
        .fn_state()
        .labels
        .iter()
        .any(|l| l.name == label.stx.name && l.iteration);
      if !found {
        return Err(label.error(SyntaxErrorType::UndefinedLabel(label.stx.name.clone())));
      };
    };
    self.consume_semicolon()?;
    Ok(self.node(t.loc.0, ContinueStmt { label }))
  }

  pub fn return_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ReturnStmt>> {
    let t = self.require(TT::KeywordReturn)?;
    if !self.fn_state().in_function {
      self.tolerate(t.error(SyntaxErrorType::IllegalReturn))?;
    };
    let next = self.peek_with_mode(LexMode::SlashIsRegex);
    let argument = if next.preceded_by_line_terminator
      || matches!(next.typ, TT::Semicolon | TT::BraceClose | TT::EOF)
    {
      None
    } else {
      Some(self.expr(ctx.with_in(true))?)
    };
    self.consume_semicolon()?;
    Ok(self.node(t.loc.0, ReturnStmt { argument }))
  }

  pub fn throw_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ThrowStmt>> {
    let t = self.require(TT::KeywordThrow)?;
    let next = self.peek_with_mode(LexMode::SlashIsRegex);
    if next.preceded_by_line_terminator {
      return Err(next.error(SyntaxErrorType::LineTerminatorAfterThrow));
    };
    let argument = self.expr(ctx.with_in(true))?;
    self.consume_semicolon()?;
    Ok(self.node(t.loc.0, ThrowStmt { argument }))
  }

  fn paren_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Expr> {
    self.require(TT::ParenthesisOpen)?;
    let expr = self.expr(ctx.with_in(true))?;
    self.require(TT::ParenthesisClose)?;
    Ok(expr)
  }

  pub fn if_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<IfStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordIf)?;
      let test = p.paren_expr(ctx)?;
      let consequent = p.stmt(ctx)?;
      let alternate = if p.consume_if(TT::KeywordElse).is_match() {
        Some(p.stmt(ctx)?)
      } else {
        None
      };
      Ok(IfStmt {
        test,
        consequent,
        alternate,
      })
    })
  }

  pub fn while_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<WhileStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordWhile)?;
      let test = p.paren_expr(ctx)?;
      let body = p.with_iteration(|p| p.stmt(ctx))?;
      Ok(WhileStmt { test, body })
    })
  }

  pub fn do_while_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<DoWhileStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordDo)?;
      let body = p.with_iteration(|p| p.stmt(ctx))?;
      p.require(TT::KeywordWhile)?;
      let test = p.paren_expr(ctx)?;
      // A semicolon is always optional after `do-while`.
      let _ = p.consume_if(TT::Semicolon);
      Ok(DoWhileStmt { body, test })
    })
  }

  pub fn with_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<WithStmt>> {
    self.with_loc(|p| {
      let t = p.require(TT::KeywordWith)?;
      if p.is_strict() {
        p.tolerate(t.error(SyntaxErrorType::StrictWith))?;
      };
      let object = p.paren_expr(ctx)?;
      let body = p.stmt(ctx)?;
      Ok(WithStmt { object, body })
    })
  }

  pub fn switch_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<SwitchStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordSwitch)?;
      let discriminant = p.paren_expr(ctx)?;
      p.require(TT::BraceOpen)?;
      let outer = p.fn_state().in_switch;
      p.fn_state_mut().in_switch = true;
      let cases = p.with_scope(ScopeKind::Block, |p| p.switch_cases(ctx));
      p.fn_state_mut().in_switch = outer;
      let cases = cases?;
      p.require(TT::BraceClose)?;
      Ok(SwitchStmt {
        discriminant,
        cases,
      })
    })
  }

  fn switch_cases(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<Node<SwitchCase>>> {
    let mut cases = Vec::new();
    let mut has_default = false;
    loop {
      let t = self.peek();
      let test = match t.typ {
        TT::BraceClose | TT::EOF => break,
        TT::KeywordCase => {
          self.consume();
          Some(self.expr(ctx.with_in(true))?)
        }
        TT::KeywordDefault => {
          self.consume();
          if has_default {
            self.tolerate(t.error(SyntaxErrorType::DuplicateDefaultClause))?;
          };
          has_default = true;
          None
        }
        _ => return Err(self.unexpected(&t)),
      };
      self.require(TT::Colon)?;
      let consequent = self.stmt_list_while(ctx, |t| {
        !matches!(t, TT::BraceClose | TT::KeywordCase | TT::KeywordDefault)
      })?;
      cases.push(self.node(t.loc.0, SwitchCase { test, consequent }));
    }
    Ok(cases)
  }

  pub fn try_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<TryStmt>> {
    self.with_loc(|p| {
      let t = p.require(TT::KeywordTry)?;
      let block = p.block_stmt(ctx)?;
      let handler = if p.peek().typ == TT::KeywordCatch {
        Some(p.catch_clause(ctx)?)
      } else {
        None
      };
      let finalizer = if p.consume_if(TT::KeywordFinally).is_match() {
        Some(p.block_stmt(ctx)?)
      } else {
        None
      };
      if handler.is_none() && finalizer.is_none() {
        return Err(t.error(SyntaxErrorType::TryStatementHasNoCatchOrFinally));
      };
      Ok(TryStmt {
        block,
        handler,
        finalizer,
      })
    })
  }

  fn catch_clause(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<CatchClause>> {
    let start = self.require(TT::KeywordCatch)?.loc.0;
    let param = if self.consume_if(TT::ParenthesisOpen).is_match() {
      let param = self.binding_pat(ctx)?;
      self.require(TT::ParenthesisClose)?;
      Some(param)
    } else {
      None
    };
    let simple = matches!(param, None | Some(Pat::Id(_)));
    // The parameter and the body share one scope.
    let body = self.with_scope(ScopeKind::Catch { simple }, |p| {
      if let Some(param) = &param {
        p.declare_catch_param(param)?;
      };
      p.block_in_current_scope(ctx)
    })?;
    Ok(self.node(start, CatchClause { param, body }))
  }

  pub fn for_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Stmt> {
    let start = self.require(TT::KeywordFor)?.loc.0;
    let await_ = ctx.rules.await_expr_allowed && self.consume_if(TT::KeywordAwait).is_match();
    self.require(TT::ParenthesisOpen)?;
    self.with_scope(ScopeKind::Block, |p| {
      let head_ctx = ctx.with_in(false);
      let t = p.peek();
      let init = if t.typ == TT::Semicolon {
        None
      } else if matches!(t.typ, TT::KeywordVar | TT::KeywordConst) || p.is_let_decl() {
        let decl = p.var_decl(head_ctx, VarDeclParseMode::Leftmost)?;
        if matches!(p.peek().typ, TT::KeywordIn | TT::KeywordOf) {
          p.check_for_in_of_decl(&decl)?;
          return p.for_in_of(ctx, start, ForHead::Decl(decl), await_);
        };
        p.check_initializers(decl.stx.kind, &decl.stx.declarations)?;
        Some(ForInit::Decl(decl))
      } else {
        let outer = p.cover_init.take();
        let first = p.assignment_expr_cover(head_ctx)?;
        if matches!(p.peek().typ, TT::KeywordIn | TT::KeywordOf) {
          // Any shorthand initializer in the target is now part of a valid pattern.
          let target = p.expr_to_pat(first)?;
          p.cover_init = outer;
          return p.for_in_of(ctx, start, ForHead::Pat(target), await_);
        };
        if let Some(loc) = p.cover_init.take() {
          p.tolerate(loc.error(SyntaxErrorType::InvalidShorthandInitializer, None))?;
        };
        p.cover_init = outer;
        let init = if p.peek().typ == TT::Comma {
          let mut expressions = vec![first];
          while p.consume_if(TT::Comma).is_match() {
            expressions.push(p.assignment_expr(head_ctx)?);
          }
          Expr::Seq(p.node(t.loc.0, SeqExpr { expressions }))
        } else {
          first
        };
        Some(ForInit::Expr(init))
      };
      if await_ {
        let next = p.peek();
        return Err(next.error(SyntaxErrorType::RequiredTokenNotFound(TT::KeywordOf)));
      };
      p.require(TT::Semicolon)?;
      let test = match p.peek().typ {
        TT::Semicolon => None,
        _ => Some(p.expr(ctx.with_in(true))?),
      };
      p.require(TT::Semicolon)?;
      let update = match p.peek().typ {
        TT::ParenthesisClose => None,
        _ => Some(p.expr(ctx.with_in(true))?),
      };
      p.require(TT::ParenthesisClose)?;
      let body = p.with_iteration(|p| p.stmt(ctx))?;
      Ok(Stmt::For(p.node(start, ForStmt {
        init,
        test,
        update,
        body,
      })))
    })
  }

  /// Parses from `in` or `of` to the end of a `for-in` or `for-of` statement.
  fn for_in_of(&mut self, ctx: ParseCtx, start: usize, left: ForHead, await_: bool) -> SyntaxResult<Stmt> {
    let t = self.consume();
    if t.typ == TT::KeywordIn {
      if await_ {
        return Err(t.error(SyntaxErrorType::RequiredTokenNotFound(TT::KeywordOf)));
      };
      let right = self.expr(ctx.with_in(true))?;
      self.require(TT::ParenthesisClose)?;
      let body = self.with_iteration(|p| p.stmt(ctx))?;
      return Ok(Stmt::ForIn(self.node(start, ForInStmt { left, right, body })));
    };
    let right = self.assignment_expr(ctx.with_in(true))?;
    self.require(TT::ParenthesisClose)?;
    let body = self.with_iteration(|p| p.stmt(ctx))?;
    Ok(Stmt::ForOf(self.node(start, ForOfStmt {
      left,
      right,
      body,
      await_,
    })))
  }

  /// A `for-in` or `for-of` head declares exactly one binding, without an initializer except in legacy sloppy `for (var x = 1 in o)`.
  fn check_for_in_of_decl(&mut self, decl: &Node<VarDecl>) -> SyntaxResult<()> {
    let is_of = self.peek().typ == TT::KeywordOf;
    let loop_name = if is_of { "for-of" } else { "for-in" };
    if decl.stx.declarations.len() != 1 {
      return Err(decl.error(SyntaxErrorType::ForInOfInitializer(loop_name)));
    };
    let declarator = &decl.stx.declarations[0];
    if declarator.stx.init.is_some() {
      let legacy = !is_of
        && !self.is_strict()
        && decl.stx.kind == VarDeclMode::Var
        && matches!(declarator.stx.id, Pat::Id(_));
      if !legacy {
        return Err(declarator.error(SyntaxErrorType::ForInOfInitializer(loop_name)));
      };
    };
    Ok(())
  }
}
