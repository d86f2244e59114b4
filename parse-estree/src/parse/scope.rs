use super::Parser;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::IdExpr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use ahash::HashSet;
use ahash::HashSetExt;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScopeKind {
  Top,
  Function,
  Block,
  // A catch clause; the clause body shares this scope. `simple` is set when the parameter is a plain identifier.
  Catch { simple: bool },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DeclKind {
  Function,
  Lexical,
  Param,
  Var,
}

pub struct Scope {
  kind: ScopeKind,
  lexical: HashSet<String>,
  // Declared with `var` here or in a nested block and hoisted through here.
  vars: HashSet<String>,
  // Function declarations directly inside a block.
  functions: HashSet<String>,
  // Function or catch parameters.
  params: HashSet<String>,
}

impl Scope {
  fn new(kind: ScopeKind) -> Scope {
    Scope {
      kind,
      lexical: HashSet::new(),
      vars: HashSet::new(),
      functions: HashSet::new(),
      params: HashSet::new(),
    }
  }

  fn is_var_target(&self) -> bool {
    matches!(self.kind, ScopeKind::Top | ScopeKind::Function)
  }
}

#[derive(Clone, Debug)]
pub struct Label {
  pub name: String,
  // Whether the labelled statement, after any further labels, is a loop.
  pub iteration: bool,
}

/// State that resets at function boundaries.
#[derive(Clone, Default)]
pub struct FnState {
  pub in_function: bool,
  pub in_iteration: bool,
  pub in_switch: bool,
  pub labels: Vec<Label>,
  pub allow_new_target: bool,
  pub allow_super_call: bool,
  pub allow_super_property: bool,
}

impl<'a> Parser<'a> {
  pub fn with_scope<T, F>(&mut self, kind: ScopeKind, f: F) -> SyntaxResult<T>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<T>,
  {
    self.scopes.push(Scope::new(kind));
    let res = f(self);
    self.scopes.pop();
    res
  }

  /// Runs `f` with fresh function state; strictness is restored afterwards as a `"use strict"` directive only applies inside.
  pub fn with_fn_state<T, F>(&mut self, state: FnState, f: F) -> SyntaxResult<T>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<T>,
  {
    let saved = std::mem::replace(&mut self.fn_state, state);
    let strict = self.strict;
    let res = f(self);
    self.fn_state = saved;
    self.strict = strict;
    res
  }

  /// Whether parsing is directly in the program body, outside any function or block.
  pub fn is_toplevel(&self) -> bool {
    matches!(self.scopes.as_slice(), [s] if s.kind == ScopeKind::Top)
  }

  pub fn fn_state(&self) -> &FnState {
    &self.fn_state
  }

  pub fn fn_state_mut(&mut self) -> &mut FnState {
    &mut self.fn_state
  }

  fn redeclaration(&mut self, id: &Node<IdExpr>) -> SyntaxResult<()> {
    self.tolerate(id.error(SyntaxErrorType::Redeclaration(id.stx.name.clone())))
  }

  pub fn declare(&mut self, id: &Node<IdExpr>, kind: DeclKind) -> SyntaxResult<()> {
    let name = id.stx.name.as_str();
    let strict = self.strict;
    if kind == DeclKind::Var {
      let mut conflict = false;
      for scope in self.scopes.iter_mut().rev() {
        conflict |= scope.lexical.contains(name) || scope.functions.contains(name);
        if let ScopeKind::Catch { simple } = scope.kind {
          conflict |= !simple && scope.params.contains(name);
        };
        scope.vars.insert(name.to_string());
        if scope.is_var_target() {
          break;
        };
      }
      if conflict {
        self.redeclaration(id)?;
      };
      return Ok(());
    };
    let Some(current) = self.scopes.last_mut() else {
      return Ok(());
    };
    let conflict = match kind {
      DeclKind::Lexical => {
        let conflict = current.lexical.contains(name)
          || current.vars.contains(name)
          || current.functions.contains(name)
          || current.params.contains(name);
        current.lexical.insert(name.to_string());
        conflict
      }
      DeclKind::Function if current.is_var_target() => {
        let conflict = current.lexical.contains(name);
        current.vars.insert(name.to_string());
        conflict
      }
      DeclKind::Function => {
        let conflict = current.lexical.contains(name)
          || current.vars.contains(name)
          || current.params.contains(name)
          || (strict && current.functions.contains(name));
        current.functions.insert(name.to_string());
        conflict
      }
      DeclKind::Param => {
        current.params.insert(name.to_string());
        current.vars.insert(name.to_string());
        false
      }
      DeclKind::Var => false,
    };
    if conflict {
      self.redeclaration(id)?;
    };
    Ok(())
  }

  pub fn declare_pat(&mut self, pat: &Pat, kind: DeclKind) -> SyntaxResult<()> {
    let mut ids = Vec::new();
    pat.for_each_binding(&mut |id| ids.push(id));
    for id in ids {
      self.declare(id, kind)?;
    }
    Ok(())
  }

  /// Declares catch clause parameters into the current catch scope.
  pub fn declare_catch_param(&mut self, pat: &Pat) -> SyntaxResult<()> {
    let mut ids = Vec::new();
    pat.for_each_binding(&mut |id| ids.push(id));
    let mut seen = HashSet::<&str>::new();
    for id in ids {
      if !seen.insert(id.stx.name.as_str()) {
        self.redeclaration(id)?;
      };
      if let Some(scope) = self.scopes.last_mut() {
        scope.params.insert(id.stx.name.clone());
      };
    }
    Ok(())
  }
}
