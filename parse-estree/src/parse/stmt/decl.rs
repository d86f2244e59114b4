use super::super::scope::DeclKind;
use super::super::ParseCtx;
use super::super::Parser;
use crate::ast::expr::pat::Pat;
use crate::ast::node::Node;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::decl::VarDeclarator;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum VarDeclParseMode {
  // Standard parsing mode for var/let/const statement.
  Asi,
  // Parse as many valid declarators as possible, then break before the first invalid token (i.e. not a comma). Used by for-loop parser.
  Leftmost,
}

impl<'a> Parser<'a> {
  pub fn var_decl_mode(&mut self) -> SyntaxResult<VarDeclMode> {
    let t = self.consume();
    Ok(match t.typ {
      TT::KeywordLet => VarDeclMode::Let,
      TT::KeywordConst => VarDeclMode::Const,
      TT::KeywordVar => VarDeclMode::Var,
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("variable declaration"))),
    })
  }

  /// Parses a variable declaration, which contains one or more declarators, each with an optional initializer. Examples of variable declarations:
  /// - `const a = 1`
  /// - `let a, b = 2, c`
  /// - `let [a, b] = c`
  /// - `var a`
  pub fn var_decl(
    &mut self,
    ctx: ParseCtx,
    parse_mode: VarDeclParseMode,
  ) -> SyntaxResult<Node<VarDecl>> {
    self.with_loc(|p| {
      let kind = p.var_decl_mode()?;
      let decl_kind = match kind {
        VarDeclMode::Var => DeclKind::Var,
        _ => DeclKind::Lexical,
      };
      let mut declarations = Vec::new();
      loop {
        let start = p.start();
        let id = p.binding_pat(ctx)?;
        if kind != VarDeclMode::Var {
          let mut lets = Vec::new();
          id.for_each_binding(&mut |id| {
            if id.stx.name == "let" {
              lets.push(id.loc);
            };
          });
          for loc in lets {
            p.tolerate(loc.error(SyntaxErrorType::LetInLexicalBinding, None))?;
          }
        };
        p.declare_pat(&id, decl_kind)?;
        let init = if p.consume_if(TT::Equals).is_match() {
          Some(p.assignment_expr(ctx)?)
        } else {
          None
        };
        declarations.push(p.node(start, VarDeclarator { id, init }));
        if !p.consume_if(TT::Comma).is_match() {
          break;
        };
      }
      if parse_mode == VarDeclParseMode::Asi {
        p.check_initializers(kind, &declarations)?;
        p.consume_semicolon()?;
      };
      Ok(VarDecl { declarations, kind })
    })
  }

  /// Outside `for-in` and `for-of` heads, `const` and destructuring declarators need an initializer.
  pub fn check_initializers(
    &mut self,
    kind: VarDeclMode,
    declarations: &[Node<VarDeclarator>],
  ) -> SyntaxResult<()> {
    for declarator in declarations {
      if declarator.stx.init.is_some() {
        continue;
      };
      if kind == VarDeclMode::Const || !matches!(declarator.stx.id, Pat::Id(_)) {
        self.tolerate(declarator.error(SyntaxErrorType::DeclarationMissingInitializer(
          kind.as_str(),
        )))?;
      };
    }
    Ok(())
  }
}
