use super::expr::pat::ParsePatternRules;
use super::scope::ScopeKind;
use super::ParseCtx;
use super::Parser;
use crate::ast::node::Node;
use crate::ast::stx::Program;
use crate::error::SyntaxResult;
use crate::options::SourceType;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Parses a whole script or module. The program spans from its first token to the end of its last.
  pub fn parse_top_level(&mut self) -> SyntaxResult<Node<Program>> {
    let module = self.config().module;
    let ctx = ParseCtx {
      rules: ParsePatternRules {
        await_allowed: !module,
        yield_allowed: true,
        await_expr_allowed: false,
        yield_expr_allowed: false,
      },
      in_allowed: true,
    };
    self.with_scope(ScopeKind::Top, |p| {
      let start = p.start();
      let (mut body, _) = p.directive_prologue(ctx)?;
      body.extend(p.stmt_list(ctx, TT::EOF)?);
      let source_type = if module {
        SourceType::Module
      } else {
        SourceType::Script
      };
      Ok(p.node(start, Program {
        body,
        source_type,
        comments: None,
        tokens: None,
        errors: None,
      }))
    })
  }
}
