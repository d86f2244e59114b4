use super::expr::pat::is_valid_pattern_identifier;
use super::scope::DeclKind;
use super::stmt::decl::VarDeclParseMode;
use super::ParseCtx;
use super::Parser;
use crate::ast::expr::lit::LitExpr;
use crate::ast::expr::IdExpr;
use crate::ast::import_export::ExportAllDecl;
use crate::ast::import_export::ExportDefaultDecl;
use crate::ast::import_export::ExportDefaultValue;
use crate::ast::import_export::ExportNamedDecl;
use crate::ast::import_export::ExportSpecifier;
use crate::ast::import_export::ImportDecl;
use crate::ast::import_export::ImportDefaultSpecifier;
use crate::ast::import_export::ImportNamespaceSpecifier;
use crate::ast::import_export::ImportSpec;
use crate::ast::import_export::ImportSpecifier;
use crate::ast::node::Node;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::Token;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Import and export declarations are only allowed directly in a module's body.
  fn check_module_item(&mut self, t: &Token) -> SyntaxResult<()> {
    if !self.config().module {
      return Err(t.error(SyntaxErrorType::ModuleDeclarationInScript));
    };
    if !self.is_toplevel() {
      return Err(self.unexpected(t));
    };
    Ok(())
  }

  fn module_source(&mut self) -> SyntaxResult<Node<LitExpr>> {
    let t = self.require(TT::LiteralString)?;
    self.lit_str(&t)
  }

  /// Parses any identifier name, including reserved words, as used for imported and exported names.
  fn module_export_name(&mut self) -> SyntaxResult<Node<IdExpr>> {
    let t = self.consume();
    if t.typ != TT::Identifier && !t.typ.is_keyword() {
      return Err(self.unexpected(&t));
    };
    let name = self.identifier_name(&t)?;
    Ok(self.node_at(t.loc, IdExpr { name }))
  }

  fn import_specifier(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ImportSpecifier>> {
    let start = self.start();
    let t = self.peek();
    let imported = self.module_export_name()?;
    let local = if self.consume_if(TT::KeywordAs).is_match() {
      self.binding_id(ctx)?
    } else {
      // Without `as`, the imported name is also the local binding and must be a valid one.
      if !is_valid_pattern_identifier(t.typ, ctx.rules) {
        return Err(t.error(SyntaxErrorType::UnexpectedReservedWord));
      };
      self.check_identifier(&t, &imported.stx.name, true)?;
      self.node_at(imported.loc, IdExpr {
        name: imported.stx.name.clone(),
      })
    };
    self.declare(&local, DeclKind::Lexical)?;
    Ok(self.node(start, ImportSpecifier { local, imported }))
  }

  /// Parses an import declaration:
  /// - `import "mod"`
  /// - `import a from "mod"`
  /// - `import * as ns from "mod"`
  /// - `import a, { b, c as d } from "mod"`
  pub fn import_decl(&mut self, ctx: ParseCtx) -> SyntaxResult<Stmt> {
    let t = self.peek();
    self.check_module_item(&t)?;
    let decl = self.with_loc(|p| {
      p.require(TT::KeywordImport)?;
      if p.peek().typ == TT::LiteralString {
        let source = p.module_source()?;
        p.consume_semicolon()?;
        return Ok(ImportDecl {
          specifiers: Vec::new(),
          source,
        });
      };
      let mut specifiers = Vec::new();
      if p.peek().typ != TT::BraceOpen && p.peek().typ != TT::Asterisk {
        let start = p.start();
        let local = p.binding_id(ctx)?;
        p.declare(&local, DeclKind::Lexical)?;
        specifiers.push(ImportSpec::Default(
          p.node(start, ImportDefaultSpecifier { local }),
        ));
        if !p.consume_if(TT::Comma).is_match() {
          p.require(TT::KeywordFrom)?;
          let source = p.module_source()?;
          p.consume_semicolon()?;
          return Ok(ImportDecl { specifiers, source });
        };
      };
      if p.peek().typ == TT::Asterisk {
        let start = p.consume().loc.0;
        p.require(TT::KeywordAs)?;
        let local = p.binding_id(ctx)?;
        p.declare(&local, DeclKind::Lexical)?;
        specifiers.push(ImportSpec::Namespace(
          p.node(start, ImportNamespaceSpecifier { local }),
        ));
      } else {
        p.require(TT::BraceOpen)?;
        let named = p.list(TT::Comma, TT::BraceClose, |p| p.import_specifier(ctx))?;
        specifiers.extend(named.into_iter().map(ImportSpec::Named));
      };
      p.require(TT::KeywordFrom)?;
      let source = p.module_source()?;
      p.consume_semicolon()?;
      Ok(ImportDecl { specifiers, source })
    })?;
    Ok(Stmt::Import(decl))
  }

  fn export_specifier(&mut self) -> SyntaxResult<(Node<ExportSpecifier>, Token)> {
    let start = self.start();
    let t = self.peek();
    let local = self.module_export_name()?;
    let exported = if self.consume_if(TT::KeywordAs).is_match() {
      self.module_export_name()?
    } else {
      self.node_at(local.loc, IdExpr {
        name: local.stx.name.clone(),
      })
    };
    Ok((self.node(start, ExportSpecifier { local, exported }), t))
  }

  /// Parses an export declaration:
  /// - `export default expr;`
  /// - `export default function () {}`
  /// - `export * from "mod"` and `export * as ns from "mod"`
  /// - `export { a, b as c }` with an optional `from "mod"`
  /// - `export var a = 1`, `export function f() {}` and `export class C {}`
  pub fn export_decl(&mut self, ctx: ParseCtx) -> SyntaxResult<Stmt> {
    let t = self.peek();
    self.check_module_item(&t)?;
    let start = self.require(TT::KeywordExport)?.loc.0;
    let (t0, t1) = self.peek_2();
    #[rustfmt::skip]
    let stmt = match t0.typ {
      TT::KeywordDefault => {
        self.consume();
        let (n0, n1) = self.peek_2();
        let declaration = match n0.typ {
          TT::KeywordFunction => ExportDefaultValue::Func(self.func_decl(ctx, true)?),
          TT::KeywordAsync if n1.typ == TT::KeywordFunction && !n1.preceded_by_line_terminator => ExportDefaultValue::Func(self.func_decl(ctx, true)?),
          TT::KeywordClass => ExportDefaultValue::Class(self.class_decl(ctx, true)?),
          _ => {
            let expr = self.assignment_expr(ctx.with_in(true))?;
            self.consume_semicolon()?;
            ExportDefaultValue::Expr(expr)
          }
        };
        Stmt::ExportDefault(self.node(start, ExportDefaultDecl { declaration }))
      }
      TT::Asterisk => {
        self.consume();
        let exported = if self.consume_if(TT::KeywordAs).is_match() {
          Some(self.module_export_name()?)
        } else {
          None
        };
        self.require(TT::KeywordFrom)?;
        let source = self.module_source()?;
        self.consume_semicolon()?;
        Stmt::ExportAll(self.node(start, ExportAllDecl { source, exported }))
      }
      TT::BraceOpen => {
        self.consume();
        let specifiers = self.list(TT::Comma, TT::BraceClose, |p| p.export_specifier())?;
        let source = if self.consume_if(TT::KeywordFrom).is_match() {
          Some(self.module_source()?)
        } else {
          // Exporting local bindings, which reserved words can never be.
          for (_, t) in specifiers.iter() {
            if t.typ.is_keyword() && !is_valid_pattern_identifier(t.typ, ctx.rules) {
              return Err(t.error(SyntaxErrorType::UnexpectedReservedWord));
            };
          }
          None
        };
        self.consume_semicolon()?;
        Stmt::ExportNamed(self.node(start, ExportNamedDecl {
          declaration: None,
          specifiers: specifiers.into_iter().map(|(s, _)| s).collect(),
          source,
        }))
      }
      TT::KeywordVar | TT::KeywordConst | TT::KeywordLet => {
        let decl = self.var_decl(ctx, VarDeclParseMode::Asi)?;
        self.export_declaration(start, Stmt::VarDecl(decl))
      }
      TT::KeywordFunction => {
        let decl = self.func_decl(ctx, false)?;
        self.export_declaration(start, Stmt::FuncDecl(decl))
      }
      TT::KeywordAsync if t1.typ == TT::KeywordFunction && !t1.preceded_by_line_terminator => {
        let decl = self.func_decl(ctx, false)?;
        self.export_declaration(start, Stmt::FuncDecl(decl))
      }
      TT::KeywordClass => {
        let decl = self.class_decl(ctx, false)?;
        self.export_declaration(start, Stmt::ClassDecl(decl))
      }
      _ => return Err(self.unexpected(&t0)),
    };
    Ok(stmt)
  }

  fn export_declaration(&mut self, start: usize, declaration: Stmt) -> Stmt {
    Stmt::ExportNamed(self.node(start, ExportNamedDecl {
      declaration: Some(declaration),
      specifiers: Vec::new(),
      source: None,
    }))
  }
}
