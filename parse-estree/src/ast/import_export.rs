use super::expr::lit::LitExpr;
use super::expr::Expr;
use super::expr::IdExpr;
use super::func::FuncDecl;
use super::node::syntax;
use super::node::Node;
use super::stmt::decl::ClassDecl;
use super::stmt::Stmt;
use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportDefaultSpecifier {
  pub local: Node<IdExpr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportNamespaceSpecifier {
  pub local: Node<IdExpr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportSpecifier {
  pub local: Node<IdExpr>,
  pub imported: Node<IdExpr>,
}

#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(untagged)]
pub enum ImportSpec {
  Default(Node<ImportDefaultSpecifier>),
  Namespace(Node<ImportNamespaceSpecifier>),
  Named(Node<ImportSpecifier>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportDecl {
  pub specifiers: Vec<ImportSpec>,
  pub source: Node<LitExpr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportSpecifier {
  pub local: Node<IdExpr>,
  pub exported: Node<IdExpr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportNamedDecl {
  // A variable, function or class declaration.
  pub declaration: Option<Stmt>,
  pub specifiers: Vec<Node<ExportSpecifier>>,
  pub source: Option<Node<LitExpr>>,
}

#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(untagged)]
pub enum ExportDefaultValue {
  Class(Node<ClassDecl>),
  Expr(Expr),
  Func(Node<FuncDecl>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportDefaultDecl {
  pub declaration: ExportDefaultValue,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportAllDecl {
  pub source: Node<LitExpr>,
  pub exported: Option<Node<IdExpr>>,
}

syntax! {
  ExportAllDecl => ExportAllDeclaration,
  ExportDefaultDecl => ExportDefaultDeclaration,
  ExportNamedDecl => ExportNamedDeclaration,
  ExportSpecifier => ExportSpecifier,
  ImportDecl => ImportDeclaration,
  ImportDefaultSpecifier => ImportDefaultSpecifier,
  ImportNamespaceSpecifier => ImportNamespaceSpecifier,
  ImportSpecifier => ImportSpecifier,
}
