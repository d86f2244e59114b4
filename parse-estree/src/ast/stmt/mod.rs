pub mod decl;

use super::expr::pat::Pat;
use super::expr::Expr;
use super::expr::IdExpr;
use super::func::FuncDecl;
use super::import_export::ExportAllDecl;
use super::import_export::ExportDefaultDecl;
use super::import_export::ExportNamedDecl;
use super::import_export::ImportDecl;
use super::kind::NodeKind;
use super::node::syntax;
use super::node::Node;
use super::node::Syntax;
use crate::loc::Loc;
use decl::ClassDecl;
use decl::VarDecl;
use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

// We must wrap each variant with Node<T> as otherwise we won't be able to visit Node<T> instead of just T.
#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(untagged)]
pub enum Stmt {
  Block(Node<BlockStmt>),
  Break(Node<BreakStmt>),
  Continue(Node<ContinueStmt>),
  Debugger(Node<DebuggerStmt>),
  DoWhile(Node<DoWhileStmt>),
  Empty(Node<EmptyStmt>),
  Expr(Node<ExprStmt>),
  For(Node<ForStmt>),
  ForIn(Node<ForInStmt>),
  ForOf(Node<ForOfStmt>),
  If(Node<IfStmt>),
  Label(Node<LabelStmt>),
  Return(Node<ReturnStmt>),
  Switch(Node<SwitchStmt>),
  Throw(Node<ThrowStmt>),
  Try(Node<TryStmt>),
  While(Node<WhileStmt>),
  With(Node<WithStmt>),

  ClassDecl(Node<ClassDecl>),
  FuncDecl(Node<FuncDecl>),
  VarDecl(Node<VarDecl>),

  // Module items.
  ExportAll(Node<ExportAllDecl>),
  ExportDefault(Node<ExportDefaultDecl>),
  ExportNamed(Node<ExportNamedDecl>),
  Import(Node<ImportDecl>),
}

impl Stmt {
  pub fn loc(&self) -> Loc {
    match self {
      Stmt::Block(n) => n.loc,
      Stmt::Break(n) => n.loc,
      Stmt::Continue(n) => n.loc,
      Stmt::Debugger(n) => n.loc,
      Stmt::DoWhile(n) => n.loc,
      Stmt::Empty(n) => n.loc,
      Stmt::Expr(n) => n.loc,
      Stmt::For(n) => n.loc,
      Stmt::ForIn(n) => n.loc,
      Stmt::ForOf(n) => n.loc,
      Stmt::If(n) => n.loc,
      Stmt::Label(n) => n.loc,
      Stmt::Return(n) => n.loc,
      Stmt::Switch(n) => n.loc,
      Stmt::Throw(n) => n.loc,
      Stmt::Try(n) => n.loc,
      Stmt::While(n) => n.loc,
      Stmt::With(n) => n.loc,
      Stmt::ClassDecl(n) => n.loc,
      Stmt::FuncDecl(n) => n.loc,
      Stmt::VarDecl(n) => n.loc,
      Stmt::ExportAll(n) => n.loc,
      Stmt::ExportDefault(n) => n.loc,
      Stmt::ExportNamed(n) => n.loc,
      Stmt::Import(n) => n.loc,
    }
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BlockStmt {
  pub body: Vec<Stmt>,
}

impl Syntax for BlockStmt {
  const KIND: NodeKind = NodeKind::BlockStatement;

  fn is_empty_body(&self) -> bool {
    self.body.is_empty()
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BreakStmt {
  pub label: Option<Node<IdExpr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CatchClause {
  pub param: Option<Pat>,
  pub body: Node<BlockStmt>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ContinueStmt {
  pub label: Option<Node<IdExpr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct DebuggerStmt {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct DoWhileStmt {
  pub body: Stmt,
  pub test: Expr,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct EmptyStmt {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExprStmt {
  pub expression: Expr,
  // The raw text of a directive prologue entry, without quotes.
  #[drive(skip)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub directive: Option<String>,
}

#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(untagged)]
pub enum ForInit {
  Decl(Node<VarDecl>),
  Expr(Expr),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ForStmt {
  pub init: Option<ForInit>,
  pub test: Option<Expr>,
  pub update: Option<Expr>,
  pub body: Stmt,
}

/// The left side of `for-in` and `for-of`.
#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(untagged)]
pub enum ForHead {
  Decl(Node<VarDecl>),
  Pat(Pat),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ForInStmt {
  pub left: ForHead,
  pub right: Expr,
  pub body: Stmt,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ForOfStmt {
  pub left: ForHead,
  pub right: Expr,
  pub body: Stmt,
  #[drive(skip)]
  #[serde(rename = "await")]
  pub await_: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IfStmt {
  pub test: Expr,
  pub consequent: Stmt,
  pub alternate: Option<Stmt>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LabelStmt {
  pub label: Node<IdExpr>,
  pub body: Stmt,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ReturnStmt {
  pub argument: Option<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct SwitchCase {
  pub test: Option<Expr>,
  pub consequent: Vec<Stmt>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct SwitchStmt {
  pub discriminant: Expr,
  pub cases: Vec<Node<SwitchCase>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ThrowStmt {
  pub argument: Expr,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TryStmt {
  pub block: Node<BlockStmt>,
  pub handler: Option<Node<CatchClause>>,
  pub finalizer: Option<Node<BlockStmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct WhileStmt {
  pub test: Expr,
  pub body: Stmt,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct WithStmt {
  pub object: Expr,
  pub body: Stmt,
}

syntax! {
  BreakStmt => BreakStatement,
  CatchClause => CatchClause,
  ContinueStmt => ContinueStatement,
  DebuggerStmt => DebuggerStatement,
  DoWhileStmt => DoWhileStatement,
  EmptyStmt => EmptyStatement,
  ExprStmt => ExpressionStatement,
  ForInStmt => ForInStatement,
  ForOfStmt => ForOfStatement,
  ForStmt => ForStatement,
  IfStmt => IfStatement,
  LabelStmt => LabeledStatement,
  ReturnStmt => ReturnStatement,
  SwitchCase => SwitchCase,
  SwitchStmt => SwitchStatement,
  ThrowStmt => ThrowStatement,
  TryStmt => TryStatement,
  WhileStmt => WhileStatement,
  WithStmt => WithStatement,
}
