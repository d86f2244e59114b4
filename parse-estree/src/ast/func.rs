use super::expr::pat::Pat;
use super::expr::IdExpr;
use super::node::syntax;
use super::node::Node;
use super::stmt::BlockStmt;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

// Function declarations and expressions share a shape; only the node type differs.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Func {
  pub id: Option<Node<IdExpr>>,
  pub params: Vec<Pat>,
  pub body: Node<BlockStmt>,
  #[drive(skip)]
  pub generator: bool,
  // Always false; arrow functions have their own node.
  #[drive(skip)]
  pub expression: bool,
  #[drive(skip)]
  #[serde(rename = "async")]
  pub async_: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncExpr {
  #[serde(flatten)]
  pub func: Func,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncDecl {
  #[serde(flatten)]
  pub func: Func,
}

syntax! {
  FuncDecl => FunctionDeclaration,
  FuncExpr => FunctionExpression,
}
