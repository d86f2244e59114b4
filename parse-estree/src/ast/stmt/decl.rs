use crate::ast::class_or_object::ClassBody;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::Expr;
use crate::ast::expr::IdExpr;
use crate::ast::node::syntax;
use crate::ast::node::Node;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VarDeclMode {
  Const,
  Let,
  Var,
}

impl VarDeclMode {
  pub fn as_str(self) -> &'static str {
    match self {
      VarDeclMode::Const => "const",
      VarDeclMode::Let => "let",
      VarDeclMode::Var => "var",
    }
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDeclarator {
  pub id: Pat,
  pub init: Option<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDecl {
  pub declarations: Vec<Node<VarDeclarator>>,
  #[drive(skip)]
  pub kind: VarDeclMode,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDecl {
  // Only absent for `export default class {}`.
  pub id: Option<Node<IdExpr>>,
  pub super_class: Option<Expr>,
  pub body: Node<ClassBody>,
}

syntax! {
  ClassDecl => ClassDeclaration,
  VarDecl => VariableDeclaration,
  VarDeclarator => VariableDeclarator,
}
