use super::expr::Expr;
use super::expr::SpreadElement;
use super::func::FuncExpr;
use super::node::syntax;
use super::node::Node;
use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropKind {
  Init,
  Get,
  Set,
}

/// A property of an object literal. Methods and accessors hold a `FunctionExpression` value.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Property {
  pub key: Expr,
  #[drive(skip)]
  pub computed: bool,
  pub value: Expr,
  #[drive(skip)]
  pub kind: PropKind,
  #[drive(skip)]
  pub method: bool,
  #[drive(skip)]
  pub shorthand: bool,
}

#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(untagged)]
pub enum ObjMember {
  Prop(Node<Property>),
  Spread(Node<SpreadElement>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
  Constructor,
  Method,
  Get,
  Set,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct MethodDef {
  pub key: Expr,
  #[drive(skip)]
  pub computed: bool,
  pub value: Node<FuncExpr>,
  #[drive(skip)]
  pub kind: MethodKind,
  #[drive(skip)]
  #[serde(rename = "static")]
  pub static_: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassBody {
  pub body: Vec<Node<MethodDef>>,
}

syntax! {
  ClassBody => ClassBody,
  MethodDef => MethodDefinition,
  Property => Property,
}
