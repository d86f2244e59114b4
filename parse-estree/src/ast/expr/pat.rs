use super::Expr;
use super::IdExpr;
use super::MemberExpr;
use crate::ast::class_or_object::PropKind;
use crate::ast::node::syntax;
use crate::ast::node::Node;
use crate::loc::Loc;
use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// A binding or assignment target.
#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(untagged)]
pub enum Pat {
  Arr(Node<ArrPat>),
  Assign(Node<AssignPat>),
  Id(Node<IdExpr>),
  // Only valid in assignment targets, never in bindings.
  Member(Node<MemberExpr>),
  Obj(Node<ObjPat>),
  Rest(Node<RestPat>),
}

impl Pat {
  pub fn loc(&self) -> Loc {
    match self {
      Pat::Arr(n) => n.loc,
      Pat::Assign(n) => n.loc,
      Pat::Id(n) => n.loc,
      Pat::Member(n) => n.loc,
      Pat::Obj(n) => n.loc,
      Pat::Rest(n) => n.loc,
    }
  }

  /// Visits every bound identifier in source order.
  pub fn for_each_binding<'p>(&'p self, f: &mut impl FnMut(&'p Node<IdExpr>)) {
    match self {
      Pat::Arr(n) => {
        for e in n.stx.elements.iter().flatten() {
          e.for_each_binding(f);
        }
      }
      Pat::Assign(n) => n.stx.left.for_each_binding(f),
      Pat::Id(n) => f(n),
      Pat::Member(_) => {}
      Pat::Obj(n) => {
        for p in n.stx.properties.iter() {
          match p {
            ObjPatMember::Prop(p) => p.stx.value.for_each_binding(f),
            ObjPatMember::Rest(r) => r.stx.argument.for_each_binding(f),
          }
        }
      }
      Pat::Rest(n) => n.stx.argument.for_each_binding(f),
    }
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrPat {
  pub elements: Vec<Option<Pat>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct AssignPat {
  pub left: Pat,
  pub right: Expr,
}

#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(untagged)]
pub enum ObjPatMember {
  Prop(Node<PatProperty>),
  Rest(Node<RestPat>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjPat {
  pub properties: Vec<ObjPatMember>,
}

/// A property inside an object pattern; serializes as a `Property` of kind `init`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct PatProperty {
  pub key: Expr,
  #[drive(skip)]
  pub computed: bool,
  pub value: Pat,
  #[drive(skip)]
  pub kind: PropKind,
  #[drive(skip)]
  pub method: bool,
  #[drive(skip)]
  pub shorthand: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct RestPat {
  pub argument: Pat,
}

syntax! {
  ArrPat => ArrayPattern,
  AssignPat => AssignmentPattern,
  ObjPat => ObjectPattern,
  PatProperty => Property,
  RestPat => RestElement,
}
