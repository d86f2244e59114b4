pub mod jsx;
pub mod lit;
pub mod pat;

use super::class_or_object::ClassBody;
use super::class_or_object::ObjMember;
use super::func::FuncExpr;
use super::node::syntax;
use super::node::Node;
use super::stmt::BlockStmt;
use crate::operator::OperatorName;
use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use jsx::JsxElem;
use jsx::JsxFragment;
use lit::LitExpr;
use lit::TemplateExpr;
use pat::Pat;
use serde::Serialize;

// We must wrap each variant with Node<T> as otherwise we won't be able to visit Node<T> instead of just T.
#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(untagged)]
pub enum Expr {
  Arr(Node<ArrExpr>),
  ArrowFunc(Node<ArrowFuncExpr>),
  Assign(Node<AssignExpr>),
  Await(Node<AwaitExpr>),
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  Class(Node<ClassExpr>),
  Cond(Node<CondExpr>),
  Func(Node<FuncExpr>),
  Id(Node<IdExpr>),
  Import(Node<ImportExpr>),
  Lit(Node<LitExpr>),
  Logical(Node<LogicalExpr>),
  Member(Node<MemberExpr>),
  MetaProperty(Node<MetaPropertyExpr>),
  New(Node<NewExpr>),
  Obj(Node<ObjExpr>),
  Seq(Node<SeqExpr>),
  Super(Node<SuperExpr>),
  TaggedTemplate(Node<TaggedTemplateExpr>),
  Template(Node<TemplateExpr>),
  This(Node<ThisExpr>),
  Unary(Node<UnaryExpr>),
  Update(Node<UpdateExpr>),
  Yield(Node<YieldExpr>),

  // JSX.
  JsxElem(Node<JsxElem>),
  JsxFragment(Node<JsxFragment>),
}

impl Expr {
  pub fn loc(&self) -> crate::loc::Loc {
    match self {
      Expr::Arr(n) => n.loc,
      Expr::ArrowFunc(n) => n.loc,
      Expr::Assign(n) => n.loc,
      Expr::Await(n) => n.loc,
      Expr::Binary(n) => n.loc,
      Expr::Call(n) => n.loc,
      Expr::Class(n) => n.loc,
      Expr::Cond(n) => n.loc,
      Expr::Func(n) => n.loc,
      Expr::Id(n) => n.loc,
      Expr::Import(n) => n.loc,
      Expr::Lit(n) => n.loc,
      Expr::Logical(n) => n.loc,
      Expr::Member(n) => n.loc,
      Expr::MetaProperty(n) => n.loc,
      Expr::New(n) => n.loc,
      Expr::Obj(n) => n.loc,
      Expr::Seq(n) => n.loc,
      Expr::Super(n) => n.loc,
      Expr::TaggedTemplate(n) => n.loc,
      Expr::Template(n) => n.loc,
      Expr::This(n) => n.loc,
      Expr::Unary(n) => n.loc,
      Expr::Update(n) => n.loc,
      Expr::Yield(n) => n.loc,
      Expr::JsxElem(n) => n.loc,
      Expr::JsxFragment(n) => n.loc,
    }
  }
}

/// An array element or call argument.
#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(untagged)]
pub enum ExprOrSpread {
  Expr(Expr),
  Spread(Node<SpreadElement>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrExpr {
  pub elements: Vec<Option<ExprOrSpread>>,
}

#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(untagged)]
pub enum ArrowFuncBody {
  Block(Node<BlockStmt>),
  Expr(Expr),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrowFuncExpr {
  // Always null.
  #[drive(skip)]
  pub id: Option<()>,
  pub params: Vec<Pat>,
  pub body: ArrowFuncBody,
  #[drive(skip)]
  pub generator: bool,
  #[drive(skip)]
  pub expression: bool,
  #[drive(skip)]
  #[serde(rename = "async")]
  pub async_: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct AssignExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub left: Pat,
  pub right: Expr,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct AwaitExpr {
  pub argument: Expr,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BinaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub left: Expr,
  pub right: Expr,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CallExpr {
  pub callee: Expr,
  pub arguments: Vec<ExprOrSpread>,
  #[drive(skip)]
  pub optional: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassExpr {
  pub id: Option<Node<IdExpr>>,
  pub super_class: Option<Expr>,
  pub body: Node<ClassBody>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CondExpr {
  pub test: Expr,
  pub consequent: Expr,
  pub alternate: Expr,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdExpr {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportExpr {
  pub source: Expr,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LogicalExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub left: Expr,
  pub right: Expr,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct MemberExpr {
  #[drive(skip)]
  pub computed: bool,
  pub object: Expr,
  pub property: Expr,
  #[drive(skip)]
  pub optional: bool,
}

/// `new.target` or `import.meta`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct MetaPropertyExpr {
  pub meta: Node<IdExpr>,
  pub property: Node<IdExpr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct NewExpr {
  pub callee: Expr,
  pub arguments: Vec<ExprOrSpread>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjExpr {
  pub properties: Vec<ObjMember>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct SeqExpr {
  pub expressions: Vec<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct SpreadElement {
  pub argument: Expr,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct SuperExpr {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TaggedTemplateExpr {
  pub tag: Expr,
  pub quasi: Node<TemplateExpr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ThisExpr {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct UnaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub argument: Expr,
  // Always true.
  #[drive(skip)]
  pub prefix: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct UpdateExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub argument: Expr,
  #[drive(skip)]
  pub prefix: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct YieldExpr {
  pub argument: Option<Expr>,
  #[drive(skip)]
  pub delegate: bool,
}

syntax! {
  ArrExpr => ArrayExpression,
  ArrowFuncExpr => ArrowFunctionExpression,
  AssignExpr => AssignmentExpression,
  AwaitExpr => AwaitExpression,
  BinaryExpr => BinaryExpression,
  CallExpr => CallExpression,
  ClassExpr => ClassExpression,
  CondExpr => ConditionalExpression,
  IdExpr => Identifier,
  ImportExpr => ImportExpression,
  LogicalExpr => LogicalExpression,
  MemberExpr => MemberExpression,
  MetaPropertyExpr => MetaProperty,
  NewExpr => NewExpression,
  ObjExpr => ObjectExpression,
  SeqExpr => SequenceExpression,
  SpreadElement => SpreadElement,
  SuperExpr => Super,
  TaggedTemplateExpr => TaggedTemplateExpression,
  ThisExpr => ThisExpression,
  UnaryExpr => UnaryExpression,
  UpdateExpr => UpdateExpression,
  YieldExpr => YieldExpression,
}
