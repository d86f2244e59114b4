use super::lit::LitExpr;
use super::Expr;
use crate::ast::node::syntax;
use crate::ast::node::Node;
use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct JsxIdentifier {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct JsxNamespacedName {
  pub namespace: Node<JsxIdentifier>,
  pub name: Node<JsxIdentifier>,
}

#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(untagged)]
pub enum JsxMemberObject {
  Id(Node<JsxIdentifier>),
  Member(Node<JsxMemberExpr>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct JsxMemberExpr {
  pub object: JsxMemberObject,
  pub property: Node<JsxIdentifier>,
}

#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(untagged)]
pub enum JsxElemName {
  Id(Node<JsxIdentifier>),
  Member(Node<JsxMemberExpr>),
  Namespaced(Node<JsxNamespacedName>),
}

impl JsxElemName {
  /// The name as written, used to match closing tags against opening tags.
  pub fn qualified(&self) -> String {
    match self {
      JsxElemName::Id(id) => id.stx.name.clone(),
      JsxElemName::Member(m) => JsxElemName::qualified_member(m),
      JsxElemName::Namespaced(n) => format!("{}:{}", n.stx.namespace.stx.name, n.stx.name.stx.name),
    }
  }

  fn qualified_member(m: &Node<JsxMemberExpr>) -> String {
    let object = match &m.stx.object {
      JsxMemberObject::Id(id) => id.stx.name.clone(),
      JsxMemberObject::Member(inner) => JsxElemName::qualified_member(inner),
    };
    format!("{}.{}", object, m.stx.property.stx.name)
  }
}

#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(untagged)]
pub enum JsxAttrName {
  Id(Node<JsxIdentifier>),
  Namespaced(Node<JsxNamespacedName>),
}

#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(untagged)]
pub enum JsxAttrValue {
  Container(Node<JsxExprContainer>),
  Elem(Node<JsxElem>),
  Fragment(Node<JsxFragment>),
  Str(Node<LitExpr>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct JsxAttr {
  pub name: JsxAttrName,
  pub value: Option<JsxAttrValue>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct JsxSpreadAttr {
  pub argument: Expr,
}

#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(untagged)]
pub enum JsxAttrItem {
  Attr(Node<JsxAttr>),
  Spread(Node<JsxSpreadAttr>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct JsxEmptyExpr {}

#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(untagged)]
pub enum JsxContainerExpr {
  Empty(Node<JsxEmptyExpr>),
  Expr(Expr),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct JsxExprContainer {
  pub expression: JsxContainerExpr,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct JsxText {
  #[drive(skip)]
  pub value: String,
  #[drive(skip)]
  pub raw: String,
}

#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(untagged)]
pub enum JsxChild {
  Container(Node<JsxExprContainer>),
  Elem(Node<JsxElem>),
  Fragment(Node<JsxFragment>),
  Text(Node<JsxText>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsxOpeningElem {
  pub name: JsxElemName,
  #[drive(skip)]
  pub self_closing: bool,
  pub attributes: Vec<JsxAttrItem>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct JsxClosingElem {
  pub name: JsxElemName,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsxElem {
  pub opening_element: Node<JsxOpeningElem>,
  pub children: Vec<JsxChild>,
  pub closing_element: Option<Node<JsxClosingElem>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct JsxOpeningFragment {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct JsxClosingFragment {}

#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsxFragment {
  pub opening_fragment: Node<JsxOpeningFragment>,
  pub children: Vec<JsxChild>,
  pub closing_fragment: Node<JsxClosingFragment>,
}

syntax! {
  JsxAttr => JSXAttribute,
  JsxClosingElem => JSXClosingElement,
  JsxClosingFragment => JSXClosingFragment,
  JsxElem => JSXElement,
  JsxEmptyExpr => JSXEmptyExpression,
  JsxExprContainer => JSXExpressionContainer,
  JsxFragment => JSXFragment,
  JsxIdentifier => JSXIdentifier,
  JsxMemberExpr => JSXMemberExpression,
  JsxNamespacedName => JSXNamespacedName,
  JsxOpeningElem => JSXOpeningElement,
  JsxOpeningFragment => JSXOpeningFragment,
  JsxSpreadAttr => JSXSpreadAttribute,
  JsxText => JSXText,
}
