use super::Expr;
use crate::ast::node::syntax;
use crate::ast::node::Node;
use crate::num::JsNumber;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// The runtime value of a literal. Regular expressions and BigInts have no JSON representation and serialize as `null`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LitValue {
  Null,
  Bool(bool),
  Num(JsNumber),
  Str(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegexValue {
  pub pattern: String,
  pub flags: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitExpr {
  #[drive(skip)]
  pub value: LitValue,
  #[drive(skip)]
  pub raw: String,
  #[drive(skip)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub regex: Option<RegexValue>,
  // Decimal digits without separators or suffix.
  #[drive(skip)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub bigint: Option<String>,
}

impl LitExpr {
  pub fn string(value: String, raw: String) -> LitExpr {
    LitExpr {
      value: LitValue::Str(value),
      raw,
      regex: None,
      bigint: None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match &self.value {
      LitValue::Str(s) => Some(s),
      _ => None,
    }
  }
}

#[derive(Clone, Debug, Serialize)]
pub struct TemplateValue {
  pub raw: String,
  // None for invalid escapes in tagged templates.
  pub cooked: Option<String>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TemplateElement {
  #[drive(skip)]
  pub value: TemplateValue,
  #[drive(skip)]
  pub tail: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TemplateExpr {
  pub quasis: Vec<Node<TemplateElement>>,
  pub expressions: Vec<Expr>,
}

syntax! {
  LitExpr => Literal,
  TemplateElement => TemplateElement,
  TemplateExpr => TemplateLiteral,
}
