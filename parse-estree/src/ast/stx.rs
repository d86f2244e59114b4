use super::kind::NodeKind;
use super::node::Syntax;
use super::stmt::Stmt;
use crate::comment::Comment;
use crate::error::ParseError;
use crate::options::SourceType;
use crate::tokenize::TokenEntry;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
  pub body: Vec<Stmt>,
  #[drive(skip)]
  pub source_type: SourceType,
  #[drive(skip)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub comments: Option<Vec<Comment>>,
  #[drive(skip)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tokens: Option<Vec<TokenEntry>>,
  #[drive(skip)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub errors: Option<Vec<ParseError>>,
}

impl Syntax for Program {
  const KIND: NodeKind = NodeKind::Program;

  fn is_empty_body(&self) -> bool {
    self.body.is_empty()
  }
}
