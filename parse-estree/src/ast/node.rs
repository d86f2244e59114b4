use super::kind::NodeKind;
use crate::comment::Comment;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use crate::loc::SourceLocation;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;
use serde::Serializer;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;

/// Identifies a node within one parse. Ids are allocated in completion order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

/// Per-node data filled in after parsing: positions when requested, and attached comments.
#[derive(Default, Drive, DriveMut, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMeta {
  #[drive(skip)]
  #[serde(skip)]
  pub id: NodeId,
  #[drive(skip)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub range: Option<[usize; 2]>,
  #[drive(skip)]
  #[serde(rename = "loc", skip_serializing_if = "Option::is_none")]
  pub position: Option<SourceLocation>,
  #[drive(skip)]
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub leading_comments: Vec<Comment>,
  #[drive(skip)]
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub trailing_comments: Vec<Comment>,
  #[drive(skip)]
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub inner_comments: Vec<Comment>,
}

/// Implemented by every node payload.
pub trait Syntax: Drive + DriveMut {
  const KIND: NodeKind;

  /// Whether this is a block-like node with nothing in it; such nodes receive inner comments.
  fn is_empty_body(&self) -> bool {
    false
  }
}

#[derive(Drive, DriveMut)]
pub struct Node<S: Drive + DriveMut> {
  // Source range in UTF-8 bytes. Parenthesized expressions do not include their parentheses.
  #[drive(skip)]
  pub loc: Loc,
  pub stx: Box<S>,
  pub meta: NodeMeta,
}

impl<S: Drive + DriveMut> Node<S> {
  pub fn new(loc: Loc, id: NodeId, stx: S) -> Node<S> {
    Node {
      loc,
      stx: Box::new(stx),
      meta: NodeMeta {
        id,
        ..NodeMeta::default()
      },
    }
  }

  pub fn id(&self) -> NodeId {
    self.meta.id
  }

  /// Maps the syntax, keeping the location and metadata. Used when a cover grammar is reinterpreted.
  pub fn map_stx<T: Drive + DriveMut, F: FnOnce(S) -> T>(self, f: F) -> Node<T> {
    Node {
      loc: self.loc,
      stx: Box::new(f(*self.stx)),
      meta: self.meta,
    }
  }

  pub fn try_map_stx<T: Drive + DriveMut, E, F: FnOnce(S) -> Result<T, E>>(
    self,
    f: F,
  ) -> Result<Node<T>, E> {
    Ok(Node {
      loc: self.loc,
      stx: Box::new(f(*self.stx)?),
      meta: self.meta,
    })
  }

  /// Create an error at this node's location.
  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    self.loc.error(typ, None)
  }
}

impl<S: Debug + Drive + DriveMut> Debug for Node<S> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.stx.fmt(f)
  }
}

#[derive(Serialize)]
struct NodeRepr<'a, S> {
  #[serde(rename = "type")]
  typ: NodeKind,
  #[serde(flatten)]
  stx: &'a S,
  #[serde(flatten)]
  meta: &'a NodeMeta,
}

impl<S: Syntax + Serialize> Serialize for Node<S> {
  fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
    NodeRepr {
      typ: S::KIND,
      stx: self.stx.as_ref(),
      meta: &self.meta,
    }
    .serialize(serializer)
  }
}

/// Implements `Syntax` for payload types.
macro_rules! syntax {
  ($($typ:ty => $kind:ident),* $(,)?) => {
    $(
      impl $crate::ast::node::Syntax for $typ {
        const KIND: $crate::ast::kind::NodeKind = $crate::ast::kind::NodeKind::$kind;
      }
    )*
  };
}

pub(crate) use syntax;
