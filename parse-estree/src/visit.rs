use crate::ast::kind::NodeKind;
use crate::ast::node::NodeId;
use crate::comment::CommentHandler;
use crate::loc::Loc;

/// A source position as an offset plus its line (1-based) and column (0-based, in characters).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Marker {
  pub offset: usize,
  pub line: usize,
  pub column: usize,
}

/// Emitted once for every node when it is completed, children before parents.
#[derive(Clone, Debug)]
pub struct NodeEvent {
  pub id: NodeId,
  pub kind: NodeKind,
  pub start: Marker,
  pub end: Marker,
  // Set for a `BlockStatement` or `Program` without statements.
  pub empty: bool,
}

impl NodeEvent {
  pub fn loc(&self) -> Loc {
    Loc(self.start.offset, self.end.offset)
  }
}

pub trait NodeVisitor {
  fn visit_node(&mut self, event: &NodeEvent);
}

impl<F: FnMut(&NodeEvent)> NodeVisitor for F {
  fn visit_node(&mut self, event: &NodeEvent) {
    self(event)
  }
}

/// Delivers node events to the caller's visitor first, then to the comment handler.
pub struct Dispatch<'a> {
  visitor: Option<&'a mut dyn NodeVisitor>,
  comments: Option<CommentHandler>,
}

impl<'a> Dispatch<'a> {
  pub fn new(visitor: Option<&'a mut dyn NodeVisitor>, comments: Option<CommentHandler>) -> Self {
    Dispatch { visitor, comments }
  }

  pub fn into_comment_handler(self) -> Option<CommentHandler> {
    self.comments
  }
}

impl<'a> NodeVisitor for Dispatch<'a> {
  fn visit_node(&mut self, event: &NodeEvent) {
    if let Some(visitor) = self.visitor.as_mut() {
      visitor.visit_node(event);
    };
    if let Some(comments) = self.comments.as_mut() {
      comments.visit_node(event);
    };
  }
}
