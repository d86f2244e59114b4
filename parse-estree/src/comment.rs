use crate::ast::kind::NodeKind;
use crate::ast::node::NodeId;
use crate::ast::node::NodeMeta;
use crate::lex::CommentKind;
use crate::lex::RawComment;
use crate::loc::LineIndex;
use crate::loc::Loc;
use crate::loc::SourceLocation;
use crate::visit::NodeEvent;
use crate::visit::NodeVisitor;
use ahash::HashMap;
use ahash::HashMapExt;
use derive_visitor::VisitorMut;
use serde::Serialize;
use std::mem::take;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Comment {
  #[serde(rename = "type")]
  pub kind: CommentKind,
  pub value: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub range: Option<[usize; 2]>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub loc: Option<SourceLocation>,
}

impl Comment {
  pub fn from_raw(raw: &RawComment, lines: &LineIndex, range: bool, loc: bool) -> Comment {
    Comment {
      kind: raw.kind,
      value: lines.source()[raw.value.0..raw.value.1].to_string(),
      range: range.then(|| raw.loc.range()),
      loc: loc.then(|| lines.location(raw.loc)),
    }
  }
}

/// Comment indices attached to one node.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Attached {
  pub leading: Vec<usize>,
  pub trailing: Vec<usize>,
  pub inner: Vec<usize>,
}

impl Attached {
  fn is_empty(&self) -> bool {
    self.leading.is_empty() && self.trailing.is_empty() && self.inner.is_empty()
  }
}

struct CompletedNode {
  id: NodeId,
  kind: NodeKind,
  loc: Loc,
  empty: bool,
}

/// Records node completions during parsing, then decides which comments each node receives.
///
/// A comment becomes visible to a completion once the scanner has passed the whitespace run it belongs to, i.e. when that run starts at or before the node's end. Visible comments are candidates for both leading and trailing attachment until claimed.
#[derive(Default)]
pub struct CommentHandler {
  nodes: Vec<CompletedNode>,
}

impl NodeVisitor for CommentHandler {
  fn visit_node(&mut self, event: &NodeEvent) {
    self.nodes.push(CompletedNode {
      id: event.id,
      kind: event.kind,
      loc: event.loc(),
      empty: event.empty,
    });
  }
}

impl CommentHandler {
  pub fn new() -> CommentHandler {
    CommentHandler::default()
  }

  pub fn attach(&self, comments: &[RawComment]) -> HashMap<NodeId, Attached> {
    let start = |c: usize| comments[c].loc.0;
    let end = |c: usize| comments[c].loc.1;

    let mut attached = HashMap::<NodeId, Attached>::new();
    let mut leading = Vec::<usize>::new();
    let mut trailing = Vec::<usize>::new();
    // Completed nodes as (id, start), ordered by completion.
    let mut stack = Vec::<(NodeId, usize)>::new();
    let mut next_comment = 0;

    for node in self.nodes.iter() {
      while next_comment < comments.len() && comments[next_comment].trivia_start <= node.loc.1 {
        leading.push(next_comment);
        trailing.push(next_comment);
        next_comment += 1;
      }

      if node.kind == NodeKind::Program && !node.empty {
        continue;
      };

      let mut found = Attached::default();

      if node.kind == NodeKind::BlockStatement && node.empty {
        leading.retain(|&c| {
          if node.loc.1 >= start(c) {
            found.inner.push(c);
            false
          } else {
            true
          }
        });
        trailing.retain(|c| !found.inner.contains(c));
      };

      if !trailing.is_empty() {
        found.trailing = trailing
          .iter()
          .copied()
          .filter(|&c| start(c) >= node.loc.1)
          .collect();
        trailing.clear();
      } else if let Some(&(last, _)) = stack.last() {
        // Take over what the previous sibling claimed if it actually follows this node.
        if let Some(prev) = attached.get_mut(&last) {
          if prev.trailing.first().is_some_and(|&c| start(c) >= node.loc.1) {
            found.trailing = take(&mut prev.trailing);
          };
        };
      };

      let mut target = None;
      while let Some(&(id, node_start)) = stack.last() {
        if node_start < node.loc.0 {
          break;
        };
        target = Some(id);
        stack.pop();
      }
      match target {
        Some(target) => {
          if let Some(t) = attached.get_mut(&target) {
            let (taken, kept): (Vec<usize>, Vec<usize>) =
              t.leading.iter().partition(|&&c| end(c) <= node.loc.0);
            t.leading = kept;
            found.leading = taken;
          };
        }
        None => {
          leading.retain(|&c| {
            if start(c) <= node.loc.0 {
              found.leading.push(c);
              false
            } else {
              true
            }
          });
        }
      };

      if !found.is_empty() {
        attached.insert(node.id, found);
      };
      stack.push((node.id, node.loc.0));
    }

    attached.retain(|_, a| !a.is_empty());
    attached
  }
}

/// Writes resolved comment attachments onto nodes.
#[derive(VisitorMut)]
#[visitor(NodeMeta(enter))]
pub struct CommentWriter<'c> {
  comments: &'c [Comment],
  attached: HashMap<NodeId, Attached>,
}

impl<'c> CommentWriter<'c> {
  pub fn new(comments: &'c [Comment], attached: HashMap<NodeId, Attached>) -> Self {
    CommentWriter { comments, attached }
  }

  fn enter_node_meta(&mut self, meta: &mut NodeMeta) {
    let Some(a) = self.attached.remove(&meta.id) else {
      return;
    };
    let pick = |ids: &[usize]| ids.iter().map(|&i| self.comments[i].clone()).collect();
    meta.leading_comments = pick(&a.leading);
    meta.trailing_comments = pick(&a.trailing);
    meta.inner_comments = pick(&a.inner);
  }
}

#[cfg(test)]
mod tests {
  use super::CommentHandler;
  use crate::ast::kind::NodeKind;
  use crate::ast::node::NodeId;
  use crate::lex::CommentKind;
  use crate::lex::RawComment;
  use crate::loc::Loc;
  use crate::visit::Marker;
  use crate::visit::NodeEvent;
  use crate::visit::NodeVisitor;

  fn event(id: u32, kind: NodeKind, loc: Loc, empty: bool) -> NodeEvent {
    let marker = |offset| Marker {
      offset,
      line: 1,
      column: offset,
    };
    NodeEvent {
      id: NodeId(id),
      kind,
      start: marker(loc.0),
      end: marker(loc.1),
      empty,
    }
  }

  fn comment(kind: CommentKind, loc: Loc, trivia_start: usize) -> RawComment {
    RawComment {
      kind,
      loc,
      value: Loc(loc.0 + 2, loc.1),
      trivia_start,
    }
  }

  #[test]
  fn test_leading_and_trailing() {
    // `/* a */ x; // b`
    let comments = vec![
      comment(CommentKind::Block, Loc(0, 7), 0),
      comment(CommentKind::Line, Loc(11, 15), 10),
    ];
    let mut handler = CommentHandler::new();
    handler.visit_node(&event(0, NodeKind::Identifier, Loc(8, 9), false));
    handler.visit_node(&event(1, NodeKind::ExpressionStatement, Loc(8, 10), false));
    handler.visit_node(&event(2, NodeKind::Program, Loc(0, 15), false));
    let attached = handler.attach(&comments);
    assert!(!attached.contains_key(&NodeId(0)));
    assert!(!attached.contains_key(&NodeId(2)));
    let stmt = &attached[&NodeId(1)];
    assert_eq!(stmt.leading, vec![0]);
    assert_eq!(stmt.trailing, vec![1]);
  }

  #[test]
  fn test_inner_comments_on_empty_block() {
    // `{ /* x */ }`
    let comments = vec![comment(CommentKind::Block, Loc(2, 9), 1)];
    let mut handler = CommentHandler::new();
    handler.visit_node(&event(0, NodeKind::BlockStatement, Loc(0, 11), true));
    let attached = handler.attach(&comments);
    assert_eq!(attached[&NodeId(0)].inner, vec![0]);
    assert!(attached[&NodeId(0)].leading.is_empty());
    assert!(attached[&NodeId(0)].trailing.is_empty());
  }
}
