use super::Parser;
use crate::ast::node::Node;
use crate::ast::node::Syntax;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn with_loc<S: Syntax, F>(&mut self, f: F) -> SyntaxResult<Node<S>>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<S>,
  {
    let start = self.start();
    let stx = f(self)?;
    Ok(self.node(start, stx))
  }

  /// Parse a list of items separated by a delimiter until `close`, which will also be consumed.
  /// Allows for a trailing delimiter.
  pub fn list<S, F>(&mut self, delim: TT, close: TT, f: F) -> SyntaxResult<Vec<S>>
  where
    F: Fn(&mut Self) -> SyntaxResult<S>,
  {
    let mut items = Vec::new();
    while !self.consume_if(close).is_match() {
      items.push(f(self)?);
      // We require either the delimiter or the close token.
      // If the delimiter exists, it can still immediately be followed by the close token (trailing delimiter).
      // If the delimiter does not exist, the close token must be present. This handles the case where the close token is present.
      if !self.consume_if(delim).is_match() {
        self.require(close)?;
        break;
      }
    }
    Ok(items)
  }
}
