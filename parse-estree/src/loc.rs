use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use serde::Serialize;
use std::cmp::max;
use std::cmp::min;
use std::ops::Add;
use std::ops::AddAssign;

/// A location within the source expressed as half-open UTF-8 byte offsets.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn at(offset: usize) -> Loc {
    Loc(offset, offset)
  }

  pub fn len(&self) -> usize {
    self.1 - self.0
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }

  pub fn range(&self) -> [usize; 2] {
    [self.0, self.1]
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Self) -> Self::Output {
    let mut new = self;
    new.extend(rhs);
    new
  }
}

impl AddAssign for Loc {
  fn add_assign(&mut self, rhs: Self) {
    self.extend(rhs);
  }
}

/// A line and column pair. Lines start at 1, columns count characters from 0.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Serialize)]
pub struct Position {
  pub line: usize,
  pub column: usize,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Serialize)]
pub struct SourceLocation {
  pub start: Position,
  pub end: Position,
}

/// Maps byte offsets to line/column positions.
///
/// Recognises `\n`, `\r`, `\r\n`, U+2028 and U+2029 as line terminators.
pub struct LineIndex<'a> {
  source: &'a str,
  line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
  pub fn new(source: &'a str) -> LineIndex<'a> {
    let mut line_starts = vec![0];
    let mut chars = source.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
      match c {
        '\r' => {
          if chars.peek().is_some_and(|(_, n)| *n == '\n') {
            chars.next();
            line_starts.push(i + 2);
          } else {
            line_starts.push(i + 1);
          }
        }
        '\n' | '\u{2028}' | '\u{2029}' => line_starts.push(i + c.len_utf8()),
        _ => {}
      };
    }
    LineIndex {
      source,
      line_starts,
    }
  }

  pub fn source(&self) -> &'a str {
    self.source
  }

  pub fn line_count(&self) -> usize {
    self.line_starts.len()
  }

  /// Offsets past the end of the source are clamped; offsets inside a multibyte character count the whole character.
  pub fn position(&self, offset: usize) -> Position {
    let offset = min(offset, self.source.len());
    let line_idx = match self.line_starts.binary_search(&offset) {
      Ok(i) => i,
      Err(i) => i.saturating_sub(1),
    };
    let line_start = self.line_starts[line_idx];
    let column = self
      .source
      .get(line_start..offset)
      .map(|s| s.chars().count())
      .unwrap_or(offset - line_start);
    Position {
      line: line_idx + 1,
      column,
    }
  }

  pub fn location(&self, loc: Loc) -> SourceLocation {
    SourceLocation {
      start: self.position(loc.0),
      end: self.position(loc.1),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::LineIndex;
  use super::Loc;
  use super::Position;

  #[test]
  fn test_loc_add() {
    assert_eq!(Loc(3, 5) + Loc(1, 4), Loc(1, 5));
    let mut loc = Loc(10, 12);
    loc += Loc(11, 20);
    assert_eq!(loc, Loc(10, 20));
  }

  #[test]
  fn test_line_index_terminators() {
    let idx = LineIndex::new("a\nb\r\nc\rd\u{2028}e");
    assert_eq!(idx.line_count(), 5);
    assert_eq!(idx.position(0), Position { line: 1, column: 0 });
    assert_eq!(idx.position(2), Position { line: 2, column: 0 });
    assert_eq!(idx.position(5), Position { line: 3, column: 0 });
    assert_eq!(idx.position(7), Position { line: 4, column: 0 });
    assert_eq!(idx.position(11), Position { line: 5, column: 0 });
  }

  #[test]
  fn test_line_index_counts_chars() {
    let idx = LineIndex::new("é = 1");
    // `é` is two bytes.
    assert_eq!(idx.position(3), Position { line: 1, column: 2 });
    assert_eq!(idx.position(100), Position { line: 1, column: 5 });
  }
}
