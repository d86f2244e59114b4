use ahash::HashSet;
use ahash::HashSetExt;
use core::ops::RangeInclusive;
use once_cell::sync::Lazy;
use unicode_xid::UnicodeXID;

#[derive(Clone)]
pub struct CharFilter {
  chars: HashSet<char>,
}

impl CharFilter {
  pub fn new() -> CharFilter {
    CharFilter {
      chars: HashSet::new(),
    }
  }

  pub fn add_chars(&mut self, chars: RangeInclusive<char>) {
    for c in chars {
      self.chars.insert(c);
    }
  }

  pub fn add_chars_from_slice(&mut self, chars: &str) {
    for c in chars.chars() {
      self.chars.insert(c);
    }
  }

  pub fn has(&self, c: char) -> bool {
    self.chars.contains(&c)
  }
}

pub const ECMASCRIPT_LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

pub const ECMASCRIPT_WHITESPACE: [char; 21] = [
  '\x09',
  '\x0b',
  '\x0c',
  '\x20',
  '\u{00A0}',
  '\u{1680}',
  '\u{2000}',
  '\u{2001}',
  '\u{2002}',
  '\u{2003}',
  '\u{2004}',
  '\u{2005}',
  '\u{2006}',
  '\u{2007}',
  '\u{2008}',
  '\u{2009}',
  '\u{200A}',
  '\u{202F}',
  '\u{205F}',
  '\u{3000}',
  '\u{FEFF}',
];

#[inline]
pub fn is_line_terminator(c: char) -> bool {
  ECMASCRIPT_LINE_TERMINATORS.contains(&c)
}

// ASCII characters that can start an identifier; the lexer builds its keyword-prefix patterns from these.
pub const ID_START_CHARSTR: &str = "$ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";
pub const ID_CONTINUE_CHARSTR: &str =
  "$0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

pub fn is_id_start(c: char) -> bool {
  if c.is_ascii() {
    ID_START.has(c)
  } else {
    UnicodeXID::is_xid_start(c)
  }
}

pub fn is_id_continue(c: char) -> bool {
  if c.is_ascii() {
    ID_CONTINUE.has(c)
  } else {
    // ZWNJ and ZWJ are allowed in identifier parts.
    UnicodeXID::is_xid_continue(c) || c == '\u{200C}' || c == '\u{200D}'
  }
}

pub fn is_jsx_id_continue(c: char) -> bool {
  c == '-' || is_id_continue(c)
}

pub static DIGIT: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars('0'..='9');
  filter
});

pub static DIGIT_BIN: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars('0'..='1');
  filter
});

pub static DIGIT_HEX: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars('0'..='9');
  filter.add_chars('a'..='f');
  filter.add_chars('A'..='F');
  filter
});

pub static DIGIT_OCT: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars('0'..='7');
  filter
});

pub static ID_START: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars_from_slice(ID_START_CHARSTR);
  filter
});

pub static ID_CONTINUE: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars_from_slice(ID_CONTINUE_CHARSTR);
  filter
});

#[cfg(test)]
mod tests {
  use super::is_id_continue;
  use super::is_id_start;
  use super::is_jsx_id_continue;

  #[test]
  fn test_identifier_chars() {
    assert!(is_id_start('$'));
    assert!(is_id_start('ä'));
    assert!(is_id_start('中'));
    assert!(!is_id_start('1'));
    assert!(is_id_continue('1'));
    assert!(is_id_continue('\u{200D}'));
    assert!(!is_id_continue('-'));
    assert!(is_jsx_id_continue('-'));
  }
}
