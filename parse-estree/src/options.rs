use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
  #[default]
  Script,
  Module,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
  /// Collect comments into `Program.comments`.
  pub comment: bool,
  /// Attach comments to nodes as `leadingComments`, `trailingComments` and `innerComments`.
  pub attach_comment: bool,
  /// Collect tokens into `Program.tokens`.
  pub tokens: bool,
  /// Record errors in `Program.errors` and keep going instead of failing on the first one.
  pub tolerant: bool,
  pub source_type: SourceType,
  pub jsx: bool,
  /// Add `range` (byte offsets) to nodes, comments and tokens.
  pub range: bool,
  /// Add `loc` (line and column) to nodes, comments and tokens.
  pub loc: bool,
}

impl ParseOptions {
  pub fn module() -> ParseOptions {
    ParseOptions {
      source_type: SourceType::Module,
      ..ParseOptions::default()
    }
  }

  pub fn is_module(&self) -> bool {
    self.source_type == SourceType::Module
  }

  /// Comments are scanned for when collected or attached.
  pub fn wants_comments(&self) -> bool {
    self.comment || self.attach_comment
  }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenizeOptions {
  /// Include `Line` and `Block` comment entries in the token list.
  pub comment: bool,
  pub range: bool,
  pub loc: bool,
  pub tolerant: bool,
}

/// What the classifier does with a token that is neither an identifier nor a string or template piece.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NonLiteralPolicy {
  #[default]
  Skip,
  Halt,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassifyOptions {
  pub policy: NonLiteralPolicy,
  /// Strip one leading `.` or `#` from each plain word.
  pub strip_selector_prefix: bool,
}

#[cfg(test)]
mod tests {
  use super::ClassifyOptions;
  use super::NonLiteralPolicy;
  use super::ParseOptions;
  use super::SourceType;

  #[test]
  fn test_parse_options_from_json() {
    let opts: ParseOptions =
      serde_json::from_str(r#"{"jsx":true,"attachComment":true,"sourceType":"module"}"#).unwrap();
    assert!(opts.jsx);
    assert!(opts.attach_comment);
    assert!(opts.wants_comments());
    assert_eq!(opts.source_type, SourceType::Module);
    assert!(!opts.tolerant);
  }

  #[test]
  fn test_classify_options_default() {
    let opts: ClassifyOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(opts.policy, NonLiteralPolicy::Skip);
    assert!(!opts.strip_selector_prefix);
  }
}
