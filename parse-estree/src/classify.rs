use crate::options::ClassifyOptions;
use crate::options::NonLiteralPolicy;
use crate::tokenize::TokenEntry;
use crate::tokenize::TokenKind;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

#[rustfmt::skip]
const HTML_TAGS: &[&str] = &[
  "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
  "blockquote", "body", "br", "button", "canvas", "caption", "cite", "code", "col", "colgroup",
  "data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt", "em", "embed",
  "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "head",
  "header", "hgroup", "hr", "html", "i", "iframe", "img", "input", "ins", "kbd", "label", "legend",
  "li", "link", "main", "map", "mark", "menu", "meta", "meter", "nav", "noscript", "object", "ol",
  "optgroup", "option", "output", "p", "param", "picture", "pre", "progress", "q", "rp", "rt",
  "ruby", "s", "samp", "script", "section", "select", "slot", "small", "source", "span", "strong",
  "style", "sub", "summary", "sup", "svg", "table", "tbody", "td", "template", "textarea", "tfoot",
  "th", "thead", "time", "title", "tr", "track", "u", "ul", "var", "video", "wbr",
];

// An opening, closing or self-closing tag of a known element, in any letter case.
static HTML_TAG: Lazy<Regex> = Lazy::new(|| {
  let pattern = format!(r"(?i)</?(?:{})(?:\s[^<>]*)?/?>", HTML_TAGS.join("|"));
  Regex::new(&pattern).expect("markup tag pattern is valid")
});

const QUOTES: [char; 3] = ['"', '\'', '`'];

/// Literal text split into plain words and markup fragments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClassifiedTokens {
  pub tokens: Vec<String>,
  #[serde(rename = "htmlTokens")]
  pub html_tokens: Vec<String>,
}

/// Whether the text contains something that looks like an HTML tag.
pub fn is_markup(text: &str) -> bool {
  HTML_TAG.is_match(text)
}

/// The text inside a literal token's delimiters. Each delimiter is removed only if present.
fn unwrap_literal(entry: &TokenEntry) -> &str {
  let value = entry.value.as_str();
  match entry.kind {
    TokenKind::String => {
      let inner = value.strip_prefix(QUOTES).unwrap_or(value);
      inner.strip_suffix(QUOTES).unwrap_or(inner)
    }
    TokenKind::Template => {
      let inner = value
        .strip_prefix('`')
        .or_else(|| value.strip_prefix('}'))
        .unwrap_or(value);
      inner
        .strip_suffix('`')
        .or_else(|| inner.strip_suffix("${"))
        .unwrap_or(inner)
    }
    _ => value,
  }
}

fn clean_word<'t>(word: &'t str, options: &ClassifyOptions) -> &'t str {
  let word = word.strip_prefix(QUOTES).unwrap_or(word);
  let word = word.strip_suffix(QUOTES).unwrap_or(word);
  if options.strip_selector_prefix {
    if let Some(rest) = word.strip_prefix(['.', '#']) {
      return rest;
    };
  };
  word
}

/// Classifies the literal content of a token list.
///
/// String and template pieces that contain a tag go into `html_tokens` whole, without their delimiters. Other literals are split on spaces into words. Any other token is offered to `transform`, whose result is kept as a word, unless the policy halts at it.
pub fn classify(
  tokens: &[TokenEntry],
  options: &ClassifyOptions,
  mut transform: Option<&mut dyn FnMut(&TokenEntry) -> Option<String>>,
) -> ClassifiedTokens {
  let mut out = ClassifiedTokens::default();
  for entry in tokens {
    match entry.kind {
      TokenKind::String | TokenKind::Template => {
        let text = unwrap_literal(entry);
        if is_markup(text) {
          out.html_tokens.push(text.to_string());
          continue;
        };
        out.tokens.extend(
          text
            .split(' ')
            .filter(|w| !w.is_empty())
            .map(|w| clean_word(w, options))
            .filter(|w| !w.is_empty())
            .map(str::to_string),
        );
      }
      // Comments are not code and never stop the scan.
      kind if kind.is_comment() => {}
      kind => {
        if kind != TokenKind::Identifier && options.policy == NonLiteralPolicy::Halt {
          tracing::debug!(offset = entry.start, "classification halted at non-literal token");
          break;
        };
        if let Some(f) = transform.as_mut() {
          if let Some(word) = f(entry) {
            out.tokens.push(word);
          };
        };
      }
    };
  }
  out
}

#[cfg(test)]
mod tests {
  use super::classify;
  use super::is_markup;
  use super::ClassifiedTokens;
  use crate::options::ClassifyOptions;
  use crate::options::NonLiteralPolicy;
  use crate::options::TokenizeOptions;
  use crate::tokenize::tokenize_source;
  use crate::tokenize::TokenEntry;

  fn run(source: &str, options: &ClassifyOptions) -> ClassifiedTokens {
    let tokens = tokenize_source(source, &TokenizeOptions::default(), None).unwrap();
    classify(&tokens.tokens, options, None)
  }

  #[test]
  fn test_markup_detection() {
    assert!(is_markup("<div>hi</div>"));
    assert!(is_markup("<DIV class=\"a\">"));
    assert!(is_markup("x <br/> y"));
    assert!(!is_markup("not html"));
    assert!(!is_markup("a < b > c"));
    assert!(!is_markup("<notatag>"));
  }

  #[test]
  fn test_words_from_string() {
    let out = run("const x = 'foo bar'", &ClassifyOptions::default());
    assert_eq!(out.tokens, vec!["foo", "bar"]);
    assert!(out.html_tokens.is_empty());
  }

  #[test]
  fn test_markup_string_kept_whole() {
    let out = run("const x = '<div>hi</div>'", &ClassifyOptions::default());
    assert!(out.tokens.is_empty());
    assert_eq!(out.html_tokens, vec!["<div>hi</div>"]);
  }

  #[test]
  fn test_template_pieces_and_quotes() {
    let out = run("`a  \"b\" ${x} c`", &ClassifyOptions::default());
    assert_eq!(out.tokens, vec!["a", "b", "c"]);
  }

  #[test]
  fn test_selector_prefix() {
    let options = ClassifyOptions {
      strip_selector_prefix: true,
      ..ClassifyOptions::default()
    };
    let out = run("q('.btn #main')", &options);
    assert_eq!(out.tokens, vec!["btn", "main"]);
  }

  #[test]
  fn test_halt_policy_stops_at_punctuator() {
    let options = ClassifyOptions {
      policy: NonLiteralPolicy::Halt,
      ..ClassifyOptions::default()
    };
    let out = run("'a' + 'b'", &options);
    assert_eq!(out.tokens, vec!["a"]);
    let out = run("'a' + 'b'", &ClassifyOptions::default());
    assert_eq!(out.tokens, vec!["a", "b"]);
  }

  #[test]
  fn test_transform_receives_identifiers() {
    let tokens = tokenize_source("foo('bar')", &TokenizeOptions::default(), None).unwrap();
    let mut ids = |t: &TokenEntry| (t.value == "foo").then(|| t.value.to_uppercase());
    let out = classify(&tokens.tokens, &ClassifyOptions::default(), Some(&mut ids));
    assert_eq!(out.tokens, vec!["FOO", "bar"]);
  }
}
