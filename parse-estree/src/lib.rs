use ast::node::Node;
use ast::stx::Program;
use classify::ClassifiedTokens;
use comment::Comment;
use comment::CommentHandler;
use comment::CommentWriter;
use derive_visitor::DriveMut;
use error::ParseError;
use lex::Lexer;
use options::ClassifyOptions;
use options::ParseOptions;
use options::SourceType;
use options::TokenizeOptions;
use parse::Parser;
use parse::ParserConfig;
use tokenize::TokenEntry;
use tokenize::Tokens;
use visit::Dispatch;
use visit::NodeVisitor;

pub mod ast;
pub mod char;
pub mod classify;
pub mod comment;
pub mod error;
pub mod lex;
pub mod loc;
pub mod num;
pub mod operator;
pub mod options;
pub mod parse;
pub mod token;
pub mod tokenize;
pub mod visit;

/// Parses `source` into a `Program`.
///
/// `visitor` is told about every node as it is completed, before comments are attached. In tolerant mode, recoverable errors end up in `Program.errors` instead of failing the call.
pub fn parse<'a>(
  source: &'a str,
  options: &ParseOptions,
  visitor: Option<&'a mut dyn NodeVisitor>,
) -> Result<Node<Program>, ParseError> {
  let span = tracing::debug_span!(
    "parse",
    len = source.len(),
    module = options.is_module(),
    jsx = options.jsx,
    tolerant = options.tolerant
  );
  let _guard = span.enter();

  let mut lexer = Lexer::new(source);
  lexer.set_html_comments(!options.is_module());
  let comments = options.attach_comment.then(CommentHandler::new);
  let config = ParserConfig {
    jsx: options.jsx,
    module: options.is_module(),
    range: options.range,
    loc: options.loc,
  };
  let mut parser = Parser::new(lexer, config, options.tolerant, Dispatch::new(visitor, comments));
  let result = parser.parse_top_level();
  let out = parser.finish();
  let mut program = match result {
    Ok(program) => program,
    Err(err) => {
      let err = err.to_parse_error(&out.lines);
      tracing::debug!(error = %err, "parse failed");
      return Err(err);
    }
  };

  let raw_comments = out.lexer.comments();
  let comments: Vec<Comment> = raw_comments
    .iter()
    .map(|c| Comment::from_raw(c, &out.lines, options.range, options.loc))
    .collect();
  if let Some(handler) = out.dispatch.into_comment_handler() {
    let attached = handler.attach(raw_comments);
    let mut writer = CommentWriter::new(&comments, attached);
    program.drive_mut(&mut writer);
  };
  if options.tokens {
    program.stx.tokens = Some(tokenize::entries_from_parser(
      &out.tokens,
      &out.lines,
      options.range,
      options.loc,
    ));
  };
  if options.tolerant {
    program.stx.errors = Some(
      out
        .errors
        .errors()
        .iter()
        .map(|e| e.to_parse_error(&out.lines))
        .collect(),
    );
  };
  tracing::debug!(
    statements = program.stx.body.len(),
    comments = comments.len(),
    errors = out.errors.len(),
    "parsed program"
  );
  if options.comment {
    program.stx.comments = Some(comments);
  };
  Ok(program)
}

/// Parses `source` as a module, whatever `options.source_type` says.
pub fn parse_module<'a>(
  source: &'a str,
  options: &ParseOptions,
  visitor: Option<&'a mut dyn NodeVisitor>,
) -> Result<Node<Program>, ParseError> {
  let options = ParseOptions {
    source_type: SourceType::Module,
    ..options.clone()
  };
  parse(source, &options, visitor)
}

/// Parses `source` as a script, whatever `options.source_type` says.
pub fn parse_script<'a>(
  source: &'a str,
  options: &ParseOptions,
  visitor: Option<&'a mut dyn NodeVisitor>,
) -> Result<Node<Program>, ParseError> {
  let options = ParseOptions {
    source_type: SourceType::Script,
    ..options.clone()
  };
  parse(source, &options, visitor)
}

/// Scans `source` into tokens without parsing it.
pub fn tokenize(
  source: &str,
  options: &TokenizeOptions,
  transform: Option<&mut dyn FnMut(TokenEntry) -> TokenEntry>,
) -> Result<Tokens, ParseError> {
  let span = tracing::debug_span!(
    "tokenize",
    len = source.len(),
    tolerant = options.tolerant
  );
  let _guard = span.enter();
  let tokens = tokenize::tokenize_source(source, options, transform)?;
  tracing::debug!(
    tokens = tokens.tokens.len(),
    errors = tokens.errors.as_ref().map_or(0, |e| e.len()),
    "tokenized"
  );
  Ok(tokens)
}

/// Scans `source` and splits the content of its string and template literals into words and markup.
pub fn tokenize_c(
  source: &str,
  options: &TokenizeOptions,
  classify_options: &ClassifyOptions,
  transform: Option<&mut dyn FnMut(&TokenEntry) -> Option<String>>,
) -> Result<ClassifiedTokens, ParseError> {
  let span = tracing::debug_span!(
    "tokenize_c",
    len = source.len(),
    policy = ?classify_options.policy
  );
  let _guard = span.enter();
  let tokens = tokenize::tokenize_source(source, options, None)?;
  let classified = classify::classify(&tokens.tokens, classify_options, transform);
  tracing::debug!(
    words = classified.tokens.len(),
    markup = classified.html_tokens.len(),
    "classified literals"
  );
  Ok(classified)
}
