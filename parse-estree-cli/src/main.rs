use anyhow::Context;
use anyhow::Result;
use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use parse_estree::error::ParseError;
use parse_estree::options::ClassifyOptions;
use parse_estree::options::NonLiteralPolicy;
use parse_estree::options::ParseOptions;
use parse_estree::options::SourceType;
use parse_estree::options::TokenizeOptions;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::stdin;
use std::io::stdout;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about = "Parse JavaScript into ESTree JSON")]
struct Cli {
  /// Log more; repeat for more detail.
  #[arg(short, long, global = true, action = ArgAction::Count)]
  verbose: u8,

  /// Write logs to stderr as JSON lines.
  #[arg(long, global = true)]
  log_json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Parse a script or module and print its syntax tree.
  Parse(ParseArgs),
  /// Print the tokens of the source.
  Tokenize(TokenizeArgs),
  /// Print the words and markup found in string and template literals.
  Classify(ClassifyArgs),
}

#[derive(Args, Debug)]
struct Input {
  /// Source file; reads stdin when omitted.
  file: Option<PathBuf>,

  /// Pretty-print the JSON output.
  #[arg(long)]
  pretty: bool,
}

#[derive(Args, Debug)]
struct ParseArgs {
  #[command(flatten)]
  input: Input,

  /// Options as a JSON object, e.g. '{"jsx":true,"range":true}'. Flags below are applied on top.
  #[arg(long)]
  options: Option<String>,

  /// Parse as a module.
  #[arg(long)]
  module: bool,

  #[arg(long)]
  jsx: bool,

  /// Record errors in the output and keep going.
  #[arg(long)]
  tolerant: bool,

  /// Collect comments into `comments`.
  #[arg(long)]
  comment: bool,

  /// Attach comments to the nodes around them.
  #[arg(long)]
  attach_comment: bool,

  /// Collect tokens into `tokens`.
  #[arg(long)]
  tokens: bool,

  #[arg(long)]
  range: bool,

  #[arg(long)]
  loc: bool,
}

#[derive(Args, Debug)]
struct TokenizeArgs {
  #[command(flatten)]
  input: Input,

  /// Options as a JSON object. Flags below are applied on top.
  #[arg(long)]
  options: Option<String>,

  /// Include comments in the token list.
  #[arg(long)]
  comment: bool,

  #[arg(long)]
  tolerant: bool,

  #[arg(long)]
  range: bool,

  #[arg(long)]
  loc: bool,
}

#[derive(Args, Debug)]
struct ClassifyArgs {
  #[command(flatten)]
  input: Input,

  /// Stop at the first token that is neither an identifier nor a literal.
  #[arg(long)]
  halt: bool,

  /// Strip a leading `.` or `#` from each word.
  #[arg(long)]
  strip_selector_prefix: bool,

  /// Skip over tokens that cannot be scanned.
  #[arg(long)]
  tolerant: bool,
}

fn init_tracing(verbose: u8, json: bool) {
  let level = match verbose {
    0 => Level::WARN,
    1 => Level::INFO,
    2 => Level::DEBUG,
    _ => Level::TRACE,
  };
  let builder = tracing_subscriber::fmt()
    .with_max_level(level)
    .with_writer(std::io::stderr)
    .with_ansi(false);
  let _ = if json {
    builder.json().try_init()
  } else {
    builder.try_init()
  };
}

fn options_from_json<T: DeserializeOwned + Default>(raw: Option<&str>) -> Result<T> {
  match raw {
    Some(raw) => serde_json::from_str(raw).context("invalid --options JSON"),
    None => Ok(T::default()),
  }
}

impl Input {
  /// Returns a display name for diagnostics and the source text.
  fn read(&self) -> Result<(String, String)> {
    match &self.file {
      Some(path) => {
        let source = std::fs::read_to_string(path)
          .with_context(|| format!("failed to read {}", path.display()))?;
        Ok((path.display().to_string(), source))
      }
      None => {
        let mut source = String::new();
        stdin()
          .read_to_string(&mut source)
          .context("failed to read stdin")?;
        Ok(("<stdin>".to_string(), source))
      }
    }
  }

  fn write<T: Serialize>(&self, value: &T) -> Result<()> {
    let mut out = stdout().lock();
    if self.pretty {
      serde_json::to_writer_pretty(&mut out, value)?;
    } else {
      serde_json::to_writer(&mut out, value)?;
    };
    writeln!(out)?;
    Ok(())
  }
}

fn report(name: &str, err: &ParseError) -> ExitCode {
  eprintln!("{}:{}:{}: {}", name, err.line, err.column, err.description);
  ExitCode::from(1)
}

fn run_parse(args: ParseArgs) -> Result<ExitCode> {
  let mut options: ParseOptions = options_from_json(args.options.as_deref())?;
  if args.module {
    options.source_type = SourceType::Module;
  };
  options.jsx |= args.jsx;
  options.tolerant |= args.tolerant;
  options.comment |= args.comment;
  options.attach_comment |= args.attach_comment;
  options.tokens |= args.tokens;
  options.range |= args.range;
  options.loc |= args.loc;

  let (name, source) = args.input.read()?;
  tracing::info!(file = %name, ?options, "parsing");
  match parse_estree::parse(&source, &options, None) {
    Ok(program) => {
      args.input.write(&program)?;
      Ok(ExitCode::SUCCESS)
    }
    Err(err) => Ok(report(&name, &err)),
  }
}

fn run_tokenize(args: TokenizeArgs) -> Result<ExitCode> {
  let mut options: TokenizeOptions = options_from_json(args.options.as_deref())?;
  options.comment |= args.comment;
  options.tolerant |= args.tolerant;
  options.range |= args.range;
  options.loc |= args.loc;

  let (name, source) = args.input.read()?;
  tracing::info!(file = %name, ?options, "tokenizing");
  match parse_estree::tokenize(&source, &options, None) {
    Ok(tokens) => {
      args.input.write(&tokens)?;
      Ok(ExitCode::SUCCESS)
    }
    Err(err) => Ok(report(&name, &err)),
  }
}

fn run_classify(args: ClassifyArgs) -> Result<ExitCode> {
  let options = TokenizeOptions {
    tolerant: args.tolerant,
    ..TokenizeOptions::default()
  };
  let classify_options = ClassifyOptions {
    policy: if args.halt {
      NonLiteralPolicy::Halt
    } else {
      NonLiteralPolicy::Skip
    },
    strip_selector_prefix: args.strip_selector_prefix,
  };

  let (name, source) = args.input.read()?;
  tracing::info!(file = %name, policy = ?classify_options.policy, "classifying");
  match parse_estree::tokenize_c(&source, &options, &classify_options, None) {
    Ok(classified) => {
      args.input.write(&classified)?;
      Ok(ExitCode::SUCCESS)
    }
    Err(err) => Ok(report(&name, &err)),
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose, cli.log_json);
  let res = match cli.command {
    Command::Parse(args) => run_parse(args),
    Command::Tokenize(args) => run_tokenize(args),
    Command::Classify(args) => run_classify(args),
  };
  match res {
    Ok(code) => code,
    Err(err) => {
      eprintln!("{err:#}");
      ExitCode::from(2)
    }
  }
}
