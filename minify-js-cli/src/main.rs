use clap::Parser;
use emit_js::EmitMode;
use emit_js::EmitOptions;
use minify_js::minify;
use minify_js::MinifyOptions;
use minify_js::SqueezeOptions;
use parse_js::parse::ParseOptions;
use parse_js::parse_with_options;
use std::fs::File;
use std::io::stdin;
use std::io::stdout;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use symbol_js::mangle::MangleOptions;
use tracing::debug;
use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "minify-js", about = "Compact JavaScript minifier")]
struct Cli {
  /// File to minify; omit for stdin.
  input: Option<PathBuf>,

  /// Output destination; omit for stdout.
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Write indented, readable output instead of compact output.
  #[arg(short, long)]
  beautify: bool,

  /// Spaces per indentation level when beautifying.
  #[arg(long, default_value_t = 4, value_name = "N")]
  indent: usize,

  /// Columns every beautified line starts at.
  #[arg(long, default_value_t = 0, value_name = "N")]
  indent_start: usize,

  /// Quote every object literal key.
  #[arg(long)]
  quote_keys: bool,

  /// Keep all identifier names.
  #[arg(long)]
  no_mangle: bool,

  /// Also rename names declared at the top level.
  #[arg(long, conflicts_with = "no_mangle")]
  mangle_toplevel: bool,

  /// Names that are never renamed. May be repeated.
  #[arg(long, value_name = "NAME")]
  reserved: Vec<String>,

  /// Skip tree rewrites such as constant folding and `if` collapsing.
  #[arg(long)]
  no_squeeze: bool,

  /// Require explicit semicolons instead of inserting them automatically.
  #[arg(long)]
  strict_semicolons: bool,

  /// Print the parsed syntax tree as JSON instead of code.
  #[arg(long)]
  ast: bool,

  /// Log pipeline stages to stderr. Repeat for more detail; `RUST_LOG` also applies.
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,

  /// Write logs as JSON lines.
  #[arg(long)]
  log_json: bool,
}

impl Cli {
  fn minify_options(&self) -> MinifyOptions {
    let mode = if self.beautify {
      EmitMode::Beautified
    } else {
      EmitMode::Minified
    };
    MinifyOptions {
      parse: self.parse_options(),
      mangle: (!self.no_mangle).then(|| MangleOptions {
        include_toplevel: self.mangle_toplevel,
        except: self.reserved.clone(),
      }),
      squeeze: (!self.no_squeeze).then(SqueezeOptions::default),
      emit: EmitOptions {
        mode,
        indent_start: self.indent_start,
        indent_width: self.indent,
        quote_keys: self.quote_keys,
      },
    }
  }

  fn parse_options(&self) -> ParseOptions {
    ParseOptions {
      strict_semicolons: self.strict_semicolons,
      ..ParseOptions::default()
    }
  }
}

fn init_tracing(verbosity: u8, json: bool) {
  let level = match verbosity {
    0 => return,
    1 => Level::DEBUG,
    _ => Level::TRACE,
  };
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));
  let subscriber = tracing_subscriber::registry().with(filter);
  // Ignore the error if a subscriber is already installed.
  let _ = if json {
    subscriber
      .with(fmt::layer().json().with_current_span(true).with_writer(std::io::stderr))
      .try_init()
  } else {
    subscriber
      .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
      .try_init()
  };
}

fn exit_with_error(message: impl std::fmt::Display) -> ! {
  eprintln!("minify-js: {message}");
  process::exit(1);
}

fn read_input(path: Option<&PathBuf>) -> Vec<u8> {
  let mut input = Vec::new();
  let result = match path {
    Some(p) => File::open(p)
      .and_then(|mut f| f.read_to_end(&mut input))
      .map_err(|err| format!("failed to read {}: {err}", p.display())),
    None => stdin()
      .read_to_end(&mut input)
      .map_err(|err| format!("failed to read stdin: {err}")),
  };
  if let Err(message) = result {
    exit_with_error(message);
  };
  input
}

fn dump_ast(source: &[u8], opts: ParseOptions) -> Result<Vec<u8>, String> {
  let source = std::str::from_utf8(source).map_err(|err| format!("source is not valid UTF-8: {err}"))?;
  let top = parse_with_options(source, opts).map_err(|err| format!("syntax error: {err}"))?;
  let mut json = serde_json::to_vec_pretty(&top).map_err(|err| err.to_string())?;
  json.push(b'\n');
  Ok(json)
}

fn main() {
  let args = Cli::parse();
  init_tracing(args.verbose, args.log_json);
  debug!(?args, "starting");

  let input = read_input(args.input.as_ref());
  let output = if args.ast {
    dump_ast(&input, args.parse_options()).unwrap_or_else(|message| exit_with_error(message))
  } else {
    let mut output = Vec::new();
    if let Err(err) = minify(&input, &args.minify_options(), &mut output) {
      exit_with_error(err);
    };
    output
  };

  let write_result = match args.output.as_ref() {
    Some(p) => File::create(p)
      .and_then(|mut file| file.write_all(&output))
      .map_err(|err| format!("failed to write {}: {err}", p.display())),
    None => stdout()
      .write_all(&output)
      .map_err(|err| format!("failed to write output: {err}")),
  };
  if let Err(message) = write_result {
    exit_with_error(message);
  };
}
